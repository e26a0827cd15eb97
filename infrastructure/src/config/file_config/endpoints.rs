//! Remote service endpoints from TOML (`[endpoints]` section)
//!
//! Every URL is overridable so deployments and tests can point the tools at
//! mirrors or mock servers.

use serde::{Deserialize, Serialize};

/// Raw endpoint configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileEndpointsConfig {
    /// Weather base URL; the city is appended as a path segment
    pub weather: String,
    pub translate: String,
    /// Encyclopedia summary base URL; the topic slug is appended
    pub encyclopedia: String,
    pub repository_search: String,
    pub echo: String,
    pub palette: String,
}

impl Default for FileEndpointsConfig {
    fn default() -> Self {
        Self {
            weather: "https://wttr.in".to_string(),
            translate: "https://translate.googleapis.com/translate_a/single".to_string(),
            encyclopedia: "https://en.wikipedia.org/api/rest_v1/page/summary".to_string(),
            repository_search: "https://api.github.com/search/repositories".to_string(),
            echo: "https://httpbin.org/get".to_string(),
            palette: "http://colormind.io/api/".to_string(),
        }
    }
}

impl FileEndpointsConfig {
    /// `(field name, url)` pairs, for validation
    pub fn entries(&self) -> [(&'static str, &str); 6] {
        [
            ("weather", self.weather.as_str()),
            ("translate", self.translate.as_str()),
            ("encyclopedia", self.encyclopedia.as_str()),
            ("repository_search", self.repository_search.as_str()),
            ("echo", self.echo.as_str()),
            ("palette", self.palette.as_str()),
        ]
    }
}
