//! Login defaults from TOML (`[login]` section)

use serde::{Deserialize, Serialize};
use toolrouter_domain::ExtractionDefaults;

/// Raw login configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoginConfig {
    /// Base URL used when the request names no site
    pub default_site: Option<String>,
    pub default_domain: Option<String>,
    pub default_auth_type: Option<String>,
}

impl Default for FileLoginConfig {
    fn default() -> Self {
        Self {
            default_site: Some("http://localhost:8080".to_string()),
            default_domain: None,
            default_auth_type: Some("0".to_string()),
        }
    }
}

impl FileLoginConfig {
    pub fn to_extraction_defaults(&self) -> ExtractionDefaults {
        ExtractionDefaults {
            login_site: self.default_site.clone(),
            login_domain: self.default_domain.clone(),
            login_auth_type: self.default_auth_type.clone(),
        }
    }
}
