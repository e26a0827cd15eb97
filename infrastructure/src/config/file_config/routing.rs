//! Routing configuration from TOML (`[routing]` section)

use serde::{Deserialize, Serialize};
use toolrouter_domain::ToolId;

/// Raw routing configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRoutingConfig {
    /// Tool used when intent scoring finds nothing
    pub default_tool: String,
}

impl Default for FileRoutingConfig {
    fn default() -> Self {
        Self {
            default_tool: ToolId::Search.as_str().to_string(),
        }
    }
}

impl FileRoutingConfig {
    pub fn parse_default_tool(&self) -> Result<ToolId, String> {
        self.default_tool.parse()
    }
}
