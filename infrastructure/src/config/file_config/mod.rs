//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod endpoints;
mod http;
mod logging;
mod login;
mod output;
mod qr;
mod repl;
mod routing;

pub use endpoints::FileEndpointsConfig;
pub use http::FileHttpConfig;
pub use logging::FileLoggingConfig;
pub use login::FileLoginConfig;
pub use output::FileOutputConfig;
pub use qr::{DEFAULT_QR_MAX_BYTES, FileQrConfig};
pub use repl::FileReplConfig;
pub use routing::FileRoutingConfig;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigValidationError {
    #[error("http.timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("endpoints.{0} cannot be empty")]
    EmptyEndpoint(&'static str),

    #[error("routing.default_tool: {0}")]
    UnknownDefaultTool(String),

    #[error("qr.max_bytes cannot be 0")]
    InvalidQrLimit,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Fallback tool selection
    pub routing: FileRoutingConfig,
    /// Shared HTTP client settings
    pub http: FileHttpConfig,
    /// Remote service base URLs
    pub endpoints: FileEndpointsConfig,
    /// Login fallbacks
    pub login: FileLoginConfig,
    /// QR payload limits
    pub qr: FileQrConfig,
    /// JSONL result log
    pub logging: FileLoggingConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// REPL settings
    pub repl: FileReplConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut issues = Vec::new();

        if self.http.timeout_seconds == 0 {
            issues.push(ConfigValidationError::InvalidTimeout);
        }

        for (name, url) in self.endpoints.entries() {
            if url.trim().is_empty() {
                issues.push(ConfigValidationError::EmptyEndpoint(name));
            }
        }

        if let Err(e) = self.routing.parse_default_tool() {
            issues.push(ConfigValidationError::UnknownDefaultTool(e));
        }

        if self.qr.max_bytes == 0 {
            issues.push(ConfigValidationError::InvalidQrLimit);
        }

        issues
    }
}
