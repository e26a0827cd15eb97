//! Configuration file loading for toolrouter
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `--config <path>` specified file
//! 2. Project root: `./toolrouter.toml` or `./.toolrouter.toml`
//! 3. XDG config: `$XDG_CONFIG_HOME/toolrouter/config.toml`
//! 4. Environment: `TOOLROUTER_<SECTION>__<KEY>`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, DEFAULT_QR_MAX_BYTES, FileConfig, FileEndpointsConfig, FileHttpConfig,
    FileLoggingConfig, FileLoginConfig, FileOutputConfig, FileQrConfig,
    FileReplConfig, FileRoutingConfig,
};
pub use loader::ConfigLoader;
