//! Infrastructure layer for toolrouter
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: the tool handlers and their registry,
//! configuration file loading, and the JSONL result log.

pub mod config;
pub mod logging;
pub mod tools;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileOutputConfig,
    FileReplConfig,
};
pub use logging::JsonlToolCallLogger;
pub use tools::{CookieStore, ToolRegistry};
