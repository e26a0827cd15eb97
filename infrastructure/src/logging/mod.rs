//! Logging infrastructure: structured tool-call result logging.
//!
//! Provides [`JsonlToolCallLogger`], a JSONL file writer that implements
//! the [`ToolCallLogger`](toolrouter_application::ToolCallLogger) port.

mod jsonl_logger;

pub use jsonl_logger::JsonlToolCallLogger;
