//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod progress;
pub mod tool_call_logger;
pub mod tool_executor;
pub mod tool_handler;
