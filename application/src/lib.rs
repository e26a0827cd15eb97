//! Application layer for toolrouter
//!
//! This crate contains the orchestrator use case, port definitions, and
//! routing configuration. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::RoutingParams;
pub use ports::{
    progress::{NoProgress, ToolCallProgress},
    tool_call_logger::{NoToolCallLogger, ToolCallLogger},
    tool_executor::ToolExecutorPort,
    tool_handler::ToolHandler,
};
pub use use_cases::execute_tool_call::{
    ExecuteToolCallInput, ExecuteToolCallUseCase, RouteDecision, RouteSource,
};
