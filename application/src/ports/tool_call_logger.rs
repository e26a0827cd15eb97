//! Port for structured tool-call logging.
//!
//! Records every [`ToolCallResult`] to a machine-readable log (JSONL). This
//! is separate from `tracing` diagnostics, which stay human-oriented.

use toolrouter_domain::ToolCallResult;

/// Port for logging finished tool calls.
///
/// `log` is synchronous and non-fallible; write failures are the adapter's
/// concern and never disturb the call that produced the result.
pub trait ToolCallLogger: Send + Sync {
    fn log(&self, result: &ToolCallResult);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoToolCallLogger;

impl ToolCallLogger for NoToolCallLogger {
    fn log(&self, _result: &ToolCallResult) {}
}
