//! Progress notification port
//!
//! Defines the interface for reporting progress of an orchestrated call.

use toolrouter_domain::{IntentScore, ToolCallResult, ToolId};

/// Callback for progress updates during a tool call
///
/// Implementations live in the presentation layer (spinner, REPL, etc.)
pub trait ToolCallProgress: Send + Sync {
    /// Called once the tool is chosen. `score` is `None` for overrides.
    fn on_tool_selected(&self, _tool: ToolId, _score: Option<&IntentScore>) {}

    /// Called just before the handler is invoked
    fn on_call_started(&self, tool: ToolId, summary: &str);

    /// Called with the final envelope, success or failure
    fn on_call_finished(&self, result: &ToolCallResult);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ToolCallProgress for NoProgress {
    fn on_call_started(&self, _tool: ToolId, _summary: &str) {}
    fn on_call_finished(&self, _result: &ToolCallResult) {}
}
