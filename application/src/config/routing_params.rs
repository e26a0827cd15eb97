//! Routing parameters: orchestrator control.
//!
//! [`RoutingParams`] groups the static parameters that control
//! [`ExecuteToolCallUseCase`](crate::use_cases::execute_tool_call::ExecuteToolCallUseCase).

use toolrouter_domain::{ExtractionDefaults, ToolId};

/// Orchestrator control parameters.
#[derive(Debug, Clone)]
pub struct RoutingParams {
    /// Tool used when no override is given and nothing scores above zero.
    pub default_tool: ToolId,
    /// Fallbacks for fields the input leaves unspecified.
    pub extraction: ExtractionDefaults,
}

impl Default for RoutingParams {
    fn default() -> Self {
        Self {
            default_tool: ToolId::Search,
            extraction: ExtractionDefaults::default(),
        }
    }
}

impl RoutingParams {
    // ==================== Builder Methods ====================

    pub fn with_default_tool(mut self, tool: ToolId) -> Self {
        self.default_tool = tool;
        self
    }

    pub fn with_extraction_defaults(mut self, defaults: ExtractionDefaults) -> Self {
        self.extraction = defaults;
        self
    }
}
