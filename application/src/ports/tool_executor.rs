//! Tool Executor port
//!
//! Defines how the application layer dispatches extracted arguments to a
//! registered tool.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use toolrouter_domain::{ToolArguments, ToolDefinition, ToolError, ToolId, ToolOutput, ToolSpec};

/// Port for tool execution
///
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait ToolExecutorPort: Send + Sync {
    /// Get the specification of all available tools
    fn tool_spec(&self) -> &ToolSpec;

    /// Check if a tool is available
    fn has_tool(&self, id: ToolId) -> bool {
        self.tool_spec().contains(id)
    }

    /// Get the definition of a specific tool
    fn get_tool(&self, id: ToolId) -> Option<&ToolDefinition> {
        self.tool_spec().get(id)
    }

    /// Ids of all available tools, in priority order
    fn available_tools(&self) -> Vec<ToolId> {
        self.tool_spec().ids().collect()
    }

    /// Execute the tool the arguments belong to.
    ///
    /// An unregistered tool yields `ServiceUnavailable`.
    async fn execute(
        &self,
        args: &ToolArguments,
        cancel: &CancellationToken,
    ) -> Result<ToolOutput, ToolError>;
}
