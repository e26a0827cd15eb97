//! Tool handler port
//!
//! One implementation per capability. Handlers receive already-extracted
//! arguments and perform the actual work (usually an HTTP request).

use async_trait::async_trait;
use toolrouter_domain::{ToolArguments, ToolDefinition, ToolError, ToolId, ToolOutput};
use tokio_util::sync::CancellationToken;

/// A single capability: schema plus async invocation.
///
/// Adding a capability means adding one handler and registering it; the
/// orchestrator does not change.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    fn id(&self) -> ToolId;

    /// Schema shown to users and checked by the argument validator
    fn definition(&self) -> ToolDefinition;

    /// Run the tool.
    ///
    /// Implementations must return [`ToolError::Cancelled`] promptly once
    /// `cancel` fires.
    async fn call(
        &self,
        args: &ToolArguments,
        cancel: &CancellationToken,
    ) -> Result<ToolOutput, ToolError>;
}
