//! Tool domain value objects: immutable result and error types
//!
//! These types form the **output side** of the tool-call pipeline. Every
//! orchestrated invocation produces exactly one [`ToolCallResult`], whether
//! the tool succeeded or not.
//!
//! The [`ToolError`] taxonomy tells the caller what to do next:
//!
//! | Variant | Code | Retry with new input? |
//! |---------|------|-----------------------|
//! | `ArgumentExtraction` | `ARGUMENT_EXTRACTION` | Yes, re-prompt the user |
//! | `InvalidExpression` | `INVALID_EXPRESSION` | No |
//! | `Network` | `NETWORK_ERROR` | Yes, caller decides |
//! | `ServiceUnavailable` | `SERVICE_UNAVAILABLE` | No |
//! | `Cancelled` | `CANCELLED` | No |

use super::entities::ToolId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Error raised while extracting arguments for, or invoking, a tool.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "message", rename_all = "snake_case")]
pub enum ToolError {
    /// A required argument was missing or malformed after all fallbacks.
    #[error("Could not extract arguments: {0}")]
    ArgumentExtraction(String),

    /// Arithmetic expression could not be parsed or evaluated.
    #[error("Invalid expression: {0}")]
    InvalidExpression(String),

    /// Transport-level failure (timeout, DNS, refused connection).
    #[error("Network error: {0}")]
    Network(String),

    /// The remote responded but the payload was unusable.
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Operation cancelled")]
    Cancelled,
}

impl ToolError {
    pub fn argument(message: impl Into<String>) -> Self {
        ToolError::ArgumentExtraction(message.into())
    }

    pub fn expression(message: impl Into<String>) -> Self {
        ToolError::InvalidExpression(message.into())
    }

    pub fn network(message: impl Into<String>) -> Self {
        ToolError::Network(message.into())
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        ToolError::ServiceUnavailable(message.into())
    }

    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            ToolError::ArgumentExtraction(_) => "ARGUMENT_EXTRACTION",
            ToolError::InvalidExpression(_) => "INVALID_EXPRESSION",
            ToolError::Network(_) => "NETWORK_ERROR",
            ToolError::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
            ToolError::Cancelled => "CANCELLED",
        }
    }

    /// Whether resubmitting (possibly corrected) input may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ToolError::ArgumentExtraction(_) | ToolError::Network(_)
        )
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, ToolError::Cancelled)
    }
}

/// What a tool hands back on success: formatted text plus diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOutput {
    pub text: String,
    pub metadata: BTreeMap<String, String>,
}

impl ToolOutput {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            metadata: BTreeMap::new(),
        }
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.metadata.insert(key.into(), value.to_string());
        self
    }
}

/// Uniform success/failure envelope for one orchestrated tool invocation.
///
/// Invariants upheld by the constructors:
/// - `success == false` ⇒ `output` is `None` and `error` is `Some`
/// - `success == true` ⇒ `output` is `Some` and non-empty
///
/// The fields are public for serialization, but results are never mutated
/// after the orchestrator returns them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCallResult {
    /// Opaque identifier (UUID v4)
    pub id: String,
    pub tool: ToolId,
    /// The raw input the caller submitted
    pub input: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ToolError>,
    pub success: bool,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

impl ToolCallResult {
    /// Create a successful result.
    ///
    /// An empty output is not a success; it is converted into a
    /// `ServiceUnavailable` failure so the envelope invariant holds.
    pub fn success(tool: ToolId, input: impl Into<String>, output: ToolOutput) -> Self {
        let input = input.into();
        if output.text.trim().is_empty() {
            return Self::failure(
                tool,
                input,
                ToolError::unavailable(format!("{} returned an empty result", tool)),
            )
            .with_metadata(output.metadata);
        }
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            tool,
            input,
            output: Some(output.text),
            error: None,
            success: true,
            timestamp: Utc::now(),
            metadata: output.metadata,
        }
    }

    /// Create a failed result
    pub fn failure(tool: ToolId, input: impl Into<String>, error: ToolError) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            tool,
            input: input.into(),
            output: None,
            error: Some(error),
            success: false,
            timestamp: Utc::now(),
            metadata: BTreeMap::new(),
        }
    }

    /// Merge diagnostic metadata; existing keys are kept.
    pub fn with_metadata(mut self, metadata: BTreeMap<String, String>) -> Self {
        for (key, value) in metadata {
            self.metadata.entry(key).or_insert(value);
        }
        self
    }

    pub fn with_entry(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.metadata.insert(key.into(), value.to_string());
        self
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn output(&self) -> Option<&str> {
        self.output.as_deref()
    }

    pub fn error(&self) -> Option<&ToolError> {
        self.error.as_ref()
    }

    /// Human-readable error description (failures only)
    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(|e| e.to_string())
    }
}
