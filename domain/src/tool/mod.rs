//! Tool domain module
//!
//! Defines what a capability *is*, independent of how it is invoked.
//!
//! ```text
//! ┌──────────────┐    ┌───────────────┐    ┌────────────────┐
//! │ ToolSpec     │───▶│ ToolArguments │───▶│ ToolCallResult │
//! │ (schemas)    │    │ (extracted)   │    │ (envelope)     │
//! └──────────────┘    └───────────────┘    └────────────────┘
//! ```
//!
//! # Key Types
//!
//! - [`ToolId`]: closed set of capabilities, in priority order
//! - [`ToolDefinition`]: display name, description, parameter schema, example
//! - [`ToolArguments`]: typed arguments built from raw input
//! - [`ArgumentValidator`]: pure check of arguments against a definition
//! - [`ToolCallResult`]: uniform success/failure envelope
//! - [`ToolError`]: failure taxonomy with stable codes
//!
//! # Architecture
//!
//! - **Domain** (this module): definitions and extraction, no I/O
//! - **Application** (`ToolExecutorPort`, `ToolHandler`): async ports
//! - **Infrastructure** (`ToolRegistry`): HTTP-backed handlers

pub mod arguments;
pub mod entities;
pub mod traits;
pub mod value_objects;

pub use arguments::{ExtractionDefaults, LoginCredentials, ToolArguments};
pub use entities::{ToolDefinition, ToolId, ToolParameter, ToolSpec};
pub use traits::{ArgumentValidator, DefaultArgumentValidator};
pub use value_objects::{ToolCallResult, ToolError, ToolOutput};
