//! Domain layer for toolrouter
//!
//! This crate contains the routing and extraction logic, entities, and value
//! objects. It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Intent scoring
//!
//! Free-form input is scored against every tool with keyword counts plus
//! structural boosters (arithmetic, URLs, known cities, credential idioms).
//! The highest score wins; ties go to the tool earliest in [`ToolId::ALL`].
//!
//! ## Argument extraction
//!
//! Each tool declares a parameter schema. [`ToolArguments::extract`] pulls
//! typed values out of the raw text through staged fallback chains, and the
//! [`sanitize`] step normalizes whatever fragment survives.
//!
//! ## Result envelope
//!
//! Every orchestrated call yields exactly one [`ToolCallResult`], success or
//! failure, carrying a [`ToolError`] code when it failed.

pub mod config;
pub mod core;
pub mod expression;
pub mod extraction;
pub mod intent;
pub mod tool;

// Re-export commonly used types
pub use config::OutputFormat;
pub use crate::core::string::{single_line, truncate};
pub use expression::{EvalError, evaluate, format_number};
pub use extraction::{
    Language, ParsedCredentials, evaluate_natural, extract_qr_payload, parse_credentials,
    sanitize,
};
pub use intent::{IntentScore, IntentScorer};
pub use tool::{
    arguments::{ExtractionDefaults, LoginCredentials, ToolArguments},
    entities::{ToolDefinition, ToolId, ToolParameter, ToolSpec},
    traits::{ArgumentValidator, DefaultArgumentValidator},
    value_objects::{ToolCallResult, ToolError, ToolOutput},
};
