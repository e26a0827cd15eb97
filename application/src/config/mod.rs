//! Application-level configuration.
//!
//! - [`RoutingParams`]: how the orchestrator picks and prepares a tool

pub mod routing_params;

pub use routing_params::RoutingParams;
