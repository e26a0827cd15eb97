//! Progress reporting for tool calls

pub mod reporter;
