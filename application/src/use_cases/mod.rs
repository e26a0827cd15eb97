//! Use cases (application services)

pub mod execute_tool_call;
