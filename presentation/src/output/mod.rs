//! Output formatting for tool call results

pub mod console;
