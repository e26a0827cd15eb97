//! Interactive REPL module
//!
//! Provides a line-editor based interface for routing requests one at a
//! time, with a pinned-tool override and a session result list.

mod repl;

pub use repl::{ReplCommand, ToolRepl};
