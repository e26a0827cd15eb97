//! Arithmetic expression evaluation.

mod evaluator;

pub use evaluator::{EvalError, evaluate, format_number};
