//! Intent scoring: guesses which tool a free-form request wants.
//!
//! ```text
//! input ──▶ keyword hits (substring, case-insensitive)
//!       ──▶ + structural boosters (digits/operators, % of, URL, city, credentials)
//!       ──▶ IntentScore ──▶ top() ──▶ Option<ToolId>
//! ```
//!
//! The keyword and booster tables live in [`tables`] as plain data.

pub mod scorer;
pub mod tables;

pub use scorer::{IntentScore, IntentScorer};
