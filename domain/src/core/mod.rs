//! Helpers shared across subdomains.

pub mod string;
