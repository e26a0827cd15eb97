//! Pattern extraction: pulls structured values out of free-form requests.
//!
//! Every extractor is a pure function of its input and never mutates it.
//!
//! - [`sanitizer`]: payload normalization shared by the other extractors
//! - [`qr`]: QR payload fallback chain
//! - [`credentials`]: login key/value and compact-idiom parsing
//! - [`math`]: natural-language arithmetic rewriting
//! - [`text`]: city, translation, search query and palette model

pub mod credentials;
pub mod math;
pub mod qr;
pub mod sanitizer;
pub mod text;

pub use credentials::{ParsedCredentials, parse_credentials};
pub use math::{evaluate_natural, extract_math_expression, preprocess_expression};
pub use qr::extract_qr_payload;
pub use sanitizer::sanitize;
pub use text::{Language, extract_city, extract_palette_model, extract_search_query, extract_translation};
