//! Step-pattern compilation and keyword normalization for the Gherkin CRIF
//! generator.
//!
//! This crate has no notion of Gherkin documents, step catalogs, or CRIF; it
//! is the pure, side-effect-free bottom of the pipeline — pattern compilation
//! and keyword normalization — reused by the `gherkin-crif` crate's step
//! processor.

mod capture;
mod errors;
mod keyword;
pub mod pattern;

pub use capture::extract_captured_values;
pub use errors::{PatternError, PlaceholderErrorInfo};
pub use keyword::{
    DisplayKeyword, KeywordNormalizer, NormalizedKind, UnknownKeywordError,
};
pub use pattern::{build_regex_from_pattern, compile_pattern};
