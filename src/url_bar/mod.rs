//! Search bar input classification.

pub mod parser;

pub use parser::{build_url, is_likely_url, parse_input, UrlBarInput};
