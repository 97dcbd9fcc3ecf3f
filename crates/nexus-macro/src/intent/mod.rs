//! Intent detection from voice transcripts.
//!
//! Resolves transcripts to local macro tags and extracts clock times for
//! schedule requests.

pub mod patterns;
pub mod time_parser;

pub use patterns::{IntentClassifier, IntentMatch, KeywordRule};
pub use time_parser::{extract_clock_time, format_clock, parse_clock_time};
