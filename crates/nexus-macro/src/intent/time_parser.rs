//! Clock-time extraction and formatting.
//!
//! Pulls the first `H:MM` / `HH:MM` token out of a transcript and normalises
//! it to the zero-padded form the scheduler compares against.

use std::sync::OnceLock;

use chrono::Timelike;
use regex::Regex;

fn clock_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d{1,2}):(\d{2})").expect("Invalid clock regex"))
}

/// First clock time in `text`, normalised to `HH:MM`.
///
/// Only the first token is considered; it is rejected (returning `None`)
/// when the hour exceeds 23 or the minute exceeds 59.
pub fn extract_clock_time(text: &str) -> Option<String> {
    let caps = clock_regex().captures(text)?;
    let hour: u32 = caps.get(1)?.as_str().parse().ok()?;
    let minute: u32 = caps.get(2)?.as_str().parse().ok()?;
    normalize(hour, minute)
}

/// Validate and zero-pad a `H:MM` string.
pub fn parse_clock_time(value: &str) -> Option<String> {
    let (h, m) = value.trim().split_once(':')?;
    if h.is_empty() || h.len() > 2 || m.len() != 2 {
        return None;
    }
    if !h.bytes().all(|b| b.is_ascii_digit()) || !m.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    normalize(h.parse().ok()?, m.parse().ok()?)
}

/// `HH:MM` of the given wall-clock instant.
pub fn format_clock<T: Timelike>(now: &T) -> String {
    format!("{:02}:{:02}", now.hour(), now.minute())
}

fn normalize(hour: u32, minute: u32) -> Option<String> {
    if hour > 23 || minute > 59 {
        return None;
    }
    Some(format!("{:02}:{:02}", hour, minute))
}
