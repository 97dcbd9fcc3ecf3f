//! Wake-phrase gate.
//!
//! A transcript is only processed for intent when it contains one of the
//! configured phrases. Matching is a case-insensitive substring test and
//! the first phrase in declaration order wins.

use nexus_core::config::DEFAULT_WAKE_PHRASES;

/// Ordered set of wake phrases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WakePhrases {
    phrases: Vec<String>,
}

impl Default for WakePhrases {
    fn default() -> Self {
        Self::new(DEFAULT_WAKE_PHRASES.iter().map(|p| p.to_string()))
    }
}

impl WakePhrases {
    /// Normalise phrases to trimmed lower case. Blank phrases are dropped.
    pub fn new<I, S>(phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let phrases: Vec<String> = phrases
            .into_iter()
            .map(|p| p.as_ref().trim().to_lowercase())
            .filter(|p| !p.is_empty())
            .collect();
        tracing::debug!(wake_phrases = ?phrases, "Wake phrases configured");
        Self { phrases }
    }

    /// First phrase contained in `transcript`.
    pub fn detect(&self, transcript: &str) -> Option<&str> {
        let lowered = transcript.to_lowercase();
        self.phrases
            .iter()
            .find(|p| lowered.contains(p.as_str()))
            .map(String::as_str)
    }

    pub fn phrases(&self) -> &[String] {
        &self.phrases
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_phrases_in_order() {
        let wake = WakePhrases::default();
        assert_eq!(wake.phrases().len(), 7);
        assert_eq!(wake.phrases()[0], "nexus core");
    }

    #[test]
    fn test_detect_is_case_insensitive() {
        let wake = WakePhrases::default();
        assert_eq!(wake.detect("HEY NEXUS, rotate email"), Some("nexus"));
    }

    #[test]
    fn test_first_declared_phrase_wins() {
        let wake = WakePhrases::default();
        // "nexus core" is declared before "hey nexus core"
        assert_eq!(wake.detect("hey nexus core, status"), Some("nexus core"));
    }

    #[test]
    fn test_no_phrase_returns_none() {
        let wake = WakePhrases::default();
        assert_eq!(wake.detect("rotate email"), None);
        assert_eq!(wake.detect(""), None);
    }

    #[test]
    fn test_substring_inside_word_matches() {
        let wake = WakePhrases::default();
        assert_eq!(wake.detect("annexus"), Some("nexus"));
    }

    #[test]
    fn test_custom_phrases_are_normalised() {
        let wake = WakePhrases::new(["  Computer ", "", "Jarvis"]);
        assert_eq!(wake.phrases(), &["computer".to_string(), "jarvis".to_string()]);
        assert_eq!(wake.detect("ok JARVIS"), Some("jarvis"));
    }
}
