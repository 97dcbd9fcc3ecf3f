//! Keyword-based intent classification.
//!
//! Maps a transcript to one of the fixed intent tags by testing ordered
//! keyword rules against the lower-cased text. The first matching rule wins.

use crate::types::IntentTag;

/// One keyword group linked to an intent tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordRule {
    pub keywords: Vec<String>,
    pub tag: IntentTag,
}

impl KeywordRule {
    pub fn new(keywords: &[&str], tag: IntentTag) -> Self {
        Self {
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
            tag,
        }
    }

    /// Keyword of this rule found in `lowered`, if any.
    fn find_in(&self, lowered: &str) -> Option<&str> {
        self.keywords
            .iter()
            .find(|k| !k.is_empty() && lowered.contains(k.as_str()))
            .map(String::as_str)
    }
}

/// A classification hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntentMatch {
    pub tag: IntentTag,
    pub keyword: String,
}

/// Ordered rule list, built once and reused.
#[derive(Debug, Clone)]
pub struct IntentClassifier {
    rules: Vec<KeywordRule>,
}

impl Default for IntentClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl IntentClassifier {
    /// Classifier with the built-in macro vocabulary.
    pub fn new() -> Self {
        Self::with_rules(vec![
            KeywordRule::new(&["login", "vault"], IntentTag::Login),
            KeywordRule::new(&["harvest", "clone"], IntentTag::Harvest),
            KeywordRule::new(&["search", "google"], IntentTag::Search),
            KeywordRule::new(&["rotate", "email"], IntentTag::Rotate),
            KeywordRule::new(&["lockdown", "security"], IntentTag::Lockdown),
            KeywordRule::new(&["record", "capture"], IntentTag::Record),
            KeywordRule::new(&["vm", "windows"], IntentTag::VmBridge),
            KeywordRule::new(&["draft", "write"], IntentTag::Draft),
            KeywordRule::new(&["summarize", "read"], IntentTag::Summarize),
            KeywordRule::new(&["schedule"], IntentTag::Schedule),
        ])
    }

    /// Classifier over a custom rule list. Declaration order breaks ties.
    pub fn with_rules(rules: Vec<KeywordRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[KeywordRule] {
        &self.rules
    }

    /// Tag of the first rule with a keyword contained in `text`.
    pub fn classify(&self, text: &str) -> Option<IntentTag> {
        self.detect(text).map(|m| m.tag)
    }

    /// Like [`classify`](Self::classify), also reporting the keyword that hit.
    pub fn detect(&self, text: &str) -> Option<IntentMatch> {
        let lowered = text.to_lowercase();
        self.rules.iter().find_map(|rule| {
            rule.find_in(&lowered).map(|keyword| IntentMatch {
                tag: rule.tag,
                keyword: keyword.to_string(),
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> IntentClassifier {
        IntentClassifier::new()
    }

    // =====================================================================
    // One keyword per category
    // =====================================================================

    #[test]
    fn test_each_keyword_maps_to_its_tag() {
        let cases = [
            ("open the login page", IntentTag::Login),
            ("unlock the vault", IntentTag::Login),
            ("harvest that repo", IntentTag::Harvest),
            ("clone it", IntentTag::Harvest),
            ("search for cats", IntentTag::Search),
            ("google the news", IntentTag::Search),
            ("rotate now", IntentTag::Rotate),
            ("check email", IntentTag::Rotate),
            ("full lockdown", IntentTag::Lockdown),
            ("security sweep", IntentTag::Lockdown),
            ("record this", IntentTag::Record),
            ("capture screen", IntentTag::Record),
            ("boot the vm", IntentTag::VmBridge),
            ("switch to windows", IntentTag::VmBridge),
            ("draft a reply", IntentTag::Draft),
            ("write a note", IntentTag::Draft),
            ("summarize the thread", IntentTag::Summarize),
            ("read it out", IntentTag::Summarize),
            ("schedule it", IntentTag::Schedule),
        ];

        for (text, expected) in cases {
            assert_eq!(classifier().classify(text), Some(expected), "text: {}", text);
        }
    }

    #[test]
    fn test_no_keyword_returns_none() {
        assert_eq!(classifier().classify("tell me a joke"), None);
        assert_eq!(classifier().classify(""), None);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(classifier().classify("LOGIN NOW"), Some(IntentTag::Login));
        assert_eq!(classifier().classify("Hey Nexus, Rotate"), Some(IntentTag::Rotate));
    }

    // =====================================================================
    // Ordering
    // =====================================================================

    #[test]
    fn test_earlier_category_wins() {
        assert_eq!(classifier().classify("login and search"), Some(IntentTag::Login));
        assert_eq!(classifier().classify("search then login"), Some(IntentTag::Login));
        assert_eq!(
            classifier().classify("write an email"),
            Some(IntentTag::Rotate)
        );
    }

    #[test]
    fn test_schedule_is_last_resort() {
        assert_eq!(
            classifier().classify("schedule a search"),
            Some(IntentTag::Search)
        );
        assert_eq!(
            classifier().classify("nexus core schedule 09:15 please"),
            Some(IntentTag::Schedule)
        );
    }

    #[test]
    fn test_substring_matching_is_not_word_bounded() {
        // "read" inside "ready"
        assert_eq!(classifier().classify("are you ready"), Some(IntentTag::Summarize));
    }

    #[test]
    fn test_detect_reports_keyword() {
        let hit = classifier().detect("hey nexus, rotate email").unwrap();
        assert_eq!(hit.tag, IntentTag::Rotate);
        assert_eq!(hit.keyword, "rotate");
    }

    // =====================================================================
    // Custom rules
    // =====================================================================

    #[test]
    fn test_custom_rules_respect_declaration_order() {
        let c = IntentClassifier::with_rules(vec![
            KeywordRule::new(&["Deploy"], IntentTag::Record),
            KeywordRule::new(&["deploy", "ship"], IntentTag::Draft),
        ]);
        assert_eq!(c.classify("deploy it"), Some(IntentTag::Record));
        assert_eq!(c.classify("ship it"), Some(IntentTag::Draft));
        assert_eq!(c.classify("schedule it"), None);
    }

    #[test]
    fn test_empty_keyword_never_matches() {
        let c = IntentClassifier::with_rules(vec![KeywordRule::new(&[""], IntentTag::Login)]);
        assert_eq!(c.classify("anything"), None);
    }

    #[test]
    fn test_builtin_rule_count() {
        assert_eq!(classifier().rules().len(), 10);
        assert_eq!(classifier().rules()[9].tag, IntentTag::Schedule);
    }
}
