//! Topic-key normalization.
//!
//! The merge key is the single place where "are these two observations the
//! same topic?" is decided, so it lives here as a documented, independently
//! tested function rather than being implied by map insertion.

/// Normalize a raw topic string to its merge key.
///
/// Trims surrounding whitespace and case-folds via Unicode lowercasing.
/// Two raw topics differing only by case or surrounding whitespace map to
/// the same key and therefore merge into one trend record.
#[must_use]
pub fn normalize_topic_key(topic: &str) -> String {
    topic.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases() {
        assert_eq!(normalize_topic_key("AI Tools"), "ai tools");
    }

    #[test]
    fn trims_surrounding_whitespace() {
        assert_eq!(normalize_topic_key("  ai tools \t"), "ai tools");
    }

    #[test]
    fn interior_whitespace_is_preserved() {
        assert_eq!(normalize_topic_key("ai  tools"), "ai  tools");
    }

    #[test]
    fn case_and_whitespace_variants_share_a_key() {
        let variants = ["AI Tools", "ai tools", " Ai ToOlS ", "AI TOOLS"];
        let keys: Vec<String> = variants.iter().map(|v| normalize_topic_key(v)).collect();
        assert!(keys.iter().all(|k| k == "ai tools"), "keys: {keys:?}");
    }

    #[test]
    fn non_ascii_casefold() {
        assert_eq!(normalize_topic_key("Café Trends"), "café trends");
    }
}
