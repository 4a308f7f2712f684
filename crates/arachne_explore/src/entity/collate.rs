//! Display-label ordering.
//!
//! Labels are compared on their word characters only. Base letters decide
//! first, then accents, then case (lowercase before uppercase).

use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\W+").expect("valid regex"));

/// Removes every non-word character from `label`.
pub fn strip_non_word(label: &str) -> Cow<'_, str> {
    NON_WORD.replace_all(label, "")
}

/// Sort key for a display label.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct LabelKey {
    base: String,
    accents: String,
    case: String,
}

impl LabelKey {
    /// Computes the key for `label`.
    pub fn new(label: &str) -> Self {
        let stripped = strip_non_word(label);
        let decomposed: String = stripped.nfd().collect();

        let base = decomposed
            .chars()
            .filter(|c| !is_combining_mark(*c))
            .flat_map(char::to_lowercase)
            .collect();
        let accents = decomposed.chars().flat_map(char::to_lowercase).collect();
        // Swapping case makes lowercase sort ahead of uppercase.
        let mut case = String::with_capacity(decomposed.len());
        for c in decomposed.chars() {
            if c.is_uppercase() {
                case.extend(c.to_lowercase());
            } else {
                case.extend(c.to_uppercase());
            }
        }

        Self {
            base,
            accents,
            case,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_non_word() {
        assert_eq!(strip_non_word("\"Heroes\" (live)"), "Heroeslive");
        assert_eq!(strip_non_word("Don't Stop Me Now"), "DontStopMeNow");
        assert_eq!(strip_non_word("Café_2"), "Café_2");
    }

    #[test]
    fn test_case_insensitive() {
        assert!(LabelKey::new("apple") < LabelKey::new("Banana"));
        assert!(LabelKey::new("Apple") < LabelKey::new("banana"));
    }

    #[test]
    fn test_lowercase_before_uppercase() {
        assert!(LabelKey::new("queen") < LabelKey::new("Queen"));
    }

    #[test]
    fn test_accents_after_base_letters() {
        assert!(LabelKey::new("cote") < LabelKey::new("côte"));
        assert!(LabelKey::new("côte") < LabelKey::new("cotf"));
        assert!(LabelKey::new("Émile") < LabelKey::new("Fred"));
    }

    #[test]
    fn test_punctuation_ignored() {
        assert_eq!(LabelKey::new("A-ha"), LabelKey::new("Aha"));
        assert!(LabelKey::new("\"Zebra\"") > LabelKey::new("Yak"));
    }
}
