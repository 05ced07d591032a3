//! Typed-answer checking

use std::sync::OnceLock;

use regex::Regex;

/// Arabic harakat and related marks (U+064B to U+065F)
fn diacritics() -> &'static Regex {
    static DIACRITICS: OnceLock<Regex> = OnceLock::new();
    DIACRITICS.get_or_init(|| Regex::new(r"[\u{064B}-\u{065F}]").expect("valid diacritics pattern"))
}

/// Strip diacritics, surrounding whitespace and case
pub fn normalize_text(text: &str) -> String {
    diacritics().replace_all(text, "").trim().to_lowercase()
}

pub fn check_answer(user_answer: &str, correct_answer: &str) -> bool {
    normalize_text(user_answer) == normalize_text(correct_answer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diacritics_are_ignored() {
        assert_eq!(normalize_text("كِتَابٌ"), "كتاب");
        assert!(check_answer("كتاب", "كِتَابٌ"));
    }

    #[test]
    fn test_case_and_whitespace_are_ignored() {
        assert!(check_answer("  Book ", "book"));
        assert!(check_answer("বই", " বই"));
        assert!(!check_answer("books", "book"));
        assert!(!check_answer("", "book"));
    }
}
