//! Heuristic strength classification.

use crate::charset::CharClass;
use std::fmt;

const MEDIUM_LENGTH: usize = 8;
const LONG_LENGTH: usize = 12;

const MEDIUM_SCORE: u8 = 3;
const STRONG_SCORE: u8 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StrengthLevel {
    Weak,
    Medium,
    Strong,
}

impl StrengthLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            StrengthLevel::Weak => "Weak",
            StrengthLevel::Medium => "Medium",
            StrengthLevel::Strong => "Strong",
        }
    }
}

impl fmt::Display for StrengthLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scores a password from 0 to 6.
///
/// One point each for reaching 8 and 12 characters, and one point for each
/// of lowercase, uppercase, digit and symbol being present.
pub fn score(password: &str) -> u8 {
    let length = password.chars().count();

    let mut score = 0;
    if length >= MEDIUM_LENGTH {
        score += 1;
    }
    if length >= LONG_LENGTH {
        score += 1;
    }

    for class in [
        CharClass::Lowercase,
        CharClass::Uppercase,
        CharClass::Digit,
        CharClass::Symbol,
    ] {
        if password.chars().any(|c| class.contains(c)) {
            score += 1;
        }
    }

    score
}

pub fn classify(password: &str) -> StrengthLevel {
    match score(password) {
        s if s < MEDIUM_SCORE => StrengthLevel::Weak,
        s if s < STRONG_SCORE => StrengthLevel::Medium,
        _ => StrengthLevel::Strong,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_lowercase_is_weak() {
        assert_eq!(score("ab"), 1);
        assert_eq!(classify("ab"), StrengthLevel::Weak);
    }

    #[test]
    fn test_eight_lowercase_is_weak() {
        assert_eq!(score("abcdefgh"), 2);
        assert_eq!(classify("abcdefgh"), StrengthLevel::Weak);
    }

    #[test]
    fn test_mixed_nine_chars_is_medium() {
        assert_eq!(score("Abcdefgh1"), 4);
        assert_eq!(classify("Abcdefgh1"), StrengthLevel::Medium);
    }

    #[test]
    fn test_full_twelve_chars_is_strong() {
        assert_eq!(score("Abcdefgh123!"), 6);
        assert_eq!(classify("Abcdefgh123!"), StrengthLevel::Strong);
    }

    #[test]
    fn test_empty_password() {
        assert_eq!(score(""), 0);
        assert_eq!(classify(""), StrengthLevel::Weak);
    }

    #[test]
    fn test_score_thresholds() {
        let cases = vec![
            ("aB1", 3, StrengthLevel::Medium),
            ("aB1!", 4, StrengthLevel::Medium),
            ("aB1!aB1!", 5, StrengthLevel::Strong),
            ("12345678", 2, StrengthLevel::Weak),
            ("123456789012", 3, StrengthLevel::Medium),
        ];

        for (password, expected_score, expected_level) in cases {
            assert_eq!(
                score(password),
                expected_score,
                "Unexpected score for \"{}\"",
                password
            );
            assert_eq!(classify(password), expected_level);
        }
    }

    #[test]
    fn test_non_ascii_letters_do_not_count() {
        assert_eq!(score("ééé"), 0);
        assert_eq!(score("Ωmega"), 1);
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // 8 two-byte characters
        assert_eq!(score("éééééééé"), 1);
    }

    #[test]
    fn test_classify_is_deterministic() {
        for password in ["ab", "Abcdefgh1", "Abcdefgh123!", "xY9$"] {
            assert_eq!(classify(password), classify(password));
        }
    }

    #[test]
    fn test_level_display() {
        assert_eq!(StrengthLevel::Weak.to_string(), "Weak");
        assert_eq!(StrengthLevel::Medium.to_string(), "Medium");
        assert_eq!(StrengthLevel::Strong.to_string(), "Strong");
        assert!(StrengthLevel::Weak < StrengthLevel::Strong);
    }
}
