use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

/// The probability of answering a question that does not mention the bot.
pub const ADHOC_RESPONSE_CHANCE: f64 = 0.01;

static EIGHTBALL_QUESTION_REGEX: Lazy<Regex> = Lazy::new(|| {
    RegexBuilder::new(r"(?:@?eightbot|eightball:?).*\?$")
        .dot_matches_new_line(true)
        .build()
        .expect("Failed to compile eightball question regex.")
});

/// Returns true if the text is a question directed at the bot.
///
/// A question mentions `eightbot` (optionally as `@eightbot`) or `eightball` (optionally as
/// `eightball:`) somewhere before a `?` that ends the text.
///
/// Ex.
/// ```rs
/// assert!(is_eightball_question("@eightbot will it rain?"));
/// assert!(!is_eightball_question("eightbot will it rain"));
/// ```
pub fn is_eightball_question(text: &str) -> bool {
    EIGHTBALL_QUESTION_REGEX.is_match(text)
}

/// Returns true if the text looks like any question at all.
pub fn is_question(text: &str) -> bool {
    text.ends_with('?')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_plain_keyword() {
        assert!(all_are_eightball_questions(&[
            "eightbot, will it rain?",
            "eightbot?",
            "eightball will it rain?",
        ]))
    }

    #[test]
    fn test_matches_mention_and_colon_forms() {
        assert!(all_are_eightball_questions(&[
            "@eightbot will it rain?",
            "eightball: will it rain?",
            "hey @eightbot, will it rain?",
        ]))
    }

    #[test]
    fn test_matches_keyword_anywhere_before_question_mark() {
        assert!(is_eightball_question("so, eightball, is this a good idea?"))
    }

    #[test]
    fn test_matches_multiline_question() {
        assert!(is_eightball_question("eightbot\nshould I ship it?"))
    }

    #[test]
    fn test_requires_trailing_question_mark() {
        assert!(!is_eightball_question("eightbot will it rain"));
        assert!(!is_eightball_question("eightbot will it rain? maybe"));
        assert!(!is_eightball_question("eightball"))
    }

    #[test]
    fn test_requires_keyword_before_question_mark() {
        assert!(!is_eightball_question("will it rain? eightbot"));
        assert!(!is_eightball_question("random thought?"))
    }

    #[test]
    fn test_is_case_sensitive() {
        assert!(!is_eightball_question("EightBot will it rain?"));
        assert!(!is_eightball_question("EIGHTBALL: will it rain?"))
    }

    #[test]
    fn test_is_question() {
        assert!(is_question("random thought?"));
        assert!(!is_question("hello there"));
        assert!(!is_question(""))
    }

    fn all_are_eightball_questions(texts: &[&str]) -> bool {
        texts.iter().all(|text| is_eightball_question(text))
    }
}
