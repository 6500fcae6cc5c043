//! Word-boundary keyword scanning shared by the classifiers
//!
//! SMS bodies are short and keyword checks are hot, so these helpers scan
//! characters directly instead of compiling a regex per keyword. A keyword
//! matches only when both neighbours are non-alphanumeric or string edges,
//! which keeps "dr" from matching inside "address".

/// Case-insensitive word-bounded containment check.
///
/// `needle` may contain spaces ("verification code"); interior characters are
/// matched literally after lowercasing, boundaries apply to the ends only.
pub(crate) fn contains_word(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }
    let hay = haystack.to_lowercase();
    let needle = needle.to_lowercase();
    let hay_bytes = hay.as_bytes();
    let mut start = 0;
    while let Some(pos) = hay[start..].find(&needle) {
        let begin = start + pos;
        let end = begin + needle.len();
        let left_ok = begin == 0 || !is_word_byte(hay_bytes[begin - 1]);
        let right_ok = end == hay.len() || !is_word_byte(hay_bytes[end]);
        if left_ok && right_ok {
            return true;
        }
        start = begin + 1;
    }
    false
}

/// True if any keyword in `needles` matches word-bounded.
pub(crate) fn contains_any_word(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| contains_word(haystack, n))
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric()
}

/// Collapse runs of whitespace into single spaces and trim the ends.
pub(crate) fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Title-case each whitespace-separated word ("amazon retail" -> "Amazon Retail").
pub(crate) fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_boundary_blocks_partial_matches() {
        assert!(contains_word("Rs 100 DR to your a/c", "dr"));
        assert!(!contains_word("update your address today", "dr"));
        assert!(!contains_word("hydrated", "dr"));
    }

    #[test]
    fn test_multi_word_needles() {
        assert!(contains_word("Your verification code is 1234", "verification code"));
        assert!(!contains_word("verification codes differ", "verification code"));
    }

    #[test]
    fn test_edges_count_as_boundaries() {
        assert!(contains_word("otp is 1234", "otp"));
        assert!(contains_word("1234 is your OTP", "otp"));
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("amazon retail in"), "Amazon Retail In");
        assert_eq!(title_case("JOHN DOE"), "John Doe");
    }
}
