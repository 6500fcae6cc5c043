//! Counterparty name cleanup
//!
//! Applied to every candidate regardless of which tier produced it. Bank
//! messages embed noise around the actual party name (masked account digits,
//! reference codes, dates, business suffixes, the bank's own name), and the
//! same party arrives in wildly different casings. Cleanup normalizes all of
//! that without ever failing: an unusable candidate degrades to its first
//! word, then to "Unknown".

use regex::Regex;

use crate::merchant::known::find_known;
use crate::text::{collapse_whitespace, title_case};

/// Tokens that carry no merchant information
const NOISE_TOKENS: &[&str] = &[
    "pvt", "ltd", "llp", "inc", "private", "limited", "bal", "ref", "ecom", "pos", "txn", "avl",
    "a/c", "ac", "in", "india",
];

/// Bank names leak into counterparty candidates via sender-branded patterns
const BANK_TOKENS: &[&str] = &[
    "hdfc", "icici", "sbi", "axis", "kotak", "pnb", "canara", "idfc", "indusind", "yes", "federal",
    "bank",
];

/// Vocabulary that marks a business rather than a person
const BUSINESS_SUFFIXES: &[&str] = &[
    "pvt",
    "ltd",
    "llp",
    "inc",
    "private",
    "limited",
    "enterprises",
    "traders",
    "stores",
    "store",
    "mart",
    "agency",
    "agencies",
    "technologies",
    "solutions",
    "services",
    "industries",
    "retail",
];

/// Compiled cleanup patterns, owned by the merchant extractor
#[derive(Debug)]
pub(crate) struct NameCleaner {
    masked_account: Regex,
    transfer_type: Regex,
    long_digits: Regex,
    date_token: Regex,
}

impl NameCleaner {
    pub fn new() -> Self {
        Self {
            masked_account: Regex::new(r"(?i)^(?:a/?c\s*)?(?:no\.?\s*)?[x*]+([0-9]{2,6})$")
                .expect("valid regex"),
            transfer_type: Regex::new(r"(?i)^(neft|imps|rtgs|upi|ecs|nach)[\s/-]*([0-9]*)$")
                .expect("valid regex"),
            long_digits: Regex::new(r"\b[0-9]{6,}\b").expect("valid regex"),
            date_token: Regex::new(r"\b[0-9]{1,2}[-/](?:[0-9]{1,2}|[A-Za-z]{3})[-/][0-9]{2,4}\b")
                .expect("valid regex"),
        }
    }

    /// Normalize a raw tier candidate into a display-ready counterparty name
    pub fn clean(&self, raw: &str) -> String {
        let candidate = collapse_whitespace(raw.trim_matches(|c: char| {
            c.is_whitespace() || matches!(c, '.' | ',' | ';' | ':' | '-')
        }));
        if candidate.is_empty() {
            return "Unknown".to_string();
        }

        // UPI ids pass through with standardized casing
        if candidate.contains('@') && !candidate.contains(' ') {
            return candidate.to_lowercase();
        }

        // Masked account numbers collapse to the visible digits
        if let Some(caps) = self.masked_account.captures(&candidate) {
            let digits = &caps[1];
            let last4 = &digits[digits.len().saturating_sub(4)..];
            return format!("Account {}", last4);
        }

        // Bare transfer-type tokens
        if let Some(caps) = self.transfer_type.captures(&candidate) {
            let kind = caps[1].to_uppercase();
            let digits = &caps[2];
            return if digits.len() >= 4 {
                format!("{} Account {}", kind, &digits[digits.len() - 4..])
            } else {
                format!("{} Transfer", kind)
            };
        }

        // Known merchants always come back in canonical capitalization
        if let Some(known) = find_known(&candidate) {
            return known.canonical.to_string();
        }

        let is_business = candidate
            .split_whitespace()
            .any(|w| BUSINESS_SUFFIXES.contains(&w.to_lowercase().trim_matches('.').as_ref()));

        // Strip embedded reference codes, dates, and noise tokens
        let without_codes = self.long_digits.replace_all(&candidate, " ");
        let without_dates = self.date_token.replace_all(&without_codes, " ");
        let stripped: Vec<&str> = without_dates
            .split_whitespace()
            .filter(|w| {
                let bare = w
                    .trim_matches(|c: char| !c.is_alphanumeric())
                    .to_lowercase();
                !bare.is_empty()
                    && !NOISE_TOKENS.contains(&bare.as_str())
                    && !BANK_TOKENS.contains(&bare.as_str())
            })
            .collect();

        let rejoined = collapse_whitespace(&stripped.join(" ").replace(
            |c: char| !c.is_alphanumeric() && !matches!(c, ' ' | '&' | '\'' | '.'),
            " ",
        ));

        if rejoined.len() < 2 {
            // Fall back to the first word of the original candidate
            return candidate
                .split_whitespace()
                .next()
                .filter(|w| w.len() >= 2)
                .map(title_case)
                .unwrap_or_else(|| "Unknown".to_string());
        }

        apply_capitalization(&rejoined, is_business)
    }
}

/// Person names title-case every word. Business names do too, except short
/// all-caps tokens which are usually acronyms (KFC, SBI) and stay as-is.
fn apply_capitalization(name: &str, is_business: bool) -> String {
    let words: Vec<&str> = name.split_whitespace().collect();
    let person_like = !is_business
        && (2..=3).contains(&words.len())
        && words.iter().all(|w| w.chars().all(|c| c.is_alphabetic()));

    words
        .iter()
        .map(|word| {
            let acronym = word.len() <= 4 && word.chars().all(|c| c.is_ascii_uppercase());
            if acronym && !person_like {
                word.to_string()
            } else if word.chars().all(|c| c.is_alphabetic()) {
                title_case(word)
            } else {
                // Mixed tokens (digits, punctuation) are left untouched
                word.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upi_ids_pass_through_lowercased() {
        let cleaner = NameCleaner::new();
        assert_eq!(cleaner.clean("Ramesh.Kumar@OKHDFC"), "ramesh.kumar@okhdfc");
    }

    #[test]
    fn test_masked_account_collapses() {
        let cleaner = NameCleaner::new();
        assert_eq!(cleaner.clean("XX7290"), "Account 7290");
        assert_eq!(cleaner.clean("a/c no. XX5678"), "Account 5678");
        assert_eq!(cleaner.clean("****1234"), "Account 1234");
    }

    #[test]
    fn test_transfer_type_tokens() {
        let cleaner = NameCleaner::new();
        assert_eq!(cleaner.clean("NEFT 00081234"), "NEFT Account 1234");
        assert_eq!(cleaner.clean("imps"), "IMPS Transfer");
        assert_eq!(cleaner.clean("RTGS-12"), "RTGS Transfer");
    }

    #[test]
    fn test_known_merchant_canonical_capitalization() {
        let cleaner = NameCleaner::new();
        assert_eq!(cleaner.clean("AMAZON RETAIL IN"), "Amazon Retail");
        assert_eq!(cleaner.clean("swiggy8900524"), "Swiggy");
    }

    #[test]
    fn test_person_name_title_cased() {
        let cleaner = NameCleaner::new();
        assert_eq!(cleaner.clean("RAMESH KUMAR"), "Ramesh Kumar");
        assert_eq!(cleaner.clean("priya sharma"), "Priya Sharma");
    }

    #[test]
    fn test_business_suffix_stripped_and_acronyms_kept() {
        let cleaner = NameCleaner::new();
        assert_eq!(cleaner.clean("KJS TRADERS PVT LTD"), "KJS Traders");
    }

    #[test]
    fn test_embedded_codes_and_dates_stripped() {
        let cleaner = NameCleaner::new();
        assert_eq!(cleaner.clean("SHARMA HARDWARE 99887766 12-04-23"), "Sharma Hardware");
    }

    #[test]
    fn test_bank_noise_stripped() {
        let cleaner = NameCleaner::new();
        assert_eq!(cleaner.clean("HDFC RAMESH KUMAR"), "Ramesh Kumar");
    }

    #[test]
    fn test_unusable_candidate_degrades_to_first_word() {
        let cleaner = NameCleaner::new();
        // Everything strippable is stripped, so the original first word wins
        assert_eq!(cleaner.clean("Ref 12-04-23"), "Ref");
    }

    #[test]
    fn test_empty_input_is_unknown() {
        let cleaner = NameCleaner::new();
        assert_eq!(cleaner.clean("   "), "Unknown");
        assert_eq!(cleaner.clean("--"), "Unknown");
    }
}
