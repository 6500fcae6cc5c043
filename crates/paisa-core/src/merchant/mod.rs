//! Merchant/counterparty extraction
//!
//! An ordered cascade of tier objects, each implementing one `try_extract`
//! capability; the first tier producing a candidate wins and the candidate
//! goes through cleanup regardless of its source. Tier order encodes
//! precedence: curated names beat bank-branded patterns beat generic
//! recipient phrasing beat heuristics, and a context-aware label tier at the
//! bottom guarantees the cascade always terminates with something readable.

mod cleanup;
mod known;

use regex::Regex;
use tracing::debug;

use crate::text::title_case;
use cleanup::NameCleaner;
pub use known::{find_known, KnownMerchant, KNOWN_MERCHANTS};

/// Inputs available to every tier
#[derive(Debug)]
pub struct MerchantContext<'a> {
    pub sender: &'a str,
    pub body: &'a str,
}

/// One stage of the extraction cascade
trait MerchantTier: Send + Sync {
    fn name(&self) -> &'static str;
    fn try_extract(&self, ctx: &MerchantContext<'_>) -> Option<String>;
    /// True when the tier already emits display-ready names (canonical
    /// merchant names, formatted UPI handles, synthetic labels) that the
    /// generic cleanup pass would only mangle
    fn canonical(&self) -> bool {
        false
    }
}

/// Ordered tier cascade plus the shared cleanup pass
pub struct MerchantExtractor {
    tiers: Vec<Box<dyn MerchantTier>>,
    cleaner: NameCleaner,
}

impl MerchantExtractor {
    pub fn new() -> Self {
        Self {
            tiers: vec![
                Box::new(KnownMerchantTier),
                Box::new(BankPatternTier::new()),
                Box::new(RecipientTier::new()),
                Box::new(CardPosTier::new()),
                Box::new(RecurringTier::new()),
                Box::new(UpiIdTier::new()),
                Box::new(RemarksTier::new()),
                Box::new(CapitalizedTier::new()),
                Box::new(ContextLabelTier),
            ],
            cleaner: NameCleaner::new(),
        }
    }

    /// Run the cascade. Never fails: the final tier always produces a label
    /// and cleanup degrades unusable candidates to "Unknown".
    pub fn extract(&self, ctx: &MerchantContext<'_>) -> String {
        for tier in &self.tiers {
            if let Some(candidate) = tier.try_extract(ctx) {
                debug!(tier = tier.name(), candidate = %candidate, "merchant tier matched");
                if tier.canonical() {
                    return candidate;
                }
                return self.cleaner.clean(&candidate);
            }
        }
        "Unknown".to_string()
    }
}

impl Default for MerchantExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Words that never start a counterparty name
const GENERIC_NOUNS: &[&str] = &[
    "account", "customer", "user", "bank", "beneficiary", "you", "your", "the", "a/c", "ac",
    "and", "by", "of", "via", "with", "is", "has", "been",
];

/// Cut a captured candidate at trailing clause boundaries the capture class
/// cannot express (" on 12-04-23", " via UPI", " Ref ...").
fn trim_candidate(raw: &str) -> Option<String> {
    let lower = raw.to_lowercase();
    let stops = [
        " on ", " ref", " via ", " avl", " bal", " info", " txn", " upi", " not you", " dated ",
        " from ", " for ", " and ",
    ];
    let mut end = raw.len();
    for stop in stops {
        if let Some(i) = lower.find(stop) {
            end = end.min(i);
        }
    }
    let cut = raw[..end].trim().trim_matches(|c: char| matches!(c, '.' | ',' | ';' | ':' | '-'));
    let trimmed = cut.trim();
    if trimmed.is_empty() {
        return None;
    }
    // Purely numeric candidates are account fragments, not names
    if trimmed.chars().all(|c| !c.is_alphabetic()) {
        return None;
    }
    let first_word = trimmed
        .split_whitespace()
        .next()
        .unwrap_or("")
        .to_lowercase();
    if GENERIC_NOUNS.contains(&first_word.as_str()) {
        return None;
    }
    Some(trimmed.to_string())
}

// ----------------------------------------------------------------------------
// Tier 1: curated known merchants
// ----------------------------------------------------------------------------

struct KnownMerchantTier;

impl MerchantTier for KnownMerchantTier {
    fn name(&self) -> &'static str {
        "known_merchant"
    }

    fn try_extract(&self, ctx: &MerchantContext<'_>) -> Option<String> {
        find_known(ctx.body).map(|m| m.canonical.to_string())
    }

    fn canonical(&self) -> bool {
        true
    }
}

// ----------------------------------------------------------------------------
// Tier 2: bank-specific patterns
// ----------------------------------------------------------------------------

/// Pattern sets keyed by bank token. Banks phrase recipient lines
/// differently, so detecting the bank first lets each set stay tight.
struct BankPatternTier {
    banks: Vec<(&'static str, Vec<Regex>)>,
    shared: Vec<Regex>,
}

impl BankPatternTier {
    fn new() -> Self {
        let compile = |patterns: &[&str]| -> Vec<Regex> {
            patterns
                .iter()
                .map(|p| Regex::new(p).expect("valid regex"))
                .collect()
        };

        let banks = vec![
            (
                "hdfc",
                compile(&[
                    r"(?i)\bInfo:\s*([A-Za-z0-9@ ._&'-]{2,40})",
                    r"(?i)\bVPA\s+([A-Za-z0-9@._-]{3,50})",
                    r"(?i)\bto\s+([A-Za-z][A-Za-z0-9 ._&'-]{1,39}?)\s+on\b",
                ]),
            ),
            (
                "icici",
                compile(&[
                    r"(?i);\s*([A-Za-z][A-Za-z ._&'-]{1,39})\s+credited",
                    r"(?i)\busing\s+UPI[-/]([A-Za-z0-9]{3,30})",
                    r"(?i)\btowards\s+([A-Za-z][A-Za-z0-9 ._&'-]{1,39})",
                ]),
            ),
            (
                "sbi",
                compile(&[
                    r"(?i)\btransfer\s+to\s+([A-Za-z][A-Za-z0-9 ._&'-]{1,39})",
                    r"(?i)\bto\s+A/c\s+\S+\s+of\s+([A-Za-z][A-Za-z0-9 ._&'-]{1,39})",
                ]),
            ),
            (
                "axis",
                compile(&[
                    r"(?i)\bUPI/P2[AM]/[0-9]+/([A-Za-z0-9 ._-]{2,40})",
                    r"(?i)\bInfo-\s*([A-Za-z0-9 ._&'-]{2,40})",
                ]),
            ),
            (
                "kotak",
                compile(&[
                    r"(?i)\bto\s+([A-Za-z][A-Za-z0-9 ._&'-]{1,39}?)\s+via\b",
                    r"(?i)\bsent\s+to\s+([A-Za-z][A-Za-z0-9 ._&'-]{1,39})",
                ]),
            ),
        ];

        // Phrasings most banks share
        let shared = compile(&[
            r"(?i)\bsent\s+to\s+([A-Za-z][A-Za-z0-9 ._&'-]{1,39})",
            r"(?i)\bUPI-([A-Za-z][A-Za-z0-9._-]{2,30})",
            r"(?i)\bVPA-([A-Za-z0-9@._-]{3,50})",
            r"(?i)\b([A-Za-z][A-Za-z ._&'-]{1,39})\s+credited\b",
        ]);

        Self { banks, shared }
    }

    fn detected_bank(&self, ctx: &MerchantContext<'_>) -> Option<usize> {
        let sender = ctx.sender.to_lowercase();
        let body = ctx.body.to_lowercase();
        self.banks
            .iter()
            .position(|(token, _)| sender.contains(token) || body.contains(token))
    }
}

impl MerchantTier for BankPatternTier {
    fn name(&self) -> &'static str {
        "bank_patterns"
    }

    fn try_extract(&self, ctx: &MerchantContext<'_>) -> Option<String> {
        let bank_idx = self.detected_bank(ctx)?;
        let (_, bank_patterns) = &self.banks[bank_idx];
        for pattern in bank_patterns.iter().chain(self.shared.iter()) {
            for caps in pattern.captures_iter(ctx.body) {
                if let Some(candidate) = caps.get(1).and_then(|m| trim_candidate(m.as_str())) {
                    return Some(candidate);
                }
            }
        }
        None
    }
}

// ----------------------------------------------------------------------------
// Tier 3: generic recipient patterns
// ----------------------------------------------------------------------------

struct RecipientTier {
    patterns: Vec<Regex>,
}

impl RecipientTier {
    fn new() -> Self {
        let patterns = [
            r"(?i)\bpaid\s+to\s+([A-Za-z0-9@][A-Za-z0-9@ ._&'-]{1,39})",
            r"(?i)\bbeneficiary\s*[:\-]?\s*([A-Za-z][A-Za-z0-9 ._&'-]{1,39})",
            r"(?i)\b(?:neft|imps|rtgs)\s+to\s+([A-Za-z0-9][A-Za-z0-9 ._&'-]{1,39})",
            r"(?i)\btowards\s+([A-Za-z][A-Za-z0-9 ._&'-]{1,39})",
            r"(?i)\bto\s+([A-Za-z][A-Za-z0-9 ._&'-]{1,39})",
        ]
        .iter()
        .map(|p| Regex::new(p).expect("valid regex"))
        .collect();
        Self { patterns }
    }
}

impl MerchantTier for RecipientTier {
    fn name(&self) -> &'static str {
        "recipient_patterns"
    }

    fn try_extract(&self, ctx: &MerchantContext<'_>) -> Option<String> {
        for pattern in &self.patterns {
            for caps in pattern.captures_iter(ctx.body) {
                if let Some(candidate) = caps.get(1).and_then(|m| trim_candidate(m.as_str())) {
                    return Some(candidate);
                }
            }
        }
        None
    }
}

// ----------------------------------------------------------------------------
// Tier 4: at/@ card-or-POS patterns
// ----------------------------------------------------------------------------

const CARD_VOCAB: &[&str] = &["card", "pos", "purchase", "swiped", "ecom", "merchant"];

struct CardPosTier {
    at_pattern: Regex,
}

impl CardPosTier {
    fn new() -> Self {
        Self {
            at_pattern: Regex::new(r"(?i)\b(?:at|@)\s+([A-Za-z0-9][A-Za-z0-9 .&*'-]{1,39})")
                .expect("valid regex"),
        }
    }
}

impl MerchantTier for CardPosTier {
    fn name(&self) -> &'static str {
        "card_pos"
    }

    fn try_extract(&self, ctx: &MerchantContext<'_>) -> Option<String> {
        // "at NAME" is only trustworthy in card/POS messages; everywhere else
        // "at" introduces times and branches
        if !crate::text::contains_any_word(ctx.body, CARD_VOCAB) {
            return None;
        }
        for caps in self.at_pattern.captures_iter(ctx.body) {
            if let Some(candidate) = caps.get(1).and_then(|m| trim_candidate(m.as_str())) {
                return Some(candidate);
            }
        }
        None
    }
}

// ----------------------------------------------------------------------------
// Tier 5: for/bill/subscription patterns
// ----------------------------------------------------------------------------

const RECURRING_VOCAB: &[&str] = &[
    "bill",
    "recharge",
    "subscription",
    "premium",
    "renewal",
    "emi",
    "instalment",
    "installment",
];

struct RecurringTier {
    patterns: Vec<Regex>,
}

impl RecurringTier {
    fn new() -> Self {
        let patterns = [
            r"(?i)\bbill\s+(?:payment\s+)?for\s+(?:your\s+)?([A-Za-z][A-Za-z0-9 ._&'-]{1,39})",
            r"(?i)\bfor\s+(?:your\s+)?([A-Za-z][A-Za-z0-9 ._&'-]{1,39})\s+(?:bill|recharge|subscription|premium|renewal)\b",
            r"(?i)\bfor\s+(?:your\s+)?([A-Za-z][A-Za-z0-9 ._&'-]{1,39})",
        ]
        .iter()
        .map(|p| Regex::new(p).expect("valid regex"))
        .collect();
        Self { patterns }
    }
}

impl MerchantTier for RecurringTier {
    fn name(&self) -> &'static str {
        "recurring"
    }

    fn try_extract(&self, ctx: &MerchantContext<'_>) -> Option<String> {
        if !crate::text::contains_any_word(ctx.body, RECURRING_VOCAB) {
            return None;
        }
        for pattern in &self.patterns {
            for caps in pattern.captures_iter(ctx.body) {
                if let Some(candidate) = caps.get(1).and_then(|m| trim_candidate(m.as_str())) {
                    return Some(candidate);
                }
            }
        }
        None
    }
}

// ----------------------------------------------------------------------------
// Tier 6: UPI id parsing
// ----------------------------------------------------------------------------

const PURPOSE_WORDS: &[&str] = &[
    "rent",
    "bill",
    "fee",
    "fees",
    "maintenance",
    "electricity",
    "recharge",
    "donation",
    "school",
    "tuition",
    "salary",
    "emi",
];

struct UpiIdTier {
    upi_id: Regex,
}

impl UpiIdTier {
    fn new() -> Self {
        Self {
            upi_id: Regex::new(r"\b([A-Za-z0-9._-]{2,64})@([A-Za-z][A-Za-z0-9.]{1,32})\b")
                .expect("valid regex"),
        }
    }

    fn humanize(local: &str, full_id: &str) -> String {
        // Purpose-worded locals become a title-cased purpose phrase
        let lower = local.to_lowercase();
        let tokens: Vec<&str> = lower.split(['.', '_', '-']).filter(|t| !t.is_empty()).collect();
        if PURPOSE_WORDS.iter().any(|p| lower.contains(p)) {
            return title_case(&tokens.join(" "));
        }

        // A local that names a known merchant resolves to the canonical name
        if let Some(known) = find_known(&lower) {
            return known.canonical.to_string();
        }

        // Too short or numeric: the raw id carries more meaning than a
        // mangled "name" would
        if local.len() < 3 || local.chars().all(|c| c.is_ascii_digit()) {
            return full_id.to_lowercase();
        }

        // Humanize: drop digits, title-case the remaining name tokens
        let name_tokens: Vec<String> = tokens
            .iter()
            .map(|t| t.chars().filter(|c| !c.is_ascii_digit()).collect::<String>())
            .filter(|t| !t.is_empty())
            .collect();
        if name_tokens.is_empty() {
            return full_id.to_lowercase();
        }
        format!("{} (UPI)", title_case(&name_tokens.join(" ")))
    }
}

impl MerchantTier for UpiIdTier {
    fn name(&self) -> &'static str {
        "upi_id"
    }

    fn try_extract(&self, ctx: &MerchantContext<'_>) -> Option<String> {
        let caps = self.upi_id.captures(ctx.body)?;
        let local = caps.get(1)?.as_str();
        let full_id = caps.get(0)?.as_str();
        Some(Self::humanize(local, full_id))
    }

    fn canonical(&self) -> bool {
        true
    }
}

// ----------------------------------------------------------------------------
// Tier 7: remarks/purpose labels
// ----------------------------------------------------------------------------

const UNINFORMATIVE_REMARKS: &[&str] =
    &["upi", "ref", "payment", "transfer", "na", "nil", "none", "n/a"];

struct RemarksTier {
    label: Regex,
}

impl RemarksTier {
    fn new() -> Self {
        Self {
            label: Regex::new(r"(?i)\b(?:remarks?|purpose|note|narration)\s*[:\-]\s*([^.;,\n]{2,40})")
                .expect("valid regex"),
        }
    }
}

impl MerchantTier for RemarksTier {
    fn name(&self) -> &'static str {
        "remarks"
    }

    fn try_extract(&self, ctx: &MerchantContext<'_>) -> Option<String> {
        for caps in self.label.captures_iter(ctx.body) {
            if let Some(candidate) = caps.get(1).and_then(|m| trim_candidate(m.as_str())) {
                if !UNINFORMATIVE_REMARKS.contains(&candidate.to_lowercase().as_str()) {
                    return Some(candidate);
                }
            }
        }
        None
    }
}

// ----------------------------------------------------------------------------
// Tier 8: capitalized phrase after a payment verb
// ----------------------------------------------------------------------------

const CAPITALIZED_STOPWORDS: &[&str] = &[
    "RS", "INR", "UPI", "NEFT", "IMPS", "RTGS", "ATM", "POS", "REF", "YOUR", "THE", "BANK", "AVL",
    "BAL", "INFO", "FROM", "ON", "REMARKS", "NOTE", "PURPOSE", "NARRATION", "ACCOUNT", "CARD",
    "NO", "AC", "XX", "DR", "CR", "TXN", "OTP",
];

struct CapitalizedTier {
    verb: Regex,
    phrase: Regex,
}

impl CapitalizedTier {
    fn new() -> Self {
        Self {
            verb: Regex::new(r"(?i)\b(?:paid|sent|debited|spent|purchased|transferred)\b")
                .expect("valid regex"),
            phrase: Regex::new(r"\b([A-Z][A-Za-z]+(?:\s+[A-Z][A-Za-z]+){0,2})\b")
                .expect("valid regex"),
        }
    }
}

impl MerchantTier for CapitalizedTier {
    fn name(&self) -> &'static str {
        "capitalized_phrase"
    }

    fn try_extract(&self, ctx: &MerchantContext<'_>) -> Option<String> {
        let verb = self.verb.find(ctx.body)?;
        let window_start = verb.end();
        let window_end = (window_start + 50).min(ctx.body.len());
        // Keep the slice on a char boundary for multi-byte bodies
        let mut end = window_end;
        while !ctx.body.is_char_boundary(end) {
            end -= 1;
        }
        let window = &ctx.body[window_start..end];

        for caps in self.phrase.captures_iter(window) {
            let candidate = caps.get(1)?.as_str();
            let first = candidate.split_whitespace().next().unwrap_or("");
            if CAPITALIZED_STOPWORDS.contains(&first.to_uppercase().as_str()) {
                continue;
            }
            if let Some(trimmed) = trim_candidate(candidate) {
                return Some(trimmed);
            }
        }
        None
    }
}

// ----------------------------------------------------------------------------
// Tier 9: context-aware generic labels
// ----------------------------------------------------------------------------

/// Decision table keyed by keyword combinations. Always produces a label, so
/// the cascade as a whole never comes up empty.
struct ContextLabelTier;

impl MerchantTier for ContextLabelTier {
    fn name(&self) -> &'static str {
        "context_label"
    }

    fn try_extract(&self, ctx: &MerchantContext<'_>) -> Option<String> {
        let body = ctx.body.to_lowercase();
        let has = |needle: &str| body.contains(needle);

        let label = if has("upi") && (has("p2p") || has("p2a")) {
            "UPI P2P Transfer"
        } else if has("upi") && has("p2m") {
            "UPI Merchant Payment"
        } else if has("upi") {
            "UPI Transfer"
        } else if has("pos") && has("international") {
            "International POS Purchase"
        } else if has("pos") {
            "POS Purchase"
        } else if has("atm") || has("cash wd") || has("cash withdrawal") {
            "ATM Withdrawal"
        } else if has("neft") {
            "NEFT Transfer"
        } else if has("imps") {
            "IMPS Transfer"
        } else if has("rtgs") {
            "RTGS Transfer"
        } else if has("ecs") || has("nach") || has("standing instruction") || has("autopay") {
            "Auto Debit"
        } else if has("bill") && has("electricity") {
            "Electricity Bill"
        } else if has("bill") && has("water") {
            "Water Bill"
        } else if has("bill") && has("gas") {
            "Gas Bill"
        } else if has("recharge") {
            "Mobile Recharge"
        } else if has("bill") {
            "Bill Payment"
        } else if has("card") {
            "Card Payment"
        } else {
            "Bank Transaction"
        };
        Some(label.to_string())
    }

    fn canonical(&self) -> bool {
        true
    }
}
