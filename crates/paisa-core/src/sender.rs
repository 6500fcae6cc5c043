//! Sender classification
//!
//! Decides whether an originating sender id belongs to a trusted financial
//! entity before any body analysis runs. Carrier DLT headers wrap the entity
//! code in route prefixes/suffixes ("VM-HDFCBK-S"), so codes match as whole
//! tokens bounded by non-alphanumeric characters or string edges. Codes short
//! enough to be ambiguous under token matching (<= 4 chars for banks, <= 5
//! for payment apps) fall back to plain substring matching.

use crate::text::contains_word;

/// Bank sender entity codes. Token-matched unless short.
const BANK_CODES: &[&str] = &[
    "HDFCBK", "HDFCBN", "ICICIB", "ICICIT", "SBIINB", "SBIPSG", "SBYONO", "SBIUPI", "AXISBK",
    "AXISBNK", "KOTAKB", "KOTBNK", "PNBSMS", "PNBBNK", "BOIIND", "CANBNK", "UNIONB", "CENTBK",
    "IDFCFB", "INDUSB", "YESBNK", "FEDBNK", "RBLBNK", "IDBIBK", "BOBTXN", "BOBSMS", "SCBANK",
    "HSBCIN", "CITIBK", "DBSBNK", "AUBANK", "UCOBNK", "IOBCHN", "KVBANK", "SIBSMS", "TMBANK",
    "DCBBNK", "KARBNK", "SRCBNK", "EQUBNK", "UJJIVN", "BANDHN", "CSBBNK", "JKBANK",
    // Short codes, substring-matched
    "SBI", "HDFC", "ICICI", "AXIS", "PNB", "BOB", "BOI", "UCO", "IDBI", "RBL", "DBS", "KVB",
];

/// Payment/UPI-app sender entity codes. Token-matched unless short.
const PAYMENT_CODES: &[&str] = &[
    "PHONPE", "PHONEPE", "PAYTMB", "AMZNPY", "MOBKWK", "FRECHG", "BHIMPAY", "CREDPE", "SLICEI",
    "LZYPAY", "SIMPLB", "JUPITR", "FIMNYB", "NAVIPY", "BAJAJF",
    // Short codes, substring-matched
    "PAYTM", "GPAY", "BHIM", "CRED", "NAVI",
];

/// Substring-match length thresholds per code family
const SHORT_BANK_CODE: usize = 4;
const SHORT_PAYMENT_CODE: usize = 5;

/// Synthetic sender value used for user-entered transactions. These skip
/// sender gating and duplicate detection entirely.
const MANUAL_ENTRY_SENDER: &str = "manual entry";

/// Classifies sender ids against the curated financial-entity code sets
#[derive(Debug, Default)]
pub struct SenderClassifier;

impl SenderClassifier {
    pub fn new() -> Self {
        Self
    }

    /// True when the sender belongs to a known bank or payment app
    pub fn is_trusted(&self, sender: &str) -> bool {
        self.is_bank(sender) || self.is_payment_app(sender) || self.is_manual_entry(sender)
    }

    /// True when the sender matches a bank entity code
    pub fn is_bank(&self, sender: &str) -> bool {
        let upper = sender.to_uppercase();
        BANK_CODES
            .iter()
            .any(|code| matches_code(&upper, code, SHORT_BANK_CODE))
    }

    /// True when the sender matches a payment/UPI-app entity code
    pub fn is_payment_app(&self, sender: &str) -> bool {
        let upper = sender.to_uppercase();
        PAYMENT_CODES
            .iter()
            .any(|code| matches_code(&upper, code, SHORT_PAYMENT_CODE))
    }

    /// True for the synthetic sender used by manual entry flows
    pub fn is_manual_entry(&self, sender: &str) -> bool {
        sender.trim().eq_ignore_ascii_case(MANUAL_ENTRY_SENDER)
    }
}

fn matches_code(sender_upper: &str, code: &str, substring_max_len: usize) -> bool {
    if code.len() <= substring_max_len {
        // Short codes are too ambiguous for token matching but rare enough
        // to risk substring matches
        sender_upper.contains(code)
    } else {
        contains_word(sender_upper, code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_entity_codes() {
        let senders = SenderClassifier::new();
        assert!(senders.is_trusted("HDFCBK"));
        assert!(senders.is_trusted("ICICIB"));
        assert!(senders.is_bank("SBIINB"));
        assert!(senders.is_payment_app("PHONPE"));
    }

    #[test]
    fn test_dlt_prefixed_senders() {
        let senders = SenderClassifier::new();
        assert!(senders.is_trusted("VM-HDFCBK-S"));
        assert!(senders.is_trusted("AD-ICICIB"));
        assert!(senders.is_trusted("JD-PAYTMB-T"));
    }

    #[test]
    fn test_short_codes_match_as_substrings() {
        let senders = SenderClassifier::new();
        assert!(senders.is_trusted("SBIOTP"));
        assert!(senders.is_trusted("MYGPAYX"));
    }

    #[test]
    fn test_unknown_senders_rejected() {
        let senders = SenderClassifier::new();
        assert!(!senders.is_trusted("AM-SPAMCO"));
        assert!(!senders.is_trusted("+919812345678"));
        assert!(!senders.is_trusted("PIZZAHUT"));
    }

    #[test]
    fn test_long_codes_do_not_match_inside_tokens() {
        let senders = SenderClassifier::new();
        // ICICIB embedded without boundaries must not match (and the body
        // contains no short code either)
        assert!(!senders.is_bank("XICICIBY"));
    }

    #[test]
    fn test_manual_entry_is_trusted() {
        let senders = SenderClassifier::new();
        assert!(senders.is_manual_entry("Manual Entry"));
        assert!(senders.is_trusted("Manual Entry"));
    }
}
