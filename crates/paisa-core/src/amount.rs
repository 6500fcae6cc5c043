//! Amount extraction
//!
//! Three tiers of increasingly permissive matching, each tried only when the
//! previous produced no positive value:
//! - Tier 1: currency-tagged and verb/preposition-anchored patterns
//! - Tier 2: looser contextual numerics (decimal-formatted bare numbers)
//! - Tier 3: scan every numeric token, keep the plausible range, prefer
//!   decimal-bearing tokens over larger integers
//!
//! Thousands separators are stripped before parsing, which also handles the
//! Indian lakh grouping ("1,00,000"). A zero result or no match at all means
//! the message cannot be a valid transaction.

use regex::Regex;

/// Compiled amount pattern tiers
#[derive(Debug)]
pub struct AmountExtractor {
    primary: Vec<Regex>,
    secondary: Vec<Regex>,
    token: Regex,
    lacs: Regex,
}

const NUM: &str = r"([0-9][0-9,]*(?:\.[0-9]{1,2})?)";

impl AmountExtractor {
    pub fn new() -> Self {
        let primary = [
            // Currency prefix: Rs.2,599.00 / INR 100 / ₹ 45 / $12.50
            format!(r"(?i)(?:\b(?:rs|inr|usd)\s*\.?|₹|\$)\s*{NUM}"),
            // Currency suffix: 2,599.00 INR / 100 Rs
            format!(r"(?i){NUM}\s*(?:rs\b\.?|inr\b|₹)"),
            // "amount of X"
            format!(r"(?i)\bamount\s+of\s+(?:rs\.?|inr|₹|\$)?\s*{NUM}"),
            // Verb + amount: paid 450 / debited 2,599.00
            format!(
                r"(?i)\b(?:paid|sent|debited|spent|withdrew|withdrawn|deducted|transferred)\s+(?:rs\.?|inr|₹|\$)?\s*{NUM}"
            ),
            // Preposition + amount: for 1,299 / of 450 / worth 99.00
            format!(r"(?i)\b(?:for|of|worth)\s+(?:rs\.?|inr|₹|\$)?\s*{NUM}"),
            // "X is debited" / "X has been debited"
            format!(r"(?i)\b{NUM}\s+(?:is|was|has been)\s+debited"),
            // "X DR" suffix
            format!(r"(?i)\b{NUM}\s*dr\b"),
            // Trailing-minus notation: 2599.00-
            r"([0-9][0-9,]*\.[0-9]{2})-".to_string(),
            // Quoted amounts
            format!("[\"']{NUM}[\"']"),
        ]
        .iter()
        .map(|p| Regex::new(p).expect("valid regex"))
        .collect();

        let secondary = [
            // Bare decimal-formatted numbers: 2,599.00 or 450.50
            r"\b([0-9]{1,3}(?:,[0-9]{2,3})+(?:\.[0-9]{1,2})?|[0-9]+\.[0-9]{1,2})\b".to_string(),
            // Currency glued to digits without separator: INR2599
            format!(r"(?i)\b(?:rs|inr){NUM}"),
            // "balance is X" style contextual numbers
            format!(r"(?i)\bbalance\s+(?:is\s+|:\s*)?(?:rs\.?|inr|₹)?\s*{NUM}"),
        ]
        .iter()
        .map(|p| Regex::new(p).expect("valid regex"))
        .collect();

        Self {
            primary,
            secondary,
            token: Regex::new(r"[0-9][0-9,]*(?:\.[0-9]+)?").expect("valid regex"),
            // "cr" is deliberately absent: bare "CR" marks credits, not crores
            lacs: Regex::new(r"(?i)\b[0-9][0-9,.]*\s*(?:lacs?|lakhs?|crores?)\b")
                .expect("valid regex"),
        }
    }

    /// Run the full cascade. Returns the positive extracted amount, or None
    /// when every tier fails (including zero-valued matches).
    pub fn extract(&self, body: &str, min_plausible: f64, max_plausible: f64) -> Option<f64> {
        self.first_positive(&self.primary, body)
            .or_else(|| self.first_positive(&self.secondary, body))
            .or_else(|| self.fallback_scan(body, min_plausible, max_plausible))
    }

    /// True when tier 1 or tier 2 finds a positive amount. Used by the
    /// message classifier as "amount evidence" without running tier 3.
    pub fn has_tagged_amount(&self, body: &str) -> bool {
        self.first_positive(&self.primary, body).is_some()
            || self.first_positive(&self.secondary, body).is_some()
    }

    /// True when any numeric token falls in the plausible range
    pub fn has_plausible_token(&self, body: &str, min: f64, max: f64) -> bool {
        self.plausible_tokens(body, min, max).next().is_some()
    }

    /// True when an amount is quoted in lacs/crores, which marks loan and
    /// offer copy rather than a transaction
    pub fn has_lacs_amount(&self, body: &str) -> bool {
        self.lacs.is_match(body)
    }

    fn first_positive(&self, patterns: &[Regex], body: &str) -> Option<f64> {
        for pattern in patterns {
            for caps in pattern.captures_iter(body) {
                if let Some(value) = caps.get(1).and_then(|m| parse_number(m.as_str())) {
                    return Some(value);
                }
            }
        }
        None
    }

    /// Tier 3: scan all numeric tokens, keep the plausible range, and select
    /// the largest decimal-bearing token (else the largest overall).
    pub(crate) fn fallback_scan(&self, body: &str, min: f64, max: f64) -> Option<f64> {
        let mut best_decimal: Option<f64> = None;
        let mut best_integer: Option<f64> = None;

        for (raw, value) in self.plausible_tokens(body, min, max) {
            let slot = if raw.contains('.') {
                &mut best_decimal
            } else {
                &mut best_integer
            };
            if slot.is_none_or(|current| value > current) {
                *slot = Some(value);
            }
        }

        best_decimal.or(best_integer)
    }

    fn plausible_tokens<'a>(
        &'a self,
        body: &'a str,
        min: f64,
        max: f64,
    ) -> impl Iterator<Item = (&'a str, f64)> + 'a {
        self.token.find_iter(body).filter_map(move |m| {
            let value = parse_number(m.as_str())?;
            (value >= min && value <= max).then_some((m.as_str(), value))
        })
    }
}

impl Default for AmountExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Strip thousands separators and parse. Zero and non-finite values are
/// treated as parse failures.
fn parse_number(s: &str) -> Option<f64> {
    let cleaned = s.replace(',', "");
    let value: f64 = cleaned.parse().ok()?;
    (value.is_finite() && value > 0.0).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIN: f64 = 10.0;
    const MAX: f64 = 1_000_000.0;

    #[test]
    fn test_currency_prefix() {
        let amounts = AmountExtractor::new();
        assert_eq!(amounts.extract("Rs.2,599.00 has been debited", MIN, MAX), Some(2599.0));
        assert_eq!(amounts.extract("INR 100 debited via UPI", MIN, MAX), Some(100.0));
        assert_eq!(amounts.extract("₹ 45.50 paid", MIN, MAX), Some(45.5));
    }

    #[test]
    fn test_verb_anchored_amount() {
        let amounts = AmountExtractor::new();
        assert_eq!(amounts.extract("You paid 450 to the store", MIN, MAX), Some(450.0));
        assert_eq!(amounts.extract("debited 1,299.50 from your account", MIN, MAX), Some(1299.5));
    }

    #[test]
    fn test_amount_of_phrasing() {
        let amounts = AmountExtractor::new();
        assert_eq!(
            amounts.extract("an amount of Rs.750.25 was transferred", MIN, MAX),
            Some(750.25)
        );
    }

    #[test]
    fn test_dr_suffix_and_trailing_minus() {
        let amounts = AmountExtractor::new();
        assert_eq!(amounts.extract("a/c XX12 2599.00 DR", MIN, MAX), Some(2599.0));
        assert_eq!(amounts.extract("card txn 120.00- posted", MIN, MAX), Some(120.0));
    }

    #[test]
    fn test_currency_tag_beats_other_numbers() {
        let amounts = AmountExtractor::new();
        // The account digits and date must lose to the tagged amount
        let body = "Rs.2,599.00 debited from a/c no. 7290 on 12-04-23";
        assert_eq!(amounts.extract(body, MIN, MAX), Some(2599.0));
    }

    #[test]
    fn test_tier2_decimal_formatted_bare_number() {
        let amounts = AmountExtractor::new();
        // No currency tag, no verb adjacency: tier 2 picks the decimal form
        let body = "Txn 2024 ... 2,599.00 ... done";
        assert_eq!(amounts.extract(body, MIN, MAX), Some(2599.0));
    }

    #[test]
    fn test_fallback_prefers_decimal_bearing_token() {
        let amounts = AmountExtractor::new();
        // 2024 is larger than nothing, but 75.5 carries a decimal point
        assert_eq!(amounts.fallback_scan("2024 75.5", MIN, MAX), Some(75.5));
        // All integers: largest wins
        assert_eq!(amounts.fallback_scan("450 1200 99", MIN, MAX), Some(1200.0));
    }

    #[test]
    fn test_fallback_range_filter() {
        let amounts = AmountExtractor::new();
        // 5 is below the plausible floor, 2000000 above the ceiling
        assert_eq!(amounts.fallback_scan("5 2000000", MIN, MAX), None);
    }

    #[test]
    fn test_zero_is_extraction_failure() {
        let amounts = AmountExtractor::new();
        assert_eq!(amounts.extract("Rs.0.00 debited", MIN, MAX), None);
    }

    #[test]
    fn test_lacs_detection() {
        let amounts = AmountExtractor::new();
        assert!(amounts.has_lacs_amount("get a loan of Rs.5 lacs today"));
        assert!(amounts.has_lacs_amount("upto 2 crores approved"));
        assert!(!amounts.has_lacs_amount("Rs.500 debited"));
    }

    #[test]
    fn test_lakh_grouping_parses() {
        let amounts = AmountExtractor::new();
        assert_eq!(amounts.extract("Rs.1,00,000.00 debited", MIN, MAX), Some(100000.0));
    }
}
