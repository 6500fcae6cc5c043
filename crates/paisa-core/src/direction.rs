//! Direction classification
//!
//! Debit vocabulary wins over credit vocabulary: a dual-mention message
//! ("debited from your a/c ... credited to John") reports a debit from the
//! account holder's perspective.

use crate::models::Direction;
use crate::text::contains_any_word;

/// Fixed debit vocabulary, word-bounded ("dr" must not match "address")
pub(crate) const DEBIT_KEYWORDS: &[&str] = &[
    "debited",
    "spent",
    "debit",
    "dr",
    "withdrawn",
    "sent",
    "paid",
    "purchase",
    "payment",
    "deducted",
];

/// Credit vocabulary used for the credit-only rejection and dual-mention logic
pub(crate) const CREDIT_KEYWORDS: &[&str] = &[
    "credited",
    "credit",
    "cr",
    "received",
    "deposited",
    "refund",
    "refunded",
    "reversed",
];

pub(crate) fn has_debit_vocabulary(body: &str) -> bool {
    contains_any_word(body, DEBIT_KEYWORDS)
}

pub(crate) fn has_credit_vocabulary(body: &str) -> bool {
    contains_any_word(body, CREDIT_KEYWORDS)
}

/// Classify direction from the message body
pub fn classify(body: &str) -> Direction {
    if has_debit_vocabulary(body) {
        Direction::Debit
    } else {
        Direction::Credit
    }
}

/// Apply the sign convention: negative iff debit, magnitude unchanged
pub fn signed_amount(amount: f64, direction: Direction) -> f64 {
    match direction {
        Direction::Debit => -amount.abs(),
        Direction::Credit => amount.abs(),
    }
}
