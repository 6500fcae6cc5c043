//! Domain models for Paisa

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A raw inbound SMS, owned by the caller. The engine never mutates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboundMessage {
    /// Sender id as delivered by the carrier (e.g. "VM-HDFCBK-S")
    pub sender: String,
    /// Full message body
    pub body: String,
    /// When the device received the message
    pub received_at: DateTime<Utc>,
}

/// Direction of money movement from the account holder's perspective
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Debit,
    Credit,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Debit => "debit",
            Self::Credit => "credit",
        }
    }
}

impl std::str::FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "debit" => Ok(Self::Debit),
            "credit" => Ok(Self::Credit),
            _ => Err(format!("Unknown direction: {}", s)),
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Why a message was (or was not) turned into a transaction.
///
/// Exactly one verdict applies per message. Rejections are ordinary outcomes,
/// not errors; callers drop rejected messages and may log the verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassificationVerdict {
    /// Message describes a transaction and extraction succeeded
    Accepted,
    /// OTP / verification-code message
    RejectedAsOtp,
    /// Promotional or marketing copy
    RejectedAsPromotional,
    /// Balance statement with no transactional evidence
    RejectedAsBalanceOnly,
    /// Pure credit (money received) without a debit mention
    RejectedCreditOnly,
    /// Sender is not a recognized financial entity
    RejectedUnknownSender,
    /// No positive transactional signal found
    RejectedNoSignal,
    /// Fingerprint already seen inside the receive-time window
    RejectedDuplicate,
}

impl ClassificationVerdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Accepted => "accepted",
            Self::RejectedAsOtp => "rejected_as_otp",
            Self::RejectedAsPromotional => "rejected_as_promotional",
            Self::RejectedAsBalanceOnly => "rejected_as_balance_only",
            Self::RejectedCreditOnly => "rejected_credit_only",
            Self::RejectedUnknownSender => "rejected_unknown_sender",
            Self::RejectedNoSignal => "rejected_no_signal",
            Self::RejectedDuplicate => "rejected_duplicate",
        }
    }
}

impl std::str::FromStr for ClassificationVerdict {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "accepted" => Ok(Self::Accepted),
            "rejected_as_otp" => Ok(Self::RejectedAsOtp),
            "rejected_as_promotional" => Ok(Self::RejectedAsPromotional),
            "rejected_as_balance_only" => Ok(Self::RejectedAsBalanceOnly),
            "rejected_credit_only" => Ok(Self::RejectedCreditOnly),
            "rejected_unknown_sender" => Ok(Self::RejectedUnknownSender),
            "rejected_no_signal" => Ok(Self::RejectedNoSignal),
            "rejected_duplicate" => Ok(Self::RejectedDuplicate),
            _ => Err(format!("Unknown verdict: {}", s)),
        }
    }
}

impl std::fmt::Display for ClassificationVerdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Spending category assigned from the counterparty name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Food,
    Transport,
    Shopping,
    Bills,
    Entertainment,
    Healthcare,
    #[default]
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Food => "food",
            Self::Transport => "transport",
            Self::Shopping => "shopping",
            Self::Bills => "bills",
            Self::Entertainment => "entertainment",
            Self::Healthcare => "healthcare",
            Self::Other => "other",
        }
    }

    /// All categories in their fixed evaluation order, default last
    pub fn all() -> &'static [Category] {
        &[
            Self::Food,
            Self::Transport,
            Self::Shopping,
            Self::Bills,
            Self::Entertainment,
            Self::Healthcare,
            Self::Other,
        ]
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "food" => Ok(Self::Food),
            "transport" => Ok(Self::Transport),
            "shopping" => Ok(Self::Shopping),
            "bills" => Ok(Self::Bills),
            "entertainment" => Ok(Self::Entertainment),
            "healthcare" => Ok(Self::Healthcare),
            "other" => Ok(Self::Other),
            _ => Err(format!("Unknown category: {}", s)),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A transaction extracted from one accepted, non-duplicate message.
///
/// Immutable value; ownership transfers to the storage collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedTransaction {
    /// Negative = debit, positive = credit; magnitude is the parsed amount
    pub signed_amount: f64,
    pub direction: Direction,
    /// Human-readable merchant/payee name, never empty ("Unknown" at worst)
    pub counterparty: String,
    pub category: Category,
    /// Deduplication identifier: explicit reference number, or synthesized
    /// from amount + date token + body hash
    pub fingerprint: String,
    /// Explicit reference number when one was extracted from the body.
    /// None means the fingerprint was synthesized.
    pub reference: Option<String>,
    pub source_sender: String,
    pub source_body: String,
    pub observed_at: DateTime<Utc>,
}

impl ExtractedTransaction {
    /// Positive magnitude of the transaction amount
    pub fn amount(&self) -> f64 {
        self.signed_amount.abs()
    }
}

/// Outcome of classifying one inbound message
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum ClassificationResult {
    Transaction(ExtractedTransaction),
    Rejected { verdict: ClassificationVerdict },
}

impl ClassificationResult {
    pub fn verdict(&self) -> ClassificationVerdict {
        match self {
            Self::Transaction(_) => ClassificationVerdict::Accepted,
            Self::Rejected { verdict } => *verdict,
        }
    }

    pub fn transaction(&self) -> Option<&ExtractedTransaction> {
        match self {
            Self::Transaction(tx) => Some(tx),
            Self::Rejected { .. } => None,
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Transaction(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict_round_trip() {
        for verdict in [
            ClassificationVerdict::Accepted,
            ClassificationVerdict::RejectedAsOtp,
            ClassificationVerdict::RejectedAsPromotional,
            ClassificationVerdict::RejectedAsBalanceOnly,
            ClassificationVerdict::RejectedCreditOnly,
            ClassificationVerdict::RejectedUnknownSender,
            ClassificationVerdict::RejectedNoSignal,
            ClassificationVerdict::RejectedDuplicate,
        ] {
            let parsed: ClassificationVerdict = verdict.as_str().parse().unwrap();
            assert_eq!(parsed, verdict);
        }
    }

    #[test]
    fn test_category_order_ends_with_other() {
        assert_eq!(Category::all().last(), Some(&Category::Other));
        assert_eq!(Category::all().first(), Some(&Category::Food));
    }
}
