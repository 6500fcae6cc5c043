//! The extraction engine
//!
//! Wires the pipeline together: sender gate, message classification, amount
//! extraction, direction, fingerprinting with receive-time duplicate
//! suppression, then merchant extraction and categorization. Classification
//! is a single bounded computation over a short string; the only interior
//! mutability is the duplicate cache, so one engine instance can serve
//! concurrent callers.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::amount::AmountExtractor;
use crate::category::CategoryTaxonomy;
use crate::classify::{MessageClassifier, MessageContext};
use crate::config::EngineConfig;
use crate::dedup::DuplicateCache;
use crate::direction;
use crate::merchant::{find_known, MerchantContext, MerchantExtractor};
use crate::models::{
    ClassificationResult, ClassificationVerdict, ExtractedTransaction, InboundMessage,
};
use crate::reference::ReferenceExtractor;
use crate::sender::SenderClassifier;

/// One engine instance: compiled pattern cascades plus the duplicate cache
pub struct ExtractionEngine {
    config: EngineConfig,
    senders: SenderClassifier,
    classifier: MessageClassifier,
    amounts: AmountExtractor,
    references: ReferenceExtractor,
    merchants: MerchantExtractor,
    taxonomy: CategoryTaxonomy,
    cache: DuplicateCache,
}

impl ExtractionEngine {
    /// Create an engine with default configuration and taxonomy
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self::with_config_and_taxonomy(config, CategoryTaxonomy::default())
    }

    pub fn with_config_and_taxonomy(config: EngineConfig, taxonomy: CategoryTaxonomy) -> Self {
        let cache = DuplicateCache::new(config.cache_window);
        Self {
            config,
            senders: SenderClassifier::new(),
            classifier: MessageClassifier::new(),
            amounts: AmountExtractor::new(),
            references: ReferenceExtractor::new(),
            merchants: MerchantExtractor::new(),
            taxonomy,
            cache,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Classify one inbound message
    pub fn classify_message(&self, message: &InboundMessage) -> ClassificationResult {
        self.classify(&message.sender, &message.body, message.received_at)
    }

    /// Classify a (sender, body, received-at) triple.
    ///
    /// Rejections are ordinary outcomes; this never fails. An accepted,
    /// non-duplicate message yields the extracted transaction, ready to hand
    /// to the storage collaborator.
    pub fn classify(
        &self,
        sender: &str,
        body: &str,
        received_at: DateTime<Utc>,
    ) -> ClassificationResult {
        // Malformed input degrades to the nearest rejection
        if sender.trim().is_empty() {
            return rejected(ClassificationVerdict::RejectedUnknownSender);
        }
        if body.trim().is_empty() {
            return rejected(ClassificationVerdict::RejectedNoSignal);
        }

        let manual = self.senders.is_manual_entry(sender);
        if !manual && !self.senders.is_trusted(sender) {
            debug!(sender, "untrusted sender");
            return rejected(ClassificationVerdict::RejectedUnknownSender);
        }

        let reference = self.references.extract(body);

        let ctx = MessageContext::new(
            body,
            self.senders.is_bank(sender),
            self.amounts.has_tagged_amount(body),
            self.amounts.has_plausible_token(
                body,
                self.config.min_plausible_amount,
                self.config.max_plausible_amount,
            ),
            self.amounts.has_lacs_amount(body),
            reference.is_some(),
            find_known(body).is_some(),
        );

        let verdict = self.classifier.classify(&ctx);
        if verdict != ClassificationVerdict::Accepted {
            debug!(sender, %verdict, "message rejected");
            return rejected(verdict);
        }

        // A classifier accept without an extractable amount is still unusable
        let Some(amount) = self.amounts.extract(
            body,
            self.config.min_plausible_amount,
            self.config.max_plausible_amount,
        ) else {
            debug!(sender, "accepted message but amount extraction failed");
            return rejected(ClassificationVerdict::RejectedNoSignal);
        };

        let dir = direction::classify(body);
        let signed_amount = direction::signed_amount(amount, dir);

        let fingerprint = self
            .references
            .fingerprint(body, amount, received_at, reference.as_deref());

        // Duplicate suppression short-circuits before the expensive merchant
        // cascade runs. Manual entries skip it.
        if !manual && self.cache.check_and_insert(&fingerprint, received_at) {
            return rejected(ClassificationVerdict::RejectedDuplicate);
        }

        let counterparty = self.merchants.extract(&MerchantContext { sender, body });
        let category = self.taxonomy.categorize(&counterparty);

        ClassificationResult::Transaction(ExtractedTransaction {
            signed_amount,
            direction: dir,
            counterparty,
            category,
            fingerprint,
            reference,
            source_sender: sender.to_string(),
            source_body: body.to_string(),
            observed_at: received_at,
        })
    }
}

impl Default for ExtractionEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn rejected(verdict: ClassificationVerdict) -> ClassificationResult {
    ClassificationResult::Rejected { verdict }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Direction};
    use chrono::TimeZone;

    fn received() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 4, 12, 14, 5, 30).unwrap()
    }

    #[test]
    fn test_blank_inputs_rejected_immediately() {
        let engine = ExtractionEngine::new();
        assert_eq!(
            engine.classify("", "Rs.100 debited", received()).verdict(),
            ClassificationVerdict::RejectedUnknownSender
        );
        assert_eq!(
            engine.classify("HDFCBK", "   ", received()).verdict(),
            ClassificationVerdict::RejectedNoSignal
        );
    }

    #[test]
    fn test_untrusted_sender_gates_everything() {
        let engine = ExtractionEngine::new();
        let result = engine.classify("AM-SPAMCO", "Rs.100 debited from your a/c", received());
        assert_eq!(result.verdict(), ClassificationVerdict::RejectedUnknownSender);
    }

    #[test]
    fn test_accepted_debit_end_to_end() {
        let engine = ExtractionEngine::new();
        let result = engine.classify(
            "HDFCBK",
            "Rs.450.00 debited from a/c XX1234 for UPI txn. Ref No: 776655443",
            received(),
        );
        let tx = result.transaction().expect("should be accepted");
        assert_eq!(tx.signed_amount, -450.0);
        assert_eq!(tx.direction, Direction::Debit);
        assert_eq!(tx.reference.as_deref(), Some("776655443"));
        assert_eq!(tx.fingerprint, "776655443");
    }

    #[test]
    fn test_sign_invariant() {
        let engine = ExtractionEngine::new();
        let result = engine.classify(
            "HDFCBK",
            "Rs.450.00 debited from a/c XX1234 for UPI txn. Ref No: 776655443",
            received(),
        );
        let tx = result.transaction().unwrap();
        assert_eq!(tx.signed_amount < 0.0, tx.direction == Direction::Debit);
        assert_eq!(tx.amount(), 450.0);
    }

    #[test]
    fn test_duplicate_short_circuits_before_merchant() {
        let engine = ExtractionEngine::new();
        let body = "Rs.450.00 debited from a/c XX1234 for UPI txn. Ref No: 776655443";
        assert!(engine.classify("HDFCBK", body, received()).is_accepted());
        assert_eq!(
            engine.classify("HDFCBK", body, received()).verdict(),
            ClassificationVerdict::RejectedDuplicate
        );
    }

    #[test]
    fn test_manual_entry_bypasses_duplicate_cache() {
        let engine = ExtractionEngine::new();
        let body = "Rs.450.00 paid to Sharma Traders";
        assert!(engine.classify("Manual Entry", body, received()).is_accepted());
        assert!(engine.classify("Manual Entry", body, received()).is_accepted());
    }

    #[test]
    fn test_categorization_flows_from_counterparty() {
        let engine = ExtractionEngine::new();
        let result = engine.classify(
            "HDFCBK",
            "Rs.299.00 debited for purchase at SWIGGY, Avl bal Rs.1,200",
            received(),
        );
        let tx = result.transaction().unwrap();
        assert_eq!(tx.counterparty, "Swiggy");
        assert_eq!(tx.category, Category::Food);
    }
}
