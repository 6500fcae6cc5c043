//! Storage collaborator seam
//!
//! The engine itself never persists anything. Callers hand accepted
//! transactions to a store and, before doing so, run the persisted duplicate
//! check defined here against recently stored records. The policy lives in
//! this crate so every caller applies identical rules:
//!
//! - within the persisted window, two messages are duplicates when their
//!   bodies are byte-identical, or their extracted references match;
//! - when neither carries a reference, sender + amount (within tolerance) +
//!   counterparty matching inside a much tighter window also counts;
//! - two different non-empty references are NEVER duplicates, whatever else
//!   matches. Reference identity dominates every other heuristic.
//!
//! Manual entries bypass the check entirely.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::config::EngineConfig;
use crate::models::ExtractedTransaction;
use crate::sender::SenderClassifier;

/// Query surface the storage collaborator must expose
pub trait TransactionStore {
    /// Transactions persisted with `observed_at >= since`, any order
    fn transactions_since(&self, since: DateTime<Utc>) -> Vec<ExtractedTransaction>;
}

/// Decide whether `candidate` duplicates an already-persisted transaction.
///
/// Callers invoke this between `classify` and persistence; a `true` result
/// means the candidate should be discarded.
pub fn find_persisted_duplicate(
    store: &dyn TransactionStore,
    candidate: &ExtractedTransaction,
    senders: &SenderClassifier,
    config: &EngineConfig,
) -> bool {
    if senders.is_manual_entry(&candidate.source_sender) {
        return false;
    }

    let since = candidate.observed_at - config.persisted_window;
    for prior in store.transactions_since(since) {
        // Reference identity dominates: equal references are a duplicate,
        // differing non-empty references are never one
        if let (Some(candidate_ref), Some(prior_ref)) = (&candidate.reference, &prior.reference) {
            if candidate_ref == prior_ref {
                debug!(reference = %candidate_ref, "persisted duplicate by reference");
                return true;
            }
            continue;
        }

        if prior.source_body == candidate.source_body {
            debug!("persisted duplicate by identical body");
            return true;
        }

        // No-reference fallback: equality of sender, amount, and counterparty
        // inside the tight window
        if candidate.reference.is_none() && prior.reference.is_none() {
            let gap = (candidate.observed_at - prior.observed_at).abs();
            if gap <= config.fallback_match_window
                && prior.source_sender == candidate.source_sender
                && (prior.amount() - candidate.amount()).abs() <= config.amount_tolerance
                && prior.counterparty == candidate.counterparty
            {
                debug!("persisted duplicate by sender/amount/counterparty");
                return true;
            }
        }
    }

    false
}

/// In-memory store for tests and embedding without a database
#[derive(Debug, Default)]
pub struct MemoryStore {
    transactions: std::sync::Mutex<Vec<ExtractedTransaction>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, tx: ExtractedTransaction) {
        self.transactions
            .lock()
            .expect("memory store poisoned")
            .push(tx);
    }

    pub fn len(&self) -> usize {
        self.transactions.lock().expect("memory store poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TransactionStore for MemoryStore {
    fn transactions_since(&self, since: DateTime<Utc>) -> Vec<ExtractedTransaction> {
        self.transactions
            .lock()
            .expect("memory store poisoned")
            .iter()
            .filter(|tx| tx.observed_at >= since)
            .cloned()
            .collect()
    }
}
