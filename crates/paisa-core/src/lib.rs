//! Paisa Core Library
//!
//! SMS transaction classification and extraction engine:
//! - Sender gating against curated bank and payment-app code sets
//! - Ordered rule cascade separating transactions from OTP, promotional,
//!   balance-only, and credit-only messages
//! - Three-tier amount extraction with decimal tie-breaks
//! - Reference extraction, fingerprint synthesis, and receive-time
//!   duplicate suppression
//! - Nine-tier merchant/counterparty extraction with name cleanup
//! - Keyword taxonomy categorization
//! - Persisted duplicate-check policy shared with storage collaborators
//!
//! The engine is a pure function over short strings plus one mutex-guarded
//! duplicate cache; it performs no I/O and never fails, degrading every
//! undecidable input to a rejection verdict or a safe default label.

pub mod amount;
pub mod category;
pub mod classify;
pub mod config;
pub mod dedup;
pub mod direction;
pub mod engine;
pub mod error;
pub mod merchant;
pub mod models;
pub mod reference;
pub mod sender;
pub mod store;
mod text;

pub use amount::AmountExtractor;
pub use category::CategoryTaxonomy;
pub use classify::{ClassifyRule, MessageClassifier, MessageContext, RuleDecision};
pub use config::EngineConfig;
pub use dedup::DuplicateCache;
pub use engine::ExtractionEngine;
pub use error::{Error, Result};
pub use merchant::{MerchantContext, MerchantExtractor};
pub use models::{
    Category, ClassificationResult, ClassificationVerdict, Direction, ExtractedTransaction,
    InboundMessage,
};
pub use reference::ReferenceExtractor;
pub use sender::SenderClassifier;
pub use store::{find_persisted_duplicate, MemoryStore, TransactionStore};
