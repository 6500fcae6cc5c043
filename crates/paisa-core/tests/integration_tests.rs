//! Integration tests for paisa-core
//!
//! These tests exercise the full classify → duplicate-check → persist
//! workflow over realistic bank SMS bodies.

use chrono::{DateTime, Duration, TimeZone, Utc};
use paisa_core::{
    find_persisted_duplicate, Category, ClassificationVerdict, Direction, EngineConfig,
    ExtractionEngine, MemoryStore, SenderClassifier,
};

fn received() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 4, 12, 14, 5, 30).unwrap()
}

const HDFC_POS_BODY: &str = "Rs.2,599.00 has been debited from a/c no. XX7290 on 12-04-23 for POS purchase at AMAZON RETAIL IN. Avl bal: Rs.45,321.56";

const ICICI_UPI_BODY: &str = "Rs.100.00 debited from A/c no. XX5678 on 15-Feb-24 using UPI-RAZORUPIIN. UPI Ref ICIC333456. Balance: Rs.24,560.98";

// =============================================================================
// Real-World Scenarios
// =============================================================================

#[test]
fn test_hdfc_pos_purchase_scenario() {
    let engine = ExtractionEngine::new();

    let result = engine.classify("HDFCBK", HDFC_POS_BODY, received());
    let tx = result.transaction().expect("POS purchase should be accepted");

    assert_eq!(tx.signed_amount, -2599.00);
    assert_eq!(tx.direction, Direction::Debit);
    assert_eq!(tx.counterparty, "Amazon Retail");
    assert_eq!(tx.category, Category::Shopping);
}

#[test]
fn test_icici_upi_scenario() {
    let engine = ExtractionEngine::new();

    let result = engine.classify("ICICIB", ICICI_UPI_BODY, received());
    let tx = result.transaction().expect("UPI debit should be accepted");

    assert_eq!(tx.signed_amount, -100.00);
    assert_eq!(tx.reference.as_deref(), Some("ICIC333456"));
    assert_eq!(tx.fingerprint, "ICIC333456");
}

#[test]
fn test_balance_marketing_rejected_despite_amount() {
    let engine = ExtractionEngine::new();

    let body = "Dear customer, maintain an average monthly balance of Rs.10,000 to enjoy exclusive benefits on your account.";
    let result = engine.classify("HDFCBK", body, received());

    assert_eq!(result.verdict(), ClassificationVerdict::RejectedAsPromotional);
}

#[test]
fn test_otp_rejected_from_any_trusted_sender() {
    let engine = ExtractionEngine::new();
    let body = "Your OTP for login is 482910. Do not share.";

    for sender in ["HDFCBK", "ICICIB", "PAYTMB", "VM-SBIINB-S"] {
        let result = engine.classify(sender, body, received());
        assert_eq!(
            result.verdict(),
            ClassificationVerdict::RejectedAsOtp,
            "sender {} should reject as OTP",
            sender
        );
    }
}

#[test]
fn test_otp_never_yields_a_transaction() {
    let engine = ExtractionEngine::new();

    let bodies = [
        "Your OTP for login is 482910. Do not share.",
        "123456 is the verification code for your txn of Rs.500",
        "Use the 6-digit code 998877 to authorise the payment",
    ];
    for body in bodies {
        let result = engine.classify("HDFCBK", body, received());
        assert!(
            result.transaction().is_none(),
            "OTP body must never extract: {}",
            body
        );
    }
}

// =============================================================================
// Invariants
// =============================================================================

#[test]
fn test_sign_matches_direction_for_accepted_messages() {
    let engine = ExtractionEngine::new();

    let debits = [
        ("HDFCBK", HDFC_POS_BODY),
        ("ICICIB", ICICI_UPI_BODY),
        ("SBIINB", "Rs.1,250.00 paid to Sharma Medical Hall via UPI. Ref No: 445566778"),
    ];
    for (sender, body) in debits {
        let result = engine.classify(sender, body, received());
        let tx = result.transaction().expect("should accept");
        assert_eq!(
            tx.signed_amount < 0.0,
            tx.direction == Direction::Debit,
            "sign invariant violated for: {}",
            body
        );
        assert!(tx.amount() > 0.0);
    }
}

#[test]
fn test_decimal_token_beats_larger_integer() {
    let engine = ExtractionEngine::new();

    // 2024 is a year, 2,599.00 is the money
    let body = "Card payment 2024 of 2,599.00 done. Ref No: 889900112";
    let result = engine.classify("HDFCBK", body, received());
    let tx = result.transaction().expect("should accept");
    assert_eq!(tx.amount(), 2599.00);
}

#[test]
fn test_idempotence_modulo_duplicate_suppression() {
    // Two fresh engines see the same input identically
    let first = ExtractionEngine::new()
        .classify("ICICIB", ICICI_UPI_BODY, received())
        .transaction()
        .cloned()
        .expect("accepted");
    let second = ExtractionEngine::new()
        .classify("ICICIB", ICICI_UPI_BODY, received())
        .transaction()
        .cloned()
        .expect("accepted");

    assert_eq!(first.signed_amount, second.signed_amount);
    assert_eq!(first.direction, second.direction);
    assert_eq!(first.counterparty, second.counterparty);
    assert_eq!(first.category, second.category);
    assert_eq!(first.fingerprint, second.fingerprint);
    assert_eq!(first.reference, second.reference);

    // One engine sees the repeat only as a duplicate
    let engine = ExtractionEngine::new();
    assert!(engine.classify("ICICIB", ICICI_UPI_BODY, received()).is_accepted());
    assert_eq!(
        engine.classify("ICICIB", ICICI_UPI_BODY, received()).verdict(),
        ClassificationVerdict::RejectedDuplicate
    );
}

// =============================================================================
// Duplicate Suppression
// =============================================================================

#[test]
fn test_identical_resend_within_thirty_minutes_is_suppressed() {
    let engine = ExtractionEngine::new();

    assert!(engine.classify("HDFCBK", HDFC_POS_BODY, received()).is_accepted());

    let resend_at = received() + Duration::minutes(10);
    let result = engine.classify("HDFCBK", HDFC_POS_BODY, resend_at);
    assert_eq!(result.verdict(), ClassificationVerdict::RejectedDuplicate);
}

#[test]
fn test_resend_after_window_is_accepted_again() {
    let engine = ExtractionEngine::new();

    assert!(engine.classify("HDFCBK", HDFC_POS_BODY, received()).is_accepted());

    let much_later = received() + Duration::minutes(31);
    assert!(engine.classify("HDFCBK", HDFC_POS_BODY, much_later).is_accepted());
}

#[test]
fn test_different_references_are_never_duplicates() {
    let engine = ExtractionEngine::new();

    // Same sender, same amount, same merchant phrasing; only the reference
    // differs. Both must survive the receive-time cache...
    let body_a = "Rs.500.00 paid to Sharma Traders via UPI. Ref No: 111111222";
    let body_b = "Rs.500.00 paid to Sharma Traders via UPI. Ref No: 333333444";
    let tx_a = engine
        .classify("HDFCBK", body_a, received())
        .transaction()
        .cloned()
        .expect("accepted");
    let tx_b = engine
        .classify("HDFCBK", body_b, received() + Duration::seconds(5))
        .transaction()
        .cloned()
        .expect("accepted");

    // ...and the persisted check must agree
    let store = MemoryStore::new();
    let senders = SenderClassifier::new();
    let config = EngineConfig::default();
    store.insert(tx_a);
    assert!(!find_persisted_duplicate(&store, &tx_b, &senders, &config));
}

#[test]
fn test_full_workflow_with_persisted_check() {
    let engine = ExtractionEngine::new();
    let store = MemoryStore::new();
    let senders = SenderClassifier::new();
    let config = EngineConfig::default();

    // First delivery: classify, check against store, persist
    let tx = engine
        .classify("ICICIB", ICICI_UPI_BODY, received())
        .transaction()
        .cloned()
        .expect("accepted");
    assert!(!find_persisted_duplicate(&store, &tx, &senders, &config));
    store.insert(tx);
    assert_eq!(store.len(), 1);

    // A second delivery a minute later slips past a fresh engine's cache but
    // the persisted reference check catches it
    let other_engine = ExtractionEngine::new();
    let repeat = other_engine
        .classify("ICICIB", ICICI_UPI_BODY, received() + Duration::seconds(60))
        .transaction()
        .cloned()
        .expect("fresh engine accepts");
    assert!(find_persisted_duplicate(&store, &repeat, &senders, &config));
}

// =============================================================================
// Rejection Verdicts
// =============================================================================

#[test]
fn test_unknown_sender_discards_before_extraction() {
    let engine = ExtractionEngine::new();

    let result = engine.classify("AM-SPAMCO", HDFC_POS_BODY, received());
    assert_eq!(result.verdict(), ClassificationVerdict::RejectedUnknownSender);
}

#[test]
fn test_credit_only_message_rejected() {
    let engine = ExtractionEngine::new();

    let body = "Rs.5,000.00 credited to your A/c no. XX1234 by NEFT on 12-04-23";
    let result = engine.classify("SBIINB", body, received());
    assert_eq!(result.verdict(), ClassificationVerdict::RejectedCreditOnly);
}

#[test]
fn test_dual_mention_message_is_a_debit() {
    let engine = ExtractionEngine::new();

    let body = "Rs.750.00 debited from A/c XX1234 and credited to Anil Verma. Ref No: 556677889";
    let result = engine.classify("SBIINB", body, received());
    let tx = result.transaction().expect("dual mention is a debit");
    assert_eq!(tx.direction, Direction::Debit);
    assert_eq!(tx.signed_amount, -750.00);
}

#[test]
fn test_balance_only_statement_rejected() {
    let engine = ExtractionEngine::new();

    let body = "Your a/c balance is Rs.45,321.56 as on 12-04-23";
    let result = engine.classify("HDFCBK", body, received());
    assert_eq!(result.verdict(), ClassificationVerdict::RejectedAsBalanceOnly);
}

#[test]
fn test_no_signal_body_rejected() {
    let engine = ExtractionEngine::new();

    let body = "Dear customer, your cheque book request has been registered";
    let result = engine.classify("HDFCBK", body, received());
    assert_eq!(result.verdict(), ClassificationVerdict::RejectedNoSignal);
}

// =============================================================================
// Wire Shape
// =============================================================================

#[test]
fn test_extracted_transaction_wire_shape() {
    let engine = ExtractionEngine::new();

    let tx = engine
        .classify("ICICIB", ICICI_UPI_BODY, received())
        .transaction()
        .cloned()
        .expect("accepted");

    let json = serde_json::to_value(&tx).expect("serializes");
    assert_eq!(json["signed_amount"], -100.0);
    assert_eq!(json["direction"], "debit");
    assert_eq!(json["fingerprint"], "ICIC333456");
    assert_eq!(json["source_sender"], "ICICIB");
    assert!(json["observed_at"].is_string());
}
