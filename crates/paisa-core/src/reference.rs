//! Reference extraction and fingerprint synthesis
//!
//! A fingerprint identifies the same underlying transaction across repeated
//! message deliveries. When the body carries an explicit reference number,
//! that number is the fingerprint; otherwise one is synthesized from the
//! amount, a best-effort date/time token, and a hash of the full body. The
//! synthesized form keeps distinct unreferenced messages from different
//! minutes apart while collapsing identical resends within the same minute.

use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;
use sha2::{Digest, Sha256};

/// Minimum length for an extracted reference candidate
const MIN_REFERENCE_LEN: usize = 6;

/// Compiled reference pattern cascade
#[derive(Debug)]
pub struct ReferenceExtractor {
    patterns: Vec<Regex>,
    masked: Regex,
    date_token: Regex,
    time_token: Regex,
}

impl ReferenceExtractor {
    pub fn new() -> Self {
        let patterns = [
            // Explicit "Ref NNN" forms: Ref 123456 / Ref No: ABC123 / Reference# X
            r"(?i)\bref(?:erence)?\s*(?:no|num|number|id)?\.?\s*[:#-]?\s*([A-Za-z0-9]{6,})",
            // Labelled transaction ids: Txn ID 998877 / UTR no 1234567 / UPI Ref ICIC333456
            r"(?i)\b(?:txn|transaction|utr|rrn|upi)\s*[.\-]?\s*(?:ref|id|no)\.?\s*[:#-]?\s*([A-Za-z0-9]{6,})",
            // Generic labels, colon/hash required so "a/c no. XX7290" stays out
            r"(?i)\b(?:id|no|number)\s*[:#]\s*([A-Za-z0-9]{6,})",
            // UPI route forms: UPI/P2A/327741289/... or UPI-327741289
            r"(?i)\bupi[/-](?:p2[am][/-])?([0-9]{6,})",
        ]
        .iter()
        .map(|p| Regex::new(p).expect("valid regex"))
        .collect();

        Self {
            patterns,
            masked: Regex::new(r"(?i)^[x*]+[0-9]+$").expect("valid regex"),
            date_token: Regex::new(r"\b[0-9]{1,2}[-/](?:[0-9]{1,2}|[A-Za-z]{3})[-/][0-9]{2,4}\b")
                .expect("valid regex"),
            time_token: Regex::new(r"\b[0-9]{1,2}:[0-9]{2}\b").expect("valid regex"),
        }
    }

    /// Run the extraction cascade. The first candidate that is long enough,
    /// not a masked account number, and not date-shaped wins.
    pub fn extract(&self, body: &str) -> Option<String> {
        for pattern in &self.patterns {
            for caps in pattern.captures_iter(body) {
                if let Some(candidate) = caps.get(1).map(|m| m.as_str()) {
                    if self.is_valid_reference(candidate) {
                        return Some(candidate.to_uppercase());
                    }
                }
            }
        }
        None
    }

    /// Build the deduplication fingerprint for an accepted message
    pub fn fingerprint(
        &self,
        body: &str,
        amount: f64,
        received_at: DateTime<Utc>,
        reference: Option<&str>,
    ) -> String {
        if let Some(reference) = reference {
            return reference.to_uppercase();
        }

        // Best-effort date/time token from the body keeps resends of the
        // same dated message together; receive-minute granularity otherwise
        let when = self
            .date_token
            .find(body)
            .or_else(|| self.time_token.find(body))
            .map(|m| m.as_str().to_string())
            .unwrap_or_else(|| received_at.format("%Y%m%d%H%M").to_string());

        let mut hasher = Sha256::new();
        hasher.update(body.as_bytes());
        let body_hash = hex::encode(hasher.finalize());

        format!("{:.2}|{}|{}", amount, when, &body_hash[..16])
    }

    fn is_valid_reference(&self, candidate: &str) -> bool {
        candidate.len() >= MIN_REFERENCE_LEN
            && !self.masked.is_match(candidate)
            && !is_date_shaped(candidate)
    }
}

impl Default for ReferenceExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// True for pure digit runs that parse as a calendar date (ddmmyy, ddmmyyyy,
/// yyyymmdd). Those are almost always transaction dates, not references.
fn is_date_shaped(candidate: &str) -> bool {
    if !candidate.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }
    match candidate.len() {
        6 => NaiveDate::parse_from_str(candidate, "%d%m%y").is_ok(),
        8 => {
            NaiveDate::parse_from_str(candidate, "%d%m%Y").is_ok()
                || NaiveDate::parse_from_str(candidate, "%Y%m%d").is_ok()
        }
        _ => false,
    }
}
