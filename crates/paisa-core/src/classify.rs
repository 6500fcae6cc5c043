//! Message classification
//!
//! A strictly ordered decision procedure: rejection rules run first
//! (OTP, promotional, balance-only, credit-only), then the positive-signal
//! rule, and anything left over is rejected for lack of signal. Each rule is
//! a named object with one `evaluate` capability so precedence and tie-breaks
//! stay auditable and independently testable instead of buried in nested
//! conditionals.
//!
//! All keyword checks are case-insensitive and word-boundary-aware.

use regex::Regex;
use tracing::debug;

use crate::direction;
use crate::models::ClassificationVerdict;
use crate::text::{contains_any_word, contains_word};

/// Externally derived signals about one message, computed once and shared by
/// every rule. The engine fills these from the sender classifier, amount
/// extractor, reference extractor, and known-merchant list; rules derive
/// everything else from the body themselves.
#[derive(Debug)]
pub struct MessageContext<'a> {
    pub body: &'a str,
    /// Sender matched a bank entity code (not just a payment app)
    pub is_bank_sender: bool,
    /// Amount tier 1/2 found a positive value
    pub has_tagged_amount: bool,
    /// Some numeric token falls inside the plausible amount range
    pub has_plausible_token: bool,
    /// An amount is quoted in lacs/crores (offer copy, not a transaction)
    pub has_lacs_amount: bool,
    /// Reference extraction found a candidate
    pub has_reference: bool,
    /// A curated known-merchant name occurs in the body
    pub has_known_merchant: bool,
    /// Debit vocabulary present (word-bounded)
    pub has_debit: bool,
    /// Credit vocabulary present (word-bounded)
    pub has_credit: bool,
}

impl<'a> MessageContext<'a> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        body: &'a str,
        is_bank_sender: bool,
        has_tagged_amount: bool,
        has_plausible_token: bool,
        has_lacs_amount: bool,
        has_reference: bool,
        has_known_merchant: bool,
    ) -> Self {
        Self {
            body,
            is_bank_sender,
            has_tagged_amount,
            has_plausible_token,
            has_lacs_amount,
            has_reference,
            has_known_merchant,
            has_debit: direction::has_debit_vocabulary(body),
            has_credit: direction::has_credit_vocabulary(body),
        }
    }
}

/// What a rule decided about a message, if anything
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleDecision {
    Reject(ClassificationVerdict),
    Accept,
}

/// One named stage of the classification cascade
pub trait ClassifyRule: Send + Sync {
    fn name(&self) -> &'static str;
    /// None means "no opinion, ask the next rule"
    fn evaluate(&self, ctx: &MessageContext<'_>) -> Option<RuleDecision>;
}

/// Ordered rule cascade; first decision wins
pub struct MessageClassifier {
    rules: Vec<Box<dyn ClassifyRule>>,
}

impl MessageClassifier {
    pub fn new() -> Self {
        Self {
            rules: vec![
                Box::new(OtpRule::new()),
                Box::new(PromotionalRule::new()),
                Box::new(BalanceOnlyRule::new()),
                Box::new(CreditOnlyRule),
                Box::new(PositiveSignalsRule::new()),
            ],
        }
    }

    /// Run the cascade. Fall-through is `RejectedNoSignal`.
    pub fn classify(&self, ctx: &MessageContext<'_>) -> ClassificationVerdict {
        for rule in &self.rules {
            if let Some(decision) = rule.evaluate(ctx) {
                debug!(rule = rule.name(), ?decision, "classification rule fired");
                return match decision {
                    RuleDecision::Accept => ClassificationVerdict::Accepted,
                    RuleDecision::Reject(verdict) => verdict,
                };
            }
        }
        ClassificationVerdict::RejectedNoSignal
    }
}

impl Default for MessageClassifier {
    fn default() -> Self {
        Self::new()
    }
}

// ----------------------------------------------------------------------------
// Rule 1: OTP / verification codes
// ----------------------------------------------------------------------------

const OTP_STRONG: &[&str] = &[
    "otp",
    "one time password",
    "verification code",
    "security code",
    "auth code",
    "authentication code",
];

const OTP_BROAD: &[&str] = &[
    "login",
    "log in",
    "sign in",
    "signin",
    "passcode",
    "2fa",
    "two factor",
    "do not share this code",
];

struct OtpRule {
    numeric_code: Vec<Regex>,
}

impl OtpRule {
    fn new() -> Self {
        let numeric_code = [
            // "482910 is your OTP" / "code 482910"
            r"(?i)\b[0-9]{4,8}\b[^.\n]{0,30}\b(?:otp|code)\b",
            r"(?i)\b(?:otp|code)\b[^.\n]{0,30}\b[0-9]{4,8}\b",
            // "6-digit code"
            r"(?i)\b[0-9]\s*-?\s*digit\s+(?:otp|code)\b",
        ]
        .iter()
        .map(|p| Regex::new(p).expect("valid regex"))
        .collect();
        Self { numeric_code }
    }
}

impl ClassifyRule for OtpRule {
    fn name(&self) -> &'static str {
        "otp"
    }

    fn evaluate(&self, ctx: &MessageContext<'_>) -> Option<RuleDecision> {
        let hit = contains_any_word(ctx.body, OTP_STRONG)
            || self.numeric_code.iter().any(|p| p.is_match(ctx.body))
            || contains_any_word(ctx.body, OTP_BROAD);
        hit.then_some(RuleDecision::Reject(ClassificationVerdict::RejectedAsOtp))
    }
}

// ----------------------------------------------------------------------------
// Rule 2: promotional / marketing copy
// ----------------------------------------------------------------------------

const PROMO_KEYWORDS: &[&str] = &[
    "cashback",
    "discount",
    "voucher",
    "coupon",
    "congratulations",
    "winner",
    "lucky draw",
    "reward points",
    "free gift",
    "special offer",
    "exclusive offer",
    "limited period",
    "limited time",
    "hurry",
    "apply now",
    "avail now",
    "pre-approved",
    "t&c apply",
    "flat off",
];

const LOAN_KEYWORDS: &[&str] = &["loan", "get cash", "instant cash", "credit line"];

const INVITE_KEYWORDS: &[&str] = &["we invite you", "invite you", "invitation"];

struct PromotionalRule {
    url: Regex,
    percent: Regex,
    amount_range: Regex,
    lacs: Regex,
}

impl PromotionalRule {
    fn new() -> Self {
        Self {
            url: Regex::new(r"(?i)\b(?:https?://|www\.|bit\.ly/|tinyurl\.|t\.co/)")
                .expect("valid regex"),
            percent: Regex::new(r"[0-9]+(?:\.[0-9]+)?\s*%").expect("valid regex"),
            amount_range: Regex::new(
                r"(?i)\brs\.?\s*[0-9][0-9,]*\s*(?:-|to)\s*(?:rs\.?\s*)?[0-9][0-9,]*",
            )
            .expect("valid regex"),
            lacs: Regex::new(r"(?i)\b[0-9][0-9,.]*\s*(?:lacs?|lakhs?|crores?)\b")
                .expect("valid regex"),
        }
    }

    /// "maintain average balance" family: banks advertise minimum-balance
    /// benefits with currency amounts that would otherwise look transactional
    fn is_balance_marketing(&self, body: &str) -> bool {
        contains_word(body, "maintain") && contains_word(body, "balance")
    }

    fn is_invitation_marketing(&self, body: &str) -> bool {
        contains_any_word(body, INVITE_KEYWORDS)
            && (self.percent.is_match(body) || self.amount_range.is_match(body))
    }

    /// Loan-offer and "get cash" variants: keyword plus lacs/crores amount,
    /// apply-now phrasing, or a URL
    fn is_loan_marketing(&self, body: &str) -> bool {
        contains_any_word(body, LOAN_KEYWORDS)
            && (self.lacs.is_match(body)
                || contains_word(body, "apply now")
                || contains_word(body, "apply")
                || self.url.is_match(body))
    }
}

impl ClassifyRule for PromotionalRule {
    fn name(&self) -> &'static str {
        "promotional"
    }

    fn evaluate(&self, ctx: &MessageContext<'_>) -> Option<RuleDecision> {
        let hit = contains_any_word(ctx.body, PROMO_KEYWORDS)
            || self.url.is_match(ctx.body)
            || self.is_balance_marketing(ctx.body)
            || self.is_invitation_marketing(ctx.body)
            || self.is_loan_marketing(ctx.body);
        hit.then_some(RuleDecision::Reject(
            ClassificationVerdict::RejectedAsPromotional,
        ))
    }
}

// ----------------------------------------------------------------------------
// Rule 3: balance statements without transactional evidence
// ----------------------------------------------------------------------------

const BALANCE_PHRASES: &[&str] = &[
    "available balance",
    "avl bal",
    "avail bal",
    "available bal",
    "a/c balance",
    "account balance",
    "closing balance",
    "balance is",
    "bal is",
];

struct BalanceOnlyRule {
    verb_amount: Regex,
}

impl BalanceOnlyRule {
    fn new() -> Self {
        // A transaction verb directly attached to an amount is evidence that
        // the message reports movement, not just a standing balance
        Self {
            verb_amount: Regex::new(
                r"(?i)\b(?:debited|credited|paid|sent|received|spent|withdrawn|deducted|transferred)\b[^.\n]{0,25}[0-9]|[0-9][^.\n]{0,25}\b(?:debited|credited|paid|sent|received|spent|withdrawn|deducted|transferred)\b",
            )
            .expect("valid regex"),
        }
    }
}

impl ClassifyRule for BalanceOnlyRule {
    fn name(&self) -> &'static str {
        "balance_only"
    }

    fn evaluate(&self, ctx: &MessageContext<'_>) -> Option<RuleDecision> {
        let balance_statement = contains_any_word(ctx.body, BALANCE_PHRASES);
        let hit = balance_statement && !ctx.has_debit && !self.verb_amount.is_match(ctx.body);
        hit.then_some(RuleDecision::Reject(
            ClassificationVerdict::RejectedAsBalanceOnly,
        ))
    }
}

// ----------------------------------------------------------------------------
// Rule 4: pure credits
// ----------------------------------------------------------------------------

/// Money received is not spending. Dual-mention messages (sender debited,
/// recipient credited in the same text) fall through: the debit vocabulary
/// keeps them alive and the direction classifier marks them as debits.
struct CreditOnlyRule;

impl ClassifyRule for CreditOnlyRule {
    fn name(&self) -> &'static str {
        "credit_only"
    }

    fn evaluate(&self, ctx: &MessageContext<'_>) -> Option<RuleDecision> {
        let hit = ctx.has_credit && !ctx.has_debit;
        hit.then_some(RuleDecision::Reject(
            ClassificationVerdict::RejectedCreditOnly,
        ))
    }
}

// ----------------------------------------------------------------------------
// Rule 5: positive transactional signals
// ----------------------------------------------------------------------------

const CARD_PHRASES: &[&str] = &[
    "card ending",
    "card no",
    "card xx",
    "your card",
    "credit card",
    "debit card",
    "card was used",
    "pos",
    "swiped",
    "ecom",
];

struct PositiveSignalsRule {
    merchant_preposition: Regex,
}

impl PositiveSignalsRule {
    fn new() -> Self {
        Self {
            // "at AMAZON", "to Ramesh", "towards rent" next to a word start
            merchant_preposition: Regex::new(r"(?i)\b(?:at|to|towards)\s+[A-Za-z]")
                .expect("valid regex"),
        }
    }
}

impl ClassifyRule for PositiveSignalsRule {
    fn name(&self) -> &'static str {
        "positive_signals"
    }

    fn evaluate(&self, ctx: &MessageContext<'_>) -> Option<RuleDecision> {
        let amount = ctx.has_tagged_amount;

        let accept = (ctx.has_debit && amount)
            || (ctx.has_reference && amount)
            || (self.merchant_preposition.is_match(ctx.body) && amount)
            || (ctx.has_known_merchant && (amount || ctx.has_reference))
            || (contains_any_word(ctx.body, CARD_PHRASES) && amount)
            || (ctx.has_plausible_token && ctx.has_debit)
            // Weak fallback: a trusted bank talking numbers is usually a
            // transaction, unless the amount is quoted in lacs/crores
            || (ctx.is_bank_sender && ctx.has_plausible_token && !ctx.has_lacs_amount);

        accept.then_some(RuleDecision::Accept)
    }
}
