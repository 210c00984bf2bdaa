//! The pure decision core of the pipeline.
//!
//! [`verify`] has no side effects of its own. Dispatch to the notification and ledger sinks is
//! the caller's responsibility, which keeps this function independently testable and makes its
//! output a pure function of the event and the configuration (timestamp aside).
use chrono::Local;
use log::*;

use crate::{BankDirectory, TransferEvent, VerificationConfig, VerificationResult};

/// Decide whether an inbound transfer event matches a configured expected account, and compute
/// the profit split.
///
/// Matching is exact string equality on the reported account, with no normalization: leading
/// zeros and formatting differences count as mismatches. A bank code with no configured entry
/// never matches. The split is computed at full precision; rounding to cents is a display
/// concern.
pub fn verify(event: &TransferEvent, config: &VerificationConfig, directory: &BankDirectory) -> VerificationResult {
    let expected = config.expected_account(event.bank_code());
    let approved = expected.is_some_and(|account| account == event.account());
    if expected.is_none() {
        debug!("🔎️ No expected account is configured for bank code {}.", event.bank_code());
    }
    let bank_name = if approved {
        directory.name_or_unknown(event.bank_code())
    } else {
        directory.name_or_code(event.bank_code())
    };
    let gross_amount = event.amount();
    let profit_share = gross_amount * config.profit_rate;
    let net_amount = gross_amount - profit_share;
    VerificationResult {
        approved,
        bank_name,
        gross_amount,
        profit_share,
        net_amount,
        profit_rate: config.profit_rate,
        verified_at: Local::now(),
    }
}
