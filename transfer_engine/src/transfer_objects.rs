use std::fmt::Display;

use btm_common::Money;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// The format used for all user-facing and ledger timestamps.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Source label used when an inbound event does not say where it came from.
pub const UNKNOWN_SOURCE_LABEL: &str = "unknown";

//--------------------------------------   TransferEvent    ----------------------------------------------------------
/// One inbound claim of funds received. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferEvent {
    bank_code: String,
    account: String,
    amount: Money,
    source_label: String,
}

impl TransferEvent {
    pub fn new<S1, S2>(bank_code: S1, account: S2, amount: Money, source_label: Option<String>) -> Self
    where
        S1: Into<String>,
        S2: Into<String>,
    {
        let source_label = source_label.unwrap_or_else(|| UNKNOWN_SOURCE_LABEL.to_string());
        Self { bank_code: bank_code.into(), account: account.into(), amount, source_label }
    }

    pub fn bank_code(&self) -> &str {
        &self.bank_code
    }

    pub fn account(&self) -> &str {
        &self.account
    }

    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn source_label(&self) -> &str {
        &self.source_label
    }
}

impl Display for TransferEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} NT$ into account {} via bank {} (source: {})",
            self.amount, self.account, self.bank_code, self.source_label
        )
    }
}

//--------------------------------------  VerificationResult  --------------------------------------------------------
/// The outcome of verifying a single [`TransferEvent`]. Produced per call, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct VerificationResult {
    pub approved: bool,
    pub bank_name: String,
    pub gross_amount: Money,
    pub profit_share: Money,
    pub net_amount: Money,
    pub profit_rate: f64,
    pub verified_at: DateTime<Local>,
}

impl VerificationResult {
    /// The verification time in the fixed local format used by messages and the ledger.
    pub fn local_timestamp(&self) -> String {
        self.verified_at.format(TIMESTAMP_FORMAT).to_string()
    }
}

//--------------------------------------    LedgerEntry     ----------------------------------------------------------
/// One row of the append-only transfer ledger. Column order is fixed and must not change, since
/// the backing store is a plain tabular resource with no headers-based addressing.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerEntry {
    pub timestamp: String,
    pub bank_name: String,
    pub account: String,
    pub gross_amount: Money,
    pub profit_share: Money,
    pub net_amount: Money,
    pub source_label: String,
}

impl LedgerEntry {
    pub fn new(event: &TransferEvent, result: &VerificationResult) -> Self {
        Self {
            timestamp: result.local_timestamp(),
            bank_name: result.bank_name.clone(),
            account: event.account().to_string(),
            gross_amount: result.gross_amount,
            profit_share: result.profit_share,
            net_amount: result.net_amount,
            source_label: event.source_label().to_string(),
        }
    }

    /// The row in its fixed column order: timestamp, bank, account, gross, profit, net, source.
    pub fn as_row(&self) -> [String; 7] {
        [
            self.timestamp.clone(),
            self.bank_name.clone(),
            self.account.clone(),
            self.gross_amount.to_string(),
            self.profit_share.to_string(),
            self.net_amount.to_string(),
            self.source_label.clone(),
        ]
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn missing_source_label_defaults_to_unknown() {
        let event = TransferEvent::new("822", "123456789012", Money::from(100), None);
        assert_eq!(event.source_label(), "unknown");
        let event = TransferEvent::new("822", "123456789012", Money::from(100), Some("ATM".to_string()));
        assert_eq!(event.source_label(), "ATM");
    }

    #[test]
    fn ledger_row_column_order() {
        let event = TransferEvent::new("822", "111222333444", Money::from(50_000), Some("wire".to_string()));
        let result = VerificationResult {
            approved: true,
            bank_name: "CTBC Bank".to_string(),
            gross_amount: Money::from(50_000),
            profit_share: Money::from(5_000),
            net_amount: Money::from(45_000),
            profit_rate: 0.1,
            verified_at: Local::now(),
        };
        let entry = LedgerEntry::new(&event, &result);
        let row = entry.as_row();
        assert_eq!(row[0], result.local_timestamp());
        assert_eq!(row[1], "CTBC Bank");
        assert_eq!(row[2], "111222333444");
        assert_eq!(row[3], "50,000.00");
        assert_eq!(row[4], "5,000.00");
        assert_eq!(row[5], "45,000.00");
        assert_eq!(row[6], "wire");
    }
}
