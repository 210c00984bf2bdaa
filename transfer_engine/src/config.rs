use std::collections::HashMap;

use btm_common::Secret;

/// The profit share applied to approved transfers unless configured otherwise.
pub const DEFAULT_PROFIT_RATE: f64 = 0.10;

/// Process-wide verification settings. Built once at startup and read-only thereafter, so it can
/// be shared freely across concurrent pipeline runs.
#[derive(Debug, Clone)]
pub struct VerificationConfig {
    /// The set of (bank code → account) pairs considered legitimate destinations. At most one
    /// account per bank code; a code without an entry can never match.
    expected_accounts: HashMap<String, String>,
    /// Fraction of each approved gross amount that is set aside as profit share.
    pub profit_rate: f64,
    /// The value the `X-Webhook-Secret` header must carry for inbound events to be accepted.
    pub shared_secret: Secret<String>,
}

impl VerificationConfig {
    pub fn new(shared_secret: Secret<String>) -> Self {
        Self { expected_accounts: HashMap::new(), profit_rate: DEFAULT_PROFIT_RATE, shared_secret }
    }

    /// Register the legitimate destination account for a bank code. Registering a code twice
    /// replaces the earlier entry.
    pub fn with_expected_account<S1, S2>(mut self, bank_code: S1, account: S2) -> Self
    where
        S1: Into<String>,
        S2: Into<String>,
    {
        self.expected_accounts.insert(bank_code.into(), account.into());
        self
    }

    pub fn with_profit_rate(mut self, rate: f64) -> Self {
        self.profit_rate = rate;
        self
    }

    pub fn expected_account(&self, bank_code: &str) -> Option<&str> {
        self.expected_accounts.get(bank_code).map(String::as_str)
    }

    pub fn bank_count(&self) -> usize {
        self.expected_accounts.len()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn config() -> VerificationConfig {
        VerificationConfig::new(Secret::new("s3cret".to_string()))
            .with_expected_account("822", "111222333444")
            .with_expected_account("700", "0001234567890")
    }

    #[test]
    fn lookup_by_bank_code() {
        let config = config();
        assert_eq!(config.expected_account("822"), Some("111222333444"));
        assert_eq!(config.expected_account("700"), Some("0001234567890"));
        assert_eq!(config.expected_account("004"), None);
        assert_eq!(config.bank_count(), 2);
    }

    #[test]
    fn one_account_per_bank_code() {
        let config = config().with_expected_account("822", "999999999999");
        assert_eq!(config.expected_account("822"), Some("999999999999"));
        assert_eq!(config.bank_count(), 2);
    }

    #[test]
    fn default_profit_rate_is_ten_percent() {
        let config = VerificationConfig::new(Secret::new(String::new()));
        assert!((config.profit_rate - 0.10).abs() < f64::EPSILON);
        let config = config.with_profit_rate(0.25);
        assert!((config.profit_rate - 0.25).abs() < f64::EPSILON);
    }
}
