use std::{collections::HashMap, path::Path};

use log::*;

/// Static mapping from bank code to a human-readable bank name.
///
/// Loaded once at process start. A missing or unreadable backing file is not fatal: the
/// directory degrades to an empty mapping and display falls back to the raw bank code.
#[derive(Debug, Clone, Default)]
pub struct BankDirectory {
    banks: HashMap<String, String>,
}

impl BankDirectory {
    pub fn new(banks: HashMap<String, String>) -> Self {
        Self { banks }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Load the directory from a JSON file of the form `{"822": "CTBC Bank", ...}`.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        let raw = match std::fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) => {
                error!("🏦️ Could not read bank directory file {}. Bank names will not be displayed. {e}", path.display());
                return Self::empty();
            },
        };
        match serde_json::from_str::<HashMap<String, String>>(&raw) {
            Ok(banks) => {
                info!("🏦️ Loaded {} bank names from {}", banks.len(), path.display());
                Self::new(banks)
            },
            Err(e) => {
                error!("🏦️ Bank directory file {} is not valid JSON. Bank names will not be displayed. {e}", path.display());
                Self::empty()
            },
        }
    }

    pub fn name_for(&self, bank_code: &str) -> Option<&str> {
        self.banks.get(bank_code).map(String::as_str)
    }

    /// Display name for an approved transfer: the bank name, or an "unknown bank" label carrying
    /// the raw code.
    pub fn name_or_unknown(&self, bank_code: &str) -> String {
        self.name_for(bank_code).map(String::from).unwrap_or_else(|| format!("unknown bank ({bank_code})"))
    }

    /// Display name for a rejected transfer: the bank name, or the raw code.
    pub fn name_or_code(&self, bank_code: &str) -> String {
        self.name_for(bank_code).map(String::from).unwrap_or_else(|| format!("code {bank_code}"))
    }

    pub fn len(&self) -> usize {
        self.banks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.banks.is_empty()
    }
}
