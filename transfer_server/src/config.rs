use std::{env, time::Duration};

use btm_common::{helpers::parse_boolean_flag, Secret};
use dispatch_tools::{SheetsConfig, TelegramConfig};
use log::*;
use transfer_engine::{VerificationConfig, DEFAULT_PROFIT_RATE};

const DEFAULT_BTM_HOST: &str = "127.0.0.1";
const DEFAULT_BTM_PORT: u16 = 8360;
const DEFAULT_BANK_DIRECTORY: &str = "data/bank_codes.json";
const DEFAULT_SINK_TIMEOUT_SECS: u64 = 10;
const DEFAULT_CTBC_CODE: &str = "822";
const DEFAULT_POST_CODE: &str = "700";

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// If true, the X-Forwarded-For header will be used to determine the client's IP address,
    /// rather than the connection's remote address.
    pub use_x_forwarded_for: bool,
    /// If true, the Forwarded header will be used to determine the client's IP address, rather
    /// than the connection's remote address.
    pub use_forwarded: bool,
    /// When false, the webhook-secret check is skipped. Local development only. **DANGER**
    pub webhook_auth_checks: bool,
    /// Path to the JSON file mapping bank codes to display names.
    pub bank_directory_path: String,
    /// Upper bound on any single notification or ledger call.
    pub sink_timeout: Duration,
    pub verification: VerificationConfig,
    pub telegram: TelegramConfig,
    pub sheets: SheetsConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_BTM_HOST.to_string(),
            port: DEFAULT_BTM_PORT,
            use_x_forwarded_for: false,
            use_forwarded: false,
            webhook_auth_checks: true,
            bank_directory_path: DEFAULT_BANK_DIRECTORY.to_string(),
            sink_timeout: Duration::from_secs(DEFAULT_SINK_TIMEOUT_SECS),
            verification: VerificationConfig::new(Secret::default()),
            telegram: TelegramConfig::default(),
            sheets: SheetsConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn new(host: &str, port: u16) -> Self {
        Self { host: host.to_string(), port, ..Default::default() }
    }

    pub fn from_env_or_default() -> Self {
        let host = env::var("BTM_HOST").ok().unwrap_or_else(|| DEFAULT_BTM_HOST.into());
        let port = env::var("BTM_PORT")
            .map(|s| {
                s.parse::<u16>().unwrap_or_else(|e| {
                    error!("🪛️ {s} is not a valid port for BTM_PORT. {e} Using the default, {DEFAULT_BTM_PORT}, instead.");
                    DEFAULT_BTM_PORT
                })
            })
            .ok()
            .unwrap_or(DEFAULT_BTM_PORT);
        let use_x_forwarded_for = parse_boolean_flag(env::var("BTM_USE_X_FORWARDED_FOR").ok(), false);
        let use_forwarded = parse_boolean_flag(env::var("BTM_USE_FORWARDED").ok(), false);
        let webhook_auth_checks = parse_boolean_flag(env::var("BTM_WEBHOOK_AUTH_CHECKS").ok(), true);
        if !webhook_auth_checks {
            warn!("🚨️ Webhook secret checks are DISABLED. Anyone can post transfer notifications to this server.");
        }
        let bank_directory_path =
            env::var("BTM_BANK_DIRECTORY").ok().unwrap_or_else(|| DEFAULT_BANK_DIRECTORY.to_string());
        let sink_timeout = env::var("BTM_SINK_TIMEOUT")
            .ok()
            .and_then(|s| {
                s.parse::<u64>()
                    .map_err(|e| warn!("🪛️ Invalid configuration value for BTM_SINK_TIMEOUT. {e}"))
                    .ok()
            })
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(DEFAULT_SINK_TIMEOUT_SECS));
        Self {
            host,
            port,
            use_x_forwarded_for,
            use_forwarded,
            webhook_auth_checks,
            bank_directory_path,
            sink_timeout,
            verification: verification_from_env(),
            telegram: TelegramConfig::new_from_env_or_default(),
            sheets: SheetsConfig::new_from_env_or_default(),
        }
    }
}

fn verification_from_env() -> VerificationConfig {
    let shared_secret = Secret::new(env::var("BTM_WEBHOOK_SECRET").ok().unwrap_or_else(|| {
        error!("🪛️ BTM_WEBHOOK_SECRET is not set. Inbound webhook calls will not authenticate.");
        String::default()
    }));
    let mut config = VerificationConfig::new(shared_secret);
    let profit_rate = env::var("BTM_PROFIT_RATE")
        .ok()
        .and_then(|s| {
            s.parse::<f64>().map_err(|e| warn!("🪛️ Invalid configuration value for BTM_PROFIT_RATE. {e}")).ok()
        })
        .unwrap_or(DEFAULT_PROFIT_RATE);
    config = config.with_profit_rate(profit_rate);
    for (code_var, account_var, default_code) in [
        ("BTM_BANK_CTBC_CODE", "BTM_BANK_CTBC_ACCOUNT", DEFAULT_CTBC_CODE),
        ("BTM_BANK_POST_CODE", "BTM_BANK_POST_ACCOUNT", DEFAULT_POST_CODE),
    ] {
        let code = env::var(code_var).ok().unwrap_or_else(|| default_code.to_string());
        match env::var(account_var) {
            Ok(account) if !account.trim().is_empty() => {
                config = config.with_expected_account(code, account.trim());
            },
            _ => {
                warn!("🪛️ {account_var} is not set. Transfers reported by bank {code} will always be rejected.");
            },
        }
    }
    for (code, account) in parse_expected_accounts(&env::var("BTM_EXPECTED_ACCOUNTS").unwrap_or_default()) {
        config = config.with_expected_account(code, account);
    }
    if config.bank_count() == 0 {
        warn!("🚨️ No expected accounts are configured. Every inbound transfer will be rejected.");
    }
    config
}

/// Parse extra `code:account` pairs from a comma-separated list. Malformed entries are logged
/// and skipped.
pub fn parse_expected_accounts(raw: &str) -> Vec<(String, String)> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(|pair| {
            let result = pair.split_once(':').map(|(code, account)| (code.trim(), account.trim()));
            match result {
                Some((code, account)) if !code.is_empty() && !account.is_empty() => {
                    Some((code.to_string(), account.to_string()))
                },
                _ => {
                    warn!("🪛️ Ignoring malformed entry ({pair}) in BTM_EXPECTED_ACCOUNTS");
                    None
                },
            }
        })
        .collect()
}

/// The subset of the server configuration that request handlers need. Kept small, and free of
/// secrets, so it can be dropped into `web::Data` wholesale.
#[derive(Clone, Copy, Debug)]
pub struct ServerOptions {
    pub use_x_forwarded_for: bool,
    pub use_forwarded: bool,
}

impl ServerOptions {
    pub fn from_config(config: &ServerConfig) -> Self {
        Self { use_x_forwarded_for: config.use_x_forwarded_for, use_forwarded: config.use_forwarded }
    }
}
