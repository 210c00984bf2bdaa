use btm_common::Secret;
use log::*;

pub const DEFAULT_TELEGRAM_API_BASE: &str = "https://api.telegram.org";
pub const DEFAULT_SHEETS_API_BASE: &str = "https://sheets.googleapis.com";
pub const DEFAULT_SHEET_NAME: &str = "Transfers";

#[derive(Debug, Clone, Default)]
pub struct TelegramConfig {
    pub bot_token: Secret<String>,
    pub chat_id: String,
    pub api_base: String,
}

impl TelegramConfig {
    pub fn new_from_env_or_default() -> Self {
        let bot_token = Secret::new(std::env::var("BTM_TELEGRAM_BOT_TOKEN").unwrap_or_else(|_| {
            warn!("BTM_TELEGRAM_BOT_TOKEN not set. Notifications will be rejected by the chat API.");
            String::default()
        }));
        let chat_id = std::env::var("BTM_TELEGRAM_CHAT_ID").unwrap_or_else(|_| {
            warn!("BTM_TELEGRAM_CHAT_ID not set. Notifications will be rejected by the chat API.");
            String::default()
        });
        let api_base =
            std::env::var("BTM_TELEGRAM_API_BASE").unwrap_or_else(|_| DEFAULT_TELEGRAM_API_BASE.to_string());
        Self { bot_token, chat_id, api_base }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SheetsConfig {
    pub access_token: Secret<String>,
    pub spreadsheet_id: String,
    pub sheet_name: String,
    pub api_base: String,
}

impl SheetsConfig {
    pub fn new_from_env_or_default() -> Self {
        let access_token = Secret::new(std::env::var("BTM_SHEETS_ACCESS_TOKEN").unwrap_or_else(|_| {
            warn!("BTM_SHEETS_ACCESS_TOKEN not set. Ledger writes will be rejected by the sheets API.");
            String::default()
        }));
        let spreadsheet_id = std::env::var("BTM_SHEETS_SPREADSHEET_ID").unwrap_or_else(|_| {
            warn!("BTM_SHEETS_SPREADSHEET_ID not set. Ledger writes will fail.");
            String::default()
        });
        let sheet_name = std::env::var("BTM_SHEETS_SHEET_NAME").unwrap_or_else(|_| {
            info!("BTM_SHEETS_SHEET_NAME not set, using '{DEFAULT_SHEET_NAME}' as default");
            DEFAULT_SHEET_NAME.to_string()
        });
        let api_base = std::env::var("BTM_SHEETS_API_BASE").unwrap_or_else(|_| DEFAULT_SHEETS_API_BASE.to_string());
        Self { access_token, spreadsheet_id, sheet_name, api_base }
    }
}
