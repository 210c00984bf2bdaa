//! Clients for the two external systems the monitor dispatches to: a Telegram-style bot chat
//! (real-time notifications) and a Google-Sheets-style spreadsheet (the transfer ledger).
//!
//! These clients know nothing about transfer verification; they are plain authenticated HTTP
//! wrappers. Provisioning of the bot token and the spreadsheet access token is out of scope:
//! both arrive as configuration.
mod config;
mod error;
mod sheets;
mod telegram;

pub use config::{SheetsConfig, TelegramConfig};
pub use error::{SheetsApiError, TelegramApiError};
pub use sheets::SheetsApi;
pub use telegram::TelegramApi;
