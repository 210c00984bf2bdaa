use std::sync::Arc;

use log::*;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use crate::{config::TelegramConfig, TelegramApiError};

/// Messages are sent with HTML formatting, which gives the templates their bold/emphasis subset.
const PARSE_MODE: &str = "HTML";

#[derive(Clone)]
pub struct TelegramApi {
    config: TelegramConfig,
    client: Arc<Client>,
}

#[derive(Debug, Serialize)]
struct SendMessageBody<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'a str,
}

impl TelegramApi {
    pub fn new(config: TelegramConfig) -> Result<Self, TelegramApiError> {
        let client = Client::builder().build().map_err(|e| TelegramApiError::Initialization(e.to_string()))?;
        Ok(Self { config, client: Arc::new(client) })
    }

    /// Push one text message to the configured chat.
    pub async fn send_message(&self, text: &str) -> Result<(), TelegramApiError> {
        let url = format!("{}/bot{}/sendMessage", self.config.api_base, self.config.bot_token.reveal());
        let body = SendMessageBody { chat_id: &self.config.chat_id, text, parse_mode: PARSE_MODE };
        trace!("📨️ Sending chat message to chat {}", self.config.chat_id);
        let response =
            self.client.post(url).json(&body).send().await.map_err(|e| TelegramApiError::SendError(e.to_string()))?;
        let status = response.status();
        let payload =
            response.json::<Value>().await.map_err(|e| TelegramApiError::JsonError(e.to_string()))?;
        if !status.is_success() || !payload["ok"].as_bool().unwrap_or(false) {
            let message = payload["description"].as_str().unwrap_or("no description").to_string();
            return Err(TelegramApiError::ApiError { status: status.as_u16(), message });
        }
        debug!("📨️ Chat message delivered to chat {}", self.config.chat_id);
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn message_body_serializes_with_html_parse_mode() {
        let body = SendMessageBody { chat_id: "-100123", text: "<b>hi</b>", parse_mode: PARSE_MODE };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["chat_id"], "-100123");
        assert_eq!(json["text"], "<b>hi</b>");
        assert_eq!(json["parse_mode"], "HTML");
    }
}
