use std::sync::Arc;

use log::*;
use reqwest::{header::HeaderValue, Client, StatusCode};
use serde_json::json;

use crate::{config::SheetsConfig, SheetsApiError};

#[derive(Clone)]
pub struct SheetsApi {
    config: SheetsConfig,
    client: Arc<Client>,
}

impl SheetsApi {
    pub fn new(config: SheetsConfig) -> Result<Self, SheetsApiError> {
        let mut headers = reqwest::header::HeaderMap::with_capacity(2);
        let bearer = format!("Bearer {}", config.access_token.reveal());
        let val = HeaderValue::from_str(&bearer).map_err(|e| SheetsApiError::Initialization(e.to_string()))?;
        headers.insert(reqwest::header::AUTHORIZATION, val);
        headers.insert(reqwest::header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| SheetsApiError::Initialization(e.to_string()))?;
        Ok(Self { config, client: Arc::new(client) })
    }

    pub fn append_url(&self) -> String {
        format!(
            "{}/v4/spreadsheets/{}/values/{}:append",
            self.config.api_base, self.config.spreadsheet_id, self.config.sheet_name
        )
    }

    /// Append one row to the configured sheet. The connection is released whether the call
    /// succeeds or fails.
    pub async fn append_row(&self, row: &[String]) -> Result<(), SheetsApiError> {
        let url = self.append_url();
        let body = json!({ "values": [row] });
        trace!("📄️ Appending a row to sheet {}", self.config.sheet_name);
        let response = self
            .client
            .post(url)
            .query(&[("valueInputOption", "USER_ENTERED")])
            .json(&body)
            .send()
            .await
            .map_err(|e| SheetsApiError::SendError(e.to_string()))?;
        let status = response.status();
        if status.is_success() {
            debug!("📄️ Row appended to sheet {}", self.config.sheet_name);
            return Ok(());
        }
        let message = response.text().await.unwrap_or_else(|e| e.to_string());
        if status == StatusCode::NOT_FOUND {
            Err(SheetsApiError::SheetNotFound(format!(
                "spreadsheet {} / sheet {}",
                self.config.spreadsheet_id, self.config.sheet_name
            )))
        } else {
            Err(SheetsApiError::ApiError { status: status.as_u16(), message })
        }
    }
}
