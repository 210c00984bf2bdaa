use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum TelegramApiError {
    #[error("Could not initialize the Telegram client. {0}")]
    Initialization(String),
    #[error("Error sending request to the Telegram API. {0}")]
    SendError(String),
    #[error("The Telegram API rejected the call with status {status}. {message}")]
    ApiError { status: u16, message: String },
    #[error("Unexpected response from the Telegram API. {0}")]
    JsonError(String),
}

#[derive(Debug, Clone, Error)]
pub enum SheetsApiError {
    #[error("Could not initialize the Sheets client. {0}")]
    Initialization(String),
    #[error("Error sending request to the Sheets API. {0}")]
    SendError(String),
    #[error("The spreadsheet or sheet was not found. {0}")]
    SheetNotFound(String),
    #[error("The Sheets API rejected the call with status {status}. {message}")]
    ApiError { status: u16, message: String },
}
