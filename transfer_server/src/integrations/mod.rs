//! Adapters binding the engine's sink traits to the real transports.
//!
//! The engine only knows [`NotificationSink`] and [`TransferLedger`]; these wrappers translate
//! between the transport clients' error types and the engine's sink taxonomy.
use dispatch_tools::{SheetsApi, SheetsApiError, TelegramApi, TelegramApiError};
use transfer_engine::{
    traits::{NotificationSink, SinkError, TransferLedger},
    LedgerEntry,
};

#[derive(Clone)]
pub struct TelegramNotifier {
    api: TelegramApi,
}

impl TelegramNotifier {
    pub fn new(api: TelegramApi) -> Self {
        Self { api }
    }
}

impl NotificationSink for TelegramNotifier {
    async fn notify(&self, text: &str) -> Result<(), SinkError> {
        self.api.send_message(text).await.map_err(telegram_sink_error)
    }
}

#[derive(Clone)]
pub struct SheetsLedger {
    api: SheetsApi,
}

impl SheetsLedger {
    pub fn new(api: SheetsApi) -> Self {
        Self { api }
    }
}

impl TransferLedger for SheetsLedger {
    async fn append(&self, entry: &LedgerEntry) -> Result<(), SinkError> {
        self.api.append_row(&entry.as_row()).await.map_err(sheets_sink_error)
    }
}

fn telegram_sink_error(e: TelegramApiError) -> SinkError {
    match e {
        TelegramApiError::Initialization(m) => SinkError::Config(m),
        TelegramApiError::SendError(m) | TelegramApiError::JsonError(m) => SinkError::Transport(m),
        TelegramApiError::ApiError { .. } => SinkError::Transport(e.to_string()),
    }
}

fn sheets_sink_error(e: SheetsApiError) -> SinkError {
    match e {
        SheetsApiError::SheetNotFound(m) => SinkError::NotFound(m),
        SheetsApiError::Initialization(m) => SinkError::Config(m),
        SheetsApiError::SendError(m) => SinkError::Transport(m),
        SheetsApiError::ApiError { .. } => SinkError::Transport(e.to_string()),
    }
}
