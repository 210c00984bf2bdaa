//! The seams between the verification core and the outside world.
//!
//! Sinks are external systems with independent failure modes. Implementations live with the
//! transport adapters (the server crate wires the real chat and ledger clients in); the engine
//! only sees these traits, which keeps the dispatch logic testable with in-memory fakes.
//!
//! The returned futures are `Send` because dispatch runs on spawned tasks, off the request path.
use std::future::Future;

use thiserror::Error;

use crate::LedgerEntry;

#[derive(Debug, Clone, Error)]
pub enum SinkError {
    /// The backing resource (e.g. the ledger sheet) does not exist.
    #[error("The sink resource was not found. {0}")]
    NotFound(String),
    /// The sink could not be reached, or answered with a transport-level failure.
    #[error("Could not reach the sink. {0}")]
    Transport(String),
    /// The sink client is misconfigured (bad credentials, malformed destination, ...).
    #[error("The sink is misconfigured. {0}")]
    Config(String),
}

/// A real-time chat destination for outcome notifications. Both approvals and rejections notify.
pub trait NotificationSink {
    fn notify(&self, text: &str) -> impl Future<Output = Result<(), SinkError>> + Send;
}

/// The append-only record of approved transfers, one row per transfer.
pub trait TransferLedger {
    fn append(&self, entry: &LedgerEntry) -> impl Future<Output = Result<(), SinkError>> + Send;
}
