//! Bank Transfer Monitor engine
//!
//! This library contains the core logic for the transfer verification pipeline. It is
//! transport-agnostic: the HTTP server and the simulation CLI are both thin adapters over the
//! same entry point, [`TransferFlowApi::process_transfer`].
//!
//! The library is divided into three main sections:
//! 1. The pure decision core ([`mod@verifier`] and its data objects). Given an inbound
//!    [`TransferEvent`] and the immutable [`VerificationConfig`], it decides approve/reject and
//!    computes the profit split. It has no side effects and is trivially testable.
//! 2. The dispatch layer ([`mod@dispatch`] and [`mod@traits`]). Verification outcomes fan out to
//!    two sinks, a chat notification and an append-only ledger, behind the
//!    [`traits::NotificationSink`] and [`traits::TransferLedger`] traits. Sink failures are
//!    isolated: they are logged and swallowed, and never affect the verification decision or
//!    each other.
//! 3. A small pub-sub event layer ([`mod@events`]) that decouples the inbound request path from
//!    the (network-bound) sink calls. Publishing an event never blocks on a slow sink.
mod bank_directory;
mod config;
mod transfer_flow_api;
mod transfer_objects;

pub mod dispatch;
pub mod events;
pub mod messages;
pub mod traits;
pub mod verifier;

pub use bank_directory::BankDirectory;
pub use config::{VerificationConfig, DEFAULT_PROFIT_RATE};
pub use transfer_flow_api::TransferFlowApi;
pub use transfer_objects::{LedgerEntry, TransferEvent, VerificationResult, TIMESTAMP_FORMAT, UNKNOWN_SOURCE_LABEL};
