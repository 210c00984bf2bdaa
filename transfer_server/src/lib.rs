//! # Bank Transfer Monitor server
//! This crate hosts the inbound boundary of the transfer pipeline. It is responsible for:
//! Listening for incoming webhook calls from the bank's notification service.
//! Authenticating each call against the shared webhook secret.
//! Parsing the request body and building the transfer event.
//! Handing the event to the verification engine and acknowledging receipt.
//!
//! ## Configuration
//! The server is configured via environment variables. See [config](config/index.html) for more
//! information.
//!
//! ## Routes
//! The server exposes the following routes:
//! * `/health`: A health check route that returns a 200 OK response.
//! * `/webhook/bank`: The webhook route for receiving bank transfer notifications.

pub mod cli;
pub mod config;
pub mod data_objects;
pub mod errors;
pub mod helpers;
pub mod integrations;
pub mod middleware;
pub mod routes;
pub mod server;

#[cfg(test)]
mod endpoint_tests;
