//! The local simulation driver.
//!
//! Runs the canonical scenarios through the exact same verification-and-dispatch entry point as
//! the HTTP server, using the configuration from the environment. With real sinks wired this
//! produces live chat messages and ledger rows, so the default is useful for smoke-testing a
//! deployment; `--dry-run` confines the run to verification.
use anyhow::Context;
use btm_common::Money;
use dispatch_tools::{SheetsApi, TelegramApi};
use log::debug;
use transfer_engine::{
    dispatch::{dispatch_hooks, DispatchApi},
    events::{EventHandlers, EventProducers},
    BankDirectory,
    TransferEvent,
    TransferFlowApi,
    VerificationConfig,
};
use transfer_server::{
    config::ServerConfig,
    integrations::{SheetsLedger, TelegramNotifier},
};

use crate::SimulateParams;

const CTBC_CODE: &str = "822";
const POST_CODE: &str = "700";
const SIMULATED_SOURCE: &str = "simulated transfer";
const SUSPICIOUS_SOURCE: &str = "suspicious source";

pub async fn run_simulation(params: SimulateParams) -> anyhow::Result<()> {
    let config = ServerConfig::from_env_or_default();
    let directory = BankDirectory::load_from_file(&config.bank_directory_path);
    let (producers, handles) = if params.dry_run {
        debug!("Dry run: no sinks wired");
        (EventProducers::default(), Vec::new())
    } else {
        let telegram = TelegramApi::new(config.telegram.clone()).context("building the chat client")?;
        let sheets = SheetsApi::new(config.sheets.clone()).context("building the ledger client")?;
        let dispatch = DispatchApi::new(TelegramNotifier::new(telegram), SheetsLedger::new(sheets))
            .with_sink_timeout(config.sink_timeout);
        let handlers = EventHandlers::new(16, dispatch_hooks(dispatch));
        let producers = handlers.producers();
        let handles = handlers.start_handlers();
        (producers, handles)
    };
    let api = TransferFlowApi::new(config.verification.clone(), directory, producers);

    println!("--- Simulating transfers ---");
    for event in scenario_events(&config.verification) {
        let result = api.process_transfer(event.clone()).await;
        let verdict = if result.approved { "approved" } else { "rejected" };
        println!(
            "{verdict}: {event} [bank: {}, profit share: {}, net: {}]",
            result.bank_name, result.profit_share, result.net_amount
        );
    }
    // Dropping the API releases the producers, which lets the dispatch loop drain and stop.
    drop(api);
    for handle in handles {
        handle.await.context("waiting for the dispatchers to drain")?;
    }
    println!("--- Simulation complete ---");
    Ok(())
}

/// Two well-formed transfers into the configured accounts, and one that must be rejected.
fn scenario_events(config: &VerificationConfig) -> Vec<TransferEvent> {
    let ctbc_account = config.expected_account(CTBC_CODE).unwrap_or("<unconfigured>").to_string();
    let post_account = config.expected_account(POST_CODE).unwrap_or("<unconfigured>").to_string();
    vec![
        TransferEvent::new(CTBC_CODE, ctbc_account, Money::from(50_000), Some(SIMULATED_SOURCE.to_string())),
        TransferEvent::new(POST_CODE, post_account, Money::from(30_000), Some(SIMULATED_SOURCE.to_string())),
        TransferEvent::new(CTBC_CODE, "000000000000", Money::from(100), Some(SUSPICIOUS_SOURCE.to_string())),
    ]
}
