use clap::{Args, Parser, Subcommand};
use dotenvy::dotenv;

mod client;
mod simulation;

use crate::{client::send_event, simulation::run_simulation};

#[derive(Parser, Debug)]
#[command(version, about = "Operator tools for the bank transfer monitor")]
pub struct Arguments {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    #[clap(name = "simulate", about = "Run the canonical transfer scenarios through the verification pipeline")]
    Simulate(SimulateParams),
    #[clap(name = "send", about = "POST a transfer notification to a running server")]
    Send(SendParams),
}

#[derive(Debug, Args)]
pub struct SimulateParams {
    /// Verify only: skip the notification and ledger sinks
    #[arg(long = "dry-run")]
    dry_run: bool,
}

#[derive(Debug, Args)]
pub struct SendParams {
    /// Base URL of the running server
    #[arg(short, long, default_value = "http://127.0.0.1:8360")]
    url: String,
    #[arg(short = 'b', long = "bank-code")]
    bank_code: String,
    #[arg(short = 'a', long)]
    account: String,
    #[arg(short = 'm', long)]
    amount: f64,
    #[arg(short = 'f', long = "from-bank")]
    from_bank: Option<String>,
    /// Webhook secret. Falls back to BTM_WEBHOOK_SECRET
    #[arg(short, long)]
    secret: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init();
    let args = Arguments::parse();
    match args.command {
        Command::Simulate(params) => run_simulation(params).await,
        Command::Send(params) => send_event(params).await,
    }
}
