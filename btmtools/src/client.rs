//! A tiny webhook test client, for poking a running server without hand-writing curl calls.
use anyhow::Context;
use serde_json::json;
use transfer_server::data_objects::WEBHOOK_SECRET_HEADER;

use crate::SendParams;

pub async fn send_event(params: SendParams) -> anyhow::Result<()> {
    let secret = params
        .secret
        .or_else(|| std::env::var("BTM_WEBHOOK_SECRET").ok())
        .context("no webhook secret given; pass --secret or set BTM_WEBHOOK_SECRET")?;
    let url = format!("{}/webhook/bank", params.url.trim_end_matches('/'));
    let mut body = json!({
        "bank_code": params.bank_code,
        "account": params.account,
        "amount": params.amount,
    });
    if let Some(from_bank) = params.from_bank {
        body["from_bank"] = json!(from_bank);
    }
    let client = reqwest::Client::new();
    let response = client
        .post(&url)
        .header(WEBHOOK_SECRET_HEADER, secret)
        .json(&body)
        .send()
        .await
        .with_context(|| format!("posting to {url}"))?;
    let status = response.status();
    let text = response.text().await.context("reading the response body")?;
    println!("{status}: {text}");
    Ok(())
}
