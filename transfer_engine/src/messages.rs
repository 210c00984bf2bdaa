//! Outbound notification templates.
//!
//! The chat sink renders a small HTML subset (`<b>`, `<i>`), so the templates stick to bold and
//! emphasis markup only. All monetary figures are rendered rounded to two decimal places.
use btm_common::NT_CURRENCY_CODE;

use crate::{TransferEvent, VerificationResult};

/// Confirmation that funds arrived in the expected account.
pub fn funds_received(event: &TransferEvent, result: &VerificationResult) -> String {
    format!(
        "⚡ <b>Inbound transfer confirmed</b>\n\
         🏦 Bank: {bank} (code: {code})\n\
         💰 Gross: {gross} {cur}\n\
         💸 Profit share ({rate}): {profit} {cur}\n\
         💵 Net: {net} {cur}\n\
         📅 Time: {time}\n\
         🔗 Source: {source}",
        bank = result.bank_name,
        code = event.bank_code(),
        gross = result.gross_amount,
        rate = percent_label(result.profit_rate),
        profit = result.profit_share,
        net = result.net_amount,
        time = result.local_timestamp(),
        source = event.source_label(),
        cur = NT_CURRENCY_CODE,
    )
}

/// Confirmation that the profit share of an approved transfer was set aside.
pub fn profit_share_set_aside(result: &VerificationResult) -> String {
    format!(
        "💸 Profit share of {profit} {cur} has been set aside.",
        profit = result.profit_share,
        cur = NT_CURRENCY_CODE
    )
}

/// Alert describing a rejected transfer.
pub fn account_mismatch(event: &TransferEvent, result: &VerificationResult) -> String {
    format!(
        "❌ <b>Account mismatch</b>: bank {bank} reported an inbound transfer, but account <i>{account}</i> does not \
         match the configured account.",
        bank = result.bank_name,
        account = event.account(),
    )
}

fn percent_label(rate: f64) -> String {
    let percent = rate * 100.0;
    if (percent - percent.round()).abs() < 1e-9 {
        format!("{}%", percent.round() as i64)
    } else {
        format!("{percent:.1}%")
    }
}
