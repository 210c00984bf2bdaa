use btm_common::Money;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use transfer_engine::TransferEvent;

use crate::errors::ServerError;

/// Header that must carry the shared webhook secret on every inbound call.
pub const WEBHOOK_SECRET_HEADER: &str = "X-Webhook-Secret";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl JsonResponse {
    pub fn success() -> Self {
        Self { status: "success".to_string(), message: None }
    }

    pub fn error<S: std::fmt::Display>(message: S) -> Self {
        Self { status: "error".to_string(), message: Some(message.to_string()) }
    }
}

/// The raw webhook body. All fields are optional at the serde level so that presence checks can
/// produce precise validation errors instead of a generic deserialization failure.
#[derive(Debug, Clone, Deserialize)]
pub struct BankWebhookPayload {
    #[serde(default)]
    pub bank_code: Option<String>,
    #[serde(default)]
    pub account: Option<String>,
    #[serde(default)]
    pub amount: Option<Value>,
    #[serde(default)]
    pub from_bank: Option<String>,
}

impl BankWebhookPayload {
    /// Validate the payload and build the immutable pipeline event.
    ///
    /// `bank_code`, `account` and `amount` are required and must be non-empty; `amount` may be a
    /// JSON number or a numeric string, and must be finite. The amount's sign is not checked
    /// here: sign handling is the verifier's concern.
    pub fn try_into_event(self) -> Result<TransferEvent, ServerError> {
        let bank_code = required_field(self.bank_code, "bank_code")?;
        let account = required_field(self.account, "account")?;
        let amount = coerce_amount(self.amount)?;
        let source_label = self.from_bank.filter(|s| !s.trim().is_empty());
        Ok(TransferEvent::new(bank_code, account, amount, source_label))
    }
}

fn required_field(value: Option<String>, field: &'static str) -> Result<String, ServerError> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or(ServerError::MissingField(field))
}

fn coerce_amount(value: Option<Value>) -> Result<Money, ServerError> {
    let raw = match value {
        None | Some(Value::Null) => return Err(ServerError::MissingField("amount")),
        Some(Value::String(s)) if s.trim().is_empty() => return Err(ServerError::MissingField("amount")),
        Some(Value::Number(n)) => {
            n.as_f64().ok_or(ServerError::InvalidField { field: "amount", reason: "number out of range".to_string() })?
        },
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .map_err(|e| ServerError::InvalidField { field: "amount", reason: e.to_string() })?,
        Some(other) => {
            return Err(ServerError::InvalidField {
                field: "amount",
                reason: format!("expected a number, got {other}"),
            })
        },
    };
    Money::try_from(raw).map_err(|e| ServerError::InvalidField { field: "amount", reason: e.to_string() })
}
