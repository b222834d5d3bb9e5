use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Convenience alias for fallible results.
pub type Result<T, E = DevaError> = std::result::Result<T, E>;

/// Structured "pay to use this" descriptor attached to 402 responses.
///
/// All fields are optional on the wire; a challenge with no resolved field is
/// treated as absent rather than constructed empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PaymentChallenge {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheme: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<ChallengeAmount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pay_to: Option<String>,
}

impl PaymentChallenge {
    /// True when none of the four fields resolved to a value.
    pub fn is_empty(&self) -> bool {
        self.scheme.is_none()
            && self.network.is_none()
            && self.amount.is_none()
            && self.pay_to.is_none()
    }
}

/// Challenge amount as the remote sent it: numeric or string, no currency
/// parsing or normalization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ChallengeAmount {
    Number(serde_json::Number),
    Text(String),
}

/// Normalized failure surfaced by the client engine.
///
/// Every lower-level failure (transport, timeout, body decode) is converted
/// into this type before leaving the engine; callers never see a raw
/// `reqwest` or `serde_json` error.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq)]
#[error("{message}")]
pub struct DevaError {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_challenge: Option<PaymentChallenge>,
}

impl DevaError {
    /// Plain-message error with no status, code, or metadata.
    pub fn message(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            status: None,
            code: None,
            message: if message.is_empty() {
                "Unknown error".to_string()
            } else {
                message
            },
            details: None,
            balance: None,
            required: None,
            payment_challenge: None,
        }
    }

    pub(crate) fn unknown() -> Self {
        Self::message("Unknown error")
    }

    /// True for 402 responses and for the remote's explicit payment code.
    pub fn is_payment_required(&self) -> bool {
        self.status == Some(402) || self.code.as_deref() == Some("PAYMENT_REQUIRED")
    }
}

impl From<reqwest::Error> for DevaError {
    fn from(err: reqwest::Error) -> Self {
        Self::message(err.to_string())
    }
}

impl From<serde_json::Error> for DevaError {
    fn from(err: serde_json::Error) -> Self {
        Self::message(err.to_string())
    }
}

/// Coerces an arbitrary error into the normalized type.
///
/// An already-normalized error passes through unchanged so its classification
/// (status, code, challenge) survives; anything else keeps its message, with
/// a fixed sentinel when no message is available.
pub fn normalize_error(error: &(dyn std::error::Error + 'static)) -> DevaError {
    if let Some(normalized) = error.downcast_ref::<DevaError>() {
        return normalized.clone();
    }
    let message = error.to_string();
    if message.trim().is_empty() {
        DevaError::unknown()
    } else {
        DevaError::message(message)
    }
}

/// Renders an error as the single text block shown at the tool boundary.
///
/// Payment-required failures become a machine-parseable JSON envelope so the
/// calling agent can drive a payment flow; everything else is a sentence.
pub fn format_error_for_tool(error: &DevaError) -> String {
    if error.is_payment_required() {
        let envelope = serde_json::json!({
            "error": "PAYMENT_REQUIRED",
            "message": error.message,
            "payment_challenge": error.payment_challenge,
        });
        return serde_json::to_string_pretty(&envelope)
            .unwrap_or_else(|_| error.message.clone());
    }

    if error.code.as_deref() == Some("INSUFFICIENT_KARMA") {
        let mut out = format!("{}.", error.message);
        if let Some(balance) = error.balance {
            out.push_str(&format!(" Current balance: {balance}."));
        }
        if let Some(required) = error.required {
            out.push_str(&format!(" Required: {required}."));
        }
        out.push_str(" Top up karma in your Deva dashboard.");
        return out.trim().to_string();
    }

    if let Some(code) = &error.code {
        return format!("{code}: {}", error.message);
    }

    error.message.clone()
}
