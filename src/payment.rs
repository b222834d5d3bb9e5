//! Extraction of x402-style payment challenges from 402 responses.
//!
//! The remote may deliver the challenge either nested in the JSON body (under
//! a handful of historical key spellings) or as dedicated response headers.
//! Body fields win over headers, field by field.

use reqwest::header::HeaderMap;
use serde_json::{Map, Value};

use crate::errors::{ChallengeAmount, PaymentChallenge};

/// Challenge object keys, in precedence order. Checked first under the nested
/// `error` object, then at the top level.
const CHALLENGE_KEYS: [&str; 3] = ["payment_challenge", "paymentChallenge", "challenge"];

const SCHEME_HEADERS: [&str; 2] = ["x-payment-scheme", "payment-scheme"];
const NETWORK_HEADERS: [&str; 2] = ["x-payment-network", "payment-network"];
const AMOUNT_HEADERS: [&str; 2] = ["x-payment-amount", "payment-amount"];
const PAY_TO_HEADERS: [&str; 4] = [
    "x-payment-pay-to",
    "x-payment-pay_to",
    "payment-pay-to",
    "payment-pay_to",
];

/// Pulls a payment challenge from a parsed response payload and the response
/// headers. Returns `None` only when none of the four fields resolves.
pub fn extract_payment_challenge(payload: &Value, headers: &HeaderMap) -> Option<PaymentChallenge> {
    let object = challenge_object(payload);

    let scheme = object
        .and_then(|obj| string_field(obj, "scheme"))
        .or_else(|| header_value(headers, &SCHEME_HEADERS));
    let network = object
        .and_then(|obj| string_field(obj, "network"))
        .or_else(|| header_value(headers, &NETWORK_HEADERS));
    let amount = object
        .and_then(amount_field)
        .or_else(|| header_value(headers, &AMOUNT_HEADERS).map(ChallengeAmount::Text));
    let pay_to = object
        .and_then(|obj| string_field(obj, "pay_to").or_else(|| string_field(obj, "payTo")))
        .or_else(|| header_value(headers, &PAY_TO_HEADERS));

    let challenge = PaymentChallenge {
        scheme,
        network,
        amount,
        pay_to,
    };
    if challenge.is_empty() {
        None
    } else {
        Some(challenge)
    }
}

/// First present (non-null) challenge value in precedence order, required to
/// be object-shaped. A present but non-object value wins the scan and yields
/// no body fields; headers are still consulted.
fn challenge_object(payload: &Value) -> Option<&Map<String, Value>> {
    let nested = payload.get("error").and_then(Value::as_object);
    let candidate = CHALLENGE_KEYS
        .iter()
        .find_map(|key| nested.and_then(|obj| obj.get(*key)).filter(|v| !v.is_null()))
        .or_else(|| {
            CHALLENGE_KEYS
                .iter()
                .find_map(|key| payload.get(*key).filter(|v| !v.is_null()))
        })?;
    candidate.as_object()
}

fn string_field(object: &Map<String, Value>, key: &str) -> Option<String> {
    object.get(key).and_then(Value::as_str).map(str::to_string)
}

fn amount_field(object: &Map<String, Value>) -> Option<ChallengeAmount> {
    match object.get("amount")? {
        Value::String(text) => Some(ChallengeAmount::Text(text.clone())),
        Value::Number(number) => Some(ChallengeAmount::Number(number.clone())),
        _ => None,
    }
}

fn header_value(headers: &HeaderMap, names: &[&str]) -> Option<String> {
    names
        .iter()
        .find_map(|name| headers.get(*name).and_then(|v| v.to_str().ok()))
        .map(str::to_string)
}
