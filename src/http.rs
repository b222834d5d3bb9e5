use std::time::Duration;

use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};
use serde_json::{Map, Value};

use crate::errors::DevaError;
use crate::payment::extract_payment_challenge;

/// HTTP statuses that indicate a transient condition worth retrying.
const RETRYABLE_STATUSES: [u16; 4] = [429, 500, 502, 503];

/// Immutable description of one outgoing API call.
#[derive(Clone, Debug)]
pub struct RequestSpec {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    pub headers: Vec<(String, String)>,
    pub requires_auth: bool,
    pub timeout: Option<Duration>,
}

impl RequestSpec {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            headers: Vec::new(),
            requires_auth: true,
            timeout: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Appends a query parameter, stringifying the value.
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Appends a query parameter when the value is present; absent values are
    /// dropped from the query string entirely.
    pub fn query_opt(self, key: impl Into<String>, value: Option<impl ToString>) -> Self {
        match value {
            Some(value) => self.query(key, value),
            None => self,
        }
    }

    /// Attaches a JSON body. No body at all is distinct from an empty object.
    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Adds a header override; spec headers win over engine defaults.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    /// Marks the call as not requiring a credential.
    pub fn unauthenticated(mut self) -> Self {
        self.requires_auth = false;
        self
    }

    /// Overrides the engine's default deadline for this call.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Retry/backoff policy: fixed exponential schedule, no jitter.
///
/// The defaults retry up to 3 times (4 attempts total) with waits of
/// 300/600/1200 ms between attempts, bounding total backoff to ~2.1 s.
#[derive(Clone, Debug)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_backoff: Duration::from_millis(300),
        }
    }
}

impl RetryPolicy {
    /// Single attempt, no waiting.
    pub fn disabled() -> Self {
        Self {
            max_retries: 0,
            ..Default::default()
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Whether the given status should trigger another attempt.
    pub fn should_retry_status(&self, status: StatusCode) -> bool {
        RETRYABLE_STATUSES.contains(&status.as_u16())
    }

    /// Wait before the attempt following `attempt` (1-indexed): doubles each
    /// time starting from the base.
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        let exp = attempt.saturating_sub(1).min(10);
        self.base_backoff.saturating_mul(2u32.saturating_pow(exp))
    }
}

/// Typed outcome of one attempt, so the retry state machine is testable
/// without simulating thrown exceptions.
#[derive(Debug)]
pub(crate) enum AttemptOutcome {
    Success(Value),
    Retry(DevaError),
    Fatal(DevaError),
}

/// Decodes a response body: empty becomes `{}`, invalid JSON is preserved as
/// `{"raw": <text>}` so callers tolerate non-JSON bodies.
pub(crate) fn parse_body(text: &str) -> Value {
    if text.is_empty() {
        return Value::Object(Map::new());
    }
    serde_json::from_str(text).unwrap_or_else(|_| serde_json::json!({ "raw": text }))
}

/// Classifies a completed HTTP exchange into the typed attempt outcome.
pub(crate) fn classify_response(
    policy: &RetryPolicy,
    status: StatusCode,
    payload: Value,
    headers: &HeaderMap,
) -> AttemptOutcome {
    if status.is_success() {
        return AttemptOutcome::Success(payload);
    }

    let error = normalize_failure(status, &payload, headers);
    if policy.should_retry_status(status) {
        AttemptOutcome::Retry(error)
    } else {
        AttemptOutcome::Fatal(error)
    }
}

/// Builds the normalized error for a non-2xx response, preferring fields
/// nested under `error` over top-level fields of the same name.
pub(crate) fn normalize_failure(status: StatusCode, payload: &Value, headers: &HeaderMap) -> DevaError {
    let nested = payload.get("error").filter(|v| v.is_object());
    let pick = |key: &str| {
        nested
            .and_then(|obj| obj.get(key))
            .filter(|v| !v.is_null())
            .or_else(|| payload.get(key).filter(|v| !v.is_null()))
    };

    let code = pick("code").and_then(Value::as_str).map(str::to_string);
    let message = pick("message")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
    let details = pick("details").cloned();
    let balance = pick("balance").and_then(Value::as_f64);
    let required = pick("required").and_then(Value::as_f64);
    let payment_challenge = if status == StatusCode::PAYMENT_REQUIRED {
        extract_payment_challenge(payload, headers)
    } else {
        None
    };

    DevaError {
        status: Some(status.as_u16()),
        code,
        message,
        details,
        balance,
        required,
        payment_challenge,
    }
}
