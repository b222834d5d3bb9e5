use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::credentials::CredentialProvider;
use crate::errors::{DevaError, Result};
use crate::http::{classify_response, parse_body, AttemptOutcome, RequestSpec, RetryPolicy};
use crate::{DEFAULT_API_BASE, DEFAULT_CONNECT_TIMEOUT, DEFAULT_REQUEST_TIMEOUT};

const MISSING_API_KEY: &str =
    "No API key configured. Run deva_agent_register or set DEVA_API_KEY.";

/// Client configuration. Every field has a sensible default; `credentials`
/// left unset means only unauthenticated calls can succeed.
#[derive(Clone, Default)]
pub struct Config {
    pub base_url: Option<String>,
    /// Default per-call deadline (30 s unless overridden per request).
    pub timeout: Option<Duration>,
    /// Retry/backoff policy (defaults to 3 retries, 300 ms doubling backoff).
    pub retry: Option<RetryPolicy>,
    pub http_client: Option<reqwest::Client>,
    /// Accessor re-read at the start of every authenticated call.
    pub credentials: Option<Arc<dyn CredentialProvider>>,
}

/// Async client for the Deva platform API.
///
/// Cheap to clone; all state lives behind an `Arc`. The engine holds no
/// mutable state across calls, so concurrent calls run independent retry
/// loops and share only the read-only credential accessor.
#[derive(Clone)]
pub struct DevaClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    base_url: String,
    http: reqwest::Client,
    timeout: Duration,
    retry: RetryPolicy,
    credentials: Option<Arc<dyn CredentialProvider>>,
}

impl DevaClient {
    pub fn new(cfg: Config) -> Result<Self> {
        let base = cfg
            .base_url
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
            .trim_end_matches('/')
            .to_string();
        Url::parse(&base).map_err(|err| DevaError::message(format!("invalid base url: {err}")))?;

        let http = match cfg.http_client {
            Some(client) => client,
            None => reqwest::Client::builder()
                .connect_timeout(DEFAULT_CONNECT_TIMEOUT)
                .build()
                .map_err(|err| DevaError::message(format!("failed to build http client: {err}")))?,
        };

        Ok(Self {
            inner: Arc::new(ClientInner {
                base_url: base,
                http,
                timeout: cfg.timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT),
                retry: cfg.retry.unwrap_or_default(),
                credentials: cfg.credentials,
            }),
        })
    }

    /// Executes a request and decodes the payload into `T`.
    ///
    /// The engine asserts the type rather than validating it; schema
    /// correctness is the remote API's contract. A payload that does not
    /// decode still surfaces as a normalized error, never a panic.
    pub async fn execute<T: DeserializeOwned>(&self, spec: RequestSpec) -> Result<T> {
        let payload = self.execute_raw(spec).await?;
        serde_json::from_value(payload)
            .map_err(|err| DevaError::message(format!("failed to decode response body: {err}")))
    }

    /// Executes a request and returns the parsed JSON payload as-is.
    pub async fn execute_raw(&self, spec: RequestSpec) -> Result<Value> {
        self.inner.execute(spec).await
    }
}

impl ClientInner {
    async fn execute(&self, spec: RequestSpec) -> Result<Value> {
        let url = self.build_url(&spec)?;
        let headers = self.build_headers(&spec)?;

        // Precondition, not a transient fault: resolved once up front since
        // the accessor cannot change within a single call.
        let bearer = if spec.requires_auth {
            match self.credentials.as_ref().and_then(|p| p.api_key()) {
                Some(key) => Some(key),
                None => return Err(DevaError::message(MISSING_API_KEY)),
            }
        } else {
            None
        };

        let timeout = spec.timeout.unwrap_or(self.timeout);
        let max_attempts = self.retry.max_attempts();
        let mut last_error: Option<DevaError> = None;

        for attempt in 1..=max_attempts {
            debug!(
                method = %spec.method,
                path = %spec.path,
                attempt,
                max_attempts,
                "sending request"
            );

            match self
                .attempt(&spec, url.clone(), headers.clone(), bearer.as_deref(), timeout)
                .await
            {
                AttemptOutcome::Success(payload) => return Ok(payload),
                AttemptOutcome::Fatal(error) => {
                    warn!(status = ?error.status, code = ?error.code, path = %spec.path, "request failed");
                    return Err(error);
                }
                AttemptOutcome::Retry(error) => {
                    warn!(
                        status = ?error.status,
                        attempt,
                        path = %spec.path,
                        "transient failure"
                    );
                    last_error = Some(error);
                    if attempt < max_attempts {
                        sleep(self.retry.backoff_delay(attempt)).await;
                    }
                }
            }
        }

        Err(last_error.unwrap_or_else(|| DevaError::message("HTTP request failed")))
    }

    async fn attempt(
        &self,
        spec: &RequestSpec,
        url: Url,
        headers: HeaderMap,
        bearer: Option<&str>,
        timeout: Duration,
    ) -> AttemptOutcome {
        let mut builder = self
            .http
            .request(spec.method.clone(), url)
            .headers(headers)
            .timeout(timeout);
        if let Some(token) = bearer {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &spec.body {
            builder = builder.json(body);
        }

        // Timeouts and other transport-level failures retry as a last resort.
        let response = match builder.send().await {
            Ok(response) => response,
            Err(err) => return AttemptOutcome::Retry(DevaError::from(err)),
        };

        let status = response.status();
        let response_headers = response.headers().clone();
        let text = match response.text().await {
            Ok(text) => text,
            Err(err) => return AttemptOutcome::Retry(DevaError::from(err)),
        };

        classify_response(&self.retry, status, parse_body(&text), &response_headers)
    }

    fn build_url(&self, spec: &RequestSpec) -> Result<Url> {
        let mut url = Url::parse(&format!("{}{}", self.base_url, spec.path))
            .map_err(|err| DevaError::message(format!("invalid request url: {err}")))?;
        if !spec.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &spec.query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    fn build_headers(&self, spec: &RequestSpec) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        for (key, value) in &spec.headers {
            let name = HeaderName::from_bytes(key.as_bytes())
                .map_err(|err| DevaError::message(format!("invalid header name: {err}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|err| DevaError::message(format!("invalid header value: {err}")))?;
            headers.insert(name, value);
        }
        Ok(headers)
    }
}
