//! Engine tests against a wiremock server.
//!
//! These verify the request lifecycle end to end: auth injection, the
//! retry/backoff state machine, payment-challenge extraction, body parsing,
//! and credential isolation between concurrent calls.

use std::sync::Arc;
use std::time::Duration;

use deva_mcp::{
    ChallengeAmount, Config, DevaClient, PaymentChallenge, RequestSpec, RetryPolicy,
    StaticCredential,
};
use serde_json::{json, Value};
use wiremock::matchers::{
    body_json, header, method, path, query_param, query_param_is_missing,
};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

#[derive(Clone)]
struct SequenceResponder {
    templates: std::sync::Arc<std::sync::Mutex<std::collections::VecDeque<ResponseTemplate>>>,
}

impl SequenceResponder {
    fn new(templates: Vec<ResponseTemplate>) -> Self {
        Self {
            templates: std::sync::Arc::new(std::sync::Mutex::new(templates.into_iter().collect())),
        }
    }
}

impl Respond for SequenceResponder {
    fn respond(&self, _req: &Request) -> ResponseTemplate {
        let mut templates = self.templates.lock().expect("mutex should not be poisoned");
        templates.pop_front().unwrap_or_else(|| {
            ResponseTemplate::new(500).set_body_json(json!({
                "error": { "message": "No more mock responses configured" }
            }))
        })
    }
}

/// Client with the default retry count but near-zero backoff waits.
fn client_for(server: &MockServer, api_key: &str) -> DevaClient {
    DevaClient::new(Config {
        base_url: Some(server.uri()),
        credentials: Some(Arc::new(StaticCredential::new(api_key))),
        retry: Some(RetryPolicy {
            max_retries: 3,
            base_backoff: Duration::from_millis(1),
        }),
        ..Default::default()
    })
    .expect("client creation should succeed")
}

#[tokio::test]
async fn injects_bearer_auth_and_parses_json() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/agents/status"))
        .and(header("authorization", "Bearer deva_test"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, "deva_test");
    let payload = client
        .execute_raw(RequestSpec::get("/v1/agents/status"))
        .await
        .expect("request should succeed");
    assert_eq!(payload, json!({ "ok": true }));
}

#[tokio::test]
async fn retries_transient_failures_then_succeeds() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/agents/status"))
        .respond_with(SequenceResponder::new(vec![
            ResponseTemplate::new(502).set_body_json(json!({ "message": "bad gateway" })),
            ResponseTemplate::new(200).set_body_json(json!({ "ok": true })),
        ]))
        .expect(2)
        .mount(&server)
        .await;

    let client = client_for(&server, "deva_test");
    let payload = client
        .execute_raw(RequestSpec::get("/v1/agents/status"))
        .await
        .expect("request should succeed after one retry");
    assert_eq!(payload, json!({ "ok": true }));
}

#[tokio::test]
async fn gives_up_after_four_attempts_on_persistent_500() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/agents/status"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "error": { "code": "INTERNAL", "message": "server exploded" }
        })))
        .expect(4)
        .mount(&server)
        .await;

    let client = client_for(&server, "deva_test");
    let error = client
        .execute_raw(RequestSpec::get("/v1/agents/status"))
        .await
        .expect_err("persistent 500 should fail");

    assert_eq!(error.status, Some(500));
    assert_eq!(error.code.as_deref(), Some("INTERNAL"));
    assert_eq!(error.message, "server exploded");
}

#[tokio::test]
async fn rate_limiting_is_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/agents/feed"))
        .respond_with(SequenceResponder::new(vec![
            ResponseTemplate::new(429).set_body_json(json!({ "message": "slow down" })),
            ResponseTemplate::new(200).set_body_json(json!({ "posts": [] })),
        ]))
        .expect(2)
        .mount(&server)
        .await;

    let client = client_for(&server, "deva_test");
    client
        .execute_raw(RequestSpec::get("/agents/feed"))
        .await
        .expect("429 should be retried");
}

#[tokio::test]
async fn terminal_statuses_fail_after_exactly_one_attempt() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/agents/profile"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": { "code": "NOT_FOUND", "message": "no such agent", "details": { "name": "ghost" } }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, "deva_test");
    let error = client
        .execute_raw(RequestSpec::get("/v1/agents/profile"))
        .await
        .expect_err("404 should not be retried");

    assert_eq!(error.status, Some(404));
    assert_eq!(error.code.as_deref(), Some("NOT_FOUND"));
    assert_eq!(error.details, Some(json!({ "name": "ghost" })));
}

#[tokio::test]
async fn payment_challenge_is_read_from_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/agents/resources/search"))
        .respond_with(ResponseTemplate::new(402).set_body_json(json!({
            "code": "PAYMENT_REQUIRED",
            "message": "Insufficient karma; pay with USDC",
            "payment_challenge": {
                "scheme": "x402",
                "network": "base",
                "amount": "0.01",
                "pay_to": "0xabc123"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, "deva_test");
    let error = client
        .execute_raw(RequestSpec::post("/v1/agents/resources/search").body(json!({ "q": "mcp" })))
        .await
        .expect_err("402 should fail");

    assert_eq!(error.status, Some(402));
    assert_eq!(error.code.as_deref(), Some("PAYMENT_REQUIRED"));
    assert_eq!(
        error.payment_challenge,
        Some(PaymentChallenge {
            scheme: Some("x402".into()),
            network: Some("base".into()),
            amount: Some(ChallengeAmount::Text("0.01".into())),
            pay_to: Some("0xabc123".into()),
        })
    );
}

#[tokio::test]
async fn payment_challenge_falls_back_to_headers() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/ai/tts"))
        .respond_with(
            ResponseTemplate::new(402)
                .insert_header("x-payment-scheme", "x402")
                .insert_header("x-payment-network", "base-sepolia")
                .set_body_json(json!({ "error": { "message": "payment required" } })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, "deva_test");
    let error = client
        .execute_raw(RequestSpec::post("/v1/ai/tts").body(json!({ "text": "hi" })))
        .await
        .expect_err("402 should fail");

    let challenge = error.payment_challenge.expect("challenge from headers");
    assert_eq!(challenge.scheme.as_deref(), Some("x402"));
    assert_eq!(challenge.network.as_deref(), Some("base-sepolia"));
    assert!(challenge.amount.is_none());
    assert!(challenge.pay_to.is_none());
}

#[tokio::test]
async fn missing_credential_makes_zero_network_attempts() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let client = DevaClient::new(Config {
        base_url: Some(server.uri()),
        credentials: Some(Arc::new(StaticCredential::absent())),
        ..Default::default()
    })
    .unwrap();

    let error = client
        .execute_raw(RequestSpec::get("/v1/agents/status"))
        .await
        .expect_err("missing credential should fail");
    assert!(error.message.contains("deva_agent_register"));
    assert!(error.message.contains("DEVA_API_KEY"));

    let requests = server
        .received_requests()
        .await
        .expect("request recording enabled");
    assert!(requests.is_empty(), "no request should have been sent");
}

#[tokio::test]
async fn non_json_success_body_is_wrapped_as_raw() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/agents/status"))
        .respond_with(ResponseTemplate::new(200).set_body_string("oops"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, "deva_test");
    let payload = client
        .execute_raw(RequestSpec::get("/v1/agents/status"))
        .await
        .expect("non-JSON body must not fail a 2xx response");
    assert_eq!(payload, json!({ "raw": "oops" }));
}

#[tokio::test]
async fn empty_success_body_decodes_as_empty_object() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/v1/agents/kv/old"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, "deva_test");
    let payload = client
        .execute_raw(RequestSpec::delete("/v1/agents/kv/old"))
        .await
        .expect("204 should succeed");
    assert_eq!(payload, json!({}));
}

#[tokio::test]
async fn error_body_that_is_not_json_still_normalizes() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/agents/status"))
        .respond_with(ResponseTemplate::new(400).set_body_string("plain text failure"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, "deva_test");
    let error = client
        .execute_raw(RequestSpec::get("/v1/agents/status"))
        .await
        .expect_err("400 should fail");
    assert_eq!(error.status, Some(400));
    assert_eq!(error.message, "HTTP 400");
}

#[tokio::test]
async fn absent_query_values_are_dropped() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/agents/feed"))
        .and(query_param("limit", "20"))
        .and(query_param_is_missing("cursor"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "posts": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, "deva_test");
    client
        .execute_raw(
            RequestSpec::get("/agents/feed")
                .query_opt("limit", Some(20))
                .query_opt("cursor", None::<String>),
        )
        .await
        .expect("request should succeed");
}

#[tokio::test]
async fn spec_headers_override_engine_defaults() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/agents/files/upload"))
        .and(header("x-idempotency-key", "abc-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, "deva_test");
    client
        .execute_raw(
            RequestSpec::post("/v1/agents/files/upload")
                .header("x-idempotency-key", "abc-123")
                .body(json!({ "name": "a.txt" })),
        )
        .await
        .expect("request should succeed");
}

#[tokio::test]
async fn request_without_body_sends_no_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/agents/features/req_1/vote"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, "deva_test");
    client
        .execute_raw(RequestSpec::post("/v1/agents/features/req_1/vote"))
        .await
        .expect("request should succeed");

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].body.is_empty(), "no body should be sent");
}

#[tokio::test]
async fn request_body_is_serialized_json() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/agents/prompt"))
        .and(body_json(json!({ "target": "truejaian", "message": "hello" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "reply": "hi" })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, "deva_test");
    client
        .execute_raw(
            RequestSpec::post("/agents/prompt")
                .body(json!({ "target": "truejaian", "message": "hello" })),
        )
        .await
        .expect("request should succeed");
}

#[tokio::test]
async fn per_call_timeout_expires_and_surfaces_normalized() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/agents/status"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "ok": true }))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let client = DevaClient::new(Config {
        base_url: Some(server.uri()),
        credentials: Some(Arc::new(StaticCredential::new("deva_test"))),
        retry: Some(RetryPolicy::disabled()),
        ..Default::default()
    })
    .unwrap();

    let error = client
        .execute_raw(
            RequestSpec::get("/v1/agents/status").timeout(Duration::from_millis(50)),
        )
        .await
        .expect_err("deadline should expire");
    assert!(!error.message.is_empty());
    assert_eq!(error.status, None, "timeout carries no HTTP status");
}

#[tokio::test]
async fn timeouts_are_retried_until_the_ceiling() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/agents/status"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "ok": true }))
                .set_delay(Duration::from_millis(400)),
        )
        .expect(2)
        .mount(&server)
        .await;

    let client = DevaClient::new(Config {
        base_url: Some(server.uri()),
        credentials: Some(Arc::new(StaticCredential::new("deva_test"))),
        retry: Some(RetryPolicy {
            max_retries: 1,
            base_backoff: Duration::from_millis(1),
        }),
        ..Default::default()
    })
    .unwrap();

    client
        .execute_raw(RequestSpec::get("/v1/agents/status").timeout(Duration::from_millis(50)))
        .await
        .expect_err("both attempts should time out");
}

#[tokio::test]
async fn concurrent_calls_use_their_own_credentials() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/agents/status"))
        .and(header("authorization", "Bearer key-alpha"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "agent": "alpha" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/agents/status"))
        .and(header("authorization", "Bearer key-beta"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "agent": "beta" })))
        .expect(1)
        .mount(&server)
        .await;

    let alpha = client_for(&server, "key-alpha");
    let beta = client_for(&server, "key-beta");

    let (alpha_result, beta_result) = futures::join!(
        alpha.execute_raw(RequestSpec::get("/v1/agents/status")),
        beta.execute_raw(RequestSpec::get("/v1/agents/status")),
    );

    assert_eq!(alpha_result.unwrap(), json!({ "agent": "alpha" }));
    assert_eq!(beta_result.unwrap(), json!({ "agent": "beta" }));
}

#[tokio::test]
async fn typed_execute_decodes_into_caller_type() {
    #[derive(serde::Deserialize)]
    struct Balance {
        balance: f64,
    }

    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/agents/karma/balance"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "balance": 42.0 })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, "deva_test");
    let balance: Balance = client
        .execute(RequestSpec::get("/v1/agents/karma/balance"))
        .await
        .expect("decode should succeed");
    assert_eq!(balance.balance, 42.0);
}

#[tokio::test]
async fn typed_execute_surfaces_decode_failures_as_normalized_errors() {
    #[derive(Debug, serde::Deserialize)]
    struct Expected {
        #[allow(dead_code)]
        balance: f64,
    }

    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/agents/karma/balance"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "unrelated": true })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, "deva_test");
    let error = client
        .execute::<Expected>(RequestSpec::get("/v1/agents/karma/balance"))
        .await
        .expect_err("shape mismatch should fail");
    assert!(error.message.contains("failed to decode response body"));
}

#[tokio::test]
async fn rotated_credential_is_picked_up_by_the_next_call() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/agents/status"))
        .and(header("authorization", "Bearer first-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "key": "first" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/agents/status"))
        .and(header("authorization", "Bearer second-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "key": "second" })))
        .expect(1)
        .mount(&server)
        .await;

    let slot = deva_mcp::SharedCredential::new(Some("first-key".to_string()));
    let client = DevaClient::new(Config {
        base_url: Some(server.uri()),
        credentials: Some(Arc::new(slot.clone())),
        ..Default::default()
    })
    .unwrap();

    let first = client
        .execute_raw(RequestSpec::get("/v1/agents/status"))
        .await
        .unwrap();
    assert_eq!(first, json!({ "key": "first" }));

    slot.set("second-key");
    let second: Value = client
        .execute_raw(RequestSpec::get("/v1/agents/status"))
        .await
        .unwrap();
    assert_eq!(second, json!({ "key": "second" }));
}
