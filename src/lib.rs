//! MCP server exposing the Deva agent platform API as callable tools.
//!
//! The interesting part lives in the client core: request construction,
//! bearer-auth injection, retry/backoff, deadlines, and normalization of
//! every failure (including 402 payment challenges) into a single error
//! type. The tool catalog and the MCP shell are thin layers over it.

/// Default API base URL.
pub const DEFAULT_API_BASE: &str = "https://api.deva.me";

/// Default connection timeout (5 seconds).
pub const DEFAULT_CONNECT_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(5);

/// Default request deadline (30 seconds), overridable per call and via
/// config/`DEVA_MCP_TIMEOUT_MS`.
pub const DEFAULT_REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(30);

mod auth;
mod billing;
mod client;
mod config;
mod credentials;
mod errors;
mod http;
mod payment;
mod server;
pub mod tools;

pub use auth::AuthManager;
pub use billing::with_karma_cost;
pub use client::{Config, DevaClient};
pub use config::{
    redact_api_key, write_config_file, AgentProfile, ConfigFile, ConfigStore, FileDefaults,
    Settings,
};
pub use credentials::{CredentialProvider, SharedCredential, StaticCredential};
pub use errors::{
    format_error_for_tool, normalize_error, ChallengeAmount, DevaError, PaymentChallenge, Result,
};
pub use http::{RequestSpec, RetryPolicy};
pub use payment::extract_payment_challenge;
pub use server::DevaMcpServer;
