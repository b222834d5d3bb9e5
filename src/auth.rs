//! Agent registration — the single place credentials are minted.

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::client::DevaClient;
use crate::config::ConfigStore;
use crate::errors::{DevaError, Result};
use crate::http::RequestSpec;

#[derive(Clone)]
pub struct AuthManager {
    inner: Arc<AuthInner>,
}

struct AuthInner {
    store: ConfigStore,
    client: DevaClient,
}

impl AuthManager {
    pub fn new(store: ConfigStore, client: DevaClient) -> Self {
        Self {
            inner: Arc::new(AuthInner { store, client }),
        }
    }

    /// Current credential, if one is configured or was minted this process.
    pub fn api_key(&self) -> Option<String> {
        self.inner.store.credential().get()
    }

    /// Registers a new agent, persists the issued key under the active
    /// profile, and rotates the in-memory credential so subsequent calls in
    /// this process authenticate immediately.
    pub async fn register_agent(&self, name: &str, description: Option<&str>) -> Result<Value> {
        let mut body = Map::new();
        body.insert("name".to_string(), Value::String(name.to_string()));
        if let Some(description) = description {
            body.insert(
                "description".to_string(),
                Value::String(description.to_string()),
            );
        }

        let result: Value = self
            .inner
            .client
            .execute_raw(
                RequestSpec::post("/agents/register")
                    .body(Value::Object(body))
                    .unauthenticated(),
            )
            .await?;

        let api_key = result
            .get("api_key")
            .and_then(Value::as_str)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| DevaError::message("Registration succeeded but no api_key returned."))?
            .to_string();

        let display_name = result
            .pointer("/agent/name")
            .and_then(Value::as_str)
            .unwrap_or(name)
            .to_string();
        self.inner
            .store
            .save_api_key(&api_key, Some(&display_name))
            .await?;

        Ok(result)
    }
}
