//! Credential indirection for the client engine.
//!
//! The engine never owns an API key. It reads the current credential through
//! a [`CredentialProvider`] at the start of every call, so a key minted or
//! rotated mid-process is picked up by the next call without rebuilding the
//! client.

use std::sync::{Arc, RwLock};

/// Supplies the current bearer credential, if any.
pub trait CredentialProvider: Send + Sync {
    fn api_key(&self) -> Option<String>;
}

/// Closures work as providers, which keeps tests terse.
impl<F> CredentialProvider for F
where
    F: Fn() -> Option<String> + Send + Sync,
{
    fn api_key(&self) -> Option<String> {
        self()
    }
}

/// Fixed credential that never rotates.
#[derive(Clone, Debug, Default)]
pub struct StaticCredential(Option<String>);

impl StaticCredential {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self(Some(api_key.into()))
    }

    pub fn absent() -> Self {
        Self(None)
    }
}

impl CredentialProvider for StaticCredential {
    fn api_key(&self) -> Option<String> {
        self.0.clone()
    }
}

/// Process-lifetime credential slot shared between the config store and the
/// client. Registration rotates it in place; readers see the new key on
/// their next call.
#[derive(Clone, Debug, Default)]
pub struct SharedCredential {
    inner: Arc<RwLock<Option<String>>>,
}

impl SharedCredential {
    pub fn new(initial: Option<String>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(initial)),
        }
    }

    pub fn get(&self) -> Option<String> {
        self.inner.read().expect("credential lock poisoned").clone()
    }

    pub fn set(&self, api_key: impl Into<String>) {
        *self.inner.write().expect("credential lock poisoned") = Some(api_key.into());
    }
}

impl CredentialProvider for SharedCredential {
    fn api_key(&self) -> Option<String> {
        self.get()
    }
}
