//! Settings and the on-disk credential/config store.
//!
//! Configuration lives in a small JSON document keyed by profile, loaded once
//! at startup and rewritten when a credential is minted. Environment
//! variables override the file: `DEVA_MCP_CONFIG_PATH`, `DEVA_MCP_PROFILE`,
//! `DEVA_API_BASE`, `DEVA_MCP_TIMEOUT_MS`, `DEVA_API_KEY`.

use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::credentials::SharedCredential;
use crate::errors::{DevaError, Result};
use crate::{DEFAULT_API_BASE, DEFAULT_REQUEST_TIMEOUT};

const DEFAULT_PROFILE: &str = "default";

/// Per-profile slot in the config file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AgentProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FileDefaults {
    pub timeout_ms: u64,
}

impl Default for FileDefaults {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_REQUEST_TIMEOUT.as_millis() as u64,
        }
    }
}

/// On-disk layout of `~/.deva-mcp/config.json`. Tolerant of missing fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ConfigFile {
    pub profile: String,
    pub api_base: String,
    pub agents: BTreeMap<String, AgentProfile>,
    pub defaults: FileDefaults,
}

impl Default for ConfigFile {
    fn default() -> Self {
        let mut agents = BTreeMap::new();
        agents.insert(DEFAULT_PROFILE.to_string(), AgentProfile::default());
        Self {
            profile: DEFAULT_PROFILE.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            agents,
            defaults: FileDefaults::default(),
        }
    }
}

/// Resolved runtime settings: file contents plus environment overlays.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_base: String,
    pub profile: String,
    pub timeout: Duration,
    pub api_key: Option<String>,
    pub config_path: PathBuf,
    pub file: ConfigFile,
}

impl Settings {
    /// Loads settings from the default location with env overrides applied.
    pub async fn load() -> Result<Self> {
        let mut settings = Self::from_path(resolve_config_path()).await?;
        settings.apply_env_overrides();
        Ok(settings)
    }

    /// Loads settings from an explicit path, without env overrides. An
    /// unreadable or unparseable file is replaced with defaults on disk.
    pub async fn from_path(path: PathBuf) -> Result<Self> {
        let parsed = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => serde_json::from_str::<ConfigFile>(&raw).ok(),
            Err(_) => None,
        };
        let mut file = match parsed {
            Some(file) => file,
            None => {
                let file = ConfigFile::default();
                write_config_file(&path, &file).await?;
                file
            }
        };
        file.agents.entry(file.profile.clone()).or_default();

        let profile = file.profile.clone();
        let api_key = file
            .agents
            .get(&profile)
            .and_then(|slot| slot.api_key.clone());
        Ok(Self {
            api_base: file.api_base.clone(),
            profile,
            timeout: Duration::from_millis(file.defaults.timeout_ms),
            api_key,
            config_path: path,
            file,
        })
    }

    fn apply_env_overrides(&mut self) {
        if let Some(profile) = non_empty_env("DEVA_MCP_PROFILE") {
            self.profile = profile;
        }
        if let Some(base) = non_empty_env("DEVA_API_BASE") {
            self.api_base = base;
        }
        if let Some(timeout) = non_empty_env("DEVA_MCP_TIMEOUT_MS") {
            if let Ok(ms) = timeout.parse::<u64>() {
                self.timeout = Duration::from_millis(ms);
            }
        }

        self.file.agents.entry(self.profile.clone()).or_default();
        self.api_key = self
            .file
            .agents
            .get(&self.profile)
            .and_then(|slot| slot.api_key.clone());
        if let Some(key) = non_empty_env("DEVA_API_KEY") {
            self.api_key = Some(key);
        }
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn resolve_config_path() -> PathBuf {
    if let Some(path) = non_empty_env("DEVA_MCP_CONFIG_PATH") {
        return PathBuf::from(path);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".deva-mcp")
        .join("config.json")
}

/// Writes the config document, creating parent directories. The file holds a
/// credential, so it is chmod 0600 on Unix.
pub async fn write_config_file(path: &Path, file: &ConfigFile) -> Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|err| DevaError::message(format!("failed to create config dir: {err}")))?;
    }
    let rendered = serde_json::to_string_pretty(file)
        .map_err(|err| DevaError::message(format!("failed to serialize config: {err}")))?;
    tokio::fs::write(path, rendered)
        .await
        .map_err(|err| DevaError::message(format!("failed to write config: {err}")))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tokio::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
            .await
            .map_err(|err| DevaError::message(format!("failed to set config mode: {err}")))?;
    }

    Ok(())
}

/// Owns the mutable config snapshot and the process-wide credential slot.
///
/// The on-disk write is not guarded against concurrent processes; last write
/// wins, which is acceptable for a per-user credential file.
#[derive(Clone)]
pub struct ConfigStore {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    path: PathBuf,
    profile: String,
    file: Mutex<ConfigFile>,
    credential: SharedCredential,
}

impl ConfigStore {
    pub fn new(settings: &Settings) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                path: settings.config_path.clone(),
                profile: settings.profile.clone(),
                file: Mutex::new(settings.file.clone()),
                credential: SharedCredential::new(settings.api_key.clone()),
            }),
        }
    }

    /// The rotating credential slot read by the client on every call.
    pub fn credential(&self) -> SharedCredential {
        self.inner.credential.clone()
    }

    pub fn profile(&self) -> &str {
        &self.inner.profile
    }

    pub fn config_path(&self) -> &Path {
        &self.inner.path
    }

    /// Persists a freshly minted key under the active profile and rotates the
    /// in-memory credential so subsequent calls in this process use it.
    pub async fn save_api_key(&self, api_key: &str, display_name: Option<&str>) -> Result<()> {
        let snapshot = {
            let mut file = self.inner.file.lock().expect("config lock poisoned");
            file.profile = self.inner.profile.clone();
            let slot = file.agents.entry(self.inner.profile.clone()).or_default();
            slot.api_key = Some(api_key.to_string());
            if let Some(name) = display_name {
                slot.name = Some(name.to_string());
            }
            file.clone()
        };
        write_config_file(&self.inner.path, &snapshot).await?;
        self.inner.credential.set(api_key);
        Ok(())
    }
}

/// Renders a key for logs without leaking it.
pub fn redact_api_key(value: Option<&str>) -> String {
    match value {
        None => "<none>".to_string(),
        Some(key) if key.len() <= 8 => "****".to_string(),
        Some(key) => format!("{}***{}", &key[..5], &key[key.len() - 3..]),
    }
}
