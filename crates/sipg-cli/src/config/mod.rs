//! Credential store: the API key and other settings in a JSON file.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sipg::Credentials;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Errors writing the credential file.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No per-user configuration directory on this platform.
    #[error("could not determine config directory")]
    NoConfigDir,

    /// The file or its directory could not be written.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The settings could not be encoded.
    #[error("failed to encode configuration: {0}")]
    Encode(#[from] serde_json::Error),
}

/// On-disk layout: `{"api_key": "...", ...other settings}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoredConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    api_key: Option<String>,

    #[serde(flatten)]
    settings: Map<String, Value>,
}

/// Persistent key-value store for the API key.
///
/// Every mutation is written to disk immediately. A missing, unreadable or
/// corrupt file loads as an empty store.
#[derive(Debug)]
pub struct CredentialStore {
    path: PathBuf,
    config: StoredConfig,
}

impl CredentialStore {
    /// `<user config dir>/sipg/config.json`
    pub fn default_path() -> Result<PathBuf, StoreError> {
        let dirs = ProjectDirs::from("io", "sipg", "sipg").ok_or(StoreError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.json"))
    }

    /// Open the store at the default location.
    pub fn open_default() -> Result<Self, StoreError> {
        Ok(Self::open(Self::default_path()?))
    }

    /// Open the store at `path`, creating its directory if needed.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();

        if let Some(parent) = path.parent() {
            if let Err(err) = std::fs::create_dir_all(parent) {
                warn!(dir = %parent.display(), error = %err, "could not create config directory");
            }
        }

        let config = load(&path);
        Self { path, config }
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The stored API key.
    pub fn get(&self) -> Option<&str> {
        self.config.api_key.as_deref()
    }

    /// The stored key as [`Credentials`].
    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.config.api_key.clone())
    }

    /// Store `api_key` and persist.
    pub fn set(&mut self, api_key: &str) -> Result<(), StoreError> {
        self.config.api_key = Some(api_key.trim().to_string());
        self.save()
    }

    /// Remove the API key. Returns false, without touching the file, when
    /// no key was stored.
    pub fn clear(&mut self) -> Result<bool, StoreError> {
        if self.config.api_key.take().is_none() {
            return Ok(false);
        }
        self.save()?;
        Ok(true)
    }

    /// A generic setting other than the API key.
    pub fn setting(&self, key: &str) -> Option<&Value> {
        self.config.settings.get(key)
    }

    /// Store a generic setting and persist.
    pub fn set_setting(&mut self, key: &str, value: Value) -> Result<(), StoreError> {
        if key == "api_key" {
            return match value {
                Value::String(k) => self.set(&k),
                _ => {
                    self.config.api_key = None;
                    self.save()
                }
            };
        }
        self.config.settings.insert(key.to_string(), value);
        self.save()
    }

    fn save(&self) -> Result<(), StoreError> {
        let write_err = |source| StoreError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }

        let content = serde_json::to_string_pretty(&self.config)?;
        std::fs::write(&self.path, content).map_err(write_err)?;
        debug!(path = %self.path.display(), "configuration saved");

        Ok(())
    }
}

fn load(path: &Path) -> StoredConfig {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return StoredConfig::default(),
        Err(err) => {
            warn!(path = %path.display(), error = %err, "unreadable config, ignoring");
            return StoredConfig::default();
        }
    };

    serde_json::from_str(&content).unwrap_or_else(|err| {
        warn!(path = %path.display(), error = %err, "corrupt config, ignoring");
        StoredConfig::default()
    })
}
