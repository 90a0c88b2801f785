//! Command implementations.

pub mod clear;
pub mod configure;
pub mod examples;
pub mod info;
pub mod search;

use anyhow::{Context as _, Result};
use sipg::{Credentials, PageWalker, RetryConfig, SipgClient};
use std::path::PathBuf;
use std::time::Duration;

use crate::config::CredentialStore;

/// Shared context for all commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// One-off API key from the command line or environment
    pub api_key: Option<String>,

    /// Credential file override
    pub config_path: Option<PathBuf>,

    /// API base URL override
    pub base_url: Option<String>,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Retries for transient failures
    pub retries: u32,
}

impl Context {
    /// Open the credential store.
    pub fn store(&self) -> Result<CredentialStore> {
        match &self.config_path {
            Some(path) => Ok(CredentialStore::open(path)),
            None => CredentialStore::open_default().context("failed to locate credential store"),
        }
    }

    /// The stored key, overridden by a one-off key if given.
    pub fn credentials(&self) -> Result<Credentials> {
        Ok(self.store()?.credentials().or_override(self.api_key.clone()))
    }

    /// Build a transport with the configured settings.
    pub fn client(&self) -> Result<SipgClient> {
        let mut builder = SipgClient::builder()
            .timeout(Duration::from_secs(self.timeout))
            .retry(RetryConfig::new().max_retries(self.retries));
        if let Some(url) = &self.base_url {
            builder = builder.base_url(url.clone());
        }
        Ok(builder.build()?)
    }

    /// A walker over the transport, authenticated with [`credentials`](Self::credentials).
    pub fn walker(&self) -> Result<PageWalker<SipgClient>> {
        Ok(PageWalker::new(self.client()?, self.credentials()?))
    }
}
