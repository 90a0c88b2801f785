//! HTTP transport for the Shodan search API.

use crate::api::{AccountApi, SearchApi};
use crate::config::RetryConfig;
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use sipg_core::{Result, SipgError, TransportError};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// The Shodan API base URL
const DEFAULT_BASE_URL: &str = "https://api.shodan.io";

/// Default request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Transport for the search and account endpoints.
///
/// The client holds no credentials; every request carries the API key it
/// is given.
#[derive(Clone)]
pub struct SipgClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: HttpClient,
    base_url: Url,
    timeout: Duration,
    retry_config: RetryConfig,
}

impl SipgClient {
    /// Create a client with default settings
    pub fn new() -> Result<Self> {
        SipgClientBuilder::new().build()
    }

    /// Create a builder for custom configuration
    #[must_use]
    pub fn builder() -> SipgClientBuilder {
        SipgClientBuilder::new()
    }

    /// Access search endpoints with `api_key`
    #[must_use]
    pub fn search<'a>(&'a self, api_key: &'a str) -> SearchApi<'a> {
        SearchApi::new(self, api_key)
    }

    /// Access account endpoints with `api_key`
    #[must_use]
    pub fn account<'a>(&'a self, api_key: &'a str) -> AccountApi<'a> {
        AccountApi::new(self, api_key)
    }

    /// Perform an authenticated GET request, retrying transient failures
    /// according to the retry policy.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        api_key: &str,
        params: &[(&str, &str)],
    ) -> Result<T> {
        let url = self.build_url(path, api_key, params)?;
        let logged = redacted(&url);
        let retry = &self.inner.retry_config;
        let mut attempt = 0;

        loop {
            debug!(url = %logged, attempt, "GET request");
            match self.get_once(url.clone()).await {
                Ok(value) => return Ok(value),
                Err(err) if retry.should_retry(&err, attempt) => {
                    let wait = retry.backoff_for(attempt);
                    warn!(url = %logged, error = %err, ?wait, "transient failure, retrying");
                    tokio::time::sleep(wait).await;
                    attempt += 1;
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    async fn get_once<T: DeserializeOwned>(&self, url: Url) -> std::result::Result<T, TransportError> {
        let response = self
            .inner
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.classify(e))?;

        if status.is_success() {
            Ok(serde_json::from_str(&body)?)
        } else {
            Err(error_for_status(status.as_u16(), body))
        }
    }

    /// Build a URL with the API key and query parameters
    fn build_url(&self, path: &str, api_key: &str, params: &[(&str, &str)]) -> Result<Url> {
        let mut url = self
            .inner
            .base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| SipgError::Config(format!("invalid API path {path}: {e}")))?;

        url.query_pairs_mut()
            .append_pair("key", api_key)
            .extend_pairs(params);

        Ok(url)
    }

    fn classify(&self, err: reqwest::Error) -> TransportError {
        // reqwest errors embed the request URL, which carries the API key.
        let err = err.without_url();
        if err.is_timeout() {
            TransportError::Timeout(self.inner.timeout.as_secs())
        } else if err.is_connect() {
            TransportError::Connection(err.to_string())
        } else {
            TransportError::Http(err.to_string())
        }
    }
}

/// `url` with the API key replaced, for logging
fn redacted(url: &Url) -> Url {
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == "key" { "REDACTED".into() } else { v.into_owned() };
            (k.into_owned(), v)
        })
        .collect();

    let mut out = url.clone();
    out.query_pairs_mut().clear().extend_pairs(pairs);
    out
}

/// Convert an error response to a [`TransportError`]
fn error_for_status(status: u16, body: String) -> TransportError {
    // Try to parse error message from JSON
    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
        .unwrap_or(body);

    match status {
        401 => TransportError::Unauthorized,
        429 => {
            warn!("Rate limited by Shodan API");
            TransportError::RateLimited
        }
        _ => TransportError::Status {
            code: status,
            message,
        },
    }
}

/// Builder for configuring a [`SipgClient`]
pub struct SipgClientBuilder {
    base_url: String,
    timeout: Duration,
    user_agent: String,
    retry_config: RetryConfig,
}

impl Default for SipgClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SipgClientBuilder {
    /// Create a new builder with default settings
    #[must_use]
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("sipg/{}", env!("CARGO_PKG_VERSION")),
            retry_config: RetryConfig::default(),
        }
    }

    /// Set the base URL (useful for testing)
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the request timeout
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the User-Agent header
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    /// Set retry configuration
    #[must_use]
    pub fn retry(mut self, config: RetryConfig) -> Self {
        self.retry_config = config;
        self
    }

    /// Build the client
    pub fn build(self) -> Result<SipgClient> {
        // A trailing slash makes `Url::join` append instead of replace.
        let mut base = self.base_url;
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base)
            .map_err(|e| SipgError::Config(format!("invalid base URL {base}: {e}")))?;

        let http = HttpClient::builder()
            .timeout(self.timeout)
            .user_agent(&self.user_agent)
            .gzip(true)
            .build()
            .map_err(|e| SipgError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(SipgClient {
            inner: Arc::new(ClientInner {
                http,
                base_url,
                timeout: self.timeout,
                retry_config: self.retry_config,
            }),
        })
    }
}
