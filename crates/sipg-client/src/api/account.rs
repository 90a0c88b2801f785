//! Account API endpoints.

use crate::SipgClient;
use sipg_core::{ApiInfo, Result};

/// Account API endpoints
pub struct AccountApi<'a> {
    client: &'a SipgClient,
    api_key: &'a str,
}

impl<'a> AccountApi<'a> {
    pub(crate) const fn new(client: &'a SipgClient, api_key: &'a str) -> Self {
        Self { client, api_key }
    }

    /// Get API plan information including available credits
    pub async fn api_info(&self) -> Result<ApiInfo> {
        self.client.get_json("/api-info", self.api_key, &[]).await
    }

    /// The /api-info body as returned, without typing
    pub async fn api_info_raw(&self) -> Result<serde_json::Value> {
        self.client.get_json("/api-info", self.api_key, &[]).await
    }
}
