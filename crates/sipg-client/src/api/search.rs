//! Search API endpoints.

use crate::SipgClient;
use sipg_core::{Result, SearchPage};

/// Search API endpoints
pub struct SearchApi<'a> {
    client: &'a SipgClient,
    api_key: &'a str,
}

impl<'a> SearchApi<'a> {
    pub(crate) const fn new(client: &'a SipgClient, api_key: &'a str) -> Self {
        Self { client, api_key }
    }

    /// Fetch one page (1-indexed) of results for `query`
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let page = client.search(&key).page("port:22", 1).await?;
    /// println!("Total: {}", page.total);
    /// ```
    pub async fn page(&self, query: &str, page: u32) -> Result<SearchPage> {
        let page = page.to_string();
        self.client
            .get_json(
                "/shodan/host/search",
                self.api_key,
                &[("query", query), ("page", &page)],
            )
            .await
    }
}
