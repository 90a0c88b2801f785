//! Parameters of a single walk.

use sipg_core::PageBounds;
use std::time::Duration;

/// Pause between page requests unless configured otherwise
pub const DEFAULT_DELAY: Duration = Duration::from_secs(1);

/// Builder for one streaming search
#[derive(Debug, Clone)]
pub struct WalkRequest {
    pub(crate) query: String,
    pub(crate) bounds: PageBounds,
    pub(crate) delay: Duration,
}

impl WalkRequest {
    /// Walk every page of `query`, passed to the API verbatim
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            bounds: PageBounds::default(),
            delay: DEFAULT_DELAY,
        }
    }

    /// Stop after this many valid IPv4 records
    #[must_use]
    pub const fn max_results(mut self, max: u64) -> Self {
        self.bounds.max_results = Some(max);
        self
    }

    /// Pause between consecutive page requests
    #[must_use]
    pub const fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// First page to fetch (values below 1 mean 1)
    #[must_use]
    pub const fn start_page(mut self, page: u32) -> Self {
        self.bounds.start_page = page;
        self
    }

    /// Last page to fetch
    #[must_use]
    pub const fn end_page(mut self, page: u32) -> Self {
        self.bounds.end_page = Some(page);
        self
    }

    /// Results per page assumed when computing the page range
    #[must_use]
    pub const fn page_size(mut self, size: u32) -> Self {
        self.bounds.page_size = size;
        self
    }

    /// The query string
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// The page limits of this walk
    #[must_use]
    pub const fn bounds(&self) -> &PageBounds {
        &self.bounds
    }
}
