//! Page range arithmetic for a paginated walk.

use std::ops::RangeInclusive;

/// Results per page returned by the search endpoint
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Caller-supplied limits on a walk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageBounds {
    /// Results per page the API is assumed to return
    pub page_size: u32,
    /// Stop after this many valid records
    pub max_results: Option<u64>,
    /// First page to fetch (values below 1 mean 1)
    pub start_page: u32,
    /// Last page to fetch, clamped to what the total allows
    pub end_page: Option<u32>,
}

impl Default for PageBounds {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            max_results: None,
            start_page: 1,
            end_page: None,
        }
    }
}

/// Inclusive, non-empty range of 1-based pages to fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRange {
    first: u32,
    last: u32,
    end_limited: bool,
}

impl PageRange {
    /// Compute the pages to walk for a query with `total` results.
    ///
    /// The upper bound is the smallest of the explicit end page, the pages
    /// implied by `total` and the pages implied by `max_results`. Returns
    /// `None` when nothing is left to fetch.
    #[must_use]
    pub fn plan(total: u64, bounds: &PageBounds) -> Option<Self> {
        let page_size = u64::from(bounds.page_size.max(1));

        let mut upper = pages_for(total, page_size);
        if let Some(max) = bounds.max_results {
            upper = upper.min(pages_for(max, page_size));
        }

        let first = bounds.start_page.max(1);
        let last = bounds.end_page.map_or(upper, |end| end.min(upper));
        let end_limited = bounds.end_page.is_some_and(|end| end < upper);

        (first <= last).then_some(Self {
            first,
            last,
            end_limited,
        })
    }

    /// First page of the range
    #[must_use]
    pub const fn first(&self) -> u32 {
        self.first
    }

    /// Last page of the range
    #[must_use]
    pub const fn last(&self) -> u32 {
        self.last
    }

    /// Returns true if the explicit end page, not the result count, set the last page
    #[must_use]
    pub const fn stops_at_end_page(&self) -> bool {
        self.end_limited
    }

    /// Number of pages in the range
    #[must_use]
    pub const fn len(&self) -> u32 {
        self.last - self.first + 1
    }

    /// Always false; empty ranges are not constructed
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// 1-based position of `page` inside the range
    #[must_use]
    pub const fn position(&self, page: u32) -> u32 {
        page - self.first + 1
    }

    /// Iterate over the pages in order
    #[must_use]
    pub fn pages(&self) -> RangeInclusive<u32> {
        self.first..=self.last
    }
}

fn pages_for(count: u64, page_size: u64) -> u32 {
    u32::try_from(count.div_ceil(page_size)).unwrap_or(u32::MAX)
}
