//! Pagination engine: one query in, a lazy stream of validated IPv4 hits out.
//!
//! A walk first probes page 1 to learn the total result count, computes the
//! page range from the total, the optional result cap and the optional
//! start/end pages, then fetches pages strictly in order. Records whose
//! `ip_str` is not a dotted-quad IPv4 address are dropped and do not count
//! toward the cap.
//!
//! The stream is pull-based. Nothing is requested until the consumer polls,
//! and a consumer that stops polling (or drops the stream) causes no further
//! requests. Between two page requests of the range the walk sleeps for the
//! configured delay; it never sleeps after the last page.

mod events;
mod request;

pub use events::{StopReason, WalkEvent, WalkObserver};
pub use request::{WalkRequest, DEFAULT_DELAY};

use crate::SipgClient;
use async_trait::async_trait;
use futures_util::stream::{self, Stream};
use sipg_core::{Credentials, Hit, MatchRecord, PageBounds, PageRange, Result, SearchPage};
use std::collections::VecDeque;
use std::time::Duration;
use tracing::{debug, info, trace};

/// Anything that can return one page of search results
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch `page` (1-based) of `query` using `api_key`
    async fn fetch_page(&self, api_key: &str, query: &str, page: u32) -> Result<SearchPage>;
}

#[async_trait]
impl PageSource for SipgClient {
    async fn fetch_page(&self, api_key: &str, query: &str, page: u32) -> Result<SearchPage> {
        self.search(api_key).page(query, page).await
    }
}

/// Streams the results of a search query page by page.
///
/// The walker keeps no state between calls to [`stream`](Self::stream);
/// every stream owns its own iteration state.
pub struct PageWalker<S> {
    source: S,
    credentials: Credentials,
}

impl<S: PageSource> PageWalker<S> {
    /// Create a walker over `source` that authenticates with `credentials`
    pub const fn new(source: S, credentials: Credentials) -> Self {
        Self {
            source,
            credentials,
        }
    }

    /// The underlying page source
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Start a walk without observing its progress
    pub fn stream(&self, request: &WalkRequest) -> Result<impl Stream<Item = Result<Hit>> + Send + '_> {
        self.stream_with(request, |_: &WalkEvent| {})
    }

    /// Start a walk, reporting progress to `observer`.
    ///
    /// Fails with [`SipgError::NotConfigured`](sipg_core::SipgError::NotConfigured)
    /// before any request when no API key is present.
    pub fn stream_with<'a, O>(
        &'a self,
        request: &WalkRequest,
        observer: O,
    ) -> Result<impl Stream<Item = Result<Hit>> + Send + 'a>
    where
        O: WalkObserver + 'a,
    {
        let api_key = self.credentials.require()?.to_string();

        let walk = Walk {
            source: &self.source,
            api_key,
            query: request.query.clone(),
            bounds: request.bounds,
            delay: request.delay,
            observer,
            phase: Phase::Probe,
            queue: VecDeque::new(),
            queue_page: 0,
            next_page: 1,
            emitted: 0,
        };

        Ok(stream::try_unfold(walk, Walk::advance))
    }
}

#[derive(Debug, Clone, Copy)]
enum Phase {
    Probe,
    Streaming(PageRange),
    Done,
}

/// Iteration state of one stream
struct Walk<'a, S, O> {
    source: &'a S,
    api_key: String,
    query: String,
    bounds: PageBounds,
    delay: Duration,
    observer: O,
    phase: Phase,
    queue: VecDeque<MatchRecord>,
    queue_page: u32,
    next_page: u32,
    emitted: u64,
}

impl<'a, S: PageSource, O: WalkObserver> Walk<'a, S, O> {
    /// Produce the next hit, fetching pages as needed
    async fn advance(mut self) -> Result<Option<(Hit, Self)>> {
        loop {
            match self.phase {
                Phase::Probe => self.probe().await?,
                Phase::Streaming(range) => {
                    if self.cap_reached() {
                        self.finish(StopReason::Capped);
                        continue;
                    }

                    if let Some(record) = self.queue.pop_front() {
                        if let Some(hit) = self.admit(record) {
                            return Ok(Some((hit, self)));
                        }
                        continue;
                    }

                    if self.next_page > range.last() {
                        let reason = if range.stops_at_end_page() {
                            StopReason::RangeExhausted
                        } else {
                            StopReason::Exhausted
                        };
                        self.finish(reason);
                        continue;
                    }

                    let page = self.next_page;
                    if page > range.first() && !self.delay.is_zero() {
                        debug!(delay = ?self.delay, page, "throttling before next page");
                        tokio::time::sleep(self.delay).await;
                    }
                    let results = Self::fetch(self.source, &self.api_key, &self.query, page).await?;
                    self.enqueue(range, page, results);
                }
                Phase::Done => return Ok(None),
            }
        }
    }

    /// Request page 1 to learn the total and plan the range
    async fn probe(&mut self) -> Result<()> {
        let first = Self::fetch(self.source, &self.api_key, &self.query, 1).await?;
        let total = first.total;
        info!(query = %self.query, total, "probe complete");

        if total == 0 {
            self.observer.on_event(&WalkEvent::NoResults);
            self.finish(StopReason::Empty);
            return Ok(());
        }

        let range = PageRange::plan(total, &self.bounds);
        self.observer.on_event(&WalkEvent::Planned { total, range });

        match range {
            None => self.finish(StopReason::NoPagesInRange),
            Some(range) => {
                debug!(first = range.first(), last = range.last(), "page range planned");
                self.phase = Phase::Streaming(range);
                self.next_page = range.first();
                // The probe already holds page 1.
                if range.first() == 1 {
                    self.enqueue(range, 1, first);
                }
            }
        }

        Ok(())
    }

    // Takes the fields it needs so the future never holds `&Walk`.
    async fn fetch(source: &S, api_key: &str, query: &str, page: u32) -> Result<SearchPage> {
        debug!(query, page, "fetching page");
        source.fetch_page(api_key, query, page).await
    }

    fn enqueue(&mut self, range: PageRange, page: u32, results: SearchPage) {
        debug!(page, matches = results.len(), "page received");
        self.queue = results.matches.into();
        self.queue_page = page;
        self.next_page = page.saturating_add(1);
        self.observer.on_event(&WalkEvent::PageFetched {
            page,
            position: range.position(page),
            pages: range.len(),
        });
    }

    fn admit(&mut self, record: MatchRecord) -> Option<Hit> {
        let Some(ip) = record.ipv4() else {
            trace!(ip = ?record.ip_str, "skipping non-IPv4 match");
            return None;
        };

        self.emitted += 1;
        Some(Hit {
            index: self.emitted,
            page: self.queue_page,
            ip,
            record,
        })
    }

    fn cap_reached(&self) -> bool {
        self.bounds
            .max_results
            .is_some_and(|max| self.emitted >= max)
    }

    fn finish(&mut self, reason: StopReason) {
        info!(query = %self.query, ?reason, emitted = self.emitted, "walk finished");
        self.queue.clear();
        self.phase = Phase::Done;
        self.observer.on_event(&WalkEvent::Finished {
            reason,
            emitted: self.emitted,
        });
    }
}
