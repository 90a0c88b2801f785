//! Out-of-band signals emitted while a walk runs.

use sipg_core::PageRange;

/// Why a walk ended without an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The probe reported zero results
    Empty,
    /// The requested pages lie outside what the total allows
    NoPagesInRange,
    /// Every page up to the last computed one was walked
    Exhausted,
    /// The max-results cap was reached
    Capped,
    /// The explicit end page was reached
    RangeExhausted,
}

/// Progress and lifecycle notifications
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalkEvent {
    /// The probe finished and the page range is known
    Planned {
        /// Total results reported by the API
        total: u64,
        /// Pages that will be walked, if any
        range: Option<PageRange>,
    },
    /// The query matched nothing
    NoResults,
    /// A page was fetched and its records queued
    PageFetched {
        /// Page number
        page: u32,
        /// 1-based position of the page in the range
        position: u32,
        /// Pages in the range
        pages: u32,
    },
    /// The walk finished
    Finished {
        /// Terminal state
        reason: StopReason,
        /// Records yielded
        emitted: u64,
    },
}

/// Receives [`WalkEvent`]s; implemented for any `FnMut(&WalkEvent)`
pub trait WalkObserver: Send {
    /// Called synchronously from inside the walk
    fn on_event(&mut self, event: &WalkEvent);
}

impl<F> WalkObserver for F
where
    F: FnMut(&WalkEvent) + Send,
{
    fn on_event(&mut self, event: &WalkEvent) {
        self(event);
    }
}
