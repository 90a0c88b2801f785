use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use sipg::{WalkEvent, WalkObserver};
use std::time::Duration;

/// Spinner on stderr driven by walker events.
#[derive(Clone)]
pub struct Progress {
    bar: ProgressBar,
}

impl Progress {
    /// Start a spinner for `query`.
    pub fn start(query: &str) -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.enable_steady_tick(Duration::from_millis(100));
        bar.set_message(format!("Searching for {query}..."));
        Self { bar }
    }

    /// Remove the spinner.
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }

    /// Run `f` with the spinner hidden, for writes to the terminal.
    pub fn suspend<F: FnOnce() -> R, R>(&self, f: F) -> R {
        self.bar.suspend(f)
    }

    /// Print a line on stderr without tearing the spinner.
    fn note(&self, line: &str) {
        self.bar.suspend(|| eprintln!("{line}"));
    }
}

impl WalkObserver for Progress {
    fn on_event(&mut self, event: &WalkEvent) {
        match event {
            WalkEvent::Planned { total, .. } => {
                self.note(&format!("Found {total} total results").green().to_string());
            }
            WalkEvent::NoResults => {
                self.note(&"No results found for the given query.".yellow().to_string());
            }
            WalkEvent::PageFetched {
                page,
                position,
                pages,
            } => {
                tracing::debug!(page, position, pages, "page fetched");
                self.bar
                    .set_message(format!("Searching page {position}/{pages} (page {page})"));
            }
            WalkEvent::Finished { reason, emitted } => {
                tracing::debug!(?reason, emitted, "walk finished");
                self.bar.finish_and_clear();
            }
        }
    }
}
