//! HTTP transport and pagination engine for the sipg Shodan IP grabber.
//!
//! [`SipgClient`] issues single authenticated requests against the search API.
//! [`PageWalker`] turns one query into a lazy, rate-limited stream of
//! validated IPv4 [`Hit`](sipg_core::Hit)s.

#![doc(html_root_url = "https://docs.rs/sipg-client/2.0.0")]

mod client;
mod config;
pub mod api;
pub mod walker;

pub use client::{SipgClient, SipgClientBuilder};
pub use config::*;
pub use sipg_core::{Result, SipgError, TransportError};
pub use walker::{PageSource, PageWalker, StopReason, WalkEvent, WalkObserver, WalkRequest};
