//! Core types and errors for the sipg Shodan IP grabber.
//!
//! This crate provides the foundational types shared by the client and the CLI:
//!
//! - **Types**: the search page and match record model, account info, credentials
//!   and the page range arithmetic used by the walker
//! - **Errors**: [`SipgError`] and its transport taxonomy [`TransportError`]
//!
//! # Example
//!
//! ```rust,ignore
//! use sipg_core::{MatchRecord, Result};
//!
//! fn show(record: &MatchRecord) -> Result<()> {
//!     if let Some(ip) = record.ipv4() {
//!         println!("https://{ip}");
//!     }
//!     Ok(())
//! }
//! ```

#![doc(html_root_url = "https://docs.rs/sipg-core/2.0.0")]

mod error;
pub mod types;

pub use error::{Result, SipgError, TransportError};
pub use types::*;
