//! Stream every IPv4 host matching a Shodan query.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use futures_util::TryStreamExt;
//! use sipg::{Credentials, PageWalker, SipgClient, WalkRequest};
//!
//! #[tokio::main]
//! async fn main() -> sipg::Result<()> {
//!     let client = SipgClient::new()?;
//!     let walker = PageWalker::new(client, Credentials::new(Some("your-api-key".into())));
//!
//!     let request = WalkRequest::new("ssl:\"Example Inc\"").max_results(250);
//!     let mut hits = std::pin::pin!(walker.stream(&request)?);
//!     while let Some(hit) = hits.try_next().await? {
//!         println!("{}. {}", hit.index, hit.url());
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Features
//!
//! - `default` - Uses rustls for TLS
//! - `rustls` - Use rustls for TLS (recommended)
//! - `native-tls` - Use system native TLS

#![doc(html_root_url = "https://docs.rs/sipg/2.0.0")]

// Re-export core types
pub use sipg_core::*;

// Re-export client and walker
pub use sipg_client::{
    api, walker, PageSource, PageWalker, RetryConfig, SipgClient, SipgClientBuilder, StopReason,
    WalkEvent, WalkObserver, WalkRequest,
};

// Re-export runtime for convenience
pub use futures_util;
pub use serde_json;
pub use tokio;
