//! # sipg-cli
//!
//! Command-line interface for the sipg Shodan IP grabber.
//!
//! ## Features
//!
//! - **Paginated search**: walks every result page with throttling, a result
//!   cap and an optional page range
//! - **IPv4 only**: IPv6 and malformed addresses are dropped
//! - **Output**: numbered URLs, detailed records or a table on the console,
//!   plus an optional output file written record by record
//! - **Credential store**: the API key lives in a per-user JSON file

pub mod cli;
pub mod config;
pub mod output;

pub use cli::run;
