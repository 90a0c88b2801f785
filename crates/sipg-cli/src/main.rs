//! sipg - Shodan IP grabber
//!
//! Streams every IPv4 host matching a Shodan query to the console or a file.

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    sipg_cli::run().await
}
