//! Command-line argument definitions using clap.

use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

/// Shodan IP grabber
///
/// Search Shodan, walk every page of results and collect the IPv4 hosts.
///
/// Get your API key at: https://account.shodan.io
#[derive(Parser, Debug)]
#[command(name = "sipg")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Shodan API key for this invocation only (overrides the stored key)
    #[arg(short = 'k', long, env = "SHODAN_API_KEY", global = true, hide_env_values = true)]
    pub api_key: Option<String>,

    /// Path of the credential file
    #[arg(long, env = "SIPG_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// API base URL
    #[arg(long, env = "SIPG_BASE_URL", global = true, hide = true)]
    pub base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 30, global = true)]
    pub timeout: u64,

    /// Retry transient failures up to N times
    #[arg(long, default_value_t = 0, global = true)]
    pub retries: u32,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search for IP addresses using Shodan
    Search(SearchArgs),

    /// Store your Shodan API key and verify it
    Configure(ConfigureArgs),

    /// Show information about your Shodan API key
    Info(InfoArgs),

    /// Clear the stored API key
    Clear,

    /// Show example search queries
    Examples,
}

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Search query (e.g. 'ssl:"Uber Technologies Inc"')
    pub query: String,

    /// Save results to file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Maximum number of results to return
    #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
    pub max_results: Option<u64>,

    /// Delay between API requests (seconds)
    #[arg(short, long, default_value = "1.0", value_parser = parse_delay)]
    pub delay: Duration,

    /// Show detailed results with additional information
    #[arg(long)]
    pub details: bool,

    /// Display results in a formatted table
    #[arg(long)]
    pub table: bool,

    /// First page to fetch
    #[arg(long, default_value_t = 1)]
    pub start_page: u32,

    /// Last page to fetch
    #[arg(long)]
    pub end_page: Option<u32>,
}

#[derive(Args, Debug)]
pub struct ConfigureArgs {
    /// API key to store (prompted for when omitted)
    pub key: Option<String>,
}

#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Print the raw account record as JSON
    #[arg(long)]
    pub json: bool,
}

fn parse_delay(s: &str) -> Result<Duration, String> {
    let secs: f64 = s.parse().map_err(|_| format!("'{s}' is not a number of seconds"))?;
    Duration::try_from_secs_f64(secs).map_err(|_| format!("delay must be a non-negative number, got {s}"))
}
