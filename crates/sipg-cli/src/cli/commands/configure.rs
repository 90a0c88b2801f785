//! `sipg configure` - Store the API key and check it against the account endpoint.

use anyhow::{bail, Context as _, Result};
use colored::Colorize;
use dialoguer::Password;

use super::Context;
use crate::cli::args::ConfigureArgs;

pub async fn execute(ctx: &Context, args: ConfigureArgs) -> Result<()> {
    // A one-off `--api-key` / SHODAN_API_KEY is never persisted.
    let key = match args.key {
        Some(key) => key,
        None => Password::new()
            .with_prompt("Enter your Shodan API key")
            .interact()
            .context("failed to read API key")?,
    };
    let key = key.trim();
    if key.is_empty() {
        bail!("API key must not be empty");
    }

    let mut store = ctx.store()?;
    store.set(key)?;
    println!(
        "{}",
        format!("✓ API key saved to {}", store.path().display()).green()
    );

    // The key stays stored even if the check fails.
    let client = ctx.client()?;
    match client.account(key).api_info().await {
        Ok(info) => {
            println!("{}", "✓ API key configured successfully!".green());
            println!("{} {}", "Plan:".blue(), info.plan.as_deref().unwrap_or("Unknown"));
            println!("{} {}", "Query credits:".blue(), info.query_credits);
            println!("{} {}", "Scan credits:".blue(), info.scan_credits);
            Ok(())
        }
        Err(err) => Err(err).context("✗ failed to verify API key"),
    }
}
