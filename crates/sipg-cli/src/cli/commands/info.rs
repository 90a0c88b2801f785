//! `sipg info` - Show plan and credits for the configured key.

use anyhow::Result;
use colored::Colorize;
use sipg::ApiInfo;

use super::Context;
use crate::cli::args::InfoArgs;

pub async fn execute(ctx: &Context, args: InfoArgs) -> Result<()> {
    let credentials = ctx.credentials()?;
    let key = credentials.require()?;

    let client = ctx.client()?;
    let account = client.account(key);

    if args.json {
        let raw = account.api_info_raw().await?;
        println!("{}", serde_json::to_string_pretty(&raw)?);
    } else {
        print_info(&account.api_info().await?);
    }

    Ok(())
}

fn print_info(info: &ApiInfo) {
    let field = |name: &str| format!("{name}:").green();
    let or_unknown = |v: Option<i64>| v.map_or_else(|| "Unknown".to_string(), |n| n.to_string());

    println!("{}", "Shodan API Information:".blue());
    println!("  {} {}", field("Plan"), info.plan.as_deref().unwrap_or("Unknown"));
    println!("  {} {}", field("Query credits"), info.query_credits);
    println!("  {} {}", field("Scan credits"), info.scan_credits);
    println!("  {} {}", field("Monitored IPs"), or_unknown(info.monitored_ips));

    if let Some(limits) = &info.usage_limits {
        println!("{}", "Usage limits:".blue());
        println!("  {} {}", field("Query credits"), or_unknown(limits.query_credits));
        println!("  {} {}", field("Scan credits"), or_unknown(limits.scan_credits));
        println!("  {} {}", field("Monitored IPs"), or_unknown(limits.monitored_ips));
    }
}
