//! `sipg clear` - Remove the stored API key.

use anyhow::Result;
use colored::Colorize;

use super::Context;

pub fn execute(ctx: &Context) -> Result<()> {
    let mut store = ctx.store()?;

    if store.clear()? {
        println!("{}", "✓ API key cleared successfully!".green());
    } else {
        println!("{}", "No API key was stored.".yellow());
    }

    Ok(())
}
