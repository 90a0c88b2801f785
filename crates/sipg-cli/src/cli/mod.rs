//! CLI argument parsing and command dispatch.

pub mod args;
pub mod commands;

use anyhow::Result;
use args::{Cli, Commands};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::output::print_banner;

/// Run the CLI application.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    if cli.no_color {
        colored::control::set_override(false);
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }

    let Some(command) = cli.command else {
        print_banner();
        return Ok(());
    };

    let ctx = commands::Context {
        api_key: cli.api_key,
        config_path: cli.config,
        base_url: cli.base_url,
        timeout: cli.timeout,
        retries: cli.retries,
    };

    match command {
        Commands::Search(args) => commands::search::execute(&ctx, args).await,
        Commands::Configure(args) => commands::configure::execute(&ctx, args).await,
        Commands::Info(args) => commands::info::execute(&ctx, args).await,
        Commands::Clear => commands::clear::execute(&ctx),
        Commands::Examples => {
            commands::examples::execute();
            Ok(())
        }
    }
}

/// Logs go to stderr; `RUST_LOG` overrides the verbosity flag.
fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // A subscriber may already be installed when embedded; keep it.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
