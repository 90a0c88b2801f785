//! `sipg search` - Walk every page of a query and collect IPv4 hosts.

use anyhow::Result;
use colored::Colorize;
use futures_util::TryStreamExt;
use sipg::WalkRequest;
use std::pin::pin;
use tracing::{debug, info};

use super::Context;
use crate::cli::args::SearchArgs;
use crate::output::{ConsoleSink, FileSink, Progress, Projection, Sink};

/// How the hit loop ended without an error.
enum Outcome {
    Completed,
    Interrupted,
}

pub async fn execute(ctx: &Context, args: SearchArgs) -> Result<()> {
    let walker = ctx.walker()?;
    let request = walk_request(&args);

    let projection = if args.details || args.table {
        Projection::Detailed
    } else {
        Projection::IpOnly
    };

    let mut sinks: Vec<Box<dyn Sink>> = Vec::new();
    if args.table {
        sinks.push(Box::new(ConsoleSink::table()));
    } else {
        sinks.push(Box::new(ConsoleSink::lines(projection)));
    }
    if let Some(path) = &args.output {
        sinks.push(Box::new(FileSink::create(path, projection)?));
    }

    info!(query = %args.query, ?projection, "starting search");

    let progress = Progress::start(&args.query);
    let hits = walker.stream_with(&request, progress.clone())?;

    let mut found = 0u64;
    let outcome = {
        let mut hits = pin!(hits);
        let mut interrupt = pin!(tokio::signal::ctrl_c());

        loop {
            tokio::select! {
                next = hits.try_next() => match next {
                    Ok(Some(hit)) => {
                        let delivered = progress.suspend(|| {
                            sinks.iter_mut().try_for_each(|sink| sink.accept(&hit))
                        });
                        if let Err(err) = delivered {
                            break Err(err);
                        }
                        found += 1;
                    }
                    Ok(None) => break Ok(Outcome::Completed),
                    Err(err) => break Err(err.into()),
                },
                Ok(()) = &mut interrupt => break Ok(Outcome::Interrupted),
            }
        }
    };

    progress.finish();

    // Whatever was yielded before a failure or interrupt is kept.
    for sink in &mut sinks {
        sink.finish()?;
    }

    match outcome? {
        Outcome::Completed => {
            if let Some(path) = &args.output {
                println!("{}", format!("Results saved to {}", path.display()).green());
            }
            println!();
            println!("{}", format!("Search completed! Found {found} results.").green());
        }
        Outcome::Interrupted => {
            debug!(found, "search interrupted");
            println!();
            println!("{}", "Search interrupted by user.".yellow());
        }
    }

    Ok(())
}

fn walk_request(args: &SearchArgs) -> WalkRequest {
    let mut request = WalkRequest::new(args.query.as_str())
        .delay(args.delay)
        .start_page(args.start_page);
    if let Some(max) = args.max_results {
        request = request.max_results(max);
    }
    if let Some(end) = args.end_page {
        request = request.end_page(end);
    }
    request
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::args::{Cli, Commands};
    use clap::Parser;
    use std::time::Duration;

    fn search_args(argv: &[&str]) -> SearchArgs {
        let cli = Cli::try_parse_from(argv).unwrap();
        match cli.command {
            Some(Commands::Search(args)) => args,
            other => panic!("expected search, got {other:?}"),
        }
    }

    #[test]
    fn test_walk_request_defaults() {
        let request = walk_request(&search_args(&["sipg", "search", "port:22"]));
        let bounds = request.bounds();
        assert_eq!(request.query(), "port:22");
        assert_eq!(bounds.start_page, 1);
        assert_eq!(bounds.end_page, None);
        assert_eq!(bounds.max_results, None);
        assert_eq!(bounds.page_size, 100);
    }

    #[test]
    fn test_walk_request_carries_bounds() {
        let request = walk_request(&search_args(&[
            "sipg", "search", "port:22", "-m", "120", "--start-page", "0", "--end-page", "4",
            "-d", "0",
        ]));
        let bounds = request.bounds();
        assert_eq!(bounds.max_results, Some(120));
        assert_eq!(bounds.start_page, 0);
        assert_eq!(bounds.end_page, Some(4));
        assert_eq!(search_args(&["sipg", "search", "q", "-d", "0"]).delay, Duration::ZERO);
    }
}
