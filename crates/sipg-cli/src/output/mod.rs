//! Result sinks: console rendering, file persistence and progress display.

mod persist;
mod progress;
mod render;

pub use persist::FileSink;
pub use progress::Progress;
pub use render::ConsoleSink;

use anyhow::Result;
use colored::Colorize;
use sipg::Hit;

/// How much of each hit a sink shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Projection {
    /// `https://<ip>` only
    #[default]
    IpOnly,
    /// Port, organization, location, hostnames and more
    Detailed,
}

/// Consumer of the walker's hits.
///
/// Sinks are independent; the search command feeds every hit to each one.
pub trait Sink {
    /// Handle one hit as soon as it is yielded.
    fn accept(&mut self, hit: &Hit) -> Result<()>;

    /// Called once after the last hit.
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

const BANNER: [&str; 9] = [
    r"  ______           _______  _______         ______     ",
    r" /      \         /      / /       \       /      \    ",
    r"/$$$$$$$ |        $$$$$$/ $$$$$$$  |      /$$$$$$  |   ",
    r"$$ \__$$/           $$ | $$ |__$$ |      $$ | _$$/    ",
    r"$$      \           $$ |  $$    $$/       $$ |/    |   ",
    r" $$$$$$  |          $$ |  $$$$$$$/        $$ |$$$$ |   ",
    r"/  \__$$ |__       _$$ |_ $$ |            $$ \__$$ |__ ",
    r"$$    $$//  |     / $$   |$$ |            $$    $$//  |",
    r" $$$$$$/ $$/      $$$$$$/ $$/              $$$$$$/ $$/ ",
];

/// Print the banner shown when no command is given.
pub fn print_banner() {
    for line in BANNER {
        println!("{}", line.red());
    }
    println!("{}", format!("\t\tsipg v{}", env!("CARGO_PKG_VERSION")).yellow());
    println!();
    println!("{}", "Use 'sipg --help' to see available commands.".blue());
}
