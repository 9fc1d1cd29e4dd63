use anyhow::Result;
use clap::Parser;

use panelflow::cli::{Cli, Commands};
use panelflow::commands::{detect, inspect};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    match &cli.command {
        Commands::Detect(args) => detect(&cli, args),
        Commands::Inspect(args) => inspect(&cli, args),
    }
}
