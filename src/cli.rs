use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Comic panel detection CLI
#[derive(Parser, Debug)]
#[command(name = "panelflow", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Detect panels across a directory or .cbz/.zip of page images
    Detect(DetectArgs),

    /// Print a human-readable summary of one page from a persisted book
    Inspect(InspectArgs),
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, ValueEnum)]
pub enum DirectionArg {
    Ltr,
    Rtl,
}

#[derive(Args, Debug)]
pub struct DetectArgs {
    /// Directory of page images, or a .cbz/.zip archive
    pub input: PathBuf,

    /// Where to write the persisted book (JSON)
    pub output: PathBuf,

    /// Reading direction
    #[arg(long, value_enum, default_value_t = DirectionArg::Ltr)]
    pub direction: DirectionArg,

    /// Optional pipeline config file (JSON)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Path to a persisted book (JSON)
    pub book: PathBuf,

    /// Page index to summarize
    pub page: usize,
}
