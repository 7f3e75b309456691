use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tonarchiv")]
#[command(author, version, about = "Convert a classical WAV archive to tagged FLAC files")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert every WAV file below INPUT into tagged FLAC files below OUTPUT
    Convert {
        /// Input directory
        #[arg(required = true)]
        input: PathBuf,

        /// Output directory
        #[arg(required = true)]
        output: PathBuf,

        /// Parallel conversions (0 = number of CPUs)
        #[arg(short, long)]
        workers: Option<usize>,

        /// Show what would be done without writing anything
        #[arg(long)]
        dry_run: bool,

        /// Skip files whose FLAC output already exists
        #[arg(long)]
        skip_existing: bool,

        /// Write directly into OUTPUT instead of a timestamped folder
        #[arg(long)]
        no_timestamp: bool,
    },

    /// Show the metadata inferred for every WAV file below INPUT
    Inspect {
        /// Input directory
        #[arg(required = true)]
        input: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check that required external tools are available
    CheckTools,

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,
}
