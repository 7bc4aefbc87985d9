//! Command line argument parsing for the sift CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

/// sift - a small full-text search core
#[derive(Parser, Debug, Clone)]
#[command(name = "sift")]
#[command(about = "Build, query and inspect small full-text search indexes")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct SiftArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl SiftArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1,
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Build an index snapshot from a JSONL document file
    Index(IndexArgs),

    /// Search an index snapshot
    Search(SearchArgs),

    /// Show index statistics
    Stats(StatsArgs),
}

/// Arguments for building an index
#[derive(Parser, Debug, Clone)]
pub struct IndexArgs {
    /// JSONL file, one `{"id": .., "fields": {..}}` object per line
    #[arg(value_name = "DOCUMENTS")]
    pub documents: PathBuf,

    /// Where to write the snapshot
    #[arg(value_name = "SNAPSHOT")]
    pub snapshot: PathBuf,

    /// Index configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Searchable field, optionally weighted: `title=3` (repeatable)
    #[arg(long = "field", value_name = "NAME[=WEIGHT]")]
    pub fields: Vec<String>,

    /// Positions skipped between field values
    #[arg(long)]
    pub position_gap: Option<u32>,

    /// Remove English stop words
    #[arg(long)]
    pub stop_words: bool,

    /// Index and search Porter stems instead of surface words
    #[arg(long)]
    pub stemming: bool,

    /// Documents analyzed per batch
    #[arg(short, long, default_value = "1000")]
    pub batch_size: usize,
}

/// Arguments for searching
#[derive(Parser, Debug, Clone)]
pub struct SearchArgs {
    /// Snapshot to search
    #[arg(value_name = "SNAPSHOT")]
    pub snapshot: PathBuf,

    /// Query string; words and "quoted phrases"
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Page number, starting at 1
    #[arg(short, long, default_value = "1")]
    pub page: usize,

    /// Results per page
    #[arg(short = 'n', long, default_value = "10")]
    pub page_size: usize,

    /// Stop ranking after this many results
    #[arg(long)]
    pub max_results: Option<usize>,

    /// Phrase bonus multiplier (must be > 1)
    #[arg(long)]
    pub phrase_boost: Option<f32>,

    /// Bonus per matched clause
    #[arg(long)]
    pub clause_bonus: Option<f32>,

    /// Show what each query clause adds to every hit's score
    #[arg(long)]
    pub explain: bool,
}

/// Arguments for index statistics
#[derive(Parser, Debug, Clone)]
pub struct StatsArgs {
    /// Snapshot to inspect
    #[arg(value_name = "SNAPSHOT")]
    pub snapshot: PathBuf,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
