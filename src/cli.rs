//! Command-line interface for syllex
//!
//! Provides argument parsing using clap derive macros.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Syllable-level corpus enrichment and measurement export
#[derive(Parser, Debug)]
#[command(
    name = "syllex",
    version,
    about = "Syllable-level corpus enrichment and measurement export"
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Suppress output (quiet mode)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose output (-v: per-phase detail, -vv: per-discourse detail)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Corpus root directory of TextGrid/WAV pairs
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Corpus name
    #[arg(long, value_name = "NAME")]
    pub name: Option<String>,

    /// Speaker demographics CSV
    #[arg(long, value_name = "FILE")]
    pub speakers: Option<PathBuf>,

    /// Output CSV path
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the full pipeline: import, enrich, analyze, export
    Run,

    /// Import TextGrid annotations into a fresh corpus store
    Import,

    /// Run the enrichment passes on an imported corpus
    Enrich {
        /// Minimum pause length splitting utterances, in seconds
        #[arg(long, value_name = "SECONDS")]
        min_pause: Option<f64>,
    },

    /// Measure intensity and formants from the paired audio
    Analyze {
        /// Skip formant measurement
        #[arg(long)]
        no_formants: bool,
    },

    /// Export the disyllabic-word measurement CSV
    Export,

    /// Print a summary of the corpus store
    Inspect,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}
