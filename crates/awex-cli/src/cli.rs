//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// ActivityWatch data exporter.
///
/// Fetches recent events from a locally running aw-server and writes
/// them to a JSON file for manual hand-off to a downstream consumer.
#[derive(Debug, Parser)]
#[command(name = "awex", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Fetch recent events and write the export document.
    Export {
        /// Bucket selection and grouping policy.
        #[arg(long, value_enum, default_value_t = Policy::Narrow)]
        policy: Policy,

        /// Where to write the document (overrides the policy default).
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// List the buckets known to the daemon.
    Buckets,
}

/// Which of the two export policies to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Policy {
    /// Single window-watcher bucket, last 12 hours, keyed by bucket id.
    Narrow,
    /// All window/afk/browser buckets since midnight, grouped by the
    /// app-name heuristic.
    Broad,
}
