//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Bike component usage tracker.
///
/// Replays recorded activities against time-ordered mounting rules to total
/// the distance and time each component has seen.
#[derive(Debug, Parser)]
#[command(name = "gear", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Rules file (JSON), overriding the configured path.
    #[arg(long, global = true)]
    pub rules: Option<PathBuf>,

    /// Activities file (JSON), overriding the configured path.
    #[arg(long, global = true)]
    pub activities: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show distance and time per component.
    Report {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show what is mounted where at a point in time.
    Mounted {
        /// When to look (ISO 8601 or e.g. "2 weeks ago"). Defaults to now.
        #[arg(long)]
        at: Option<String>,
    },
}
