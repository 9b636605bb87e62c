//! Command-line arguments for the feed driver.
//!
//! This module defines the CLI interface using `clap`. See `main` for end-to-end usage.
use clap::Parser;
use graph_common::tickers::Ticker;
use std::path::PathBuf;

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Tickers to generate quotes for, comma separated.
    #[clap(
        long,
        value_enum,
        ignore_case = true,
        value_delimiter = ',',
        default_values_t = [Ticker::ABC, Ticker::DEF]
    )]
    pub tickers: Vec<Ticker>,

    /// Path to a text file with tickers; replaces `--tickers`.
    /// Tickers may be separated by commas, spaces, or new lines.
    #[clap(long)]
    pub tickers_file: Option<PathBuf>,

    /// Replay snapshots from a JSON-lines file instead of generating them.
    #[clap(long, conflicts_with = "tickers_file")]
    pub replay: Option<PathBuf>,

    /// Snapshots per batch when replaying.
    #[clap(long, default_value_t = 4)]
    pub replay_batch_size: usize,

    /// Number of deliveries before exiting; 0 runs until Ctrl+C.
    #[clap(long, default_value_t = 20)]
    pub batches: usize,

    /// Delay between deliveries, in milliseconds.
    #[clap(long, default_value_t = 500)]
    pub interval_ms: u64,

    /// Re-deliver the previous batch reference every n-th tick; 0 disables.
    #[clap(long, default_value_t = 5)]
    pub repeat_every: usize,

    /// JSON file overriding the chart view settings.
    #[clap(long)]
    pub view_config: Option<PathBuf>,

    /// Run as if the visualization engine were missing.
    #[clap(long)]
    pub no_engine: bool,
}
