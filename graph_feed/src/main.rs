//! Feed driver: stands in for the host that owns the quote chart.
//!
//! It activates a `GraphAdapter` against the in-memory engine and then delivers batches
//! to it on the main thread, one at a time, exactly as a render loop would:
//!
//! - Synthetic mode (default) — `SyntheticBatches` generates one snapshot per ticker per
//!   tick.
//! - Replay mode (`--replay`) — snapshots are read from a JSON-lines file and delivered in
//!   chunks of `--replay-batch-size`.
//!
//! In both modes every `--repeat-every`-th delivery re-sends the previous batch reference,
//! which the adapter skips.
//!
//! Without `--view-config` the chart is the default quote chart (best ask averaged per
//! timestamp, one line per stock). A view file replaces those settings; the bundled
//! `demos/view.json` plots the bid with a `high` aggregate instead.
//!
//! Usage example (CLI):
//! ```bash
//! graph_feed --tickers ABC,DEF,AAPL --batches 50 --interval-ms 200
//! graph_feed --replay ./quotes.jsonl --view-config ./view.json
//! ```
#![warn(missing_docs)]
mod args;
mod feed;
mod replay;
mod synthetic;

use crate::args::Args;
use crate::feed::{BatchSource, FeedEvent, spawn_feed, with_repeats};
use crate::synthetic::SyntheticBatches;
use clap::Parser;
use graph_adapter::memory::{MemoryEngine, MemorySurface, MemoryTable};
use graph_adapter::{GraphAdapter, UpdateOutcome, ViewConfig};
use graph_common::tickers::{Ticker, TickerParser};
use graph_common::{GraphError, Result, Schema};
use log::{debug, error, info, warn};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Per-run counters reported on exit.
#[derive(Debug, Default)]
struct FeedStats {
    deliveries: usize,
    appended_rows: usize,
    unchanged: usize,
    skipped: usize,
    failed: usize,
}

fn main() -> Result<(), GraphError> {
    init_logger();
    let args = Args::parse();
    let shutdown = Arc::new(AtomicBool::new(false));
    {
        let shutdown = shutdown.clone();
        ctrlc::set_handler(move || {
            info!("Ctrl+C received. Stopping feed...");
            shutdown.store(true, Ordering::SeqCst);
        })
        .map_err(|e| GraphError::Format(format!("Error setting Ctrl+C handler: {}", e)))?;
    }

    let view = load_view(args.view_config.as_deref())?;
    let engine = if args.no_engine {
        warn!("--no-engine: running without a visualization engine");
        MemoryEngine::unavailable()
    } else {
        MemoryEngine::new()
    };
    let mut surface = MemorySurface::new();
    let mut adapter = GraphAdapter::activate(&engine, Some(&mut surface), &view)?;
    for (name, value) in surface.attributes() {
        debug!("Surface attribute {} = {}", name, value);
    }

    let source = batch_source(&args)?;
    let feed_rx = spawn_feed(source, Duration::from_millis(args.interval_ms), shutdown);

    let mut stats = FeedStats::default();
    for event in feed_rx.iter() {
        match event {
            FeedEvent::Batch(batch) => {
                stats.deliveries += 1;
                record(&mut stats, adapter.observe(batch));
            }
            FeedEvent::Shutdown => break,
        }
    }

    report(&stats, &adapter)
}

fn record(stats: &mut FeedStats, outcome: Result<UpdateOutcome>) {
    match outcome {
        Ok(UpdateOutcome::Appended(rows)) => {
            stats.appended_rows += rows;
            info!("Appended {} rows", rows);
        }
        Ok(UpdateOutcome::Unchanged) => {
            stats.unchanged += 1;
            debug!("Batch unchanged, nothing appended");
        }
        Ok(UpdateOutcome::Skipped) => stats.skipped += 1,
        Err(e) => {
            stats.failed += 1;
            error!("Table update failed: {}", e);
        }
    }
}

fn report(stats: &FeedStats, adapter: &GraphAdapter<MemoryTable>) -> Result<()> {
    info!(
        "Deliveries: {}, rows appended: {}, unchanged: {}, skipped: {}, failed: {}",
        stats.deliveries, stats.appended_rows, stats.unchanged, stats.skipped, stats.failed
    );
    match adapter.table() {
        Some(table) => info!(
            "Table holds {} rows after {} updates",
            table.size()?,
            table.update_calls()?
        ),
        None => warn!("No table was created; nothing was charted"),
    }
    Ok(())
}

fn load_view(path: Option<&Path>) -> Result<ViewConfig> {
    match path {
        Some(path) => {
            let file = File::open(path)?;
            let view = ViewConfig::from_json_reader(BufReader::new(file), &Schema::quote_rows())?;
            info!("View settings loaded from {}", path.display());
            Ok(view)
        }
        None => Ok(ViewConfig::default()),
    }
}

fn batch_source(args: &Args) -> Result<BatchSource> {
    let limit = if args.batches == 0 { usize::MAX } else { args.batches };
    let source = with_repeats(raw_source(args)?, args.repeat_every);
    Ok(Box::new(source.take(limit)))
}

fn raw_source(args: &Args) -> Result<BatchSource> {
    if let Some(path) = &args.replay {
        let file = File::open(path)?;
        let snapshots = replay::read_snapshots(BufReader::new(file))?;
        info!("Replaying {} snapshots from {}", snapshots.len(), path.display());
        let batches = replay::into_batches(snapshots, args.replay_batch_size);
        return Ok(Box::new(batches.into_iter()));
    }

    let tickers = match &args.tickers_file {
        Some(path) => Ticker::parse_from_file(BufReader::new(File::open(path)?))?,
        None => args.tickers.clone(),
    };
    if tickers.is_empty() {
        return Err(GraphError::Format("no tickers to generate quotes for".to_string()));
    }
    info!("Tickers: {:?}", tickers);
    Ok(Box::new(SyntheticBatches::new(tickers)))
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
