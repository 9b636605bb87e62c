//! Synthetic quote batches.
//!
//! `SyntheticBatches` is an endless iterator producing one snapshot per ticker per tick.
//! Prices follow a small random walk around the last mid price; the ask side is left
//! empty now and then to mimic a book with no resting ask. Every batch is a fresh
//! reference; re-deliveries are layered on by `feed::with_repeats`.

use chrono::Utc;
use graph_common::tickers::Ticker;
use graph_common::{Batch, QuoteSnapshot, TopOfBook};
use rand::Rng;
use std::collections::HashMap;

const INITIAL_PRICE: f64 = 100.0;
/// Probability that a snapshot has no ask.
const EMPTY_ASK_PROBABILITY: f64 = 0.1;

/// Calculate the next price using a small random walk around `current_price`.
///
/// The change is sampled uniformly from `[-1%, +1%]` and the result is clamped to a
/// minimum positive value.
pub fn next_price<R: Rng>(rng: &mut R, current_price: f64) -> f64 {
    let change: f64 = rng.random_range(-0.01..0.01);
    (current_price * (1.0 + change)).max(0.01)
}

/// Snapshot around `mid` with a random spread of at most 0.5% on each side.
pub fn snapshot_around<R: Rng>(rng: &mut R, ticker: Ticker, mid: f64) -> QuoteSnapshot {
    let half_spread = mid * rng.random_range(0.0001..0.005);
    let size = rng.random_range(1..200);
    let top_ask = (!rng.random_bool(EMPTY_ASK_PROBABILITY)).then(|| TopOfBook {
        price: mid + half_spread,
        size: Some(size),
    });

    QuoteSnapshot {
        stock: ticker.to_string(),
        top_ask,
        top_bid: Some(TopOfBook {
            price: mid - half_spread,
            size: Some(size),
        }),
        timestamp: Utc::now(),
    }
}

/// Endless source of generated batches.
pub struct SyntheticBatches {
    tickers: Vec<Ticker>,
    prices: HashMap<Ticker, f64>,
}

impl SyntheticBatches {
    /// Generator for `tickers`, all starting from the same price.
    pub fn new(tickers: Vec<Ticker>) -> Self {
        let prices = tickers.iter().map(|t| (*t, INITIAL_PRICE)).collect();
        Self { tickers, prices }
    }

    fn fresh_batch(&mut self) -> Batch {
        let mut rng = rand::rng();
        let mut snapshots = Vec::with_capacity(self.tickers.len());

        for ticker in &self.tickers {
            let current = self.prices.get(ticker).copied().unwrap_or(INITIAL_PRICE);
            let mid = next_price(&mut rng, current);
            self.prices.insert(*ticker, mid);
            snapshots.push(snapshot_around(&mut rng, *ticker, mid));
        }
        Batch::new(snapshots)
    }
}

impl Iterator for SyntheticBatches {
    type Item = Batch;

    fn next(&mut self) -> Option<Batch> {
        Some(self.fresh_batch())
    }
}
