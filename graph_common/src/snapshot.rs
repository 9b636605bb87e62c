//! Upstream quote snapshots and the batches they arrive in.
//!
//! A `QuoteSnapshot` is one observed top-of-book quote for a stock. Snapshots are
//! delivered in a `Batch`, a shared reference whose identity (not its contents) tells
//! the adapter whether anything changed since the previous delivery. Producers must
//! build a new `Batch` whenever the data changes; handing the same `Batch` (or a clone
//! of it) again means "nothing new".

use std::sync::Arc;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::GraphError;

/// Best resting order on one side of the book.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TopOfBook {
    /// Order price.
    pub price: f64,
    /// Order size, when the upstream reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
}

impl TopOfBook {
    /// Top-of-book entry without size information.
    pub fn at(price: f64) -> Self {
        Self { price, size: None }
    }
}

/// One observed market quote for a stock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteSnapshot {
    /// Stock identifier.
    pub stock: String,
    /// Best ask, or `None` when nothing rests on the ask side.
    #[serde(default)]
    pub top_ask: Option<TopOfBook>,
    /// Best bid, or `None` when nothing rests on the bid side.
    #[serde(default)]
    pub top_bid: Option<TopOfBook>,
    /// Time the quote was observed.
    #[serde(with = "timestamp")]
    pub timestamp: DateTime<Utc>,
}

/// Parse a quote timestamp.
///
/// Accepts RFC 3339 (`2019-02-01T09:13:27.211035Z`) and the naive
/// `2019-02-01 09:13:27.211035` form, which is taken as UTC.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, GraphError> {
    let trimmed = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|e| GraphError::Format(format!("invalid timestamp `{trimmed}`: {e}")))
}

mod timestamp {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&ts.to_rfc3339())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_timestamp(&raw).map_err(serde::de::Error::custom)
    }
}

/// Ordered, immutable sequence of snapshots compared by identity.
#[derive(Debug, Clone)]
pub struct Batch(Arc<[QuoteSnapshot]>);

impl Batch {
    /// Wrap `snapshots` in a fresh batch with its own identity.
    pub fn new(snapshots: Vec<QuoteSnapshot>) -> Self {
        Self(snapshots.into())
    }

    /// `true` when both handles refer to the same delivery. Contents are never compared.
    pub fn same(a: &Batch, b: &Batch) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }

    /// Snapshots in delivery order.
    pub fn snapshots(&self) -> &[QuoteSnapshot] {
        &self.0
    }

    /// Number of snapshots in the batch.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `true` when the batch holds no snapshots.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
