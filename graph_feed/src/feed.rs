//! Background delivery of batches to the host thread.
//!
//! `spawn_feed` runs a thread that pulls batches from a source iterator and pushes them
//! over a `crossbeam_channel`, one per interval. The host thread owns the adapter and
//! consumes the events in order, so updates never overlap.
//!
//! Event model:
//! - `FeedEvent::Batch(Batch)` — next delivery; may repeat an earlier reference.
//! - `FeedEvent::Shutdown` — source exhausted or Ctrl+C observed.
//!
//! `with_repeats` wraps any source so that the previous reference is delivered again on
//! a fixed schedule, for generated and replayed data alike.

use crossbeam_channel::{Receiver, unbounded};
use graph_common::Batch;
use log::{debug, info};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

/// Message sent by the feed thread to the host.
#[derive(Debug, Clone)]
pub enum FeedEvent {
    /// Next batch delivery.
    Batch(Batch),
    /// No more deliveries.
    Shutdown,
}

/// Source of batches handed to the feed thread.
pub type BatchSource = Box<dyn Iterator<Item = Batch> + Send>;

/// Re-deliver the previous batch every `every`-th tick; 0 returns `source` unchanged.
///
/// A repeat does not consume from `source`, so every source batch is still delivered.
/// Two repeats never follow each other, so the source keeps advancing even with 1.
pub fn with_repeats(source: BatchSource, every: usize) -> BatchSource {
    if every == 0 {
        return source;
    }
    Box::new(Repeating {
        source,
        every,
        tick: 0,
        last: None,
        repeated: false,
    })
}

struct Repeating {
    source: BatchSource,
    every: usize,
    tick: usize,
    last: Option<Batch>,
    repeated: bool,
}

impl Iterator for Repeating {
    type Item = Batch;

    fn next(&mut self) -> Option<Batch> {
        self.tick += 1;
        let repeat = !self.repeated && self.tick % self.every == 0;
        let batch = match &self.last {
            Some(last) if repeat => last.clone(),
            _ => self.source.next()?,
        };
        self.repeated = repeat && self.last.is_some();
        self.last = Some(batch.clone());
        Some(batch)
    }
}

/// Start the feed thread and return the receiving end of its channel.
///
/// The thread stops after the source is exhausted, when `shutdown` is set, or when the
/// receiver is dropped. A `Shutdown` event is sent in the first two cases.
pub fn spawn_feed(
    source: BatchSource,
    interval: Duration,
    shutdown: Arc<AtomicBool>,
) -> Receiver<FeedEvent> {
    let (event_tx, event_rx) = unbounded::<FeedEvent>();

    thread::spawn(move || {
        info!("Feed started (Thread ID: {:?})", thread::current().id());
        let mut delivered = 0usize;

        for batch in source {
            if shutdown.load(Ordering::Relaxed) {
                break;
            }
            if event_tx.send(FeedEvent::Batch(batch)).is_err() {
                debug!("Host dropped the feed channel");
                return;
            }
            delivered += 1;
            thread::sleep(interval);
        }

        info!("Feed stopping after {} deliveries", delivered);
        let _ = event_tx.send(FeedEvent::Shutdown);
    });
    event_rx
}
