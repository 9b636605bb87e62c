//! Replay of recorded snapshots from a JSON-lines file.
//!
//! Each non-empty line holds one snapshot in the upstream shape:
//! `{"stock":"ABC","top_ask":{"price":121.2,"size":36},"top_bid":null,"timestamp":"2019-02-01 09:13:27.211035"}`.

use graph_common::{Batch, GraphError, QuoteSnapshot, Result};
use std::io::BufRead;

/// Parse all snapshots from `reader`, reporting the line number of a bad record.
pub fn read_snapshots<R: BufRead>(reader: R) -> Result<Vec<QuoteSnapshot>> {
    let mut snapshots = Vec::new();

    for (index, line_result) in reader.lines().enumerate() {
        let line = line_result?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let snapshot = serde_json::from_str::<QuoteSnapshot>(trimmed)
            .map_err(|e| GraphError::Format(format!("line {}: {}", index + 1, e)))?;
        snapshots.push(snapshot);
    }
    Ok(snapshots)
}

/// Split `snapshots` into batches of at most `batch_size`, each with its own identity.
pub fn into_batches(snapshots: Vec<QuoteSnapshot>, batch_size: usize) -> Vec<Batch> {
    let size = batch_size.max(1);
    snapshots.chunks(size).map(|chunk| Batch::new(chunk.to_vec())).collect()
}
