//! Projection of quote snapshots onto table rows.
//!
//! A missing side of the book is stored as a price of 0 rather than left out, so every
//! row carries both price columns. A NaN price is treated the same way.

use graph_common::{QuoteSnapshot, TopOfBook, VisualizationRow};

fn price_or_zero(side: Option<&TopOfBook>) -> f64 {
    match side {
        Some(top) if !top.price.is_nan() => top.price,
        _ => 0.0,
    }
}

/// Row for a single snapshot.
pub fn to_row(snapshot: &QuoteSnapshot) -> VisualizationRow {
    VisualizationRow {
        stock: snapshot.stock.clone(),
        top_ask_price: price_or_zero(snapshot.top_ask.as_ref()),
        top_bid_price: price_or_zero(snapshot.top_bid.as_ref()),
        timestamp: snapshot.timestamp,
    }
}

/// One row per snapshot, in input order.
pub fn to_rows(snapshots: &[QuoteSnapshot]) -> Vec<VisualizationRow> {
    snapshots.iter().map(to_row).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn quote(stock: &str, ask: Option<f64>, bid: Option<f64>) -> QuoteSnapshot {
        QuoteSnapshot {
            stock: stock.to_string(),
            top_ask: ask.map(TopOfBook::at),
            top_bid: bid.map(TopOfBook::at),
            timestamp: Utc.with_ymd_and_hms(2019, 2, 1, 9, 13, 27).unwrap(),
        }
    }

    #[test]
    fn present_prices_pass_through() {
        let row = to_row(&quote("AAPL", Some(100.5), Some(100.0)));
        assert_eq!(row.top_ask_price, 100.5);
        assert_eq!(row.top_bid_price, 100.0);
    }

    #[test]
    fn absent_sides_become_zero() {
        let row = to_row(&quote("MSFT", None, None));
        assert_eq!(row.top_ask_price, 0.0);
        assert_eq!(row.top_bid_price, 0.0);
    }

    #[test]
    fn nan_price_becomes_zero() {
        let row = to_row(&quote("ABC", Some(f64::NAN), Some(3.0)));
        assert_eq!(row.top_ask_price, 0.0);
        assert_eq!(row.top_bid_price, 3.0);
    }

    #[test]
    fn keeps_stock_and_timestamp() {
        let snapshot = quote("DEF", Some(1.0), None);
        let row = to_row(&snapshot);
        assert_eq!(row.stock, "DEF");
        assert_eq!(row.timestamp, snapshot.timestamp);
    }

    #[test]
    fn empty_batch_gives_no_rows() {
        assert!(to_rows(&[]).is_empty());
    }
}
