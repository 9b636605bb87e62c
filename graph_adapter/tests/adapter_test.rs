//! Lifecycle tests for `GraphAdapter` against the in-memory engine.

use chrono::{DateTime, TimeZone, Utc};
use graph_adapter::memory::{MemoryEngine, MemorySurface, MemoryTable};
use graph_adapter::view::{AGGREGATES, COLUMN_PIVOTS, COLUMNS, ROW_PIVOTS, VIEW};
use graph_adapter::{GraphAdapter, UpdateOutcome, ViewConfig};
use graph_common::{Batch, GraphError, QuoteSnapshot, TopOfBook, VisualizationRow};

fn at(second: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2019, 2, 1, 9, 13, second).unwrap()
}

fn quote(stock: &str, ask: Option<f64>, bid: Option<f64>, second: u32) -> QuoteSnapshot {
    QuoteSnapshot {
        stock: stock.to_string(),
        top_ask: ask.map(TopOfBook::at),
        top_bid: bid.map(TopOfBook::at),
        timestamp: at(second),
    }
}

fn activated() -> (GraphAdapter<MemoryTable>, MemorySurface) {
    let engine = MemoryEngine::new();
    let mut surface = MemorySurface::new();
    let adapter =
        GraphAdapter::activate(&engine, Some(&mut surface), &ViewConfig::default()).unwrap();
    (adapter, surface)
}

fn stored_rows(adapter: &GraphAdapter<MemoryTable>) -> Vec<VisualizationRow> {
    adapter.table().unwrap().rows().unwrap()
}

#[test]
fn activation_binds_table_and_configures_view() {
    let engine = MemoryEngine::new();
    let mut surface = MemorySurface::new();
    let adapter =
        GraphAdapter::activate(&engine, Some(&mut surface), &ViewConfig::default()).unwrap();

    assert!(adapter.is_active());
    assert_eq!(engine.tables_created(), 1);
    assert_eq!(surface.load_count(), 1);
    assert!(MemoryTable::same_table(surface.table().unwrap(), adapter.table().unwrap()));

    assert_eq!(surface.attribute(VIEW), Some("y_line"));
    assert_eq!(surface.attribute(COLUMN_PIVOTS), Some(r#"["stock"]"#));
    assert_eq!(surface.attribute(ROW_PIVOTS), Some(r#"["timestamp"]"#));
    assert_eq!(surface.attribute(COLUMNS), Some(r#"["top_ask_price"]"#));
    assert_eq!(
        surface.attribute(AGGREGATES),
        Some(r#"{"stock":"distinct count","top_ask_price":"avg","top_bid_price":"avg","timestamp":"distinct count"}"#)
    );
}

#[test]
fn scenario_a_both_sides_present() {
    let (mut adapter, _surface) = activated();
    let previous = Batch::new(Vec::new());
    let current = Batch::new(vec![quote("AAPL", Some(100.5), Some(100.0), 1)]);

    let outcome = adapter.update(&previous, &current).unwrap();

    assert_eq!(outcome, UpdateOutcome::Appended(1));
    assert_eq!(
        stored_rows(&adapter),
        vec![VisualizationRow {
            stock: "AAPL".to_string(),
            top_ask_price: 100.5,
            top_bid_price: 100.0,
            timestamp: at(1),
        }]
    );
}

#[test]
fn scenario_b_missing_ask_is_zero() {
    let (mut adapter, _surface) = activated();
    let previous = Batch::new(Vec::new());
    let current = Batch::new(vec![quote("MSFT", None, Some(50.0), 2)]);

    adapter.update(&previous, &current).unwrap();

    assert_eq!(
        stored_rows(&adapter),
        vec![VisualizationRow {
            stock: "MSFT".to_string(),
            top_ask_price: 0.0,
            top_bid_price: 50.0,
            timestamp: at(2),
        }]
    );
}

#[test]
fn scenario_c_no_table_is_a_silent_skip() {
    let engine = MemoryEngine::unavailable();
    let mut surface = MemorySurface::new();
    let mut adapter =
        GraphAdapter::activate(&engine, Some(&mut surface), &ViewConfig::default()).unwrap();

    assert!(!adapter.is_active());
    assert_eq!(surface.load_count(), 0);
    assert!(surface.attributes().is_empty());

    let previous = Batch::new(Vec::new());
    let current = Batch::new(vec![quote("ABC", Some(1.0), Some(0.9), 3)]);
    assert_eq!(adapter.update(&previous, &current).unwrap(), UpdateOutcome::Skipped);
}

#[test]
fn scenario_d_same_reference_appends_once() {
    let (mut adapter, _surface) = activated();
    let initial = Batch::new(Vec::new());
    let current = Batch::new(vec![quote("ABC", Some(1.0), Some(0.9), 4)]);

    assert_eq!(adapter.update(&initial, &current).unwrap(), UpdateOutcome::Appended(1));
    assert_eq!(adapter.update(&current, &current).unwrap(), UpdateOutcome::Unchanged);

    let table = adapter.table().unwrap();
    assert_eq!(table.update_calls().unwrap(), 1);
    assert_eq!(table.size().unwrap(), 1);
}

#[test]
fn equal_contents_in_a_new_batch_are_appended_again() {
    let (mut adapter, _surface) = activated();
    let first = Batch::new(vec![quote("ABC", Some(1.0), None, 5)]);
    let second = Batch::new(vec![quote("ABC", Some(1.0), None, 5)]);

    adapter.observe(first).unwrap();
    assert_eq!(adapter.observe(second).unwrap(), UpdateOutcome::Appended(1));
    assert_eq!(adapter.table().unwrap().size().unwrap(), 2);
}

#[test]
fn batch_order_is_preserved_across_updates() {
    let (mut adapter, _surface) = activated();
    let first = Batch::new(vec![
        quote("ABC", Some(3.0), Some(2.0), 1),
        quote("DEF", Some(5.0), None, 1),
        quote("ABC", Some(3.5), Some(2.5), 2),
    ]);
    let second = Batch::new(vec![quote("DEF", None, Some(4.0), 3)]);

    adapter.observe(first).unwrap();
    adapter.observe(second).unwrap();

    let stocks: Vec<(String, f64, f64)> = stored_rows(&adapter)
        .into_iter()
        .map(|row| (row.stock, row.top_ask_price, row.top_bid_price))
        .collect();
    assert_eq!(
        stocks,
        vec![
            ("ABC".to_string(), 3.0, 2.0),
            ("DEF".to_string(), 5.0, 0.0),
            ("ABC".to_string(), 3.5, 2.5),
            ("DEF".to_string(), 0.0, 4.0),
        ]
    );
    assert_eq!(adapter.table().unwrap().update_calls().unwrap(), 2);
}

#[test]
fn observe_ignores_a_repeated_reference() {
    let (mut adapter, _surface) = activated();
    let batch = Batch::new(vec![quote("ABC", Some(1.0), Some(0.5), 6)]);

    assert_eq!(adapter.observe(batch.clone()).unwrap(), UpdateOutcome::Appended(1));
    assert_eq!(adapter.observe(batch.clone()).unwrap(), UpdateOutcome::Unchanged);
    assert_eq!(adapter.observe(batch).unwrap(), UpdateOutcome::Unchanged);
    assert_eq!(adapter.table().unwrap().update_calls().unwrap(), 1);
}

#[test]
fn missing_surface_still_fills_the_table() {
    let engine = MemoryEngine::new();
    let mut adapter =
        GraphAdapter::activate::<_, MemorySurface>(&engine, None, &ViewConfig::default()).unwrap();

    assert!(adapter.is_active());
    adapter
        .observe(Batch::new(vec![quote("ABC", Some(1.0), Some(0.5), 7)]))
        .unwrap();
    assert_eq!(adapter.table().unwrap().size().unwrap(), 1);
}

#[test]
fn each_activation_owns_its_own_table() {
    let engine = MemoryEngine::new();
    let mut surface = MemorySurface::new();
    let first =
        GraphAdapter::activate(&engine, Some(&mut surface), &ViewConfig::default()).unwrap();
    let second =
        GraphAdapter::activate(&engine, Some(&mut surface), &ViewConfig::default()).unwrap();

    assert_eq!(engine.tables_created(), 2);
    assert_eq!(surface.load_count(), 2);
    assert!(!MemoryTable::same_table(first.table().unwrap(), second.table().unwrap()));
    assert!(MemoryTable::same_table(surface.table().unwrap(), second.table().unwrap()));
}

#[test]
fn engine_errors_propagate_untranslated() {
    let (mut adapter, _surface) = activated();
    adapter.table().unwrap().reject_updates("schema mismatch").unwrap();

    let err = adapter
        .observe(Batch::new(vec![quote("ABC", Some(1.0), None, 8)]))
        .unwrap_err();
    assert!(matches!(err, GraphError::Engine(ref reason) if reason == "schema mismatch"));
}

#[test]
fn invalid_view_fails_activation_before_creating_a_table() {
    let engine = MemoryEngine::new();
    let view = ViewConfig {
        columns: vec!["volume".to_string()],
        ..ViewConfig::default()
    };

    let result = GraphAdapter::activate::<_, MemorySurface>(&engine, None, &view);

    assert!(matches!(result, Err(GraphError::UnknownColumn { .. })));
    assert_eq!(engine.tables_created(), 0);
}

#[test]
fn empty_batch_is_forwarded_as_an_empty_append() {
    let (mut adapter, _surface) = activated();
    assert_eq!(
        adapter.observe(Batch::new(Vec::new())).unwrap(),
        UpdateOutcome::Appended(0)
    );
    assert_eq!(adapter.table().unwrap().update_calls().unwrap(), 1);
}
