//! Ports to the visualization engine.
//!
//! The adapter never looks anything up from ambient state: the table factory and the
//! rendering surface are handed to it. An engine that cannot create tables (no worker,
//! no backing store) answers `Availability::Unavailable` instead of failing.

use graph_common::{Result, Schema, VisualizationRow};

/// Outcome of asking the engine for a new table.
#[derive(Debug)]
pub enum Availability<T> {
    /// The engine created the table.
    Ready(T),
    /// The engine's backing store is not available in this environment.
    Unavailable,
}

/// Append-only, schema-typed store managed by the engine.
pub trait Table {
    /// Append `rows` in order. The engine re-aggregates and redraws on its own schedule.
    ///
    /// Errors are the engine's and are returned untranslated.
    fn update(&mut self, rows: Vec<VisualizationRow>) -> Result<()>;
}

/// Creates tables from a schema.
pub trait TableFactory {
    /// Table handle produced by this engine.
    type Table: Table;

    /// Create an empty table with `schema`.
    fn create(&self, schema: &Schema) -> Availability<Self::Table>;
}

/// Widget displaying a table as a pivoted chart.
pub trait RenderingSurface<T> {
    /// Bind `table` to the surface.
    fn load(&mut self, table: &T);

    /// Set a string-encoded view attribute.
    fn set_attribute(&mut self, name: &str, value: &str);
}
