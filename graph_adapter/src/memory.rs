//! In-process visualization engine.
//!
//! Stores rows and records what the adapter asked of it; it neither pivots nor draws.
//! `MemoryTable` is a handle: clones share the same rows, so the surface and the adapter
//! see the same table.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use graph_common::{GraphError, Result, Schema, VisualizationRow};

use crate::engine::{Availability, RenderingSurface, Table, TableFactory};

/// Engine creating `MemoryTable`s, or refusing to when unavailable.
#[derive(Debug)]
pub struct MemoryEngine {
    available: bool,
    created: AtomicUsize,
}

impl MemoryEngine {
    /// Engine that creates tables.
    pub fn new() -> Self {
        Self {
            available: true,
            created: AtomicUsize::new(0),
        }
    }

    /// Engine whose backing store is missing.
    pub fn unavailable() -> Self {
        Self {
            available: false,
            created: AtomicUsize::new(0),
        }
    }

    /// Number of tables created so far.
    pub fn tables_created(&self) -> usize {
        self.created.load(Ordering::Relaxed)
    }
}

impl Default for MemoryEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TableFactory for MemoryEngine {
    type Table = MemoryTable;

    fn create(&self, schema: &Schema) -> Availability<MemoryTable> {
        if !self.available {
            return Availability::Unavailable;
        }
        self.created.fetch_add(1, Ordering::Relaxed);
        Availability::Ready(MemoryTable::new(schema.clone()))
    }
}

#[derive(Debug, Default)]
struct TableState {
    rows: Vec<VisualizationRow>,
    update_calls: usize,
    rejecting: Option<String>,
}

/// Shared handle to an in-memory table.
#[derive(Debug, Clone)]
pub struct MemoryTable {
    schema: Arc<Schema>,
    state: Arc<Mutex<TableState>>,
}

impl MemoryTable {
    /// Empty table with `schema`.
    pub fn new(schema: Schema) -> Self {
        Self {
            schema: Arc::new(schema),
            state: Arc::new(Mutex::new(TableState::default())),
        }
    }

    /// Schema the table was created with.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Copy of all rows, in append order.
    pub fn rows(&self) -> Result<Vec<VisualizationRow>> {
        Ok(self.state.lock()?.rows.clone())
    }

    /// Number of stored rows.
    pub fn size(&self) -> Result<usize> {
        Ok(self.state.lock()?.rows.len())
    }

    /// Number of `update` calls received, rejected ones included.
    pub fn update_calls(&self) -> Result<usize> {
        Ok(self.state.lock()?.update_calls)
    }

    /// Make every later `update` fail with `reason`.
    pub fn reject_updates(&self, reason: impl Into<String>) -> Result<()> {
        self.state.lock()?.rejecting = Some(reason.into());
        Ok(())
    }

    /// `true` when both handles refer to the same table.
    pub fn same_table(a: &MemoryTable, b: &MemoryTable) -> bool {
        Arc::ptr_eq(&a.state, &b.state)
    }
}

impl Table for MemoryTable {
    fn update(&mut self, rows: Vec<VisualizationRow>) -> Result<()> {
        let mut state = self.state.lock()?;
        state.update_calls += 1;
        if let Some(reason) = &state.rejecting {
            return Err(GraphError::Engine(reason.clone()));
        }
        state.rows.extend(rows);
        Ok(())
    }
}

/// Surface recording the bound table and its attributes.
#[derive(Debug, Default)]
pub struct MemorySurface {
    table: Option<MemoryTable>,
    loads: usize,
    attributes: BTreeMap<String, String>,
}

impl MemorySurface {
    /// Surface with nothing bound.
    pub fn new() -> Self {
        Self::default()
    }

    /// Table bound last, if any.
    pub fn table(&self) -> Option<&MemoryTable> {
        self.table.as_ref()
    }

    /// Number of `load` calls.
    pub fn load_count(&self) -> usize {
        self.loads
    }

    /// Current value of attribute `name`.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// All attributes, sorted by name.
    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }
}

impl RenderingSurface<MemoryTable> for MemorySurface {
    fn load(&mut self, table: &MemoryTable) {
        self.table = Some(table.clone());
        self.loads += 1;
    }

    fn set_attribute(&mut self, name: &str, value: &str) {
        self.attributes.insert(name.to_string(), value.to_string());
    }
}
