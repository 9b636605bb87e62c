//! Activation and incremental update of the visualization table.
//!
//! `GraphAdapter::activate` is the only way to obtain an adapter, so the table it owns
//! is created exactly once per adapter. Afterwards the host calls `update` (or
//! `observe`) on every delivery; a delivery whose `Batch` is the same reference as the
//! previous one is ignored without looking at its contents.
//!
//! Missing infrastructure never fails: without an engine the adapter holds no table
//! and every update is skipped; without a surface the table is filled but never shown.
//! Both cases are logged.

use graph_common::{Batch, Result, Schema};
use log::{debug, info, warn};

use crate::engine::{Availability, RenderingSurface, Table, TableFactory};
use crate::transform::to_rows;
use crate::view::ViewConfig;

/// What a single update did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// Same batch reference as before; nothing done.
    Unchanged,
    /// New batch, but no table exists; nothing appended.
    Skipped,
    /// New batch appended with this many rows.
    Appended(usize),
}

/// Owns the visualization table and feeds it.
#[derive(Debug)]
pub struct GraphAdapter<T> {
    table: Option<T>,
    last_seen: Option<Batch>,
}

impl<T: Table> GraphAdapter<T> {
    /// Create the table from the quote schema and bind it to `surface` with `view`.
    ///
    /// Returns an error only when `view` names a column the schema lacks or cannot be
    /// encoded. An unavailable engine or an absent surface is logged and tolerated.
    pub fn activate<F, S>(
        factory: &F,
        surface: Option<&mut S>,
        view: &ViewConfig,
    ) -> Result<Self>
    where
        F: TableFactory<Table = T>,
        S: RenderingSurface<T>,
    {
        let schema = Schema::quote_rows();
        view.validate(&schema)?;
        let attributes = view.attributes()?;

        let table = match factory.create(&schema) {
            Availability::Ready(table) => table,
            Availability::Unavailable => {
                warn!("Visualization engine unavailable: no table, updates will be ignored");
                return Ok(Self::detached());
            }
        };

        match surface {
            Some(surface) => {
                surface.load(&table);
                for (name, value) in &attributes {
                    surface.set_attribute(name, value);
                }
                info!("Table bound to rendering surface with view {}", view.view);
            }
            None => warn!("No rendering surface: table created but nothing will be displayed"),
        }

        Ok(Self {
            table: Some(table),
            last_seen: None,
        })
    }

    /// Adapter without a table; every update is skipped.
    pub fn detached() -> Self {
        Self {
            table: None,
            last_seen: None,
        }
    }

    /// `true` when a table was created.
    pub fn is_active(&self) -> bool {
        self.table.is_some()
    }

    /// The owned table, if any.
    pub fn table(&self) -> Option<&T> {
        self.table.as_ref()
    }

    /// Append `current` unless it is the same reference as `previous`.
    ///
    /// Identity is the whole change check: callers must pass a new `Batch` whenever the
    /// data changed. Engine errors are returned as-is.
    pub fn update(&mut self, previous: &Batch, current: &Batch) -> Result<UpdateOutcome> {
        if Batch::same(previous, current) {
            return Ok(UpdateOutcome::Unchanged);
        }
        self.append(current)
    }

    /// Feed the next delivery, comparing it with the one observed before.
    ///
    /// The first delivery always counts as new. `current` is remembered even when the
    /// engine rejects it.
    pub fn observe(&mut self, current: Batch) -> Result<UpdateOutcome> {
        let outcome = match self.last_seen.take() {
            Some(previous) => self.update(&previous, &current),
            None => self.append(&current),
        };
        self.last_seen = Some(current);
        outcome
    }

    fn append(&mut self, batch: &Batch) -> Result<UpdateOutcome> {
        let Some(table) = self.table.as_mut() else {
            debug!("No table: dropping batch of {} snapshots", batch.len());
            return Ok(UpdateOutcome::Skipped);
        };

        let rows = to_rows(batch.snapshots());
        let count = rows.len();
        table.update(rows)?;
        debug!("Appended {} rows", count);
        Ok(UpdateOutcome::Appended(count))
    }
}
