//!
//! Stream adapter feeding quote snapshots into a live visualization table.
//!
//! The engine that stores, pivots and draws the data is reached only through the
//! ports in `engine`; this crate owns the glue around it:
//! - `engine` — table factory, table and rendering-surface traits.
//! - `view` — chart, pivot and aggregate settings applied to the surface.
//! - `transform` — snapshot to row projection with null-to-zero prices.
//! - `adapter` — `GraphAdapter`, the activate-once / update-on-change lifecycle.
//! - `memory` — in-process engine used by tests and the feed driver.
#![warn(missing_docs)]
pub mod adapter;
pub mod engine;
pub mod memory;
pub mod transform;
pub mod view;

pub use adapter::{GraphAdapter, UpdateOutcome};
pub use engine::{Availability, RenderingSurface, Table, TableFactory};
pub use view::{Aggregate, Aggregates, ChartView, ViewConfig};
