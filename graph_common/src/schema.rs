//! Column schema of the visualization table and the rows it accepts.
//!
//! The table is created from a `Schema` exactly once; the schema cannot change for
//! the lifetime of that table. `VisualizationRow` is the typed row matching
//! `Schema::quote_rows()`.

use chrono::{DateTime, Utc};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde::Deserialize;
use strum_macros::{Display, EnumString};

use crate::Result;

/// Stock identifier column.
pub const STOCK: &str = "stock";
/// Best ask price column.
pub const TOP_ASK_PRICE: &str = "top_ask_price";
/// Best bid price column.
pub const TOP_BID_PRICE: &str = "top_bid_price";
/// Observation time column.
pub const TIMESTAMP: &str = "timestamp";

/// Primitive column types understood by the visualization engine.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, serde::Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// UTF-8 text.
    String,
    /// 64-bit float.
    Float,
    /// Signed integer.
    Integer,
    /// Boolean.
    Boolean,
    /// Calendar date / point in time.
    Date,
    /// Date and time of day.
    Datetime,
}

/// Ordered mapping from column name to type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    columns: Vec<(String, ColumnType)>,
}

impl Schema {
    /// Build a schema from `(name, type)` pairs, keeping their order.
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = (S, ColumnType)>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(|(name, ty)| (name.into(), ty)).collect(),
        }
    }

    /// Schema of the quote table: `stock`, `top_ask_price`, `top_bid_price`, `timestamp`.
    pub fn quote_rows() -> Self {
        Self::new([
            (STOCK, ColumnType::String),
            (TOP_ASK_PRICE, ColumnType::Float),
            (TOP_BID_PRICE, ColumnType::Float),
            (TIMESTAMP, ColumnType::Date),
        ])
    }

    /// Declared type of `name`, if the column exists.
    pub fn column_type(&self, name: &str) -> Option<ColumnType> {
        self.columns
            .iter()
            .find(|(column, _)| column == name)
            .map(|(_, ty)| *ty)
    }

    /// `true` if the schema declares `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.column_type(name).is_some()
    }

    /// Columns in declaration order.
    pub fn columns(&self) -> impl Iterator<Item = (&str, ColumnType)> {
        self.columns.iter().map(|(name, ty)| (name.as_str(), *ty))
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// `true` if no column is declared.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// JSON object form, e.g. `{"stock":"string",...}`, in declaration order.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl Serialize for Schema {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (name, ty) in &self.columns {
            map.serialize_entry(name, ty)?;
        }
        map.end()
    }
}

/// Row of the quote table.
#[derive(Debug, Clone, PartialEq, serde::Serialize, Deserialize)]
pub struct VisualizationRow {
    /// Stock identifier.
    pub stock: String,
    /// Best ask price, 0 when there was no ask.
    pub top_ask_price: f64,
    /// Best bid price, 0 when there was no bid.
    pub top_bid_price: f64,
    /// Observation time, unchanged from the snapshot.
    pub timestamp: DateTime<Utc>,
}
