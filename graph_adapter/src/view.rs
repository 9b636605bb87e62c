//! View and aggregation settings applied to the rendering surface.
//!
//! Every setting is handed to the surface as a string attribute: `view` as a plain
//! plugin name, the pivots, columns and aggregates JSON-encoded. `ViewConfig::default()`
//! is the quote chart: one line per stock over time, plotting the best ask.

use std::fmt;
use std::io::Read;

use graph_common::schema::{STOCK, TIMESTAMP, TOP_ASK_PRICE, TOP_BID_PRICE};
use graph_common::{GraphError, Result, Schema};
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Attribute selecting the chart plugin.
pub const VIEW: &str = "view";
/// Attribute listing the series-split columns.
pub const COLUMN_PIVOTS: &str = "column-pivots";
/// Attribute listing the x-axis grouping columns.
pub const ROW_PIVOTS: &str = "row-pivots";
/// Attribute listing the displayed metrics.
pub const COLUMNS: &str = "columns";
/// Attribute mapping columns to aggregate functions.
pub const AGGREGATES: &str = "aggregates";

/// Chart plugin rendered by the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ChartView {
    /// Continuous line per series.
    #[default]
    YLine,
    /// Vertical bars.
    YBar,
    /// Horizontal bars.
    XBar,
    /// Filled area.
    YArea,
    /// Scatter points.
    YScatter,
    /// Plain grid, no chart.
    Datagrid,
}

/// Aggregate function applied per pivot group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Aggregate {
    /// Number of distinct values.
    #[strum(serialize = "distinct count")]
    #[serde(rename = "distinct count")]
    DistinctCount,
    /// Arithmetic mean.
    Avg,
    /// Sum of values.
    Sum,
    /// Number of rows.
    Count,
    /// Most recent value.
    Last,
    /// Maximum.
    High,
    /// Minimum.
    Low,
}

/// Column to aggregate rules, kept in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Aggregates(Vec<(String, Aggregate)>);

impl Aggregates {
    /// Set the rule for `column`, replacing an earlier one in place.
    pub fn with(mut self, column: impl Into<String>, aggregate: Aggregate) -> Self {
        self.set(column.into(), aggregate);
        self
    }

    fn set(&mut self, column: String, aggregate: Aggregate) {
        match self.0.iter_mut().find(|(existing, _)| *existing == column) {
            Some(rule) => rule.1 = aggregate,
            None => self.0.push((column, aggregate)),
        }
    }

    /// Rule declared for `column`.
    pub fn get(&self, column: &str) -> Option<Aggregate> {
        self.0
            .iter()
            .find(|(existing, _)| existing == column)
            .map(|(_, aggregate)| *aggregate)
    }

    /// Rules in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Aggregate)> {
        self.0.iter().map(|(column, aggregate)| (column.as_str(), *aggregate))
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `true` when no rule is declared.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for Aggregates {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (column, aggregate) in &self.0 {
            map.serialize_entry(column, aggregate)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Aggregates {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct AggregatesVisitor;

        impl<'de> Visitor<'de> for AggregatesVisitor {
            type Value = Aggregates;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of column name to aggregate")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut access: A,
            ) -> std::result::Result<Aggregates, A::Error> {
                let mut rules = Aggregates::default();
                while let Some((column, aggregate)) = access.next_entry::<String, Aggregate>()? {
                    rules.set(column, aggregate);
                }
                Ok(rules)
            }
        }

        deserializer.deserialize_map(AggregatesVisitor)
    }
}

/// Settings applied to the surface once, at activation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ViewConfig {
    /// Chart plugin.
    pub view: ChartView,
    /// Columns grouped along the x-axis.
    pub row_pivots: Vec<String>,
    /// Columns splitting the data into series.
    pub column_pivots: Vec<String>,
    /// Displayed metrics.
    pub columns: Vec<String>,
    /// Per-column aggregate functions.
    pub aggregates: Aggregates,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            view: ChartView::YLine,
            row_pivots: vec![TIMESTAMP.to_string()],
            column_pivots: vec![STOCK.to_string()],
            columns: vec![TOP_ASK_PRICE.to_string()],
            // Distinct count on the pivot keys collapses duplicate labels within a bucket.
            aggregates: Aggregates::default()
                .with(STOCK, Aggregate::DistinctCount)
                .with(TOP_ASK_PRICE, Aggregate::Avg)
                .with(TOP_BID_PRICE, Aggregate::Avg)
                .with(TIMESTAMP, Aggregate::DistinctCount),
        }
    }
}

impl ViewConfig {
    /// Load a view override from JSON and check it against `schema`.
    ///
    /// Keys missing from the document keep their default values.
    pub fn from_json_reader<R: Read>(reader: R, schema: &Schema) -> Result<Self> {
        let config: ViewConfig = serde_json::from_reader(reader)?;
        config.validate(schema)?;
        Ok(config)
    }

    /// Fail with `GraphError::UnknownColumn` if any setting names a column `schema` lacks.
    pub fn validate(&self, schema: &Schema) -> Result<()> {
        let listed = [
            (ROW_PIVOTS, &self.row_pivots),
            (COLUMN_PIVOTS, &self.column_pivots),
            (COLUMNS, &self.columns),
        ];
        let referenced = listed
            .into_iter()
            .flat_map(|(setting, columns)| columns.iter().map(move |c| (setting, c.as_str())))
            .chain(self.aggregates.iter().map(|(column, _)| (AGGREGATES, column)));

        for (setting, column) in referenced {
            if !schema.contains(column) {
                return Err(GraphError::UnknownColumn {
                    column: column.to_string(),
                    setting: setting.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Attribute name/value pairs in the order they are applied to the surface.
    pub fn attributes(&self) -> Result<Vec<(&'static str, String)>> {
        Ok(vec![
            (VIEW, self.view.to_string()),
            (COLUMN_PIVOTS, serde_json::to_string(&self.column_pivots)?),
            (ROW_PIVOTS, serde_json::to_string(&self.row_pivots)?),
            (COLUMNS, serde_json::to_string(&self.columns)?),
            (AGGREGATES, serde_json::to_string(&self.aggregates)?),
        ])
    }
}
