use std::collections::BTreeMap;
use std::fmt;

use futuboard_core_types::{BoardId, ColumnId, ScopeId};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::errors::AnalyticsError;

/// Bucket granularity.
///
/// `All` is internal: every timestamp collapses into one fixed bucket, which
/// is how the velocity chart gets a single point-in-time snapshot. It is
/// never accepted from a query string.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TimeUnit {
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Year,
    All,
}

impl TimeUnit {
    pub const QUERYABLE: [TimeUnit; 6] = [
        TimeUnit::Minute,
        TimeUnit::Hour,
        TimeUnit::Day,
        TimeUnit::Week,
        TimeUnit::Month,
        TimeUnit::Year,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TimeUnit::Minute => "minute",
            TimeUnit::Hour => "hour",
            TimeUnit::Day => "day",
            TimeUnit::Week => "week",
            TimeUnit::Month => "month",
            TimeUnit::Year => "year",
            TimeUnit::All => "all",
        }
    }

    /// Parses a `time_unit` query value. Matching is exact, as the HTTP
    /// contract has always been lowercase.
    pub fn parse_query(raw: &str) -> Result<Self, AnalyticsError> {
        TimeUnit::QUERYABLE
            .into_iter()
            .find(|unit| unit.as_str() == raw)
            .ok_or_else(|| AnalyticsError::InvalidGranularity(raw.to_string()))
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a ticket weighs in the totals.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum CountUnit {
    /// Story points.
    #[default]
    Size,
    /// Every ticket counts as one card.
    Count,
}

impl CountUnit {
    pub fn as_str(self) -> &'static str {
        match self {
            CountUnit::Size => "size",
            CountUnit::Count => "count",
        }
    }

    pub fn parse_query(raw: &str) -> Result<Self, AnalyticsError> {
        match raw {
            "size" => Ok(CountUnit::Size),
            "count" | "cards" => Ok(CountUnit::Count),
            other => Err(AnalyticsError::InvalidCountUnit(other.to_string())),
        }
    }

    /// Weight of a ticket whose size is `size`.
    pub fn weigh(self, size: i64) -> i64 {
        match self {
            CountUnit::Size => size,
            CountUnit::Count => 1,
        }
    }
}

/// Raw chart query parameters as they arrive from HTTP or the CLI.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChartQuery {
    pub time_unit: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub count_unit: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Events,
    CumulativeFlow,
    Velocity,
    BurnUp,
}

impl ChartKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ChartKind::Events => "events",
            ChartKind::CumulativeFlow => "cumulative_flow",
            ChartKind::Velocity => "velocity",
            ChartKind::BurnUp => "burn_up",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryDigest {
    pub chart: ChartKind,
    pub board: BoardId,
    pub scope: Option<ScopeId>,
    pub time_unit: Option<String>,
}

impl QueryDigest {
    pub fn new(chart: ChartKind, board: BoardId) -> Self {
        Self {
            chart,
            board,
            scope: None,
            time_unit: None,
        }
    }

    pub fn with_scope(mut self, scope: ScopeId) -> Self {
        self.scope = Some(scope);
        self
    }

    pub fn with_query(mut self, query: &ChartQuery) -> Self {
        self.time_unit = query.time_unit.clone();
        self
    }
}

/// One reconstructed bucket: the formatted bucket timestamp and the
/// accumulated size of every column.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BucketSizes {
    pub bucket: String,
    pub sizes: BTreeMap<ColumnId, i64>,
}

/// Cumulative flow chart point.
///
/// Serializes flat: `{"name": <bucket>, "<column>": <size>, ...}` with the
/// columns in board order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CumulativeFlowPoint {
    pub name: String,
    pub values: Vec<(String, i64)>,
}

impl CumulativeFlowPoint {
    pub fn value(&self, column: &str) -> Option<i64> {
        self.values
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, size)| *size)
    }
}

impl Serialize for CumulativeFlowPoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len() + 1))?;
        map.serialize_entry("name", &self.name)?;
        for (column, size) in &self.values {
            map.serialize_entry(column, size)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq, Default)]
pub struct CumulativeFlow {
    pub columns: Vec<String>,
    pub data: Vec<CumulativeFlowPoint>,
}

/// Done and forecast totals of one scope.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ScopeTotals {
    pub done: i64,
    pub forecast: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VelocityRow {
    pub name: String,
    pub done: i64,
    pub forecast: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Velocity {
    pub data: Vec<VelocityRow>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BurnUpPoint {
    pub name: String,
    pub done: i64,
    pub total: i64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub forecast: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BurnUp {
    pub scope: String,
    pub scope_id: ScopeId,
    pub count_unit: CountUnit,
    pub data: Vec<BurnUpPoint>,
}
