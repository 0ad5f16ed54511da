//! Data point and metric record types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single observation: a timestamp in epoch milliseconds and its value.
///
/// Points are created once at write time and never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Timestamp in milliseconds since the Unix epoch.
    pub timestamp: i64,
    /// Observed value.
    pub value: f64,
}

impl Point {
    /// Creates a new point.
    pub fn new(timestamp: i64, value: f64) -> Self {
        Self { timestamp, value }
    }
}

impl From<(i64, f64)> for Point {
    fn from((timestamp, value): (i64, f64)) -> Self {
        Self { timestamp, value }
    }
}

/// A complete metric observation: the series it belongs to plus the point.
///
/// # Example
///
/// ```rust
/// use memseries::{Metric, TimeSeriesStore};
///
/// let store = TimeSeriesStore::new();
/// let metric = Metric::new("cpu", 1_609_459_200_000, 42.5).with_tag("host", "server1");
///
/// store.write_metric(&metric).unwrap();
/// assert_eq!(store.query("cpu", [("host", "server1")], 0, i64::MAX).len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    /// Metric name, e.g. `"cpu.usage"`.
    pub name: String,
    /// Tag set identifying the series alongside the name.
    pub tags: BTreeMap<String, String>,
    /// Timestamp in milliseconds since the Unix epoch.
    pub timestamp: i64,
    /// Observed value.
    pub value: f64,
}

impl Metric {
    /// Creates a metric with no tags.
    pub fn new(name: impl Into<String>, timestamp: i64, value: f64) -> Self {
        Self {
            name: name.into(),
            tags: BTreeMap::new(),
            timestamp,
            value,
        }
    }

    /// Adds a tag, replacing any previous value for the same key.
    #[must_use]
    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    /// Returns the point carried by this metric.
    pub fn point(&self) -> Point {
        Point::new(self.timestamp, self.value)
    }
}
