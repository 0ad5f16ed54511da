//! Write and query entry points.

use crate::builder::StoreBuilder;
use crate::error::WriteError;
use crate::point::{Metric, Point};
use crate::registry::SeriesRegistry;
use crate::series::Series;
use crate::tags::{SeriesKey, canonicalize};
use std::sync::Arc;

/// An in-memory time-series store.
///
/// `TimeSeriesStore` is `Send + Sync`; share it between threads with an
/// [`Arc`]. Writes to the same series are serialized by that series' lock,
/// writes to different series proceed in parallel.
///
/// Tags are accepted as any iterator of key/value string pairs, such as
/// `&HashMap<String, String>`, `&BTreeMap<String, String>` or
/// `[(&str, &str); N]`. Tag order never matters.
///
/// # Example
///
/// ```rust
/// use memseries::{Point, TimeSeriesStore};
///
/// let store = TimeSeriesStore::new();
/// store.write("cpu", [("host", "a")], 1.0, 100).unwrap();
/// store.write("cpu", [("host", "a")], 2.0, 50).unwrap();
/// store.write("cpu", [("host", "a")], 3.0, 75).unwrap();
///
/// assert_eq!(
///     store.query("cpu", [("host", "a")], 0, 1000),
///     vec![Point::new(50, 2.0), Point::new(75, 3.0), Point::new(100, 1.0)]
/// );
/// ```
#[derive(Debug)]
pub struct TimeSeriesStore {
    registry: SeriesRegistry,
}

impl TimeSeriesStore {
    /// Creates an empty store with default settings.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Returns a builder for configuring a store.
    pub fn builder() -> StoreBuilder {
        StoreBuilder::new()
    }

    pub(crate) fn from_registry(registry: SeriesRegistry) -> Self {
        Self { registry }
    }

    /// Stores one observation.
    ///
    /// The series for `name` and `tags` is created on first write. Points may
    /// arrive in any timestamp order.
    ///
    /// # Errors
    ///
    /// Returns [`WriteError::InvalidMetric`] if `value` is NaN or infinite.
    /// Nothing is stored in that case.
    pub fn write<I, K, V>(
        &self,
        name: &str,
        tags: I,
        value: f64,
        timestamp: i64,
    ) -> Result<(), WriteError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        WriteError::check_value(name, value)?;
        let key = canonicalize(name, tags);
        self.registry
            .get_or_create(&key)
            .insert(Point::new(timestamp, value));
        Ok(())
    }

    /// Stores the observation carried by `metric`.
    pub fn write_metric(&self, metric: &Metric) -> Result<(), WriteError> {
        self.write(&metric.name, &metric.tags, metric.value, metric.timestamp)
    }

    /// Stores several observations for one series.
    ///
    /// Every value is checked before anything is stored: if one is invalid
    /// the whole batch is rejected. Valid batches are inserted under a single
    /// acquisition of the series lock, in slice order.
    pub fn write_batch<I, K, V>(
        &self,
        name: &str,
        tags: I,
        points: &[Point],
    ) -> Result<(), WriteError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for point in points {
            WriteError::check_value(name, point.value)?;
        }
        if points.is_empty() {
            return Ok(());
        }
        let key = canonicalize(name, tags);
        self.registry.get_or_create(&key).insert_all(points);
        Ok(())
    }

    /// Returns the points of one series with `start <= timestamp <= end`.
    ///
    /// An unknown series, an empty window or `start > end` all yield an
    /// empty vector. The result is an owned snapshot.
    pub fn query<I, K, V>(&self, name: &str, tags: I, start: i64, end: i64) -> Vec<Point>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        self.series(name, tags)
            .map(|series| series.range(start, end))
            .unwrap_or_default()
    }

    /// Returns how many points [`query`](Self::query) would return, without
    /// copying them.
    pub fn count<I, K, V>(&self, name: &str, tags: I, start: i64, end: i64) -> usize
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        self.series(name, tags).map_or(0, |series| series.count(start, end))
    }

    /// Looks up the series for `name` and `tags` without creating it.
    pub fn series<I, K, V>(&self, name: &str, tags: I) -> Option<Arc<Series>>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        self.registry.get(&canonicalize(name, tags))
    }

    /// Returns the number of series.
    pub fn series_count(&self) -> usize {
        self.registry.len()
    }

    /// Returns the total number of points across all series.
    pub fn point_count(&self) -> usize {
        self.registry.all().iter().map(|series| series.len()).sum()
    }

    /// Returns every series key, sorted.
    pub fn series_keys(&self) -> Vec<SeriesKey> {
        self.registry.keys()
    }
}

impl Default for TimeSeriesStore {
    fn default() -> Self {
        Self::new()
    }
}
