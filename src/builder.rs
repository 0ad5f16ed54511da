//! Store configuration.

use crate::registry::SeriesRegistry;
use crate::store::TimeSeriesStore;

/// Default number of series the registry has room for before rehashing.
const DEFAULT_SERIES_CAPACITY: usize = 1024;

/// Default number of points preallocated for each new series.
const DEFAULT_POINT_CAPACITY: usize = 0;

/// Builder for configuring a [`TimeSeriesStore`].
///
/// # Example
///
/// ```rust
/// use memseries::TimeSeriesStore;
///
/// let store = TimeSeriesStore::builder()
///     .series_capacity(10_000)
///     .point_capacity(256)
///     .build();
/// assert_eq!(store.series_count(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct StoreBuilder {
    series_capacity: usize,
    point_capacity: usize,
}

impl StoreBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            series_capacity: DEFAULT_SERIES_CAPACITY,
            point_capacity: DEFAULT_POINT_CAPACITY,
        }
    }

    /// Sets how many series the registry can hold before it grows.
    ///
    /// Default: 1024
    #[must_use]
    pub fn series_capacity(mut self, capacity: usize) -> Self {
        self.series_capacity = capacity;
        self
    }

    /// Sets how many points each new series preallocates.
    ///
    /// Useful when every series is expected to receive a steady stream of
    /// points. Default: 0 (allocate on first write)
    #[must_use]
    pub fn point_capacity(mut self, capacity: usize) -> Self {
        self.point_capacity = capacity;
        self
    }

    /// Builds an empty store.
    pub fn build(self) -> TimeSeriesStore {
        TimeSeriesStore::from_registry(SeriesRegistry::with_capacity(
            self.series_capacity,
            self.point_capacity,
        ))
    }
}

impl Default for StoreBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_default() {
        let builder = StoreBuilder::new();
        assert_eq!(builder.series_capacity, DEFAULT_SERIES_CAPACITY);
        assert_eq!(builder.point_capacity, DEFAULT_POINT_CAPACITY);
    }

    #[test]
    fn test_builder_custom() {
        let builder = StoreBuilder::new().series_capacity(8).point_capacity(64);
        assert_eq!(builder.series_capacity, 8);
        assert_eq!(builder.point_capacity, 64);
    }

    #[test]
    fn test_builder_build() {
        let store = StoreBuilder::default().point_capacity(4).build();
        store.write("cpu", [("host", "a")], 1.0, 1).unwrap();
        assert_eq!(store.series_count(), 1);
        assert_eq!(store.point_count(), 1);
    }
}
