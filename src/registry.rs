//! Mapping from series identity to series storage.

use crate::series::Series;
use crate::tags::SeriesKey;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Owns every [`Series`] in the store, keyed by [`SeriesKey`].
///
/// At most one series exists per key, even when many threads write to a new
/// key at the same time. The registry lock only guards the map itself; it is
/// always released before a caller touches the returned series, so the two
/// levels of locking never nest.
#[derive(Debug, Default)]
pub struct SeriesRegistry {
    series: RwLock<HashMap<SeriesKey, Arc<Series>>>,
    point_capacity: usize,
}

impl SeriesRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with room for `series_capacity` series, where each
    /// new series preallocates `point_capacity` points.
    pub fn with_capacity(series_capacity: usize, point_capacity: usize) -> Self {
        Self {
            series: RwLock::new(HashMap::with_capacity(series_capacity)),
            point_capacity,
        }
    }

    /// Returns the series for `key`, or `None` if nothing was ever written to it.
    pub fn get(&self, key: &SeriesKey) -> Option<Arc<Series>> {
        let map = self.series.read().unwrap_or_else(PoisonError::into_inner);
        map.get(key).cloned()
    }

    /// Returns the series for `key`, creating an empty one if it is absent.
    ///
    /// The existence check and the insert happen under one write lock, so
    /// concurrent first callers for the same key all receive the same series.
    pub fn get_or_create(&self, key: &SeriesKey) -> Arc<Series> {
        if let Some(series) = self.get(key) {
            return series;
        }

        let mut map = self.series.write().unwrap_or_else(PoisonError::into_inner);

        // Another writer may have created it between the two locks.
        if let Some(series) = map.get(key) {
            return Arc::clone(series);
        }

        #[cfg(feature = "logging")]
        log::debug!("creating series {key}");

        let series = Arc::new(Series::with_capacity(self.point_capacity));
        map.insert(key.clone(), Arc::clone(&series));
        series
    }

    /// Returns the number of series.
    pub fn len(&self) -> usize {
        self.series
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns `true` if no series has been created.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a sorted snapshot of every series key.
    pub fn keys(&self) -> Vec<SeriesKey> {
        let mut keys: Vec<SeriesKey> = self
            .series
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        keys.sort();
        keys
    }

    /// Returns a snapshot of every series handle.
    ///
    /// The registry lock is released before this returns, so callers may
    /// lock the series freely.
    pub fn all(&self) -> Vec<Arc<Series>> {
        self.series
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect()
    }
}
