//! Per-series ordered point storage.

use crate::point::Point;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// The time-ordered points of one series.
///
/// Points are kept sorted by timestamp at all times. Points sharing a
/// timestamp stay in arrival order. Each series carries its own
/// reader/writer lock, so operations on different series never contend.
///
/// Every critical section leaves the vector sorted, so a lock poisoned by a
/// panicking thread is recovered rather than propagated.
#[derive(Debug, Default)]
pub struct Series {
    points: RwLock<Vec<Point>>,
}

impl Series {
    /// Creates an empty series.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty series with room for `capacity` points.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: RwLock::new(Vec::with_capacity(capacity)),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<Point>> {
        self.points.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Point>> {
        self.points.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Inserts a point, keeping the series ordered by timestamp.
    ///
    /// Points at or after the current latest timestamp are appended. Older
    /// points are placed after every existing point with a timestamp less
    /// than or equal to theirs, so equal timestamps keep arrival order.
    pub fn insert(&self, point: Point) {
        let mut points = self.write();
        insert_sorted(&mut points, point);
    }

    /// Inserts several points under a single acquisition of the lock.
    ///
    /// The result is identical to calling [`insert`](Self::insert) for each
    /// point in slice order.
    pub fn insert_all(&self, batch: &[Point]) {
        let mut points = self.write();
        points.reserve(batch.len());
        for point in batch {
            insert_sorted(&mut points, *point);
        }
    }

    /// Returns every point with `start <= timestamp <= end`, in order.
    ///
    /// Returns an empty vector when `start > end`. The result is an owned
    /// copy; later inserts never affect it.
    pub fn range(&self, start: i64, end: i64) -> Vec<Point> {
        if start > end {
            return Vec::new();
        }
        let points = self.read();
        let (lo, hi) = bounds(&points, start, end);
        points[lo..hi].to_vec()
    }

    /// Returns the number of points with `start <= timestamp <= end`.
    pub fn count(&self, start: i64, end: i64) -> usize {
        if start > end {
            return 0;
        }
        let points = self.read();
        let (lo, hi) = bounds(&points, start, end);
        hi - lo
    }

    /// Returns a copy of every point in the series.
    pub fn points(&self) -> Vec<Point> {
        self.read().clone()
    }

    /// Returns the number of points stored.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Returns `true` if the series holds no points.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Returns the earliest timestamp, if any.
    pub fn first_timestamp(&self) -> Option<i64> {
        self.read().first().map(|p| p.timestamp)
    }

    /// Returns the latest timestamp, if any.
    pub fn last_timestamp(&self) -> Option<i64> {
        self.read().last().map(|p| p.timestamp)
    }
}

fn insert_sorted(points: &mut Vec<Point>, point: Point) {
    match points.last().map(|p| p.timestamp) {
        Some(last) if point.timestamp < last => {
            let idx = points.partition_point(|p| p.timestamp <= point.timestamp);
            #[cfg(feature = "logging")]
            log::trace!(
                "backfill at index {idx} of {} (timestamp {})",
                points.len(),
                point.timestamp
            );
            points.insert(idx, point);
        }
        _ => points.push(point),
    }
}

/// Half-open index bounds of the points inside `[start, end]`.
fn bounds(points: &[Point], start: i64, end: i64) -> (usize, usize) {
    let lo = points.partition_point(|p| p.timestamp < start);
    let hi = lo + points[lo..].partition_point(|p| p.timestamp <= end);
    (lo, hi)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timestamps(points: &[Point]) -> Vec<i64> {
        points.iter().map(|p| p.timestamp).collect()
    }

    #[test]
    fn test_append_in_order() {
        let series = Series::new();
        for ts in [1, 2, 2, 5, 9] {
            series.insert(Point::new(ts, 0.0));
        }
        assert_eq!(timestamps(&series.points()), vec![1, 2, 2, 5, 9]);
        assert_eq!(series.first_timestamp(), Some(1));
        assert_eq!(series.last_timestamp(), Some(9));
    }

    #[test]
    fn test_backfill_insert() {
        let series = Series::new();
        series.insert(Point::new(100, 1.0));
        series.insert(Point::new(50, 2.0));
        series.insert(Point::new(75, 3.0));

        assert_eq!(
            series.range(0, 1000),
            vec![
                Point::new(50, 2.0),
                Point::new(75, 3.0),
                Point::new(100, 1.0)
            ]
        );
    }

    #[test]
    fn test_backfill_tie_goes_after_existing() {
        let series = Series::new();
        series.insert(Point::new(10, 1.0));
        series.insert(Point::new(10, 2.0));
        series.insert(Point::new(20, 0.0));
        // Out of order, equal to existing timestamp 10.
        series.insert(Point::new(10, 3.0));

        assert_eq!(
            series.range(10, 10),
            vec![
                Point::new(10, 1.0),
                Point::new(10, 2.0),
                Point::new(10, 3.0)
            ]
        );
    }

    #[test]
    fn test_range_bounds_inclusive() {
        let series = Series::new();
        for ts in [10, 20, 30, 40] {
            series.insert(Point::new(ts, 0.0));
        }

        assert_eq!(timestamps(&series.range(20, 30)), vec![20, 30]);
        assert_eq!(timestamps(&series.range(15, 35)), vec![20, 30]);
        assert_eq!(timestamps(&series.range(40, 40)), vec![40]);
        assert_eq!(timestamps(&series.range(i64::MIN, i64::MAX)), vec![10, 20, 30, 40]);
        assert!(series.range(41, 100).is_empty());
        assert!(series.range(0, 9).is_empty());
        assert!(series.range(21, 29).is_empty());
        assert_eq!(series.count(15, 35), 2);
    }

    #[test]
    fn test_range_start_after_end_is_empty() {
        let series = Series::new();
        series.insert(Point::new(10, 0.0));
        assert!(series.range(11, 9).is_empty());
        assert!(series.range(10, 9).is_empty());
        assert_eq!(series.count(11, 9), 0);
    }

    #[test]
    fn test_empty_series() {
        let series = Series::with_capacity(16);
        assert!(series.is_empty());
        assert_eq!(series.len(), 0);
        assert!(series.range(0, 100).is_empty());
        assert_eq!(series.first_timestamp(), None);
        assert_eq!(series.last_timestamp(), None);
    }

    #[test]
    fn test_insert_all_matches_sequential() {
        let batch = [
            Point::new(5, 1.0),
            Point::new(3, 2.0),
            Point::new(5, 3.0),
            Point::new(1, 4.0),
        ];

        let batched = Series::new();
        batched.insert_all(&batch);

        let sequential = Series::new();
        for point in batch {
            sequential.insert(point);
        }

        assert_eq!(batched.points(), sequential.points());
        assert_eq!(timestamps(&batched.points()), vec![1, 3, 5, 5]);
    }

    #[test]
    fn test_range_result_is_detached() {
        let series = Series::new();
        series.insert(Point::new(10, 1.0));
        series.insert(Point::new(20, 2.0));

        let snapshot = series.range(0, 100);
        series.insert(Point::new(15, 3.0));
        series.insert(Point::new(5, 4.0));

        assert_eq!(snapshot, vec![Point::new(10, 1.0), Point::new(20, 2.0)]);
        assert_eq!(series.len(), 4);
    }
}
