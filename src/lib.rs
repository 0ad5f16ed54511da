//! # memseries
//!
//! The write/query core of an in-memory time-series store.
//!
//! Observations are addressed by a metric name plus a set of key/value tags.
//! Each distinct (name, tags) pair owns one series whose points are kept in
//! timestamp order, even when writes arrive out of order from many threads.
//!
//! ## Features
//!
//! - **Structured series identity**: name plus sorted tag pairs, never a joined string
//! - **Exactly-once series creation** under concurrent first writers
//! - **Per-series locking**: writers to different series never contend
//! - **Ordered inserts**: O(1) append for in-order data, binary-search insert for backfill
//! - **Inclusive range queries** returning owned snapshots
//!
//! ## Quick Start
//!
//! ```rust
//! use memseries::TimeSeriesStore;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let store = TimeSeriesStore::new();
//!
//! store.write("cpu", [("host", "a")], 1.0, 100)?;
//! store.write("cpu", [("host", "a")], 2.0, 50)?;
//!
//! let points = store.query("cpu", [("host", "a")], 0, 1000);
//! assert_eq!(points.len(), 2);
//! assert_eq!(points[0].timestamp, 50);
//! # Ok(())
//! # }
//! ```
//!
//! ## Concurrency Model
//!
//! Locking is two-level. The registry lock is only taken to look up or
//! create a series and is released before the series lock is acquired.
//! Each series has its own reader/writer lock, held for exactly one insert
//! (exclusive) or one range read (shared).
//!
//! Persistence, retention, downsampling and network protocols are left to
//! surrounding components.

#![deny(missing_docs)]
#![deny(clippy::all, clippy::pedantic)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod builder;
pub mod error;
pub mod point;
pub mod registry;
pub mod series;
pub mod store;
pub mod tags;

pub use builder::StoreBuilder;
pub use error::WriteError;
pub use point::{Metric, Point};
pub use registry::SeriesRegistry;
pub use series::Series;
pub use store::TimeSeriesStore;
pub use tags::{SeriesKey, canonicalize};
