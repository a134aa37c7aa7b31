//! Caching layer for computed metrics datasets.

pub mod dataset;

pub use dataset::{CacheConfig, CacheEntry, DatasetCache, DEFAULT_STALE_DAYS, read_entry};
