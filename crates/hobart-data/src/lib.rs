#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/hobart/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cache;
pub mod error;
pub mod fmp;
pub mod provider;
pub mod universe;
pub mod yahoo;

pub use cache::{CacheConfig, CacheEntry, DatasetCache};
pub use error::{DataError, Result};
pub use fmp::{CashFlowStatement, FmpCashFlowClient};
pub use provider::{FinancialDataProvider, UniverseProvider};
pub use universe::{CsvUniverseProvider, WikipediaSp500Provider};
pub use yahoo::YahooFinancialsProvider;

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
