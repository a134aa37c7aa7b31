#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/hobart/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod criteria;
pub mod dataset;
pub mod gics;
pub mod join;
pub mod ratios;
pub mod record;
pub mod universe;
pub mod validator;

pub use criteria::{CriteriaError, ScreeningCriteria, filter_dataset};
pub use dataset::{MetricsDataset, MetricsRecord};
pub use gics::{GicsSector, ParseSectorError};
pub use join::{ScreenedCompany, join_universe};
pub use ratios::compute_metrics;
pub use record::{LineItem, RawFinancialRecord, Valuation};
pub use universe::{Universe, UniverseEntry};
pub use validator::{ValidationError, has_required_fields, validate};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
