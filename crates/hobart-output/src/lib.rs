#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/hobart/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod export;
pub mod frame;
pub mod report;

pub use export::{ExportError, ExportFormat, Exporter, ScreenRow};
pub use frame::to_dataframe;
pub use report::ScreenReport;

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
