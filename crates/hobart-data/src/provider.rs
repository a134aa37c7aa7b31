//! Provider traits the screener is written against.

use crate::error::Result;
use hobart_metrics::{RawFinancialRecord, Universe};
use std::future::Future;

/// Supplies the tickers to screen and their descriptive metadata.
pub trait UniverseProvider {
    /// Fetch the full universe in source order.
    fn fetch_universe(&self) -> impl Future<Output = Result<Universe>> + Send;
}

/// Supplies raw balance-sheet and valuation data for one ticker.
pub trait FinancialDataProvider {
    /// Fetch the latest quarterly record for `ticker`.
    fn fetch_raw_record(
        &self,
        ticker: &str,
    ) -> impl Future<Output = Result<RawFinancialRecord>> + Send;
}
