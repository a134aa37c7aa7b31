//! Screening thresholds and the filter engine.

use crate::dataset::{MetricsDataset, MetricsRecord};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when constructing screening criteria.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CriteriaError {
    /// A threshold is NaN or infinite
    #[error("threshold {name} must be finite, got {value}")]
    NonFinite {
        /// Threshold name
        name: &'static str,
        /// Offending value
        value: f64,
    },
}

/// Thresholds a record must beat to pass the screen.
///
/// Free cash flow must always be strictly positive; that bound is fixed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreeningCriteria {
    /// Current ratio must exceed this
    pub min_current_ratio: f64,
    /// Debt to equity must be below this
    pub max_debt_to_equity: f64,
    /// Forward P/E must be below this
    pub max_pe_ratio: f64,
    /// Dividend yield (fraction) must exceed this
    pub min_dividend_yield: f64,
    /// Payout ratio must be below this
    pub max_payout_ratio: f64,
}

impl Default for ScreeningCriteria {
    fn default() -> Self {
        Self {
            min_current_ratio: 1.5,
            max_debt_to_equity: 0.5,
            max_pe_ratio: 20.0,
            min_dividend_yield: 0.02,
            max_payout_ratio: 0.6,
        }
    }
}

impl ScreeningCriteria {
    /// Set the minimum dividend yield from a percentage (2.0 = 2%).
    pub fn with_dividend_yield_percent(mut self, percent: f64) -> Self {
        self.min_dividend_yield = percent / 100.0;
        self
    }

    /// Reject NaN or infinite thresholds.
    pub fn validate(&self) -> Result<(), CriteriaError> {
        let thresholds = [
            ("min_current_ratio", self.min_current_ratio),
            ("max_debt_to_equity", self.max_debt_to_equity),
            ("max_pe_ratio", self.max_pe_ratio),
            ("min_dividend_yield", self.min_dividend_yield),
            ("max_payout_ratio", self.max_payout_ratio),
        ];

        match thresholds.into_iter().find(|(_, value)| !value.is_finite()) {
            Some((name, value)) => Err(CriteriaError::NonFinite { name, value }),
            None => Ok(()),
        }
    }

    /// Whether a record passes every predicate.
    ///
    /// A missing or non-finite metric fails its predicate.
    pub fn matches(&self, record: &MetricsRecord) -> bool {
        above(record.current_ratio, self.min_current_ratio)
            && below(record.debt_to_equity, self.max_debt_to_equity)
            && below(record.pe_ratio, self.max_pe_ratio)
            && above(record.dividend_yield, self.min_dividend_yield)
            && below(record.payout_ratio, self.max_payout_ratio)
            && above(record.free_cash_flow, 0.0)
    }
}

fn above(value: Option<f64>, bound: f64) -> bool {
    value.is_some_and(|v| v.is_finite() && v > bound)
}

fn below(value: Option<f64>, bound: f64) -> bool {
    value.is_some_and(|v| v.is_finite() && v < bound)
}

/// Keep the records that satisfy `criteria`, in their original order.
pub fn filter_dataset(dataset: &MetricsDataset, criteria: &ScreeningCriteria) -> MetricsDataset {
    dataset
        .iter()
        .filter(|record| criteria.matches(record))
        .cloned()
        .collect()
}
