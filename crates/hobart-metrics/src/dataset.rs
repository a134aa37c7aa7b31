//! Computed metrics rows and the ordered dataset that holds them.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Ratios computed for one ticker.
///
/// Serialized field names double as the cache file header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsRecord {
    /// Ticker symbol
    #[serde(rename = "Ticker")]
    pub ticker: String,
    /// Current assets over current liabilities
    #[serde(rename = "Current Ratio")]
    pub current_ratio: Option<f64>,
    /// Current assets less inventory, over current liabilities
    #[serde(rename = "Quick Ratio")]
    pub quick_ratio: Option<f64>,
    /// Total liabilities over common stock equity
    #[serde(rename = "Debt to Equity")]
    pub debt_to_equity: Option<f64>,
    /// Forward P/E
    #[serde(rename = "P/E Ratio")]
    pub pe_ratio: Option<f64>,
    /// Dividend yield as a fraction
    #[serde(rename = "Dividend Yield")]
    pub dividend_yield: Option<f64>,
    /// Dividend payout ratio
    #[serde(rename = "Payout Ratio")]
    pub payout_ratio: Option<f64>,
    /// Liquid assets net of current lease obligations
    #[serde(rename = "Free Cash Flow")]
    pub free_cash_flow: Option<f64>,
}

impl MetricsRecord {
    /// Column names in serialization order.
    pub const COLUMNS: [&'static str; 8] = [
        "Ticker",
        "Current Ratio",
        "Quick Ratio",
        "Debt to Equity",
        "P/E Ratio",
        "Dividend Yield",
        "Payout Ratio",
        "Free Cash Flow",
    ];

    /// A record with every metric absent.
    pub fn empty(ticker: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            current_ratio: None,
            quick_ratio: None,
            debt_to_equity: None,
            pe_ratio: None,
            dividend_yield: None,
            payout_ratio: None,
            free_cash_flow: None,
        }
    }
}

/// Metrics rows in ticker-processing order, at most one per ticker.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricsDataset {
    records: Vec<MetricsRecord>,
    tickers: HashSet<String>,
}

impl MetricsDataset {
    /// Create an empty dataset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record. Returns false, leaving the dataset unchanged, if the
    /// ticker is already present.
    pub fn insert(&mut self, record: MetricsRecord) -> bool {
        if !self.tickers.insert(record.ticker.clone()) {
            return false;
        }
        self.records.push(record);
        true
    }

    /// Records in insertion order.
    pub fn records(&self) -> &[MetricsRecord] {
        &self.records
    }

    /// Iterate over records in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, MetricsRecord> {
        self.records.iter()
    }

    /// Look up a record by ticker.
    pub fn get(&self, ticker: &str) -> Option<&MetricsRecord> {
        if !self.tickers.contains(ticker) {
            return None;
        }
        self.records.iter().find(|r| r.ticker == ticker)
    }

    /// Whether a ticker is present.
    pub fn contains(&self, ticker: &str) -> bool {
        self.tickers.contains(ticker)
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Tickers in insertion order.
    pub fn tickers(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.ticker.as_str()).collect()
    }
}

impl FromIterator<MetricsRecord> for MetricsDataset {
    fn from_iter<T: IntoIterator<Item = MetricsRecord>>(iter: T) -> Self {
        let mut dataset = Self::new();
        for record in iter {
            dataset.insert(record);
        }
        dataset
    }
}

impl IntoIterator for MetricsDataset {
    type Item = MetricsRecord;
    type IntoIter = std::vec::IntoIter<MetricsRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a MetricsDataset {
    type Item = &'a MetricsRecord;
    type IntoIter = std::slice::Iter<'a, MetricsRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insertion_order_preserved() {
        let dataset: MetricsDataset = ["MSFT", "AAPL", "KO"]
            .into_iter()
            .map(MetricsRecord::empty)
            .collect();

        assert_eq!(dataset.tickers(), vec!["MSFT", "AAPL", "KO"]);
        assert_eq!(dataset.len(), 3);
    }

    #[test]
    fn test_duplicate_ticker_keeps_first() {
        let mut dataset = MetricsDataset::new();
        let mut first = MetricsRecord::empty("KO");
        first.current_ratio = Some(1.1);
        let mut second = MetricsRecord::empty("KO");
        second.current_ratio = Some(9.9);

        assert!(dataset.insert(first));
        assert!(!dataset.insert(second));
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.get("KO").unwrap().current_ratio, Some(1.1));
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let dataset: MetricsDataset = std::iter::once(MetricsRecord::empty("BRK.B")).collect();
        assert!(dataset.contains("BRK.B"));
        assert!(!dataset.contains("brk.b"));
        assert!(dataset.get("BRK-B").is_none());
    }
}
