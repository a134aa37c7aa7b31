//! Raw per-ticker financial records as delivered by a data provider.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Balance-sheet line items required for ratio computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LineItem {
    /// Total current assets
    CurrentAssets,

    /// Total current liabilities
    CurrentLiabilities,

    /// Inventory
    Inventory,

    /// Cash, cash equivalents and short-term investments
    CashAndShortTermInvestments,

    /// Total liabilities net of minority interest
    TotalLiabilities,

    /// Common stock equity
    CommonStockEquity,

    /// Current portion of capital lease obligations
    CurrentCapitalLeaseObligation,
}

impl LineItem {
    /// Every line item the validator requires, in reporting order.
    pub const REQUIRED: [Self; 7] = [
        Self::CurrentAssets,
        Self::CurrentLiabilities,
        Self::Inventory,
        Self::CashAndShortTermInvestments,
        Self::TotalLiabilities,
        Self::CommonStockEquity,
        Self::CurrentCapitalLeaseObligation,
    ];

    /// Balance-sheet row label, as used for record keys.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::CurrentAssets => "Current Assets",
            Self::CurrentLiabilities => "Current Liabilities",
            Self::Inventory => "Inventory",
            Self::CashAndShortTermInvestments => "Cash Cash Equivalents And Short Term Investments",
            Self::TotalLiabilities => "Total Liabilities Net Minority Interest",
            Self::CommonStockEquity => "Common Stock Equity",
            Self::CurrentCapitalLeaseObligation => "Current Capital Lease Obligation",
        }
    }

    /// Upstream time-series key (without the `quarterly` prefix).
    pub const fn series_key(&self) -> &'static str {
        match self {
            Self::CurrentAssets => "CurrentAssets",
            Self::CurrentLiabilities => "CurrentLiabilities",
            Self::Inventory => "Inventory",
            Self::CashAndShortTermInvestments => "CashCashEquivalentsAndShortTermInvestments",
            Self::TotalLiabilities => "TotalLiabilitiesNetMinorityInterest",
            Self::CommonStockEquity => "CommonStockEquity",
            Self::CurrentCapitalLeaseObligation => "CurrentCapitalLeaseObligation",
        }
    }

    /// Look up a line item by its upstream series key.
    pub fn from_series_key(key: &str) -> Option<Self> {
        Self::REQUIRED.into_iter().find(|item| item.series_key() == key)
    }
}

impl fmt::Display for LineItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Auxiliary valuation figures. Each may be missing upstream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Valuation {
    /// Forward price-to-earnings ratio
    pub forward_pe: Option<f64>,
    /// Dividend yield as a fraction (0.02 = 2%)
    pub dividend_yield: Option<f64>,
    /// Dividend payout ratio as a fraction
    pub payout_ratio: Option<f64>,
}

/// A single ticker's balance-sheet snapshot for its latest reporting period.
///
/// Line items are keyed by row label. A key can be present with a `None`
/// value: the row exists upstream but carries no figure for the period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawFinancialRecord {
    ticker: String,
    period: Option<NaiveDate>,
    line_items: BTreeMap<String, Option<f64>>,
    valuation: Valuation,
}

impl RawFinancialRecord {
    /// Create an empty record for a ticker.
    pub fn new(ticker: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            period: None,
            line_items: BTreeMap::new(),
            valuation: Valuation::default(),
        }
    }

    /// Set the reporting period end date.
    pub const fn with_period(mut self, period: NaiveDate) -> Self {
        self.period = Some(period);
        self
    }

    /// Add a line item by label.
    pub fn with_field(mut self, label: impl Into<String>, value: Option<f64>) -> Self {
        self.line_items.insert(label.into(), value);
        self
    }

    /// Add one of the required line items with a reported value.
    pub fn with_item(self, item: LineItem, value: f64) -> Self {
        self.with_field(item.label(), Some(value))
    }

    /// Attach valuation figures.
    pub const fn with_valuation(mut self, valuation: Valuation) -> Self {
        self.valuation = valuation;
        self
    }

    /// Ticker symbol.
    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    /// Reporting period end date, if known.
    pub const fn period(&self) -> Option<NaiveDate> {
        self.period
    }

    /// Names of all line items present in the record.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.line_items.keys().map(String::as_str)
    }

    /// Whether the record carries a row for `item` (regardless of its value).
    pub fn has(&self, item: LineItem) -> bool {
        self.line_items.contains_key(item.label())
    }

    /// Reported value of `item`, `None` if the row or the figure is missing.
    pub fn value(&self, item: LineItem) -> Option<f64> {
        self.line_items.get(item.label()).copied().flatten()
    }

    /// Valuation figures.
    pub const fn valuation(&self) -> &Valuation {
        &self.valuation
    }
}
