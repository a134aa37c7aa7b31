//! CSV and JSON export of screening results.
//!
//! Rows are flattened to the published column layout: ticker, sector and
//! sub-industry followed by the computed ratios. Absent values are empty
//! CSV fields and JSON `null`.

use hobart_metrics::ScreenedCompany;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur during export operations.
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV serialization error.
    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialized output was not valid UTF-8.
    #[error("Encoding error: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),

    /// Invalid format error.
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

/// Export format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Comma-separated values format.
    Csv,

    /// Compact JSON format.
    Json,

    /// Pretty-printed JSON format.
    PrettyJson,
}

impl ExportFormat {
    /// Get the file extension for this format.
    pub const fn extension(&self) -> &str {
        match self {
            Self::Csv => "csv",
            Self::Json | Self::PrettyJson => "json",
        }
    }

    /// Guess the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self, ExportError> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| ExportError::InvalidFormat(path.display().to_string()))?
            .parse()
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "pretty-json" | "pretty_json" => Ok(Self::PrettyJson),
            other => Err(ExportError::InvalidFormat(other.to_string())),
        }
    }
}

/// One output row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenRow {
    /// Ticker symbol.
    #[serde(rename = "Ticker")]
    pub ticker: String,

    /// GICS sector.
    #[serde(rename = "GICS Sector")]
    pub sector: String,

    /// GICS sub-industry.
    #[serde(rename = "GICS Sub-Industry")]
    pub sub_industry: String,

    /// Current ratio.
    #[serde(rename = "Current Ratio")]
    pub current_ratio: Option<f64>,

    /// Quick ratio.
    #[serde(rename = "Quick Ratio")]
    pub quick_ratio: Option<f64>,

    /// Debt to equity.
    #[serde(rename = "Debt to Equity")]
    pub debt_to_equity: Option<f64>,

    /// Forward P/E.
    #[serde(rename = "P/E Ratio")]
    pub pe_ratio: Option<f64>,

    /// Dividend yield as a fraction.
    #[serde(rename = "Dividend Yield")]
    pub dividend_yield: Option<f64>,

    /// Payout ratio.
    #[serde(rename = "Payout Ratio")]
    pub payout_ratio: Option<f64>,

    /// Free cash flow.
    #[serde(rename = "Free Cash Flow")]
    pub free_cash_flow: Option<f64>,
}

impl ScreenRow {
    /// Column names in serialization order.
    pub const COLUMNS: [&'static str; 10] = [
        "Ticker",
        "GICS Sector",
        "GICS Sub-Industry",
        "Current Ratio",
        "Quick Ratio",
        "Debt to Equity",
        "P/E Ratio",
        "Dividend Yield",
        "Payout Ratio",
        "Free Cash Flow",
    ];
}

impl From<&ScreenedCompany> for ScreenRow {
    fn from(company: &ScreenedCompany) -> Self {
        let m = &company.metrics;
        Self {
            ticker: m.ticker.clone(),
            sector: company.entry.sector.clone(),
            sub_industry: company.entry.sub_industry.clone(),
            current_ratio: m.current_ratio,
            quick_ratio: m.quick_ratio,
            debt_to_equity: m.debt_to_equity,
            pe_ratio: m.pe_ratio,
            dividend_yield: m.dividend_yield,
            payout_ratio: m.payout_ratio,
            free_cash_flow: m.free_cash_flow,
        }
    }
}

/// Trait for exporting data in various formats.
pub trait Exporter {
    /// Export data to a string in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError>;

    /// Export data to a file in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or file writing fails.
    fn export_to_file(&self, path: &Path, format: ExportFormat) -> Result<(), ExportError> {
        let content = self.export_to_string(format)?;
        let mut file = File::create(path)?;
        file.write_all(content.as_bytes())?;
        Ok(())
    }
}

impl Exporter for [ScreenedCompany] {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        let rows: Vec<ScreenRow> = self.iter().map(ScreenRow::from).collect();
        match format {
            ExportFormat::Csv => {
                // Header is written by hand so an empty result still has one.
                let mut wtr = csv::WriterBuilder::new()
                    .has_headers(false)
                    .from_writer(vec![]);
                wtr.write_record(ScreenRow::COLUMNS)?;
                for row in &rows {
                    wtr.serialize(row)?;
                }
                let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
                Ok(String::from_utf8(bytes)?)
            }
            ExportFormat::Json => Ok(serde_json::to_string(&rows)?),
            ExportFormat::PrettyJson => Ok(serde_json::to_string_pretty(&rows)?),
        }
    }
}
