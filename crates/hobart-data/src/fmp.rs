//! Quarterly cash-flow statements from Financial Modeling Prep.

use crate::error::{DataError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{info, warn};

/// Environment variable holding the API key.
pub const API_KEY_VAR: &str = "FMP_API_KEY";

const BASE_URL: &str = "https://financialmodelingprep.com/api/v3";

/// One quarterly cash-flow statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashFlowStatement {
    /// Period end date
    pub date: NaiveDate,
    /// Fiscal period label, such as `Q1`
    #[serde(default)]
    pub period: Option<String>,
    /// Operating cash flow
    #[serde(default)]
    pub operating_cash_flow: Option<f64>,
    /// Capital expenditure, reported negative
    #[serde(default)]
    pub capital_expenditure: Option<f64>,
    /// Free cash flow
    #[serde(default)]
    pub free_cash_flow: Option<f64>,
}

/// Client for the FMP cash-flow statement endpoint.
#[derive(Debug, Clone)]
pub struct FmpCashFlowClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl FmpCashFlowClient {
    /// Create a client with an explicit API key.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http,
            api_key: api_key.into(),
            base_url: BASE_URL.to_string(),
        })
    }

    /// Create a client from `FMP_API_KEY`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(API_KEY_VAR)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or(DataError::MissingApiKey(API_KEY_VAR))?;
        Self::new(api_key)
    }

    /// Point the client at a different host.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn url(&self, ticker: &str) -> String {
        format!(
            "{}/cash-flow-statement/{ticker}",
            self.base_url.trim_end_matches('/')
        )
    }

    /// Fetch quarterly cash-flow statements, most recent first.
    pub async fn fetch_cash_flow(&self, ticker: &str) -> Result<Vec<CashFlowStatement>> {
        let url = self.url(ticker);
        let response = self
            .http
            .get(&url)
            .query(&[("period", "quarter"), ("apikey", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DataError::Http {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.text().await?;
        let statements = parse_cash_flow(ticker, &body)?;
        info!(ticker, statements = statements.len(), "fetched cash-flow statements");
        Ok(statements)
    }

    /// Fetch cash-flow statements, logging and discarding any failure.
    pub async fn fetch_opportunistic(&self, ticker: &str) -> Option<Vec<CashFlowStatement>> {
        self.fetch_cash_flow(ticker)
            .await
            .inspect_err(|e| warn!(ticker, error = %e, "cash-flow fetch failed"))
            .ok()
    }
}

/// Parse an FMP cash-flow response body.
///
/// FMP reports errors as a JSON object with an `Error Message` key rather
/// than through the status code.
pub fn parse_cash_flow(ticker: &str, body: &str) -> Result<Vec<CashFlowStatement>> {
    let value: serde_json::Value = serde_json::from_str(body)?;
    if let Some(message) = value.get("Error Message").and_then(|m| m.as_str()) {
        return Err(DataError::MissingData {
            symbol: ticker.to_string(),
            reason: message.to_string(),
        });
    }
    Ok(serde_json::from_value(value)?)
}
