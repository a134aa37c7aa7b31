//! Balance-sheet and valuation fetching from Yahoo Finance.

use super::{balance_sheet, valuation};
use crate::error::{DataError, Result};
use crate::provider::FinancialDataProvider;
use chrono::{Duration as ChronoDuration, Utc};
use hobart_metrics::{RawFinancialRecord, Valuation};
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::sleep;
use tracing::{debug, warn};

const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/124.0 Safari/537.36";
const COOKIE_URL: &str = "https://fc.yahoo.com";
const CRUMB_URL: &str = "https://query1.finance.yahoo.com/v1/test/getcrumb";

/// Map an index ticker to Yahoo's symbology (`BRK.B` becomes `BRK-B`).
pub fn yahoo_symbol(ticker: &str) -> String {
    ticker.replace('.', "-")
}

/// Yahoo Finance provider for quarterly balance sheets and valuation figures.
///
/// Requests are spaced by the configured rate-limit delay. The crumb needed
/// by quoteSummary is fetched lazily and reused for the life of the provider.
#[derive(Debug)]
pub struct YahooFinancialsProvider {
    client: reqwest::Client,
    crumb: Mutex<Option<String>>,
    rate_limit_delay: Duration,
    lookback: ChronoDuration,
}

impl YahooFinancialsProvider {
    /// Create a provider with the default 250ms delay between requests.
    pub fn new() -> Result<Self> {
        Self::with_rate_limit(Duration::from_millis(250))
    }

    /// Create a provider with a custom delay between requests.
    pub fn with_rate_limit(rate_limit_delay: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .cookie_store(true)
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            crumb: Mutex::new(None),
            rate_limit_delay,
            lookback: ChronoDuration::days(2 * 365),
        })
    }

    /// Fetch the latest quarterly balance sheet for `ticker`.
    pub async fn fetch_balance_sheet(&self, ticker: &str) -> Result<RawFinancialRecord> {
        let end = Utc::now();
        let url = balance_sheet::timeseries_url(&yahoo_symbol(ticker), end - self.lookback, end);
        let body = self.get_text(self.client.get(&url).build()?).await?;
        balance_sheet::parse_timeseries(ticker, &body)
    }

    /// Fetch forward P/E, dividend yield and payout ratio for `ticker`.
    ///
    /// A rejected crumb is dropped so the next call performs a new handshake.
    pub async fn fetch_valuation(&self, ticker: &str) -> Result<Valuation> {
        let crumb = self.crumb().await?;
        let request = self.valuation_request(ticker, &crumb)?;
        match self.get_text(request).await {
            Ok(body) => valuation::parse_quote_summary(&body),
            Err(e) => {
                self.discard_rejected_crumb(&e).await;
                Err(e)
            }
        }
    }

    fn valuation_request(&self, ticker: &str, crumb: &str) -> Result<reqwest::Request> {
        Ok(self
            .client
            .get(valuation::quote_summary_url(&yahoo_symbol(ticker)))
            .query(&[("modules", valuation::MODULES), ("crumb", crumb)])
            .build()?)
    }

    async fn discard_rejected_crumb(&self, error: &DataError) {
        if is_rejected_crumb(error) {
            self.crumb.lock().await.take();
            debug!("Yahoo rejected the crumb, discarding it");
        }
    }

    async fn crumb(&self) -> Result<String> {
        let mut guard = self.crumb.lock().await;
        if let Some(crumb) = guard.as_ref() {
            return Ok(crumb.clone());
        }

        // The cookie endpoint answers 404 but still sets the session cookie.
        if let Err(e) = self.client.get(COOKIE_URL).send().await {
            debug!("Yahoo cookie request failed: {}", e);
        }

        let crumb = self
            .get_text(self.client.get(CRUMB_URL).build()?)
            .await?
            .trim()
            .to_string();
        if crumb.is_empty() || crumb.contains('<') {
            return Err(DataError::YahooApi("invalid crumb returned".to_string()));
        }

        *guard = Some(crumb.clone());
        Ok(crumb)
    }

    async fn get_text(&self, request: reqwest::Request) -> Result<String> {
        let url = strip_query(request.url().as_str()).to_string();
        let response = self.client.execute(request).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(DataError::Http {
                status: status.as_u16(),
                url,
            });
        }
        Ok(response.text().await?)
    }
}

impl FinancialDataProvider for YahooFinancialsProvider {
    async fn fetch_raw_record(&self, ticker: &str) -> Result<RawFinancialRecord> {
        if ticker.trim().is_empty() {
            return Err(DataError::InvalidSymbol("Empty symbol".to_string()));
        }

        let record = self.fetch_balance_sheet(ticker).await?;
        sleep(self.rate_limit_delay).await;

        let valuation = self.fetch_valuation(ticker).await.unwrap_or_else(|e| {
            warn!(ticker, error = %e, "valuation unavailable");
            Valuation::default()
        });
        sleep(self.rate_limit_delay).await;

        Ok(record.with_valuation(valuation))
    }
}

const fn is_rejected_crumb(error: &DataError) -> bool {
    matches!(error, DataError::Http { status: 401, .. })
}

fn strip_query(url: &str) -> &str {
    url.split_once('?').map_or(url, |(base, _)| base)
}
