//! S&P 500 constituents scraped from Wikipedia.

use crate::error::{DataError, Result};
use crate::provider::UniverseProvider;
use hobart_metrics::{Universe, UniverseEntry};
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;
use tracing::info;

/// Page listing the current constituents.
pub const SP500_URL: &str = "https://en.wikipedia.org/wiki/List_of_S%26P_500_companies";

const TABLE_SELECTOR: &str = "table#constituents";
const COLUMNS: [&str; 4] = ["Symbol", "Security", "GICS Sector", "GICS Sub-Industry"];

/// Fetches the constituents table from Wikipedia.
#[derive(Debug, Clone)]
pub struct WikipediaSp500Provider {
    client: reqwest::Client,
    url: String,
}

impl WikipediaSp500Provider {
    /// Create a provider for the live constituents page.
    pub fn new() -> Result<Self> {
        Self::with_url(SP500_URL)
    }

    /// Create a provider for a different page with the same table layout.
    pub fn with_url(url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("hobart/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

impl UniverseProvider for WikipediaSp500Provider {
    async fn fetch_universe(&self) -> Result<Universe> {
        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(DataError::Http {
                status: status.as_u16(),
                url: self.url.clone(),
            });
        }

        let html = response.text().await?;
        let universe = parse_constituents_html(&html)?;
        info!(constituents = universe.len(), "loaded S&P 500 universe");
        Ok(universe)
    }
}

/// Parse the constituents table out of the page HTML.
///
/// Columns are located by header text so reordering upstream does not
/// shift fields.
pub fn parse_constituents_html(html: &str) -> Result<Universe> {
    let document = Html::parse_document(html);
    let table_selector = selector(TABLE_SELECTOR)?;
    let row_selector = selector("tr")?;
    let header_selector = selector("th")?;
    let cell_selector = selector("td")?;

    let table = document
        .select(&table_selector)
        .next()
        .ok_or_else(|| DataError::Universe("constituents table not found".to_string()))?;

    let mut rows = table.select(&row_selector);
    let header: Vec<String> = rows
        .next()
        .map(|row| row.select(&header_selector).map(cell_text).collect())
        .unwrap_or_default();

    let mut indices = [0usize; 4];
    for (slot, column) in indices.iter_mut().zip(COLUMNS) {
        *slot = header
            .iter()
            .position(|h| h == column)
            .ok_or_else(|| DataError::Universe(format!("column `{column}` not found")))?;
    }
    let [symbol, name, sector, sub_industry] = indices;

    let entries: Vec<UniverseEntry> = rows
        .filter_map(|row| {
            let cells: Vec<String> = row.select(&cell_selector).map(cell_text).collect();
            let field = |i: usize| cells.get(i).cloned();
            let entry = UniverseEntry::new(
                field(symbol)?,
                field(name)?,
                field(sector)?,
                field(sub_industry)?,
            );
            (!entry.symbol.is_empty()).then_some(entry)
        })
        .collect();

    if entries.is_empty() {
        return Err(DataError::Universe(
            "constituents table has no rows".to_string(),
        ));
    }

    Ok(Universe::new(entries))
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| DataError::Parse(format!("invalid selector `{css}`: {e:?}")))
}

fn cell_text(cell: ElementRef<'_>) -> String {
    cell.text().collect::<String>().trim().to_string()
}
