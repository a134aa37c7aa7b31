//! Inner join of screened metrics against universe metadata.

use crate::dataset::{MetricsDataset, MetricsRecord};
use crate::universe::UniverseEntry;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A screened ticker with its universe metadata attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenedCompany {
    /// Universe metadata
    pub entry: UniverseEntry,
    /// Computed metrics
    pub metrics: MetricsRecord,
}

impl ScreenedCompany {
    /// Ticker symbol.
    pub fn ticker(&self) -> &str {
        &self.metrics.ticker
    }
}

/// Join `metrics` with `universe` on exact, case-sensitive ticker equality.
///
/// Tickers without a universe entry are dropped. When the universe repeats a
/// symbol the first entry wins, so the output never has more rows than
/// `metrics`. Output order follows `metrics`.
pub fn join_universe(metrics: &MetricsDataset, universe: &[UniverseEntry]) -> Vec<ScreenedCompany> {
    let mut by_symbol: HashMap<&str, &UniverseEntry> = HashMap::with_capacity(universe.len());
    for entry in universe {
        by_symbol.entry(entry.symbol.as_str()).or_insert(entry);
    }

    metrics
        .iter()
        .filter_map(|record| {
            by_symbol
                .get(record.ticker.as_str())
                .map(|entry| ScreenedCompany {
                    entry: (*entry).clone(),
                    metrics: record.clone(),
                })
        })
        .collect()
}
