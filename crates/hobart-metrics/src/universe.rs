//! Screening universe: tickers with their descriptive metadata.

use crate::gics::GicsSector;
use serde::{Deserialize, Serialize};

/// A constituent of the screening universe.
///
/// Serialized field names follow the published constituents table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UniverseEntry {
    /// Ticker symbol
    #[serde(rename = "Symbol")]
    pub symbol: String,
    /// Company name
    #[serde(rename = "Security")]
    pub name: String,
    /// GICS sector, verbatim from the source
    #[serde(rename = "GICS Sector")]
    pub sector: String,
    /// GICS sub-industry, verbatim from the source
    #[serde(rename = "GICS Sub-Industry")]
    pub sub_industry: String,
}

impl UniverseEntry {
    /// Create a new entry.
    pub fn new(
        symbol: impl Into<String>,
        name: impl Into<String>,
        sector: impl Into<String>,
        sub_industry: impl Into<String>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
            sector: sector.into(),
            sub_industry: sub_industry.into(),
        }
    }

    /// The sector as a GICS sector, if it names one.
    pub fn gics_sector(&self) -> Option<GicsSector> {
        self.sector.parse().ok()
    }
}

/// An ordered set of universe entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Universe {
    entries: Vec<UniverseEntry>,
}

impl Universe {
    /// Create a universe from entries, keeping source order.
    pub const fn new(entries: Vec<UniverseEntry>) -> Self {
        Self { entries }
    }

    /// All entries in source order.
    pub fn entries(&self) -> &[UniverseEntry] {
        &self.entries
    }

    /// Ticker symbols in source order.
    pub fn symbols(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.symbol.clone()).collect()
    }

    /// Number of constituents.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the universe is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries whose sector parses as `sector`.
    pub fn in_sector(&self, sector: GicsSector) -> Vec<&UniverseEntry> {
        self.entries
            .iter()
            .filter(|e| e.gics_sector() == Some(sector))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Universe {
        Universe::new(vec![
            UniverseEntry::new("MMM", "3M", "Industrials", "Industrial Conglomerates"),
            UniverseEntry::new("AOS", "A. O. Smith", "Industrials", "Building Products"),
            UniverseEntry::new("ABT", "Abbott Laboratories", "Health Care", "Health Care Equipment"),
        ])
    }

    #[test]
    fn test_symbols_keep_source_order() {
        assert_eq!(sample().symbols(), vec!["MMM", "AOS", "ABT"]);
    }

    #[test]
    fn test_in_sector() {
        let universe = sample();
        let industrials: Vec<&str> = universe
            .in_sector(GicsSector::Industrials)
            .into_iter()
            .map(|e| e.symbol.as_str())
            .collect();
        assert_eq!(industrials, vec!["MMM", "AOS"]);
        assert!(universe.in_sector(GicsSector::Energy).is_empty());
    }

    #[test]
    fn test_unknown_sector_text() {
        let entry = UniverseEntry::new("XYZ", "Xyz Corp", "Miscellaneous", "Other");
        assert_eq!(entry.gics_sector(), None);
    }
}
