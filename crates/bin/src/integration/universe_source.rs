//! Runtime choice between the universe providers.

use hobart_data::{CsvUniverseProvider, Result, UniverseProvider, WikipediaSp500Provider};
use hobart_metrics::Universe;

/// Universe provider selected by command-line flags.
#[derive(Debug)]
pub(crate) enum UniverseSource {
    /// Live S&P 500 constituents
    Wikipedia(WikipediaSp500Provider),
    /// Local constituents file
    Csv(CsvUniverseProvider),
}

impl UniverseProvider for UniverseSource {
    async fn fetch_universe(&self) -> Result<Universe> {
        match self {
            Self::Wikipedia(provider) => provider.fetch_universe().await,
            Self::Csv(provider) => provider.fetch_universe().await,
        }
    }
}
