//! End-to-end screening: universe, metrics dataset, filter, join.
//!
//! The metrics dataset is the expensive part. It is rebuilt one ticker at a
//! time when the cache is stale and loaded from the newest cache entry
//! otherwise. Filtering and joining always run on the full dataset, so one
//! cached snapshot serves any thresholds.

use hobart_data::{
    CacheConfig, DataError, DatasetCache, FinancialDataProvider, UniverseProvider,
};
use hobart_metrics::{
    CriteriaError, GicsSector, MetricsDataset, MetricsRecord, ScreenedCompany, ScreeningCriteria,
    ValidationError, compute_metrics, filter_dataset, join_universe, validate,
};
use indicatif::ProgressBar;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Result type for screening runs.
pub type Result<T> = std::result::Result<T, ScreenError>;

/// Errors that abort a screening run.
#[derive(Debug, Error)]
pub enum ScreenError {
    /// The universe could not be fetched
    #[error("Universe fetch failed: {0}")]
    Universe(#[source] DataError),

    /// The cache could not be inspected or read
    #[error("Cache error: {0}")]
    Cache(#[source] DataError),

    /// Screening thresholds are unusable
    #[error("Invalid criteria: {0}")]
    Criteria(#[from] CriteriaError),
}

/// Why a ticker was left out of the dataset.
#[derive(Debug, Error)]
pub enum TickerFailure {
    /// The data provider failed for this ticker
    #[error("{ticker}: {source}")]
    Provider {
        /// Ticker that was requested
        ticker: String,
        /// Underlying provider error
        source: DataError,
    },

    /// The fetched record lacks required line items
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Cache behaviour for a run.
#[derive(Debug, Clone)]
pub struct ScreenerConfig {
    /// Cache location and staleness policy
    pub cache: CacheConfig,
    /// Read and write the cache at all
    pub use_cache: bool,
    /// Rebuild and write the dataset even when the cache is fresh
    pub force_refresh: bool,
}

impl Default for ScreenerConfig {
    fn default() -> Self {
        Self {
            cache: CacheConfig::default(),
            use_cache: true,
            force_refresh: false,
        }
    }
}

/// Where the metrics dataset of a run came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenSource {
    /// Built from provider calls during this run
    Fresh,
    /// Loaded from the newest cache entry
    Cached,
}

/// Everything a run produced.
#[derive(Debug, Clone)]
pub struct ScreenOutcome {
    /// Companies that passed, in dataset order
    pub rows: Vec<ScreenedCompany>,
    /// Origin of the metrics dataset
    pub source: ScreenSource,
    /// Number of tickers in the metrics dataset
    pub dataset_size: usize,
    /// Tickers excluded while building a fresh dataset
    pub excluded: Vec<String>,
    /// Cache entry written or read, if any
    pub cache_path: Option<PathBuf>,
}

impl ScreenOutcome {
    /// Keep only rows whose sector is `sector`.
    pub fn retain_sector(&mut self, sector: GicsSector) {
        self.rows.retain(|row| row.entry.gics_sector() == Some(sector));
    }
}

/// Screens a universe against fundamental-ratio thresholds.
#[derive(Debug)]
pub struct Screener<U, F> {
    universe: U,
    financials: F,
    config: ScreenerConfig,
}

impl<U, F> Screener<U, F>
where
    U: UniverseProvider,
    F: FinancialDataProvider,
{
    /// Create a screener over the given providers.
    pub const fn new(universe: U, financials: F, config: ScreenerConfig) -> Self {
        Self {
            universe,
            financials,
            config,
        }
    }

    /// Run configuration.
    pub const fn config(&self) -> &ScreenerConfig {
        &self.config
    }

    /// Fetch, validate and compute metrics for one ticker.
    pub async fn fetch_metrics(&self, ticker: &str) -> std::result::Result<MetricsRecord, TickerFailure> {
        let record = self
            .financials
            .fetch_raw_record(ticker)
            .await
            .map_err(|source| TickerFailure::Provider {
                ticker: ticker.to_string(),
                source,
            })?;
        validate(&record)?;
        Ok(compute_metrics(&record))
    }

    /// Build a dataset for `symbols`, in order, skipping tickers that fail.
    ///
    /// Returns the dataset and the excluded tickers.
    pub async fn build_dataset(
        &self,
        symbols: &[String],
        progress: Option<&ProgressBar>,
    ) -> (MetricsDataset, Vec<String>) {
        let mut dataset = MetricsDataset::new();
        let mut excluded = Vec::new();

        if let Some(pb) = progress {
            pb.set_length(symbols.len() as u64);
            pb.set_position(0);
        }

        for ticker in symbols {
            if let Some(pb) = progress {
                pb.set_message(ticker.clone());
            }

            match self.fetch_metrics(ticker).await {
                Ok(metrics) => {
                    suspended(progress, || info!(ticker = %ticker, "adding ticker"));
                    if !dataset.insert(metrics) {
                        debug!(ticker = %ticker, "duplicate ticker skipped");
                    }
                }
                Err(e) => {
                    suspended(progress, || warn!(ticker = %ticker, reason = %e, "ticker excluded"));
                    excluded.push(ticker.clone());
                }
            }

            if let Some(pb) = progress {
                pb.inc(1);
            }
        }

        (dataset, excluded)
    }

    /// Produce the screened, joined rows for `criteria`.
    pub async fn run(
        &self,
        criteria: &ScreeningCriteria,
        progress: Option<&ProgressBar>,
    ) -> Result<ScreenOutcome> {
        criteria.validate()?;

        let universe = self
            .universe
            .fetch_universe()
            .await
            .map_err(ScreenError::Universe)?;
        info!(constituents = universe.len(), "universe loaded");

        let cache = DatasetCache::new(self.config.cache.clone());
        let reuse = self.config.use_cache
            && !self.config.force_refresh
            && !cache.is_stale().map_err(ScreenError::Cache)?;

        let (dataset, source, excluded, cache_path) = if reuse {
            let entry = cache
                .latest()
                .map_err(ScreenError::Cache)?
                .ok_or_else(|| {
                    ScreenError::Cache(DataError::CacheMiss {
                        dir: cache.dir().to_path_buf(),
                    })
                })?;
            let dataset = hobart_data::cache::read_entry(&entry.path).map_err(ScreenError::Cache)?;
            info!(entry = %entry.path.display(), tickers = dataset.len(), "using cached dataset");
            (dataset, ScreenSource::Cached, Vec::new(), Some(entry.path))
        } else {
            let (dataset, excluded) = self.build_dataset(&universe.symbols(), progress).await;
            info!(
                tickers = dataset.len(),
                excluded = excluded.len(),
                "dataset built"
            );

            let cache_path = if self.config.use_cache {
                match cache.write(&dataset) {
                    Ok(path) => {
                        info!(entry = %path.display(), "dataset cached");
                        Some(path)
                    }
                    Err(e) => {
                        warn!(error = %e, "failed to cache dataset");
                        None
                    }
                }
            } else {
                None
            };

            (dataset, ScreenSource::Fresh, excluded, cache_path)
        };

        let filtered = filter_dataset(&dataset, criteria);
        let rows = join_universe(&filtered, universe.entries());
        info!(
            passed = filtered.len(),
            joined = rows.len(),
            "screen complete"
        );

        Ok(ScreenOutcome {
            rows,
            source,
            dataset_size: dataset.len(),
            excluded,
            cache_path,
        })
    }
}

/// Emit a log line without tearing the progress bar.
fn suspended(progress: Option<&ProgressBar>, log: impl FnOnce()) {
    match progress {
        Some(pb) => pb.suspend(log),
        None => log(),
    }
}
