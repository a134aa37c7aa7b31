//! Error types for data operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for data operations.
pub type Result<T> = std::result::Result<T, DataError>;

/// Errors that can occur during data operations.
#[derive(Debug, Error)]
pub enum DataError {
    /// Yahoo Finance API error
    #[error("Yahoo Finance API error: {0}")]
    YahooApi(String),

    /// Network error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-success HTTP status
    #[error("HTTP {status} from {url}")]
    Http {
        /// Response status code
        status: u16,
        /// Requested URL, without credentials
        url: String,
    },

    /// Data parsing error
    #[error("Data parsing error: {0}")]
    Parse(String),

    /// Missing data
    #[error("Missing data for {symbol}: {reason}")]
    MissingData {
        /// Symbol that was queried
        symbol: String,
        /// Reason for missing data
        reason: String,
    },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// CSV read or write error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Invalid symbol
    #[error("Invalid symbol: {0}")]
    InvalidSymbol(String),

    /// Universe source could not be read
    #[error("Universe error: {0}")]
    Universe(String),

    /// No cache entry exists
    #[error("No cached dataset found in {}", .dir.display())]
    CacheMiss {
        /// Cache directory that was searched
        dir: PathBuf,
    },

    /// A cache entry with the same key already exists
    #[error("Cache entry already exists: {}", .path.display())]
    CacheEntryExists {
        /// Path of the existing entry
        path: PathBuf,
    },

    /// Required API key is not configured
    #[error("Missing API key: set {0}")]
    MissingApiKey(&'static str),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
