//! Universe read from a local CSV file.

use crate::error::{DataError, Result};
use crate::provider::UniverseProvider;
use hobart_metrics::{Universe, UniverseEntry};
use std::path::{Path, PathBuf};

/// Reads constituents from a CSV file with `Symbol`, `Security`,
/// `GICS Sector` and `GICS Sub-Industry` columns. Other columns are ignored.
#[derive(Debug, Clone)]
pub struct CsvUniverseProvider {
    path: PathBuf,
}

impl CsvUniverseProvider {
    /// Create a provider for the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the file synchronously.
    pub fn read(&self) -> Result<Universe> {
        let mut reader = ::csv::Reader::from_path(&self.path).map_err(|e| {
            DataError::Universe(format!("cannot open {}: {e}", self.path.display()))
        })?;

        let entries = reader
            .deserialize::<UniverseEntry>()
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| DataError::Universe(format!("{}: {e}", self.path.display())))?;

        if entries.is_empty() {
            return Err(DataError::Universe(format!(
                "{} lists no constituents",
                self.path.display()
            )));
        }

        Ok(Universe::new(entries))
    }
}

impl UniverseProvider for CsvUniverseProvider {
    async fn fetch_universe(&self) -> Result<Universe> {
        self.read()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_reads_entries_in_order() {
        let file = write_file(
            "Symbol,Security,GICS Sector,GICS Sub-Industry,CIK\n\
             MMM,3M,Industrials,Industrial Conglomerates,66740\n\
             BRK.B,Berkshire Hathaway,Financials,Multi-Sector Holdings,1067983\n",
        );
        let universe = CsvUniverseProvider::new(file.path())
            .fetch_universe()
            .await
            .unwrap();

        assert_eq!(universe.symbols(), vec!["MMM", "BRK.B"]);
        assert_eq!(universe.entries()[1].sub_industry, "Multi-Sector Holdings");
    }

    #[test]
    fn test_missing_column_is_universe_error() {
        let file = write_file("Symbol,Security\nMMM,3M\n");
        assert!(matches!(
            CsvUniverseProvider::new(file.path()).read(),
            Err(DataError::Universe(_))
        ));
    }

    #[test]
    fn test_empty_and_missing_files() {
        let file = write_file("Symbol,Security,GICS Sector,GICS Sub-Industry\n");
        assert!(matches!(
            CsvUniverseProvider::new(file.path()).read(),
            Err(DataError::Universe(_))
        ));
        assert!(matches!(
            CsvUniverseProvider::new("/nonexistent/universe.csv").read(),
            Err(DataError::Universe(_))
        ));
    }
}
