//! Flat-file cache of computed metrics datasets.
//!
//! Each snapshot is one CSV file named `<YYYY_MM_DD_HH_MM>_fin_screen.csv`.
//! The timestamp in the name is the creation time; the newest entry is the
//! current one and staleness is measured from it.

use crate::error::{DataError, Result};
use chrono::{Local, NaiveDateTime};
use hobart_metrics::{MetricsDataset, MetricsRecord};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// Timestamp format encoded in entry file names.
pub const TIMESTAMP_FORMAT: &str = "%Y_%m_%d_%H_%M";

/// File name suffix shared by every entry.
pub const ENTRY_SUFFIX: &str = "_fin_screen.csv";

/// Default staleness threshold in days.
pub const DEFAULT_STALE_DAYS: i64 = 60;

/// Cache location and staleness policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Directory holding the entries
    pub dir: PathBuf,
    /// Entries older than this many whole days are stale
    pub stale_days: i64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            dir: std::env::temp_dir(),
            stale_days: DEFAULT_STALE_DAYS,
        }
    }
}

/// A cache file and the creation time decoded from its name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    /// Full path of the file
    pub path: PathBuf,
    /// Creation time, minute resolution
    pub created: NaiveDateTime,
}

impl CacheEntry {
    /// Decode an entry from a file name, or `None` if the name is not one.
    pub fn from_path(path: PathBuf) -> Option<Self> {
        let name = path.file_name()?.to_str()?;
        if !name.ends_with(".csv") || !name.contains("fin_screen") {
            return None;
        }
        let stamp = name.strip_suffix(ENTRY_SUFFIX)?;
        let created = NaiveDateTime::parse_from_str(stamp, TIMESTAMP_FORMAT).ok()?;
        Some(Self { path, created })
    }

    /// Age in whole days at `now`.
    pub fn age_days(&self, now: NaiveDateTime) -> i64 {
        (now - self.created).num_days()
    }
}

/// File name for an entry created at `created`.
pub fn entry_file_name(created: NaiveDateTime) -> String {
    format!("{}{}", created.format(TIMESTAMP_FORMAT), ENTRY_SUFFIX)
}

/// On-disk cache of metrics datasets.
#[derive(Debug, Clone)]
pub struct DatasetCache {
    config: CacheConfig,
}

impl DatasetCache {
    /// Create a cache over the configured directory.
    pub const fn new(config: CacheConfig) -> Self {
        Self { config }
    }

    /// Cache configuration.
    pub const fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Cache directory.
    pub fn dir(&self) -> &Path {
        &self.config.dir
    }

    /// All entries, oldest first. A missing directory has no entries.
    pub fn entries(&self) -> Result<Vec<CacheEntry>> {
        let read_dir = match fs::read_dir(&self.config.dir) {
            Ok(read_dir) => read_dir,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut entries = Vec::new();
        for item in read_dir {
            let path = item?.path();
            if let Some(entry) = CacheEntry::from_path(path) {
                entries.push(entry);
            }
        }

        // Sort on the decoded time, not the file name.
        entries.sort_by(|a, b| a.created.cmp(&b.created).then_with(|| a.path.cmp(&b.path)));
        Ok(entries)
    }

    /// The most recent entry, if any.
    pub fn latest(&self) -> Result<Option<CacheEntry>> {
        Ok(self.entries()?.pop())
    }

    /// Whether the cache must be recomputed, against local wall-clock time.
    pub fn is_stale(&self) -> Result<bool> {
        self.is_stale_at(Local::now().naive_local())
    }

    /// Whether the cache must be recomputed at `now`.
    ///
    /// Stale when there is no entry, or when the newest entry is more than
    /// `stale_days` whole days old.
    pub fn is_stale_at(&self, now: NaiveDateTime) -> Result<bool> {
        let Some(latest) = self.latest()? else {
            debug!(dir = %self.config.dir.display(), "no cache entries");
            return Ok(true);
        };

        let age = latest.age_days(now);
        debug!(
            entry = %latest.path.display(),
            age_days = age,
            stale_days = self.config.stale_days,
            "checked cache age"
        );
        Ok(age > self.config.stale_days)
    }

    /// Persist `dataset` as a new entry stamped with the current local time.
    pub fn write(&self, dataset: &MetricsDataset) -> Result<PathBuf> {
        self.write_at(dataset, Local::now().naive_local())
    }

    /// Persist `dataset` as a new entry stamped `created`.
    ///
    /// Never overwrites: an entry for the same minute fails with
    /// [`DataError::CacheEntryExists`]. Rows are staged in a temporary file
    /// in the cache directory, so a failed write leaves no entry behind.
    pub fn write_at(&self, dataset: &MetricsDataset, created: NaiveDateTime) -> Result<PathBuf> {
        let path = self.commit_entry(created, |staged| write_rows(staged, dataset))?;
        debug!(entry = %path.display(), rows = dataset.len(), "wrote cache entry");
        Ok(path)
    }

    fn commit_entry<F>(&self, created: NaiveDateTime, fill: F) -> Result<PathBuf>
    where
        F: FnOnce(&mut NamedTempFile) -> Result<()>,
    {
        fs::create_dir_all(&self.config.dir)?;
        let path = self.config.dir.join(entry_file_name(created));
        if path.exists() {
            return Err(DataError::CacheEntryExists { path });
        }

        // Dropping the staged file on any early return deletes it.
        let mut staged = NamedTempFile::new_in(&self.config.dir)?;
        fill(&mut staged)?;
        staged.as_file().sync_all()?;

        staged.persist_noclobber(&path).map_err(|e| {
            if e.error.kind() == io::ErrorKind::AlreadyExists {
                DataError::CacheEntryExists { path: path.clone() }
            } else {
                e.error.into()
            }
        })?;
        Ok(path)
    }

    /// Load the newest entry.
    pub fn load_latest(&self) -> Result<MetricsDataset> {
        let latest = self.latest()?.ok_or_else(|| DataError::CacheMiss {
            dir: self.config.dir.clone(),
        })?;
        read_entry(&latest.path)
    }
}

fn write_rows<W: Write>(out: W, dataset: &MetricsDataset) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    if dataset.is_empty() {
        writer.write_record(MetricsRecord::COLUMNS)?;
    }
    for record in dataset {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Read one entry file back into a dataset.
pub fn read_entry(path: &Path) -> Result<MetricsDataset> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut dataset = MetricsDataset::new();
    for row in reader.deserialize::<MetricsRecord>() {
        let record = row?;
        if !dataset.insert(record) {
            debug!(entry = %path.display(), "skipped duplicate ticker in cache entry");
        }
    }
    Ok(dataset)
}
