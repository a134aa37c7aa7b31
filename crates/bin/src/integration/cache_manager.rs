//! Cache inspection for the `cache` command.

use chrono::Local;
use hobart_data::{CacheConfig, DataError, DatasetCache};

/// Print every cache entry, oldest first, and whether the newest is stale.
pub(crate) fn print_cache_info(config: &CacheConfig) -> Result<(), DataError> {
    let cache = DatasetCache::new(config.clone());
    let entries = cache.entries()?;
    let now = Local::now().naive_local();

    println!("Cache Status:");
    println!("  Location: {}", config.dir.display());
    println!("  Stale after: {} days", config.stale_days);

    if entries.is_empty() {
        println!("  Entries: none (next screen fetches fresh data)");
        return Ok(());
    }

    println!("  Entries: {}\n", entries.len());
    let last = entries.len() - 1;
    for (i, entry) in entries.iter().enumerate() {
        let name = entry
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let marker = if i == last { "*" } else { " " };
        println!(
            "  {} {:<34} {:>5} days old",
            marker,
            name,
            entry.age_days(now)
        );
    }

    let status = if cache.is_stale_at(now)? {
        "stale (next screen rebuilds the dataset)"
    } else {
        "fresh"
    };
    println!("\n  Current entry: {}", status);
    Ok(())
}
