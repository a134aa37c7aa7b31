//! Universe sources: the published S&P 500 constituents table or a local CSV.

pub mod csv;
pub mod wikipedia;

pub use self::csv::CsvUniverseProvider;
pub use wikipedia::{WikipediaSp500Provider, parse_constituents_html};
