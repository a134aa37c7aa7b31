//! Yahoo Finance data providers.

pub mod balance_sheet;
pub mod fundamentals;
pub mod valuation;

pub use fundamentals::{YahooFinancialsProvider, yahoo_symbol};
