//! Quarterly balance-sheet parsing for the fundamentals-timeseries endpoint.

use crate::error::{DataError, Result};
use chrono::{DateTime, NaiveDate, Utc};
use hobart_metrics::{LineItem, RawFinancialRecord};
use serde_json::Value;
use std::collections::BTreeMap;

const TIMESERIES_URL: &str =
    "https://query2.finance.yahoo.com/ws/fundamentals-timeseries/v1/finance/timeseries";

/// Prefix Yahoo puts in front of quarterly series keys.
const QUARTERLY_PREFIX: &str = "quarterly";

/// Build the timeseries request URL for the required line items.
pub fn timeseries_url(symbol: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> String {
    let types = LineItem::REQUIRED
        .iter()
        .map(|item| format!("{QUARTERLY_PREFIX}{}", item.series_key()))
        .collect::<Vec<_>>()
        .join(",");

    format!(
        "{TIMESERIES_URL}/{symbol}?symbol={symbol}&type={types}&period1={}&period2={}",
        start.timestamp(),
        end.timestamp()
    )
}

/// Reported values of one series, by period end date.
type Series = BTreeMap<NaiveDate, Option<f64>>;

/// Parse a timeseries payload into a record for the most recent quarter.
///
/// A line item is present when its series reports at least one period. The
/// record period is the latest date across all series; a series without a
/// figure for that date is present with a missing value.
pub fn parse_timeseries(ticker: &str, body: &str) -> Result<RawFinancialRecord> {
    let payload: Value = serde_json::from_str(body)?;
    let timeseries = payload
        .get("timeseries")
        .ok_or_else(|| DataError::Parse("missing `timeseries` object".to_string()))?;

    if let Some(error) = timeseries.get("error").filter(|e| !e.is_null()) {
        return Err(DataError::YahooApi(error.to_string()));
    }

    let results = timeseries
        .get("result")
        .and_then(Value::as_array)
        .ok_or_else(|| DataError::Parse("missing `timeseries.result` array".to_string()))?;

    let mut rows: BTreeMap<LineItem, Series> = BTreeMap::new();
    for result in results {
        let Some(key) = result
            .pointer("/meta/type/0")
            .and_then(Value::as_str)
        else {
            continue;
        };
        let Some(item) = key
            .strip_prefix(QUARTERLY_PREFIX)
            .and_then(LineItem::from_series_key)
        else {
            continue;
        };

        let series = parse_series(result.get(key));
        if !series.is_empty() {
            rows.insert(item, series);
        }
    }

    let Some(period) = rows.values().filter_map(|s| s.keys().next_back()).max().copied() else {
        return Err(DataError::MissingData {
            symbol: ticker.to_string(),
            reason: "no quarterly balance sheet reported".to_string(),
        });
    };

    let record = rows
        .into_iter()
        .fold(RawFinancialRecord::new(ticker).with_period(period), |record, (item, series)| {
            record.with_field(item.label(), series.get(&period).copied().flatten())
        });

    Ok(record)
}

fn parse_series(points: Option<&Value>) -> Series {
    points
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(|point| {
            let date = point
                .get("asOfDate")
                .and_then(Value::as_str)
                .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())?;
            let value = point.pointer("/reportedValue/raw").and_then(Value::as_f64);
            Some((date, value))
        })
        .collect()
}
