//! Integration tests for screening reports and exports.

use hobart_metrics::{
    MetricsDataset, MetricsRecord, ScreeningCriteria, UniverseEntry, filter_dataset,
    join_universe,
};
use hobart_output::{ExportFormat, Exporter, ScreenReport, to_dataframe};

fn passing(ticker: &str) -> MetricsRecord {
    MetricsRecord {
        current_ratio: Some(2.0),
        quick_ratio: Some(1.6),
        debt_to_equity: Some(0.3),
        pe_ratio: Some(15.0),
        dividend_yield: Some(0.035),
        payout_ratio: Some(0.45),
        free_cash_flow: Some(1.2e9),
        ..MetricsRecord::empty(ticker)
    }
}

fn universe() -> Vec<UniverseEntry> {
    vec![
        UniverseEntry::new("MMM", "3M", "Industrials", "Industrial Conglomerates"),
        UniverseEntry::new("KO", "Coca-Cola Company", "Consumer Staples", "Soft Drinks"),
        UniverseEntry::new("XOM", "ExxonMobil", "Energy", "Integrated Oil & Gas"),
    ]
}

#[test]
fn test_full_screen_workflow() {
    let dataset: MetricsDataset = vec![
        passing("KO"),
        MetricsRecord {
            pe_ratio: Some(35.0),
            ..passing("XOM")
        },
        passing("NOTLISTED"),
        passing("MMM"),
    ]
    .into_iter()
    .collect();

    let filtered = filter_dataset(&dataset, &ScreeningCriteria::default());
    assert_eq!(filtered.tickers(), vec!["KO", "NOTLISTED", "MMM"]);

    let rows = join_universe(&filtered, &universe());
    let tickers: Vec<&str> = rows.iter().map(|r| r.ticker()).collect();
    assert_eq!(tickers, vec!["KO", "MMM"]);

    let ascii = ScreenReport::new(&rows, ScreeningCriteria::default()).to_ascii_table();
    assert!(ascii.contains("2 companies passed"));
    assert!(ascii.contains("Industrial Conglomerates"));
    assert!(!ascii.contains("XOM"));

    let markdown = ScreenReport::new(&rows, ScreeningCriteria::default()).to_markdown();
    assert!(markdown.contains("| Ticker | GICS Sector |"));
    assert!(markdown.contains("| KO | Consumer Staples | Soft Drinks |"));

    let csv = rows.export_to_string(ExportFormat::Csv).unwrap();
    assert_eq!(csv.lines().count(), 3);
    assert!(csv.lines().nth(2).unwrap().starts_with("MMM,Industrials,"));

    let df = to_dataframe(&rows).unwrap();
    assert_eq!(df.height(), 2);
}

#[test]
fn test_nothing_passes() {
    let dataset: MetricsDataset = vec![MetricsRecord::empty("KO")].into_iter().collect();
    let rows = join_universe(
        &filter_dataset(&dataset, &ScreeningCriteria::default()),
        &universe(),
    );
    assert!(rows.is_empty());

    let json = rows.export_to_string(ExportFormat::Json).unwrap();
    assert_eq!(json, "[]");
    assert_eq!(to_dataframe(&rows).unwrap().height(), 0);
}
