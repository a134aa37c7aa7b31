//! Validate, compute, filter and join working together on raw records.

use approx::assert_relative_eq;
use hobart_metrics::{
    LineItem, MetricsDataset, RawFinancialRecord, ScreeningCriteria, UniverseEntry, Valuation,
    compute_metrics, filter_dataset, join_universe, validate,
};
use rstest::rstest;

fn strong(ticker: &str) -> RawFinancialRecord {
    RawFinancialRecord::new(ticker)
        .with_item(LineItem::CurrentAssets, 500.0)
        .with_item(LineItem::CurrentLiabilities, 200.0)
        .with_item(LineItem::Inventory, 100.0)
        .with_item(LineItem::CashAndShortTermInvestments, 80.0)
        .with_item(LineItem::TotalLiabilities, 60.0)
        .with_item(LineItem::CommonStockEquity, 300.0)
        .with_item(LineItem::CurrentCapitalLeaseObligation, 10.0)
        .with_valuation(Valuation {
            forward_pe: Some(12.0),
            dividend_yield: Some(0.04),
            payout_ratio: Some(0.35),
        })
}

fn screen(records: Vec<RawFinancialRecord>) -> MetricsDataset {
    let dataset: MetricsDataset = records
        .iter()
        .filter(|record| validate(record).is_ok())
        .map(compute_metrics)
        .collect();
    filter_dataset(&dataset, &ScreeningCriteria::default())
}

#[test]
fn test_strong_record_survives_pipeline() {
    let passed = screen(vec![strong("KO")]);
    let record = passed.get("KO").unwrap();

    assert_relative_eq!(record.current_ratio.unwrap(), 2.5);
    assert_relative_eq!(record.quick_ratio.unwrap(), 2.0);
    assert_relative_eq!(record.debt_to_equity.unwrap(), 0.2);
    assert_relative_eq!(record.free_cash_flow.unwrap(), 70.0);
}

#[test]
fn test_lease_row_without_figure_excludes_record() {
    let record = strong("KO").with_field(LineItem::CurrentCapitalLeaseObligation.label(), None);

    assert!(validate(&record).is_ok());
    assert_eq!(compute_metrics(&record).free_cash_flow, None);
    assert!(screen(vec![record]).is_empty());
}

#[rstest]
#[case::no_pe(Valuation { forward_pe: None, dividend_yield: Some(0.04), payout_ratio: Some(0.35) })]
#[case::no_payout(Valuation { forward_pe: Some(12.0), dividend_yield: Some(0.04), payout_ratio: None })]
#[case::no_valuation(Valuation::default())]
fn test_missing_valuation_excludes_record(#[case] valuation: Valuation) {
    let record = strong("KO").with_valuation(valuation);
    assert!(screen(vec![record]).is_empty());
}

#[test]
fn test_zero_current_liabilities_excludes_record() {
    let record = strong("ZEROCL").with_item(LineItem::CurrentLiabilities, 0.0);
    let metrics = compute_metrics(&record);

    assert_eq!(metrics.current_ratio, Some(f64::INFINITY));
    assert_eq!(screen(vec![record, strong("KO")]).tickers(), vec!["KO"]);
}

#[test]
fn test_join_keeps_order_and_drops_unknown() {
    let passed = screen(vec![strong("ZZZ"), strong("PG"), strong("KO")]);
    let universe = vec![
        UniverseEntry::new("KO", "Coca-Cola Company", "Consumer Staples", "Soft Drinks"),
        UniverseEntry::new("PG", "Procter & Gamble", "Consumer Staples", "Personal Products"),
    ];

    let rows = join_universe(&passed, &universe);
    let tickers: Vec<&str> = rows.iter().map(|r| r.ticker()).collect();

    assert_eq!(passed.len(), 3);
    assert_eq!(tickers, vec!["PG", "KO"]);
}
