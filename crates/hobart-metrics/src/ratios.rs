//! Ratio calculation from validated balance-sheet records.
//!
//! Every formula propagates a missing operand as a missing result. Division is
//! unchecked: a zero denominator yields an infinite or NaN ratio and the value
//! is kept as computed.

use crate::dataset::MetricsRecord;
use crate::record::{LineItem, RawFinancialRecord};

fn ratio(numerator: Option<f64>, denominator: Option<f64>) -> Option<f64> {
    numerator.zip(denominator).map(|(n, d)| n / d)
}

/// Current assets over current liabilities.
pub fn current_ratio(record: &RawFinancialRecord) -> Option<f64> {
    ratio(
        record.value(LineItem::CurrentAssets),
        record.value(LineItem::CurrentLiabilities),
    )
}

/// Current assets less inventory, over current liabilities.
pub fn quick_ratio(record: &RawFinancialRecord) -> Option<f64> {
    let liquid = record
        .value(LineItem::CurrentAssets)
        .zip(record.value(LineItem::Inventory))
        .map(|(assets, inventory)| assets - inventory);
    ratio(liquid, record.value(LineItem::CurrentLiabilities))
}

/// Total liabilities over common stock equity.
pub fn debt_to_equity(record: &RawFinancialRecord) -> Option<f64> {
    ratio(
        record.value(LineItem::TotalLiabilities),
        record.value(LineItem::CommonStockEquity),
    )
}

/// Cash and short-term investments net of the current lease obligation.
///
/// Absent whenever the lease obligation is absent; it never defaults to the
/// bare cash figure.
pub fn free_cash_flow(record: &RawFinancialRecord) -> Option<f64> {
    let lease = record.value(LineItem::CurrentCapitalLeaseObligation)?;
    record
        .value(LineItem::CashAndShortTermInvestments)
        .map(|cash| cash - lease)
}

/// Compute the full metrics row for a record.
///
/// Callers are expected to have validated the record first; this function
/// never fails and simply reports missing inputs as missing metrics.
pub fn compute_metrics(record: &RawFinancialRecord) -> MetricsRecord {
    let valuation = record.valuation();

    MetricsRecord {
        ticker: record.ticker().to_string(),
        current_ratio: current_ratio(record),
        quick_ratio: quick_ratio(record),
        debt_to_equity: debt_to_equity(record),
        pe_ratio: valuation.forward_pe,
        dividend_yield: valuation.dividend_yield,
        payout_ratio: valuation.payout_ratio,
        free_cash_flow: free_cash_flow(record),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Valuation;
    use approx::assert_relative_eq;

    fn balance_sheet() -> RawFinancialRecord {
        RawFinancialRecord::new("JNJ")
            .with_item(LineItem::CurrentAssets, 150.0)
            .with_item(LineItem::CurrentLiabilities, 100.0)
            .with_item(LineItem::Inventory, 50.0)
            .with_item(LineItem::CashAndShortTermInvestments, 80.0)
            .with_item(LineItem::TotalLiabilities, 200.0)
            .with_item(LineItem::CommonStockEquity, 100.0)
            .with_item(LineItem::CurrentCapitalLeaseObligation, 30.0)
    }

    #[test]
    fn test_liquidity_ratios() {
        let metrics = compute_metrics(&balance_sheet());
        assert_relative_eq!(metrics.current_ratio.unwrap(), 1.5);
        assert_relative_eq!(metrics.quick_ratio.unwrap(), 1.0);
    }

    #[test]
    fn test_debt_to_equity() {
        let metrics = compute_metrics(&balance_sheet());
        assert_relative_eq!(metrics.debt_to_equity.unwrap(), 2.0);
    }

    #[test]
    fn test_free_cash_flow_nets_lease() {
        let metrics = compute_metrics(&balance_sheet());
        assert_relative_eq!(metrics.free_cash_flow.unwrap(), 50.0);
    }

    #[test]
    fn test_free_cash_flow_absent_without_lease() {
        let record = RawFinancialRecord::new("JNJ")
            .with_item(LineItem::CashAndShortTermInvestments, 80.0);
        assert_eq!(free_cash_flow(&record), None);

        let record = record.with_field(LineItem::CurrentCapitalLeaseObligation.label(), None);
        assert_eq!(free_cash_flow(&record), None);
    }

    #[test]
    fn test_valuation_copied_through() {
        let record = balance_sheet().with_valuation(Valuation {
            forward_pe: Some(15.2),
            dividend_yield: Some(0.031),
            payout_ratio: None,
        });
        let metrics = compute_metrics(&record);

        assert_eq!(metrics.pe_ratio, Some(15.2));
        assert_eq!(metrics.dividend_yield, Some(0.031));
        assert_eq!(metrics.payout_ratio, None);
    }

    #[test]
    fn test_zero_denominator_propagates() {
        let record = balance_sheet()
            .with_item(LineItem::CurrentLiabilities, 0.0)
            .with_item(LineItem::CommonStockEquity, 0.0)
            .with_item(LineItem::TotalLiabilities, 0.0);
        let metrics = compute_metrics(&record);

        assert_eq!(metrics.current_ratio, Some(f64::INFINITY));
        assert!(metrics.debt_to_equity.unwrap().is_nan());
    }

    #[test]
    fn test_missing_operand_degrades_single_field() {
        let record = balance_sheet().with_field(LineItem::Inventory.label(), None);
        let metrics = compute_metrics(&record);

        assert_eq!(metrics.quick_ratio, None);
        assert!(metrics.current_ratio.is_some());
        assert!(metrics.debt_to_equity.is_some());
    }

    #[test]
    fn test_deterministic() {
        let record = balance_sheet();
        assert_eq!(compute_metrics(&record), compute_metrics(&record));
    }
}
