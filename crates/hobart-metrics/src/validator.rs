//! Required-field validation for raw financial records.

use crate::record::{LineItem, RawFinancialRecord};
use std::collections::HashSet;
use thiserror::Error;

/// A record lacks line items needed for ratio computation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{ticker} is missing required line items: {}", format_missing(.missing))]
pub struct ValidationError {
    /// Ticker of the rejected record
    pub ticker: String,
    /// Every required line item that was absent
    pub missing: Vec<LineItem>,
}

fn format_missing(missing: &[LineItem]) -> String {
    missing
        .iter()
        .map(LineItem::label)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Returns true iff every required line item appears among `names`.
///
/// Only membership is checked; the values are not inspected.
pub fn has_required_fields<'a, I>(names: I) -> bool
where
    I: IntoIterator<Item = &'a str>,
{
    let present: HashSet<&str> = names.into_iter().collect();
    LineItem::REQUIRED
        .iter()
        .all(|item| present.contains(item.label()))
}

/// Validate a record, naming the missing items on failure.
pub fn validate(record: &RawFinancialRecord) -> Result<(), ValidationError> {
    let missing: Vec<LineItem> = LineItem::REQUIRED
        .into_iter()
        .filter(|item| !record.has(*item))
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ValidationError {
            ticker: record.ticker().to_string(),
            missing,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn complete_record() -> RawFinancialRecord {
        LineItem::REQUIRED
            .into_iter()
            .fold(RawFinancialRecord::new("KO"), |record, item| {
                record.with_item(item, 1.0)
            })
    }

    #[rstest]
    #[case(LineItem::CurrentAssets)]
    #[case(LineItem::CurrentLiabilities)]
    #[case(LineItem::Inventory)]
    #[case(LineItem::CashAndShortTermInvestments)]
    #[case(LineItem::TotalLiabilities)]
    #[case(LineItem::CommonStockEquity)]
    #[case(LineItem::CurrentCapitalLeaseObligation)]
    fn test_any_missing_item_rejects(#[case] dropped: LineItem) {
        let record = LineItem::REQUIRED
            .into_iter()
            .filter(|item| *item != dropped)
            .fold(RawFinancialRecord::new("KO"), |record, item| {
                record.with_item(item, 1.0)
            });

        assert!(!has_required_fields(record.field_names()));

        let err = validate(&record).unwrap_err();
        assert_eq!(err.ticker, "KO");
        assert_eq!(err.missing, vec![dropped]);
    }

    #[test]
    fn test_extra_fields_accepted() {
        let record = complete_record()
            .with_field("Goodwill", Some(12.0))
            .with_field("Treasury Shares Number", None);

        assert!(has_required_fields(record.field_names()));
        assert!(validate(&record).is_ok());
    }

    #[test]
    fn test_present_rows_without_values_pass() {
        let record = LineItem::REQUIRED
            .into_iter()
            .fold(RawFinancialRecord::new("KO"), |record, item| {
                record.with_field(item.label(), None)
            });

        assert!(validate(&record).is_ok());
    }

    #[test]
    fn test_empty_record_lists_everything() {
        let err = validate(&RawFinancialRecord::new("ZZZ")).unwrap_err();
        assert_eq!(err.missing.len(), LineItem::REQUIRED.len());
        assert!(err.to_string().starts_with("ZZZ is missing required line items: Current Assets"));
    }

    #[test]
    fn test_plain_name_list() {
        let names: Vec<&str> = LineItem::REQUIRED.iter().map(LineItem::label).collect();
        assert!(has_required_fields(names.iter().copied()));
        assert!(!has_required_fields(names[..6].iter().copied()));
        assert!(!has_required_fields(std::iter::empty()));
    }
}
