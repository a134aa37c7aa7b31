//! Screening results as a Polars `DataFrame`.

use crate::export::ScreenRow;
use hobart_metrics::ScreenedCompany;
use polars::prelude::*;

/// Build a frame with one row per company and the export column names.
///
/// Absent metrics become nulls.
pub fn to_dataframe(rows: &[ScreenedCompany]) -> PolarsResult<DataFrame> {
    let rows: Vec<ScreenRow> = rows.iter().map(ScreenRow::from).collect();

    let [ticker, sector, sub_industry, current, quick, de, pe, yield_, payout, fcf] =
        ScreenRow::COLUMNS;

    DataFrame::new(vec![
        text_column(&rows, ticker, |r| r.ticker.as_str()),
        text_column(&rows, sector, |r| r.sector.as_str()),
        text_column(&rows, sub_industry, |r| r.sub_industry.as_str()),
        number_column(&rows, current, |r| r.current_ratio),
        number_column(&rows, quick, |r| r.quick_ratio),
        number_column(&rows, de, |r| r.debt_to_equity),
        number_column(&rows, pe, |r| r.pe_ratio),
        number_column(&rows, yield_, |r| r.dividend_yield),
        number_column(&rows, payout, |r| r.payout_ratio),
        number_column(&rows, fcf, |r| r.free_cash_flow),
    ])
}

fn text_column(rows: &[ScreenRow], name: &str, f: impl Fn(&ScreenRow) -> &str) -> Column {
    let values: Vec<&str> = rows.iter().map(f).collect();
    Series::new(name.into(), values).into()
}

fn number_column(
    rows: &[ScreenRow],
    name: &str,
    f: impl Fn(&ScreenRow) -> Option<f64>,
) -> Column {
    let values: Vec<Option<f64>> = rows.iter().map(f).collect();
    Series::new(name.into(), values).into()
}
