//! Plain-text and Markdown reports of screening results.

use chrono::{DateTime, Utc};
use hobart_metrics::{ScreenedCompany, ScreeningCriteria};
use std::fmt;

const RULE_WIDTH: usize = 118;

/// A rendered view over one screening run.
#[derive(Debug, Clone)]
pub struct ScreenReport<'a> {
    rows: &'a [ScreenedCompany],
    criteria: ScreeningCriteria,
    generated: DateTime<Utc>,
    source: Option<String>,
}

impl<'a> ScreenReport<'a> {
    /// Create a report for `rows` screened with `criteria`.
    pub fn new(rows: &'a [ScreenedCompany], criteria: ScreeningCriteria) -> Self {
        Self {
            rows,
            criteria,
            generated: Utc::now(),
            source: None,
        }
    }

    /// Describe where the metrics came from, e.g. a cache file.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Fix the generation timestamp.
    pub const fn with_generated(mut self, generated: DateTime<Utc>) -> Self {
        self.generated = generated;
        self
    }

    /// Rows in the report.
    pub const fn rows(&self) -> &[ScreenedCompany] {
        self.rows
    }

    /// Render as a fixed-width text table.
    pub fn to_ascii_table(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "\nFundamental Screen: {} companies passed\n",
            self.rows.len()
        ));
        output.push_str(&format!(
            "Generated: {}\n",
            self.generated.format("%Y-%m-%d %H:%M UTC")
        ));
        if let Some(source) = &self.source {
            output.push_str(&format!("Source: {}\n", source));
        }
        output.push_str(&format!("Criteria: {}\n", criteria_line(&self.criteria)));
        output.push_str(&"=".repeat(RULE_WIDTH));
        output.push('\n');

        output.push_str(&format!(
            "{:<8} {:<24} {:<28} {:>8} {:>8} {:>8} {:>8} {:>8} {:>8} {:>12}\n",
            "Ticker", "Sector", "Sub-Industry", "Current", "Quick", "D/E", "P/E", "Yield", "Payout", "FCF"
        ));
        output.push_str(&"-".repeat(RULE_WIDTH));
        output.push('\n');

        for row in self.rows {
            let m = &row.metrics;
            output.push_str(&format!(
                "{:<8} {:<24} {:<28} {:>8} {:>8} {:>8} {:>8} {:>8} {:>8} {:>12}\n",
                m.ticker,
                truncate(&row.entry.sector, 24),
                truncate(&row.entry.sub_industry, 28),
                ratio(m.current_ratio),
                ratio(m.quick_ratio),
                ratio(m.debt_to_equity),
                ratio(m.pe_ratio),
                percent(m.dividend_yield),
                percent(m.payout_ratio),
                money(m.free_cash_flow),
            ));
        }

        output.push_str(&"=".repeat(RULE_WIDTH));
        output.push('\n');
        output
    }

    /// Render as a Markdown document.
    pub fn to_markdown(&self) -> String {
        let mut output = String::new();

        output.push_str("# Fundamental Screen\n\n");
        output.push_str(&format!(
            "**Generated:** {}\n\n",
            self.generated.format("%Y-%m-%d %H:%M UTC")
        ));
        if let Some(source) = &self.source {
            output.push_str(&format!("**Source:** {}\n\n", source));
        }

        output.push_str("## Criteria\n\n");
        let c = &self.criteria;
        output.push_str(&format!("- **Current Ratio** > {}\n", c.min_current_ratio));
        output.push_str(&format!("- **Debt to Equity** < {}\n", c.max_debt_to_equity));
        output.push_str(&format!("- **P/E Ratio** < {}\n", c.max_pe_ratio));
        output.push_str(&format!(
            "- **Dividend Yield** > {:.2}%\n",
            c.min_dividend_yield * 100.0
        ));
        output.push_str(&format!("- **Payout Ratio** < {}\n", c.max_payout_ratio));
        output.push_str("- **Free Cash Flow** > 0\n\n");

        output.push_str(&format!("## Results ({})\n\n", self.rows.len()));
        output.push_str("| Ticker | GICS Sector | GICS Sub-Industry | Current Ratio | Quick Ratio | Debt to Equity | P/E Ratio | Dividend Yield | Payout Ratio | Free Cash Flow |\n");
        output.push_str("|--------|-------------|-------------------|--------------:|------------:|---------------:|----------:|---------------:|-------------:|---------------:|\n");

        for row in self.rows {
            let m = &row.metrics;
            output.push_str(&format!(
                "| {} | {} | {} | {} | {} | {} | {} | {} | {} | {} |\n",
                m.ticker,
                row.entry.sector,
                row.entry.sub_industry,
                ratio(m.current_ratio),
                ratio(m.quick_ratio),
                ratio(m.debt_to_equity),
                ratio(m.pe_ratio),
                percent(m.dividend_yield),
                percent(m.payout_ratio),
                money(m.free_cash_flow),
            ));
        }

        output
    }
}

impl fmt::Display for ScreenReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_ascii_table())
    }
}

fn criteria_line(c: &ScreeningCriteria) -> String {
    format!(
        "current > {}, D/E < {}, P/E < {}, yield > {:.2}%, payout < {}, FCF > 0",
        c.min_current_ratio,
        c.max_debt_to_equity,
        c.max_pe_ratio,
        c.min_dividend_yield * 100.0,
        c.max_payout_ratio
    )
}

fn ratio(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.2}", v))
}

fn percent(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.2}%", v * 100.0))
}

fn money(value: Option<f64>) -> String {
    match value {
        None => "-".to_string(),
        Some(v) if !v.is_finite() => format!("{}", v),
        Some(v) if v.abs() >= 1e9 => format!("{:.2}B", v / 1e9),
        Some(v) if v.abs() >= 1e6 => format!("{:.2}M", v / 1e6),
        Some(v) => format!("{:.0}", v),
    }
}

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        return s.to_string();
    }
    let mut out: String = s.chars().take(width - 1).collect();
    out.push('~');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use hobart_metrics::{MetricsRecord, UniverseEntry};
    use rstest::rstest;

    fn rows() -> Vec<ScreenedCompany> {
        vec![ScreenedCompany {
            entry: UniverseEntry::new(
                "KO",
                "Coca-Cola Company",
                "Consumer Staples",
                "Soft Drinks & Non-alcoholic Beverages",
            ),
            metrics: MetricsRecord {
                current_ratio: Some(1.754),
                debt_to_equity: Some(0.4),
                pe_ratio: Some(18.0),
                dividend_yield: Some(0.031),
                payout_ratio: Some(0.5),
                free_cash_flow: Some(2.5e9),
                ..MetricsRecord::empty("KO")
            },
        }]
    }

    fn generated() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 8, 30, 0).unwrap()
    }

    #[test]
    fn test_ascii_table() {
        let rows = rows();
        let table = ScreenReport::new(&rows, ScreeningCriteria::default())
            .with_generated(generated())
            .with_source("cache 2024_05_01_08_30_fin_screen.csv")
            .to_ascii_table();

        assert!(table.contains("1 companies passed"));
        assert!(table.contains("Generated: 2024-05-01 08:30 UTC"));
        assert!(table.contains("Source: cache"));
        assert!(table.contains("yield > 2.00%"));
        assert!(table.contains("KO"));
        assert!(table.contains("1.75"));
        assert!(table.contains("3.10%"));
        assert!(table.contains("2.50B"));
        assert!(table.contains("Soft Drinks & Non-alcoholic~"));
    }

    #[test]
    fn test_markdown() {
        let rows = rows();
        let markdown = ScreenReport::new(&rows, ScreeningCriteria::default()).to_markdown();

        assert!(markdown.contains("# Fundamental Screen"));
        assert!(markdown.contains("- **P/E Ratio** < 20\n"));
        assert!(markdown.contains("## Results (1)"));
        assert!(markdown.contains(
            "| KO | Consumer Staples | Soft Drinks & Non-alcoholic Beverages | 1.75 | - | 0.40 | 18.00 | 3.10% | 50.00% | 2.50B |"
        ));
    }

    #[test]
    fn test_empty_report() {
        let table = ScreenReport::new(&[], ScreeningCriteria::default()).to_string();
        assert!(table.contains("0 companies passed"));
    }

    #[rstest]
    #[case(None, "-")]
    #[case(Some(-3.2e9), "-3.20B")]
    #[case(Some(45.5e6), "45.50M")]
    #[case(Some(1234.4), "1234")]
    #[case(Some(f64::NAN), "NaN")]
    fn test_money(#[case] value: Option<f64>, #[case] expected: &str) {
        assert_eq!(money(value), expected);
    }
}
