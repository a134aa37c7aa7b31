//! Valuation figures from the quoteSummary endpoint.

use crate::error::{DataError, Result};
use hobart_metrics::Valuation;
use serde::Deserialize;

const QUOTE_SUMMARY_URL: &str = "https://query2.finance.yahoo.com/v10/finance/quoteSummary";

/// Modules requested from quoteSummary.
pub const MODULES: &str = "summaryDetail,defaultKeyStatistics";

/// Build the quoteSummary URL for `symbol`, without query parameters.
pub fn quote_summary_url(symbol: &str) -> String {
    format!("{QUOTE_SUMMARY_URL}/{symbol}")
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuoteSummaryResponse {
    quote_summary: QuoteSummary,
}

#[derive(Debug, Deserialize)]
struct QuoteSummary {
    #[serde(default)]
    result: Option<Vec<QuoteSummaryResult>>,
    #[serde(default)]
    error: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuoteSummaryResult {
    #[serde(default)]
    summary_detail: Option<SummaryDetail>,
    #[serde(default)]
    default_key_statistics: Option<KeyStatistics>,
}

#[derive(Debug, Deserialize)]
struct SummaryDetail {
    #[serde(rename = "forwardPE", default)]
    forward_pe: Option<RawValue>,
    #[serde(rename = "dividendYield", default)]
    dividend_yield: Option<RawValue>,
    #[serde(rename = "payoutRatio", default)]
    payout_ratio: Option<RawValue>,
}

#[derive(Debug, Deserialize)]
struct KeyStatistics {
    #[serde(rename = "forwardPE", default)]
    forward_pe: Option<RawValue>,
}

/// Yahoo wraps numbers as `{"raw": 1.23, "fmt": "1.23"}`; empty objects mean
/// no figure.
#[derive(Debug, Deserialize)]
struct RawValue {
    #[serde(default)]
    raw: Option<f64>,
}

fn raw(value: Option<&RawValue>) -> Option<f64> {
    value.and_then(|v| v.raw)
}

/// Parse forward P/E, dividend yield and payout ratio.
///
/// Forward P/E falls back to the key-statistics module when the summary
/// module lacks it. Dividend yield is already a fraction upstream.
pub fn parse_quote_summary(body: &str) -> Result<Valuation> {
    let response: QuoteSummaryResponse = serde_json::from_str(body)?;
    let summary = response.quote_summary;

    if let Some(error) = summary.error.filter(|e| !e.is_null()) {
        return Err(DataError::YahooApi(error.to_string()));
    }

    let result = summary
        .result
        .and_then(|results| results.into_iter().next())
        .ok_or_else(|| DataError::Parse("empty quoteSummary result".to_string()))?;

    let detail = result.summary_detail.as_ref();
    let stats = result.default_key_statistics.as_ref();

    Ok(Valuation {
        forward_pe: raw(detail.and_then(|d| d.forward_pe.as_ref()))
            .or_else(|| raw(stats.and_then(|s| s.forward_pe.as_ref()))),
        dividend_yield: raw(detail.and_then(|d| d.dividend_yield.as_ref())),
        payout_ratio: raw(detail.and_then(|d| d.payout_ratio.as_ref())),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_summary() {
        let body = r#"{"quoteSummary":{"result":[{
            "summaryDetail":{"forwardPE":{"raw":21.5,"fmt":"21.50"},"dividendYield":{"raw":0.0305,"fmt":"3.05%"},"payoutRatio":{"raw":0.72,"fmt":"72.00%"}},
            "defaultKeyStatistics":{"forwardPE":{"raw":22.0,"fmt":"22.00"}}
        }],"error":null}}"#;

        let valuation = parse_quote_summary(body).unwrap();
        assert_eq!(valuation.forward_pe, Some(21.5));
        assert_eq!(valuation.dividend_yield, Some(0.0305));
        assert_eq!(valuation.payout_ratio, Some(0.72));
    }

    #[test]
    fn test_forward_pe_fallback_and_missing_fields() {
        let body = r#"{"quoteSummary":{"result":[{
            "summaryDetail":{"forwardPE":{},"payoutRatio":{"raw":0.0,"fmt":"0.00%"}},
            "defaultKeyStatistics":{"forwardPE":{"raw":35.1,"fmt":"35.10"}}
        }],"error":null}}"#;

        let valuation = parse_quote_summary(body).unwrap();
        assert_eq!(valuation.forward_pe, Some(35.1));
        assert_eq!(valuation.dividend_yield, None);
        assert_eq!(valuation.payout_ratio, Some(0.0));
    }

    #[test]
    fn test_api_error() {
        let body = r#"{"quoteSummary":{"result":null,"error":{"code":"Not Found","description":"Quote not found"}}}"#;
        assert!(matches!(parse_quote_summary(body), Err(DataError::YahooApi(_))));
    }

    #[test]
    fn test_url() {
        assert_eq!(
            quote_summary_url("BRK-B"),
            "https://query2.finance.yahoo.com/v10/finance/quoteSummary/BRK-B"
        );
    }
}
