//! Wire types for the ticker reference endpoint.

use serde::{Deserialize, Serialize};

/// A ticker record as returned by the reference API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticker {
    /// Exchange symbol.
    pub ticker: String,
    /// Company or asset name.
    #[serde(default)]
    pub name: String,
    /// Market type (stocks, forex, crypto, ...).
    #[serde(default)]
    pub market: String,
    /// Locale (e.g. "us").
    #[serde(default)]
    pub locale: String,
    /// Primary listing exchange MIC.
    #[serde(default)]
    pub primary_exchange: Option<String>,
    /// Security type code (CS, ETF, ...).
    #[serde(default, rename = "type")]
    pub security_type: Option<String>,
    /// Whether the ticker is actively traded.
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub currency_name: Option<String>,
    #[serde(default)]
    pub cik: Option<String>,
    #[serde(default)]
    pub composite_figi: Option<String>,
    #[serde(default)]
    pub share_class_figi: Option<String>,
    #[serde(default)]
    pub last_updated_utc: Option<String>,
}

impl Ticker {
    /// Human readable name for the primary exchange.
    pub fn exchange_display(&self) -> Option<&str> {
        self.primary_exchange.as_deref().map(|code| match code {
            "XNAS" => "NASDAQ",
            "XNYS" => "NYSE",
            other => other,
        })
    }
}

/// One page of the tickers listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickersResponse {
    /// Records on this page; may be missing or null.
    #[serde(default)]
    pub results: Option<Vec<Ticker>>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub request_id: String,
    #[serde(default)]
    pub count: u64,
    /// Continuation URL carrying the next page cursor.
    #[serde(default)]
    pub next_url: Option<String>,
}

impl TickersResponse {
    /// Records on this page, empty when the API omitted them.
    pub fn results(&self) -> &[Ticker] {
        self.results.as_deref().unwrap_or_default()
    }
}

/// Error body returned alongside non-success statuses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub request_id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ApiErrorBody {
    /// Best available human message, if any.
    pub fn message(&self) -> Option<&str> {
        fn present(field: &Option<String>) -> Option<&str> {
            field.as_deref().filter(|m| !m.trim().is_empty())
        }
        present(&self.message).or_else(|| present(&self.error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_deserialize_page() {
        let json = r#"{
            "results": [{
                "ticker": "AAPL",
                "name": "Apple Inc.",
                "market": "stocks",
                "locale": "us",
                "primary_exchange": "XNAS",
                "type": "CS",
                "active": true,
                "currency_name": "usd"
            }],
            "status": "OK",
            "request_id": "abc",
            "count": 1,
            "next_url": "https://api.polygon.io/v3/reference/tickers?cursor=xyz"
        }"#;

        let page: TickersResponse = serde_json::from_str(json).unwrap();
        assert_eq!(page.results().len(), 1);
        let ticker = &page.results()[0];
        assert_eq!(ticker.ticker, "AAPL");
        assert_eq!(ticker.security_type.as_deref(), Some("CS"));
        assert_eq!(ticker.exchange_display(), Some("NASDAQ"));
        assert!(page.next_url.is_some());
    }

    #[test]
    fn test_null_results_are_empty() {
        let page: TickersResponse =
            serde_json::from_str(r#"{"results": null, "status": "OK", "request_id": "1", "count": 0}"#)
                .unwrap();
        assert!(page.results().is_empty());

        let page: TickersResponse = serde_json::from_str(r#"{"status": "OK"}"#).unwrap();
        assert!(page.results().is_empty());
    }

    #[test]
    fn test_error_body_message() {
        let body: ApiErrorBody =
            serde_json::from_str(r#"{"status":"ERROR","request_id":"1","error":"bad"}"#).unwrap();
        assert_eq!(body.message(), Some("bad"));

        let body: ApiErrorBody = serde_json::from_str(r#"{"message":"  "}"#).unwrap();
        assert_eq!(body.message(), None);

        let body: ApiErrorBody =
            serde_json::from_str(r#"{"message":"","error":"Unknown API Key"}"#).unwrap();
        assert_eq!(body.message(), Some("Unknown API Key"));
    }

    #[test]
    fn test_exchange_display_passthrough() {
        let ticker = Ticker {
            ticker: "X".into(),
            name: String::new(),
            market: "stocks".into(),
            locale: "us".into(),
            primary_exchange: Some("XNYS".into()),
            security_type: None,
            active: true,
            currency_name: None,
            cik: None,
            composite_figi: None,
            share_class_figi: None,
            last_updated_utc: None,
        };
        assert_eq!(ticker.exchange_display(), Some("NYSE"));

        let other = Ticker {
            primary_exchange: Some("ARCX".into()),
            ..ticker
        };
        assert_eq!(other.exchange_display(), Some("ARCX"));
    }
}
