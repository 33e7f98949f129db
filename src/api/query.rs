//! Query parameters for the tickers listing and cursor handling.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use url::Url;

/// Market to list tickers for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Market {
    #[default]
    Stocks,
    Forex,
    Crypto,
    Options,
}

impl Market {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stocks => "stocks",
            Self::Forex => "forex",
            Self::Crypto => "crypto",
            Self::Options => "options",
        }
    }
}

impl fmt::Display for Market {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Field the listing is sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    #[default]
    Ticker,
    Name,
    Market,
    Locale,
    PrimaryExchange,
    Type,
    CurrencyName,
    Cik,
    CompositeFigi,
    ShareClassFigi,
    LastUpdatedUtc,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ticker => "ticker",
            Self::Name => "name",
            Self::Market => "market",
            Self::Locale => "locale",
            Self::PrimaryExchange => "primary_exchange",
            Self::Type => "type",
            Self::CurrencyName => "currency_name",
            Self::Cik => "cik",
            Self::CompositeFigi => "composite_figi",
            Self::ShareClassFigi => "share_class_figi",
            Self::LastUpdatedUtc => "last_updated_utc",
        }
    }
}

/// Parameters of one logical tickers listing.
///
/// Two queries that compare equal share cache entries and pagination.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TickerQuery {
    pub market: Market,
    pub active: bool,
    pub order: SortOrder,
    pub limit: u32,
    pub sort: SortField,
    /// Free-text prefix search, turned into a ticker range.
    pub search: Option<String>,
    /// Exact ticker match; ignored when `search` is set.
    pub ticker: Option<String>,
    pub ticker_gte: Option<String>,
    pub ticker_gt: Option<String>,
    pub ticker_lte: Option<String>,
    pub ticker_lt: Option<String>,
}

impl Default for TickerQuery {
    fn default() -> Self {
        Self {
            market: Market::Stocks,
            active: true,
            order: SortOrder::Asc,
            limit: 100,
            sort: SortField::Ticker,
            search: None,
            ticker: None,
            ticker_gte: None,
            ticker_gt: None,
            ticker_lte: None,
            ticker_lt: None,
        }
    }
}

impl TickerQuery {
    /// Query used by the explore view for a (possibly empty) search term.
    pub fn explore(search: &str, limit: u32) -> Self {
        Self::default().with_limit(limit).with_search(search)
    }

    /// Set the page size.
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// Set the search term; blank terms clear the search.
    pub fn with_search(mut self, search: &str) -> Self {
        let trimmed = search.trim();
        self.search = (!trimmed.is_empty()).then(|| trimmed.to_string());
        self
    }

    /// Build the request parameters for one page.
    pub fn to_params(&self, api_key: &str, cursor: Option<&str>) -> BTreeMap<&'static str, String> {
        let mut params = BTreeMap::new();
        params.insert("apikey", api_key.to_string());
        params.insert("market", self.market.as_str().to_string());
        params.insert("active", self.active.to_string());
        params.insert("order", self.order.as_str().to_string());
        params.insert("limit", self.limit.to_string());
        params.insert("sort", self.sort.as_str().to_string());

        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
            let upper = search.to_uppercase();
            params.insert("ticker.lt", format!("{upper}Z"));
            params.insert("ticker.gte", upper);
        } else if let Some(ticker) = &self.ticker {
            params.insert("ticker", ticker.clone());
        }

        // Explicit bounds win over the search-derived range.
        let bounds = [
            ("ticker.gte", &self.ticker_gte),
            ("ticker.gt", &self.ticker_gt),
            ("ticker.lte", &self.ticker_lte),
            ("ticker.lt", &self.ticker_lt),
        ];
        for (key, value) in bounds {
            if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
                params.insert(key, value.to_string());
            }
        }

        if let Some(cursor) = cursor.filter(|c| !c.is_empty()) {
            params.insert("cursor", cursor.to_string());
        }

        params
    }
}

/// Pull the `cursor` parameter out of a continuation URL.
///
/// Missing, empty, or unparseable input yields `None`.
pub fn extract_cursor(next_url: Option<&str>) -> Option<String> {
    let url = Url::parse(next_url?).ok()?;
    url.query_pairs()
        .find(|(key, _)| key == "cursor")
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_params() {
        let params = TickerQuery::default().to_params("key", None);
        assert_eq!(params["apikey"], "key");
        assert_eq!(params["market"], "stocks");
        assert_eq!(params["active"], "true");
        assert_eq!(params["order"], "asc");
        assert_eq!(params["limit"], "100");
        assert_eq!(params["sort"], "ticker");
        assert!(!params.contains_key("ticker.gte"));
        assert!(!params.contains_key("cursor"));
    }

    #[test]
    fn test_search_becomes_range() {
        let params = TickerQuery::explore("aapl", 50).to_params("key", None);
        assert_eq!(params["ticker.gte"], "AAPL");
        assert_eq!(params["ticker.lt"], "AAPLZ");
        assert_eq!(params["limit"], "50");
        assert!(!params.contains_key("ticker"));
    }

    #[test]
    fn test_search_is_trimmed_and_blank_ignored() {
        assert_eq!(TickerQuery::explore("  msft ", 50).search.as_deref(), Some("msft"));
        assert_eq!(TickerQuery::explore("   ", 50).search, None);
    }

    #[test]
    fn test_exact_ticker_without_search() {
        let query = TickerQuery {
            ticker: Some("IBM".into()),
            ..TickerQuery::default()
        };
        let params = query.to_params("key", None);
        assert_eq!(params["ticker"], "IBM");

        let query = TickerQuery {
            ticker: Some("IBM".into()),
            ..TickerQuery::default().with_search("AA")
        };
        let params = query.to_params("key", None);
        assert!(!params.contains_key("ticker"));
    }

    #[test]
    fn test_explicit_bounds_override_search() {
        let query = TickerQuery {
            ticker_gte: Some("A".into()),
            ticker_lt: Some("B".into()),
            ..TickerQuery::default().with_search("AAPL")
        };
        let params = query.to_params("key", None);
        assert_eq!(params["ticker.gte"], "A");
        assert_eq!(params["ticker.lt"], "B");
    }

    #[test]
    fn test_cursor_appended() {
        let params = TickerQuery::default().to_params("key", Some("abc123"));
        assert_eq!(params["cursor"], "abc123");
    }

    #[test]
    fn test_extract_cursor() {
        let url = "https://api.polygon.io/v3/reference/tickers?cursor=abc123&limit=100";
        assert_eq!(extract_cursor(Some(url)), Some("abc123".to_string()));
    }

    #[test]
    fn test_extract_cursor_missing() {
        let url = "https://api.polygon.io/v3/reference/tickers?limit=100";
        assert_eq!(extract_cursor(Some(url)), None);
        assert_eq!(extract_cursor(Some("https://x.io/?cursor=")), None);
        assert_eq!(extract_cursor(None), None);
    }

    #[test]
    fn test_extract_cursor_malformed() {
        assert_eq!(extract_cursor(Some("not-a-valid-url")), None);
        assert_eq!(extract_cursor(Some("")), None);
    }
}
