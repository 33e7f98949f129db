//! HTTP client for the tickers listing.

use super::TickerSource;
use super::query::TickerQuery;
use super::status::classify_failure;
use super::types::TickersResponse;
use crate::config::ApiConfig;
use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, RETRY_AFTER};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use url::Url;

const TICKERS_ENDPOINT: &str = "tickers";

/// Builder for creating a tickers client.
pub struct TickersClientBuilder {
    config: ApiConfig,
    api_key: Option<String>,
}

impl TickersClientBuilder {
    /// Create a new builder with default config.
    pub fn new() -> Self {
        Self {
            config: ApiConfig::default(),
            api_key: None,
        }
    }

    /// Set the API configuration.
    pub fn config(mut self, config: ApiConfig) -> Self {
        self.config = config;
        self
    }

    /// Override the API key from configuration.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Build the client.
    pub fn build(mut self) -> Result<TickersClient> {
        if let Some(key) = self.api_key {
            self.config.api_key = Some(key);
        }
        TickersClient::new(self.config)
    }
}

impl Default for TickersClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Client for the reference tickers endpoint.
pub struct TickersClient {
    config: ApiConfig,
    http: reqwest::Client,
    endpoint: Url,
    rate_limiter: Arc<Mutex<RateLimiter>>,
}

impl TickersClient {
    /// Create a new client.
    pub fn new(config: ApiConfig) -> Result<Self> {
        let endpoint = endpoint_url(&config.base_url)?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()
            .map_err(|e| Error::config(format!("failed to build HTTP client: {e}")))?;

        let rate_limiter = Arc::new(Mutex::new(RateLimiter::new(config.rate_limit.max(1))));

        Ok(Self {
            config,
            http,
            endpoint,
            rate_limiter,
        })
    }

    /// Whether an API key is configured.
    pub fn has_api_key(&self) -> bool {
        self.api_key().is_some()
    }

    fn api_key(&self) -> Option<&str> {
        self.config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }

    /// Apply rate limiting.
    async fn rate_limit(&self) {
        let mut limiter = self.rate_limiter.lock().await;
        limiter.wait().await;
    }
}

#[async_trait]
impl TickerSource for TickersClient {
    async fn fetch_page(
        &self,
        query: &TickerQuery,
        cursor: Option<String>,
    ) -> Result<TickersResponse> {
        let api_key = self.api_key().ok_or_else(|| {
            Error::config(
                "Polygon API key is not configured. Please set POLYGON_API_KEY in your environment.",
            )
        })?;

        self.rate_limit().await;

        let params = query.to_params(api_key, cursor.as_deref());
        let mut request = self.http.get(self.endpoint.clone()).query(&params);
        if let Some(token) = self.config.auth_token.as_deref() {
            request = request.bearer_auth(token);
        }

        let started = Instant::now();
        tracing::debug!(
            url = %self.endpoint,
            search = ?query.search,
            cursor = ?cursor,
            "API request"
        );

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(
                    url = %self.endpoint,
                    duration_ms = started.elapsed().as_millis() as u64,
                    error = %e,
                    "API error"
                );
                return Err(e.into());
            }
        };

        let status = response.status();
        let duration_ms = started.elapsed().as_millis() as u64;

        if status.is_success() {
            let page: TickersResponse = response.json().await?;
            tracing::debug!(
                status = status.as_u16(),
                duration_ms,
                count = page.count,
                has_next = page.next_url.is_some(),
                "API response"
            );
            return Ok(page);
        }

        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.text().await.unwrap_or_default();
        tracing::warn!(status = status.as_u16(), duration_ms, "API error");

        Err(classify_failure(
            status.as_u16(),
            retry_after.as_deref(),
            &body,
        ))
    }
}

fn endpoint_url(base_url: &str) -> Result<Url> {
    let mut base = base_url.trim().to_string();
    if !base.ends_with('/') {
        base.push('/');
    }
    Url::parse(&base)
        .and_then(|u| u.join(TICKERS_ENDPOINT))
        .map_err(|e| Error::config(format!("invalid base URL '{base_url}': {e}")))
}

/// Simple token-bucket rate limiter.
struct RateLimiter {
    requests_per_second: u32,
    last_request: Instant,
    tokens: f64,
}

impl RateLimiter {
    fn new(requests_per_second: u32) -> Self {
        Self {
            requests_per_second,
            last_request: Instant::now(),
            tokens: requests_per_second as f64,
        }
    }

    async fn wait(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_request).as_secs_f64();
        let rate = self.requests_per_second as f64;

        self.tokens = (self.tokens + elapsed * rate).min(rate);

        if self.tokens < 1.0 {
            let wait_time = (1.0 - self.tokens) / rate;
            tokio::time::sleep(Duration::from_secs_f64(wait_time)).await;
            self.tokens = 1.0;
        }

        self.tokens -= 1.0;
        self.last_request = Instant::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn client_for(server: &MockServer, api_key: Option<&str>) -> TickersClient {
        let config = ApiConfig {
            base_url: server.base_url(),
            api_key: api_key.map(str::to_string),
            ..ApiConfig::default()
        };
        TickersClient::new(config).expect("client")
    }

    #[test]
    fn test_endpoint_url_keeps_base_path() {
        let url = endpoint_url("https://api.polygon.io/v3/reference").unwrap();
        assert_eq!(url.as_str(), "https://api.polygon.io/v3/reference/tickers");

        let url = endpoint_url("https://api.polygon.io/v3/reference/").unwrap();
        assert_eq!(url.as_str(), "https://api.polygon.io/v3/reference/tickers");

        assert!(endpoint_url("not a url").is_err());
    }

    #[tokio::test]
    async fn test_fetch_page_sends_search_range() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/tickers")
                .query_param("apikey", "test-key")
                .query_param("ticker.gte", "AAPL")
                .query_param("ticker.lt", "AAPLZ")
                .query_param("limit", "50");
            then.status(200).json_body(json!({
                "results": [{"ticker": "AAPL", "name": "Apple Inc.", "market": "stocks",
                             "locale": "us", "primary_exchange": "XNAS", "type": "CS",
                             "active": true}],
                "status": "OK",
                "request_id": "r1",
                "count": 1,
                "next_url": "https://api.polygon.io/v3/reference/tickers?cursor=abc123"
            }));
        });

        let client = client_for(&server, Some("test-key"));
        let page = client
            .fetch_page(&TickerQuery::explore("aapl", 50), None)
            .await
            .unwrap();

        mock.assert();
        assert_eq!(page.results().len(), 1);
        assert_eq!(
            crate::api::extract_cursor(page.next_url.as_deref()),
            Some("abc123".to_string())
        );
    }

    #[tokio::test]
    async fn test_fetch_page_sends_cursor_and_bearer() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/tickers")
                .query_param("cursor", "abc123")
                .header("authorization", "Bearer token-1");
            then.status(200).json_body(json!({"status": "OK", "request_id": "r2", "count": 0}));
        });

        let config = ApiConfig {
            base_url: server.base_url(),
            api_key: Some("k".into()),
            auth_token: Some("token-1".into()),
            ..ApiConfig::default()
        };
        let client = TickersClient::new(config).unwrap();
        let page = client
            .fetch_page(&TickerQuery::default(), Some("abc123".into()))
            .await
            .unwrap();

        mock.assert();
        assert!(page.results().is_empty());
    }

    #[tokio::test]
    async fn test_rate_limited_response() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/tickers");
            then.status(429)
                .header("retry-after", "10")
                .json_body(json!({"message": "Rate limited"}));
        });

        let client = client_for(&server, Some("k"));
        let err = client
            .fetch_page(&TickerQuery::default(), None)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::RateLimited(10)));
    }

    #[tokio::test]
    async fn test_unauthorized_response() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/tickers");
            then.status(401)
                .json_body(json!({"status": "ERROR", "message": "Invalid API key"}));
        });

        let client = client_for(&server, Some("bad"));
        let err = client
            .fetch_page(&TickerQuery::default(), None)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Unauthorized(ref m) if m == "Invalid API key"));
    }

    #[tokio::test]
    async fn test_missing_api_key_skips_request() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET).path("/tickers");
            then.status(200);
        });

        let client = client_for(&server, Some("   "));
        assert!(!client.has_api_key());
        let err = client
            .fetch_page(&TickerQuery::default(), None)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Config(_)));
        mock.assert_calls(0);
    }
}
