//! Ticker reference API integration.
//!
//! This module provides a high-level interface to the tickers listing,
//! handling query building, pagination cursors, failure classification,
//! retries and caching.

mod cache;
mod client;
mod pages;
mod query;
mod retry;
mod status;
mod types;

pub use cache::QueryCache;
pub use client::{TickersClient, TickersClientBuilder};
pub use pages::{TickerPages, flat_tickers};
pub use query::{Market, SortField, SortOrder, TickerQuery, extract_cursor};
pub use retry::{RetryPolicy, fetch_page_with_retry};
pub use status::{DEFAULT_RATE_LIMIT_SECS, classify_failure, parse_retry_after};
pub use types::{ApiErrorBody, Ticker, TickersResponse};

use crate::error::Result;
use async_trait::async_trait;

/// Anything that can produce pages of the tickers listing.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TickerSource: Send + Sync {
    /// Fetch a single page. `cursor` is `None` for the first page.
    async fn fetch_page(&self, query: &TickerQuery, cursor: Option<String>)
    -> Result<TickersResponse>;
}
