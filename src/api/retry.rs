//! Retry policy for page fetches.

use super::TickerSource;
use super::query::TickerQuery;
use super::status::DEFAULT_RATE_LIMIT_SECS;
use super::types::TickersResponse;
use crate::config::ApiConfig;
use crate::error::{Error, Result};
use std::time::Duration;

/// Bounded retry with exponential backoff and server-directed rate-limit waits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries allowed after a generic failure.
    pub max_retries: u32,
    /// Retries allowed after a 429.
    pub max_rate_limit_retries: u32,
    /// Delay before the first generic retry.
    pub base_delay: Duration,
    /// Upper bound for the backoff delay.
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            max_rate_limit_retries: 3,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
        }
    }
}

impl RetryPolicy {
    /// Build a policy from API configuration.
    pub fn from_config(config: &ApiConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            max_rate_limit_retries: config.max_rate_limit_retries,
            ..Self::default()
        }
    }

    /// Whether to try again after the zero-based `attempt` failed with `error`.
    pub fn should_retry(&self, attempt: u32, error: &Error) -> bool {
        match error {
            Error::Unauthorized(_) | Error::Forbidden(_) | Error::Config(_) => false,
            Error::RateLimited(_) => attempt < self.max_rate_limit_retries,
            _ => attempt < self.max_retries,
        }
    }

    /// How long to wait before retrying after the zero-based `attempt`.
    pub fn retry_delay(&self, attempt: u32, error: &Error) -> Duration {
        if let Error::RateLimited(secs) = error {
            let secs = if *secs == 0 { DEFAULT_RATE_LIMIT_SECS } else { *secs };
            return Duration::from_secs(secs);
        }

        let factor = 2u32.checked_pow(attempt).unwrap_or(u32::MAX);
        self.base_delay
            .checked_mul(factor)
            .map_or(self.max_delay, |d| d.min(self.max_delay))
    }
}

/// Fetch one page, retrying per `policy`.
///
/// `on_failure` sees every failed attempt together with the delay before the
/// next one, or `None` when the error is final.
pub async fn fetch_page_with_retry<S, F>(
    source: &S,
    query: &TickerQuery,
    cursor: Option<&str>,
    policy: &RetryPolicy,
    mut on_failure: F,
) -> Result<TickersResponse>
where
    S: TickerSource + ?Sized,
    F: FnMut(&Error, Option<Duration>),
{
    let mut attempt = 0;
    loop {
        match source.fetch_page(query, cursor.map(str::to_string)).await {
            Ok(page) => return Ok(page),
            Err(err) => {
                if !policy.should_retry(attempt, &err) {
                    tracing::warn!(attempt, error = %err, "Giving up on ticker page");
                    on_failure(&err, None);
                    return Err(err);
                }

                let delay = policy.retry_delay(attempt, &err);
                tracing::info!(attempt, ?delay, error = %err, "Retrying ticker page");
                on_failure(&err, Some(delay));
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
        }
    }
}
