//! Classification of failed responses into typed errors.

use super::types::ApiErrorBody;
use crate::error::Error;

/// Seconds to wait when a 429 carries no usable `retry-after`.
pub const DEFAULT_RATE_LIMIT_SECS: u64 = 60;

const UNAUTHORIZED_MESSAGE: &str = "Invalid API key. Please check your Polygon API configuration.";
const FORBIDDEN_MESSAGE: &str =
    "Access forbidden. Your API key may not have permission for this endpoint.";
const FALLBACK_MESSAGE: &str = "Failed to fetch data from Polygon API";

/// Parse a `retry-after` header value in whole seconds.
///
/// Leading whitespace and an optional `+` are skipped and only the leading
/// digits count, so `"10"`, `"+10"` and `"10s"` all give 10. Anything else,
/// including negative values, falls back to [`DEFAULT_RATE_LIMIT_SECS`].
pub fn parse_retry_after(value: Option<&str>) -> u64 {
    let Some(value) = value else {
        return DEFAULT_RATE_LIMIT_SECS;
    };

    let value = value.trim_start();
    let digits: String = value
        .strip_prefix('+')
        .unwrap_or(value)
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();

    match digits.parse::<u64>() {
        Ok(secs) if secs > 0 => secs,
        _ => DEFAULT_RATE_LIMIT_SECS,
    }
}

/// Turn a non-success response into the matching error.
pub fn classify_failure(status: u16, retry_after: Option<&str>, body: &str) -> Error {
    let body: ApiErrorBody = serde_json::from_str(body).unwrap_or_default();
    let message = body.message().map(str::to_string);

    match status {
        429 => Error::RateLimited(parse_retry_after(retry_after)),
        401 => Error::unauthorized(message.unwrap_or_else(|| UNAUTHORIZED_MESSAGE.to_string())),
        403 => Error::forbidden(message.unwrap_or_else(|| FORBIDDEN_MESSAGE.to_string())),
        other => Error::http(other, message.unwrap_or_else(|| FALLBACK_MESSAGE.to_string())),
    }
}
