//! Error types for the Tickerscope application.

use thiserror::Error;

/// The main error type for Tickerscope.
#[derive(Error, Debug)]
pub enum Error {
    /// IO errors (file operations, terminal, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Terminal/TUI related errors
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Channel communication errors
    #[error("Channel error: {0}")]
    Channel(String),

    /// The API rejected our credentials (HTTP 401).
    #[error("{0}")]
    Unauthorized(String),

    /// The API key lacks permission for the endpoint (HTTP 403).
    #[error("{0}")]
    Forbidden(String),

    /// Any other non-success HTTP status.
    #[error("{message}")]
    Http { status: u16, message: String },

    /// Network connectivity errors
    #[error("Network error: {0}")]
    Network(String),

    /// Rate limiting errors
    #[error("Rate limited. Retrying in {0} seconds.")]
    RateLimited(u64),

    /// Invalid input or state
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Generic application error
    #[error("{0}")]
    Application(String),
}

/// Alias for Result with our Error type.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a new terminal error.
    pub fn terminal(msg: impl Into<String>) -> Self {
        Self::Terminal(msg.into())
    }

    /// Create a new config error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new channel error.
    pub fn channel(msg: impl Into<String>) -> Self {
        Self::Channel(msg.into())
    }

    /// Create a new unauthorized error.
    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::Unauthorized(msg.into())
    }

    /// Create a new forbidden error.
    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    /// Create a new HTTP status error.
    pub fn http(status: u16, msg: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: msg.into(),
        }
    }

    /// Create a new invalid input error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a new network error.
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    /// Create a new application error.
    pub fn application(msg: impl Into<String>) -> Self {
        Self::Application(msg.into())
    }

    /// HTTP status carried by this error, if it came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized(_) => Some(401),
            Self::Forbidden(_) => Some(403),
            Self::RateLimited(_) => Some(429),
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Check if this error is recoverable (user can retry).
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            Self::Unauthorized(_) | Self::Forbidden(_) | Self::Config(_)
        )
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::application(format!("Malformed response: {err}"))
        } else {
            Self::network(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(Error::unauthorized("bad key").status(), Some(401));
        assert_eq!(Error::forbidden("nope").status(), Some(403));
        assert_eq!(Error::RateLimited(10).status(), Some(429));
        assert_eq!(Error::http(502, "bad gateway").status(), Some(502));
        assert_eq!(Error::network("timeout").status(), None);
    }

    #[test]
    fn test_recoverable() {
        assert!(!Error::unauthorized("bad key").is_recoverable());
        assert!(!Error::forbidden("nope").is_recoverable());
        assert!(!Error::config("missing key").is_recoverable());
        assert!(Error::RateLimited(60).is_recoverable());
        assert!(Error::network("reset").is_recoverable());
        assert!(Error::http(500, "boom").is_recoverable());
    }

    #[test]
    fn test_rate_limit_message() {
        assert_eq!(
            Error::RateLimited(10).to_string(),
            "Rate limited. Retrying in 10 seconds."
        );
    }
}
