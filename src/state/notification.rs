//! Toast notifications.

use crate::error::Error;
use chrono::{DateTime, Duration, Utc};
use std::collections::VecDeque;
use uuid::Uuid;

/// Notification severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A notification to display to the user.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: Uuid,
    pub message: String,
    pub level: NotificationLevel,
    pub created_at: DateTime<Utc>,
    pub duration_secs: u64,
}

impl Notification {
    fn new(message: impl Into<String>, level: NotificationLevel, duration_secs: u64) -> Self {
        Self {
            id: Uuid::new_v4(),
            message: message.into(),
            level,
            created_at: Utc::now(),
            duration_secs,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, NotificationLevel::Info, 3)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, NotificationLevel::Success, 3)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message, NotificationLevel::Warning, 5)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, NotificationLevel::Error, 10)
    }

    /// Whether the toast should be gone at `now`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now - self.created_at >= Duration::seconds(self.duration_secs as i64)
    }

    /// Toast for an HTTP status.
    ///
    /// 500 and unmapped statuses are logged rather than shown.
    pub fn for_status(status: u16, message: Option<&str>) -> Option<Self> {
        if status == 500 {
            tracing::error!("Internal server error occurred");
            return None;
        }

        let Some(level) = status_level(status) else {
            tracing::warn!(status, "Unhandled status code");
            return None;
        };

        let text = message
            .filter(|m| !m.is_empty())
            .map(str::to_string)
            .or_else(|| default_status_message(status).map(str::to_string))
            .unwrap_or_else(|| format!("Request completed with status {status}"));

        Some(match level {
            NotificationLevel::Info => Self::info(text),
            NotificationLevel::Success => Self::success(text),
            NotificationLevel::Warning => Self::warning(text),
            NotificationLevel::Error => Self::error(text),
        })
    }

    /// Toast for a failed request.
    pub fn from_error(error: &Error) -> Option<Self> {
        let message = error.to_string();
        match error.status() {
            Some(status) => Self::for_status(status, Some(&message)),
            None => Some(Self::error(message)),
        }
    }
}

fn status_level(status: u16) -> Option<NotificationLevel> {
    match status {
        200 | 201 | 204 => Some(NotificationLevel::Success),
        400 | 401 | 403 | 404 | 502 | 504 => Some(NotificationLevel::Error),
        409 | 422 | 429 | 503 => Some(NotificationLevel::Warning),
        _ => None,
    }
}

fn default_status_message(status: u16) -> Option<&'static str> {
    match status {
        400 => Some("Invalid request. Please check your input."),
        401 => Some("Authentication required. Please login."),
        403 => Some("You do not have permission to perform this action."),
        404 => Some("The requested resource was not found."),
        409 => Some("A conflict occurred. The resource may already exist."),
        422 => Some("The data provided is invalid."),
        429 => Some("Too many requests. Please wait a moment and try again."),
        502 => Some("Server error. Please try again later."),
        503 => Some("Service temporarily unavailable."),
        504 => Some("Request timeout. Please try again."),
        _ => None,
    }
}

/// Stack of visible toasts, newest last.
#[derive(Debug)]
pub struct NotificationStack {
    items: VecDeque<Notification>,
    capacity: usize,
}

impl Default for NotificationStack {
    fn default() -> Self {
        Self::new(5)
    }
}

impl NotificationStack {
    pub fn new(capacity: usize) -> Self {
        Self {
            items: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    /// Show a toast, dropping the oldest when full.
    pub fn push(&mut self, notification: Notification) {
        if self.items.len() == self.capacity {
            self.items.pop_front();
        }
        self.items.push_back(notification);
    }

    /// Dismiss the newest toast.
    pub fn dismiss_latest(&mut self) {
        self.items.pop_back();
    }

    pub fn dismiss_all(&mut self) {
        self.items.clear();
    }

    /// Remove expired toasts.
    pub fn expire(&mut self, now: DateTime<Utc>) {
        self.items.retain(|n| !n.is_expired(now));
    }

    /// Toasts from oldest to newest.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Notification> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_rate_limit_is_warning() {
        let n = Notification::from_error(&Error::RateLimited(10)).unwrap();
        assert_eq!(n.level, NotificationLevel::Warning);
        assert_eq!(n.message, "Rate limited. Retrying in 10 seconds.");
    }

    #[test]
    fn test_auth_errors_are_errors() {
        let n = Notification::from_error(&Error::unauthorized("Invalid API key")).unwrap();
        assert_eq!(n.level, NotificationLevel::Error);
        assert_eq!(n.message, "Invalid API key");

        let n = Notification::from_error(&Error::forbidden("denied")).unwrap();
        assert_eq!(n.level, NotificationLevel::Error);
    }

    #[test]
    fn test_network_error_toast() {
        let n = Notification::from_error(&Error::network("connection refused")).unwrap();
        assert_eq!(n.level, NotificationLevel::Error);
    }

    #[test]
    fn test_status_defaults() {
        let n = Notification::for_status(503, None).unwrap();
        assert_eq!(n.level, NotificationLevel::Warning);
        assert_eq!(n.message, "Service temporarily unavailable.");

        assert!(Notification::for_status(500, Some("boom")).is_none());
        assert!(Notification::for_status(418, None).is_none());
    }

    #[test]
    fn test_stack_capacity_and_dismiss() {
        let mut stack = NotificationStack::new(2);
        let first = Notification::info("one");
        let first_id = first.id;
        stack.push(first);
        stack.push(Notification::info("two"));
        stack.push(Notification::info("three"));

        assert_eq!(stack.len(), 2);
        assert!(stack.iter().all(|n| n.id != first_id));

        let newest_first: Vec<_> = stack.iter().rev().map(|n| n.message.as_str()).collect();
        assert_eq!(newest_first, vec!["three", "two"]);

        stack.dismiss_latest();
        let remaining: Vec<_> = stack.iter().map(|n| n.message.clone()).collect();
        assert_eq!(remaining, vec!["two".to_string()]);

        stack.dismiss_all();
        assert!(stack.is_empty());
    }

    #[test]
    fn test_expiry() {
        let mut stack = NotificationStack::default();
        let n = Notification::info("short");
        let created = n.created_at;
        stack.push(n);
        stack.push(Notification::error("long"));

        stack.expire(created + Duration::seconds(4));
        assert_eq!(stack.len(), 1);
        assert_eq!(stack.iter().next().map(|n| n.level), Some(NotificationLevel::Error));
    }
}
