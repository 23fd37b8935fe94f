//! Throttling support for the SharePoint REST API
//!
//! SharePoint Online answers bursts with `429 Too Many Requests` or
//! `503 Server Unavailable`, usually with a `Retry-After` header. The client
//! waits as instructed and retries, up to a bounded number of attempts.

use std::time::Duration;

use reqwest::StatusCode;
use tracing::warn;

/// Wait used when a throttled response carries no usable `Retry-After`
pub const DEFAULT_RETRY_AFTER: Duration = Duration::from_secs(10);

/// Upper bound on any single wait, whatever the server asks for
pub const MAX_RETRY_AFTER: Duration = Duration::from_secs(300);

/// Default number of retries after the first attempt
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Retry budget for throttled requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt
    pub max_retries: u32,
    /// Wait when the server does not say how long
    pub default_retry_after: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            default_retry_after: DEFAULT_RETRY_AFTER,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32) -> Self {
        Self {
            max_retries,
            ..Self::default()
        }
    }

    /// How long to wait before retrying, given the `Retry-After` header value
    pub fn wait_for(&self, header: Option<&str>) -> Duration {
        header
            .map(|v| parse_retry_after(v, self.default_retry_after))
            .unwrap_or(self.default_retry_after)
            .min(MAX_RETRY_AFTER)
    }
}

/// Whether a status means "slow down and try again"
pub fn is_throttled(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status == StatusCode::SERVICE_UNAVAILABLE
}

/// Parses a `Retry-After` header value
///
/// Accepts delta-seconds (`"120"`) or an HTTP-date
/// (`"Wed, 21 Oct 2026 07:28:00 GMT"`). Dates in the past, dates more than
/// an hour ahead and unparseable values yield `default`.
pub fn parse_retry_after(value: &str, default: Duration) -> Duration {
    if let Ok(seconds) = value.trim().parse::<u64>() {
        return Duration::from_secs(seconds);
    }

    if let Ok(date) = chrono::DateTime::parse_from_rfc2822(value.trim()) {
        let now = chrono::Utc::now();
        let target = date.with_timezone(&chrono::Utc);
        if target > now {
            if let Some(secs) = (target - now)
                .num_seconds()
                .try_into()
                .ok()
                .filter(|&s: &u64| s <= 3600)
            {
                return Duration::from_secs(secs);
            }
        }
    }

    warn!(value, "Could not parse Retry-After header, using default");
    default
}
