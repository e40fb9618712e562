//! Rate-limit aware retry policy for GitHub API requests.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use reqwest::StatusCode;
use reqwest::header::HeaderMap;

/// Maximum number of attempts per request.
pub const MAX_ATTEMPTS: usize = 5;

/// Minimum wait before retrying a rate-limited request.
pub const MIN_RATE_LIMIT_WAIT: Duration = Duration::from_secs(10);

/// Errors surfaced by the GitHub API that callers need to distinguish.
///
/// Only `RateLimited` is ever retried; everything else propagates on the
/// first occurrence. `NotFound` is matched by the version assembly to fall
/// back to the OTA repository.
#[derive(Debug)]
pub enum ApiError {
    /// HTTP 403 with `x-ratelimit-remaining: 0`. Carries the
    /// `x-ratelimit-reset` epoch seconds when the header parsed.
    RateLimited { reset: Option<u64> },
    /// HTTP 404.
    NotFound(String),
    /// Any other non-success status.
    Status { status: StatusCode, url: String },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::RateLimited { reset } => match reset {
                Some(reset) => write!(f, "API rate limit exceeded, resets at {}", reset),
                None => write!(f, "API rate limit exceeded"),
            },
            ApiError::NotFound(url) => write!(f, "Not found: {}", url),
            ApiError::Status { status, url } => {
                write!(f, "HTTP {} from {}", status.as_u16(), url)
            }
        }
    }
}

impl std::error::Error for ApiError {}

/// Classifies a non-success response into an [`ApiError`].
pub fn classify_status(status: StatusCode, headers: &HeaderMap, url: &str) -> ApiError {
    if status == StatusCode::FORBIDDEN && header_str(headers, "x-ratelimit-remaining") == Some("0")
    {
        let reset = header_str(headers, "x-ratelimit-reset").and_then(|v| v.parse::<u64>().ok());
        return ApiError::RateLimited { reset };
    }
    if status == StatusCode::NOT_FOUND {
        return ApiError::NotFound(url.to_string());
    }
    ApiError::Status {
        status,
        url: url.to_string(),
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

/// How many attempts a request gets and how long a rate-limited attempt
/// waits at minimum. Tests shrink the minimum wait to keep them fast.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: usize,
    pub min_rate_limit_wait: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: MAX_ATTEMPTS,
            min_rate_limit_wait: MIN_RATE_LIMIT_WAIT,
        }
    }
}

impl RetryPolicy {
    /// Wait duration for a rate-limited request: until the reset instant,
    /// clamped to at least the minimum. A missing, unparsable, or past
    /// reset still waits the full minimum.
    pub fn rate_limit_wait(&self, reset: Option<u64>) -> Duration {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or(Duration::ZERO)
            .as_secs();
        self.wait_from(reset, now)
    }

    fn wait_from(&self, reset: Option<u64>, now_secs: u64) -> Duration {
        let until_reset = Duration::from_secs(reset.unwrap_or(0).saturating_sub(now_secs));
        until_reset.max(self.min_rate_limit_wait)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::{HeaderMap, HeaderValue};

    fn headers(pairs: &[(&'static str, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(*name, HeaderValue::from_str(value).unwrap());
        }
        map
    }

    #[test]
    fn test_classify_rate_limited_with_reset() {
        let headers = headers(&[("x-ratelimit-remaining", "0"), ("x-ratelimit-reset", "1234")]);
        let err = classify_status(StatusCode::FORBIDDEN, &headers, "http://x/");
        assert!(matches!(err, ApiError::RateLimited { reset: Some(1234) }));
    }

    #[test]
    fn test_classify_rate_limited_unparsable_reset() {
        let headers = headers(&[
            ("x-ratelimit-remaining", "0"),
            ("x-ratelimit-reset", "soon"),
        ]);
        let err = classify_status(StatusCode::FORBIDDEN, &headers, "http://x/");
        assert!(matches!(err, ApiError::RateLimited { reset: None }));
    }

    #[test]
    fn test_classify_forbidden_with_remaining_quota_is_not_rate_limit() {
        let headers = headers(&[("x-ratelimit-remaining", "42")]);
        let err = classify_status(StatusCode::FORBIDDEN, &headers, "http://x/");
        assert!(matches!(
            err,
            ApiError::Status {
                status: StatusCode::FORBIDDEN,
                ..
            }
        ));
    }

    #[test]
    fn test_classify_forbidden_without_header_is_not_rate_limit() {
        let err = classify_status(StatusCode::FORBIDDEN, &HeaderMap::new(), "http://x/");
        assert!(matches!(err, ApiError::Status { .. }));
    }

    #[test]
    fn test_classify_not_found() {
        let err = classify_status(StatusCode::NOT_FOUND, &HeaderMap::new(), "http://x/tag");
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[test]
    fn test_wait_future_reset() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.wait_from(Some(1090), 1000), Duration::from_secs(90));
    }

    #[test]
    fn test_wait_past_reset_clamps_to_minimum() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.wait_from(Some(900), 1000), Duration::from_secs(10));
    }

    #[test]
    fn test_wait_missing_reset_defaults_to_minimum() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.wait_from(None, 1000), Duration::from_secs(10));
    }

    #[test]
    fn test_wait_near_reset_still_waits_minimum() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.wait_from(Some(1003), 1000), Duration::from_secs(10));
    }
}
