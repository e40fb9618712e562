//! HTTP client module with rate-limit retry and error classification.

mod client;
mod retry;

pub use client::HttpClient;
pub use retry::{ApiError, MAX_ATTEMPTS, MIN_RATE_LIMIT_WAIT, RetryPolicy, classify_status};
