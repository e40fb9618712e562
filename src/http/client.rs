//! HTTP client with built-in rate-limit retry.

use anyhow::{Context, Result};
use log::{debug, warn};
use reqwest::Client;
use serde::de::DeserializeOwned;

use super::retry::{ApiError, RetryPolicy, classify_status};

/// HTTP client that retries rate-limited GitHub API requests.
///
/// Every request gets up to `policy.max_attempts` tries. Only an HTTP 403
/// with an exhausted rate-limit quota is retried, after sleeping out the
/// rate-limit window; any other failure propagates immediately.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    policy: RetryPolicy,
}

impl HttpClient {
    /// Creates a new HTTP client wrapping the given reqwest Client.
    pub fn new(client: Client) -> Self {
        Self::with_policy(client, RetryPolicy::default())
    }

    /// Creates a client with a custom retry policy.
    pub fn with_policy(client: Client, policy: RetryPolicy) -> Self {
        Self { client, policy }
    }

    /// Performs a GET request and deserializes the JSON response.
    /// Sleeps out rate-limit windows and retries, up to the attempt budget.
    #[tracing::instrument(skip(self))]
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!("GET JSON from {}...", url);

        let mut last_error = None;

        for attempt in 1..=self.policy.max_attempts {
            match self.get_json_once(url).await {
                Ok(value) => return Ok(value),
                Err(e) => {
                    let Some(ApiError::RateLimited { reset }) = e.downcast_ref::<ApiError>()
                    else {
                        return Err(e);
                    };

                    if attempt < self.policy.max_attempts {
                        let wait = self.policy.rate_limit_wait(*reset);
                        warn!(
                            "Rate limit exceeded (attempt {}/{}), retrying after {:.1} seconds",
                            attempt,
                            self.policy.max_attempts,
                            wait.as_secs_f64()
                        );
                        tokio::time::sleep(wait).await;
                    }
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            anyhow::anyhow!(
                "GET {} failed after {} attempts",
                url,
                self.policy.max_attempts
            )
        }))
    }

    /// Single request attempt without retry.
    async fn get_json_once<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("Failed to send request")?;

        let status = response.status();
        if !status.is_success() {
            return Err(classify_status(status, response.headers(), url).into());
        }

        response
            .json::<T>()
            .await
            .context("Failed to parse JSON response")
    }
}
