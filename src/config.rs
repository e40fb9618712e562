//! Environment configuration and API client construction.

use anyhow::{Context, Result};
use reqwest::Client;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};

/// Token environment variables, in precedence order. The first set,
/// non-empty variable wins. Resolved once at startup and injected into
/// the client; never read again afterwards.
pub const TOKEN_ENV_VARS: &[&str] = &["GH_TOKEN", "GITHUB_TOKEN"];

/// Resolves the API token from the process environment.
pub fn resolve_token() -> Option<String> {
    resolve_token_from(|name| std::env::var(name).ok())
}

fn resolve_token_from(lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
    TOKEN_ENV_VARS
        .iter()
        .filter_map(|name| lookup(name))
        .find(|value| !value.is_empty())
}

/// Builds the reqwest client used for all API requests. Unauthenticated
/// requests are allowed but get a much smaller rate-limit quota.
pub fn api_client(token: Option<&str>) -> Result<Client> {
    let mut headers = HeaderMap::new();
    if let Some(token) = token {
        let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
            .context("Token is not a valid header value")?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
    }

    Client::builder()
        .user_agent(concat!("relver/", env!("CARGO_PKG_VERSION")))
        .default_headers(headers)
        .build()
        .context("Failed to build HTTP client")
}
