//! GitHub releases API access.

use anyhow::Result;
use log::debug;

use crate::http::HttpClient;

use super::{ReleaseRecord, ReleaseSummary, RepoId};

/// Fetches release metadata from the GitHub API.
pub struct GitHubSource {
    http_client: HttpClient,
    api_url: String,
}

impl GitHubSource {
    /// Create a source against the public GitHub API.
    pub fn new(http_client: HttpClient) -> Self {
        Self::with_api_url(http_client, "https://api.github.com")
    }

    /// Create a source against a custom API base URL.
    pub fn with_api_url(http_client: HttpClient, api_url: &str) -> Self {
        Self {
            http_client,
            api_url: api_url.trim_end_matches('/').to_string(),
        }
    }

    /// Lists releases for a repository in the API's default order,
    /// newest first. Single page; the tags we select for live at the top.
    pub async fn list_releases(&self, repo: &RepoId) -> Result<Vec<ReleaseSummary>> {
        let url = format!("{}/repos/{}/releases", self.api_url, repo);
        debug!("Fetching releases from {}...", url);
        self.http_client.get_json(&url).await
    }

    /// Fetches the release for a specific tag, trimmed for output.
    /// A missing tag surfaces as [`crate::http::ApiError::NotFound`].
    pub async fn release_by_tag(&self, repo: &RepoId, tag: &str) -> Result<ReleaseRecord> {
        let url = format!("{}/repos/{}/releases/tags/{}", self.api_url, repo, tag);
        debug!("Fetching release detail from {}...", url);
        let record: ReleaseRecord = self.http_client.get_json(&url).await?;
        Ok(record.trim())
    }
}
