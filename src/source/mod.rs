//! GitHub release metadata types and access.

mod github;

use std::fmt;
use std::str::FromStr;

use anyhow::Result;
use serde::{Deserialize, Serialize};

pub use github::GitHubSource;

/// Repository identifier (owner/repo format).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoId {
    pub owner: String,
    pub repo: String,
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

impl FromStr for RepoId {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('/').collect();
        if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
            anyhow::bail!("Invalid repository format. Expected 'owner/repo'.")
        } else {
            Ok(RepoId {
                owner: parts[0].to_string(),
                repo: parts[1].to_string(),
            })
        }
    }
}

/// A release asset reduced to the two fields the version documents keep.
///
/// Deserializing drops everything else the API sends, so trimming is
/// applied by construction and re-applying it changes nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseAsset {
    pub name: String,
    pub browser_download_url: String,
}

/// A release as returned by the release-by-tag endpoint.
///
/// The fields the pipeline reads are typed; every other field the API
/// returns is preserved verbatim in `extra` and serialized back out, so
/// the output documents keep the full upstream record shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseRecord {
    pub tag_name: String,
    pub body: Option<String>,
    pub assets: Vec<ReleaseAsset>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ReleaseRecord {
    /// Drops the `author` object from the passthrough fields. Assets are
    /// already reduced by their type. Idempotent.
    pub fn trim(mut self) -> Self {
        self.extra.remove("author");
        self
    }
}

/// A release list entry; only the tag matters for channel selection.
#[derive(Debug, Clone, Deserialize)]
pub struct ReleaseSummary {
    pub tag_name: String,
}
