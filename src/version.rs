//! Per-channel version document assembly.

use anyhow::{Context, Result};
use log::debug;
use serde::Serialize;

use crate::http::ApiError;
use crate::source::{GitHubSource, ReleaseRecord, RepoId};

/// The document published for one channel.
///
/// `details` is the primary repository's release when one exists for the
/// tag, serialized as `null` otherwise; `ota_details` always comes from
/// the OTA repository. `body` is the changelog, preferring the primary
/// record's body and falling back to the OTA record's.
#[derive(Debug, Serialize)]
pub struct VersionDocument {
    pub version: String,
    pub body: Option<String>,
    pub details: Option<ReleaseRecord>,
    pub ota_details: ReleaseRecord,
}

impl VersionDocument {
    /// Assembles the document for a tag.
    ///
    /// The OTA repository must have a release for the tag (it is where
    /// the tag was selected from). The primary repository may not; a 404
    /// there leaves `details` empty, while any other error is fatal.
    pub async fn fetch(
        source: &GitHubSource,
        primary: &RepoId,
        ota: &RepoId,
        tag: &str,
    ) -> Result<VersionDocument> {
        let ota_details = source
            .release_by_tag(ota, tag)
            .await
            .with_context(|| format!("Failed to fetch {} release for tag {}", ota, tag))?;

        let details = match source.release_by_tag(primary, tag).await {
            Ok(record) => Some(record),
            Err(e) if matches!(e.downcast_ref::<ApiError>(), Some(ApiError::NotFound(_))) => {
                debug!("No {} release for tag {}, using OTA body", primary, tag);
                None
            }
            Err(e) => return Err(e),
        };

        let body = match &details {
            Some(record) => record.body.clone(),
            None => ota_details.body.clone(),
        };

        Ok(VersionDocument {
            version: tag.to_string(),
            body,
            details,
            ota_details,
        })
    }
}
