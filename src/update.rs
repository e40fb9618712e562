//! The update pipeline: list releases, select channel tags, build and
//! persist the three version documents.

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use log::info;

use crate::channel::{Channel, ChannelTags};
use crate::config;
use crate::http::HttpClient;
use crate::persist;
use crate::source::{GitHubSource, RepoId};
use crate::version::VersionDocument;

/// Options for one update run.
#[derive(Debug)]
pub struct UpdateOptions {
    /// Primary project repository; may lack a release for OTA-only tags.
    pub primary_repo: RepoId,
    /// OTA repository; carries a release for every channel tag and is the
    /// one whose release list drives channel selection.
    pub ota_repo: RepoId,
    /// API base URL.
    pub api_url: String,
    /// Directory the three channel documents are written to.
    pub output_dir: PathBuf,
}

/// Runs the whole pipeline once.
///
/// Fully sequential: the three channel documents are fetched one after
/// another, then written together. Nothing is written if any fetch fails.
pub async fn update(options: UpdateOptions) -> Result<()> {
    let token = config::resolve_token();
    if token.is_none() {
        info!("No API token in environment, using unauthenticated requests");
    }
    let client = HttpClient::new(config::api_client(token.as_deref())?);
    let source = GitHubSource::with_api_url(client, &options.api_url);

    let releases = source
        .list_releases(&options.ota_repo)
        .await
        .with_context(|| format!("Failed to list releases for {}", options.ota_repo))?;
    let tags = ChannelTags::select(releases.iter().map(|r| r.tag_name.as_str()));

    println!(
        "alpha: {}, beta: {}, stable: {}",
        display_tag(tags.get(Channel::Alpha)),
        display_tag(tags.get(Channel::Beta)),
        display_tag(tags.get(Channel::Stable)),
    );

    let mut documents = Vec::with_capacity(Channel::ALL.len());
    for channel in Channel::ALL {
        let tag = tags
            .get(channel)
            .ok_or_else(|| anyhow!("No release found for the {} channel", channel))?;
        let document =
            VersionDocument::fetch(&source, &options.primary_repo, &options.ota_repo, tag).await?;
        documents.push((channel, document));
    }

    persist::write_documents(&options.output_dir, &documents)
}

fn display_tag(tag: Option<&str>) -> &str {
    tag.unwrap_or("none")
}
