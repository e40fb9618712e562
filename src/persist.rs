//! Writes the per-channel version documents to disk.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::debug;

use crate::channel::Channel;
use crate::version::VersionDocument;

/// Writes each document to `<dir>/<channel>.json`, creating the directory
/// and overwriting existing files. Output is pretty-printed UTF-8 JSON;
/// serde_json leaves non-ASCII characters unescaped, so changelog text in
/// any language round-trips literally.
pub fn write_documents(dir: &Path, documents: &[(Channel, VersionDocument)]) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory {}", dir.display()))?;

    for (channel, document) in documents {
        let path = dir.join(channel.file_name());
        debug!("Writing {} document to {}", channel, path.display());

        let json = serde_json::to_vec_pretty(document)
            .with_context(|| format!("Failed to serialize {} document", channel))?;
        fs::write(&path, json)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    Ok(())
}
