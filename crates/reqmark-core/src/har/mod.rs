//! HAR (HTTP Archive) import: load captured requests from a proxy or browser
//! export so they can be marked and described without a live host.
//!
//! Each entry becomes raw request bytes plus the entry's `comment` as its
//! description.

mod parse;
mod rebuild;

use anyhow::{Context, Result};
use std::path::Path;

use rebuild::raw_request;

/// One captured request recovered from a HAR file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportedRequest {
    pub url: String,
    pub request: Vec<u8>,
    /// Entry comment, or empty.
    pub description: String,
}

/// Load every entry of a HAR file, in file order.
pub fn load_requests(path: &Path) -> Result<Vec<ImportedRequest>> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("read HAR file: {}", path.display()))?;
    parse_requests(&bytes).with_context(|| format!("parse HAR JSON: {}", path.display()))
}

/// Same as [`load_requests`] over an in-memory document.
pub fn parse_requests(bytes: &[u8]) -> Result<Vec<ImportedRequest>> {
    let har: parse::HarLog = serde_json::from_slice(bytes)?;
    if har.log.entries.is_empty() {
        anyhow::bail!("HAR file has no entries");
    }
    let requests = har
        .log
        .entries
        .into_iter()
        .map(|entry| ImportedRequest {
            request: raw_request(&entry.request),
            url: entry.request.url,
            description: entry.comment.unwrap_or_default(),
        })
        .collect::<Vec<_>>();
    tracing::debug!(count = requests.len(), "parsed HAR entries");
    Ok(requests)
}
