//! Extractor capability used by the HTTP layer.
//!
//! Handlers only see this trait, so the yt-dlp subprocess can be replaced by
//! a test double implementing the same operations.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::ExtractorResult;

/// Output of a direct URL resolution.
///
/// yt-dlp prints one URL per matched stream, so a format selector that picks
/// separate video and audio streams yields several lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedUrls {
    Single(String),
    Many(Vec<String>),
}

impl ResolvedUrls {
    /// Parse raw `--get-url` stdout, one URL per non-blank line.
    pub fn from_stdout(stdout: &str) -> Self {
        let mut lines: Vec<String> = stdout
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(str::to_string)
            .collect();

        if lines.len() > 1 {
            Self::Many(lines)
        } else {
            Self::Single(lines.pop().unwrap_or_default())
        }
    }

    /// The URL to redirect to: first entry, surrounding whitespace removed.
    ///
    /// Returns `None` when nothing usable remains.
    pub fn direct_url(&self) -> Option<&str> {
        let first = match self {
            ResolvedUrls::Single(url) => url.as_str(),
            ResolvedUrls::Many(urls) => urls.first().map(String::as_str).unwrap_or_default(),
        };
        Some(first.trim()).filter(|url| !url.is_empty())
    }
}

impl From<String> for ResolvedUrls {
    fn from(url: String) -> Self {
        Self::Single(url)
    }
}

impl From<&str> for ResolvedUrls {
    fn from(url: &str) -> Self {
        Self::Single(url.to_string())
    }
}

impl From<Vec<String>> for ResolvedUrls {
    fn from(urls: Vec<String>) -> Self {
        Self::Many(urls)
    }
}

/// Metadata and stream URL extraction for a video page.
#[async_trait]
pub trait VideoExtractor: Send + Sync {
    /// Full metadata document for `url`, as produced by the extractor.
    async fn fetch_metadata(&self, url: &str) -> ExtractorResult<Value>;

    /// Direct media URL(s) for `watch_url` matching the `format` selector.
    async fn resolve_direct_url(&self, watch_url: &str, format: &str)
        -> ExtractorResult<ResolvedUrls>;

    /// Extractor version string, used by readiness checks.
    async fn version(&self) -> ExtractorResult<String>;
}
