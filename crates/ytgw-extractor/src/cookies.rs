//! Cookies file handling for authenticated extraction.
//!
//! yt-dlp rewrites the cookies file after each run, so a file mounted
//! read-only is copied once to a writable location at startup.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

/// Minimum size for a usable Netscape cookies file (bytes).
const MIN_COOKIES_FILE_SIZE: u64 = 50;

/// File name of the writable copy inside the temp directory.
const WRITABLE_COOKIES_NAME: &str = "ytgw-cookies.txt";

/// Check that `content` looks like a Netscape cookies file.
///
/// Accepts either the standard header comment or at least one
/// tab-separated entry with six or more fields. Netscape entries have seven;
/// some exporters drop the trailing empty value.
pub fn is_valid_netscape_cookies(content: &str) -> bool {
    if content.starts_with("# Netscape HTTP Cookie File")
        || content.starts_with("# HTTP Cookie File")
    {
        return true;
    }

    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .any(|line| line.split('\t').count() >= 6)
}

/// Validate `source` and copy it to a writable location.
///
/// Returns `None` (and the extractor runs without cookies) when the file is
/// missing, too small, not in Netscape format, or cannot be copied.
pub async fn validated_cookies_path(source: &Path) -> Option<PathBuf> {
    let metadata = match tokio::fs::metadata(source).await {
        Ok(metadata) => metadata,
        Err(e) => {
            warn!(path = %source.display(), "Cookies file unavailable: {}", e);
            return None;
        }
    };

    if metadata.len() < MIN_COOKIES_FILE_SIZE {
        warn!(
            path = %source.display(),
            size = metadata.len(),
            "Cookies file is too small, ignoring"
        );
        return None;
    }

    let content = match tokio::fs::read_to_string(source).await {
        Ok(content) => content,
        Err(e) => {
            warn!(path = %source.display(), "Failed to read cookies file: {}", e);
            return None;
        }
    };

    if !is_valid_netscape_cookies(&content) {
        warn!(path = %source.display(), "Cookies file is not in Netscape format, ignoring");
        return None;
    }

    let target = std::env::temp_dir().join(WRITABLE_COOKIES_NAME);
    if let Err(e) = tokio::fs::write(&target, content).await {
        warn!(path = %target.display(), "Failed to copy cookies file: {}", e);
        return None;
    }

    debug!(source = %source.display(), target = %target.display(), "Copied cookies file");
    info!("Using cookies file for extractor authentication");
    Some(target)
}
