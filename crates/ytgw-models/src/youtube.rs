//! YouTube URL helpers.

/// Prefix of the canonical watch URL; the video id is appended verbatim.
pub const WATCH_URL_PREFIX: &str = "https://www.youtube.com/watch?v=";

/// Build the canonical watch URL for a video id.
///
/// The id is not validated or escaped. Malformed ids are left for the
/// extractor to reject.
pub fn watch_url(video_id: &str) -> String {
    format!("{WATCH_URL_PREFIX}{video_id}")
}
