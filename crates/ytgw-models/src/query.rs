//! Query parameters for the video routes.
//!
//! Every field is optional at the type level so that a missing parameter
//! reaches the handler and can be answered with the gateway's own 400 body
//! instead of a framework rejection.

use serde::{Deserialize, Serialize};

/// Format selector used when the caller does not ask for one.
pub const DEFAULT_FORMAT_SELECTOR: &str = "bestaudio/best";

/// Query for `GET /info`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoQuery {
    /// Page URL handed to the extractor.
    pub url: Option<String>,
}

impl VideoQuery {
    /// The target URL, or `None` when absent or empty.
    pub fn url(&self) -> Option<&str> {
        non_empty(self.url.as_deref())
    }
}

/// Query for `GET /download`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadQuery {
    /// YouTube video id. `VIDEO_ID` is accepted for older clients.
    #[serde(rename = "videoId", alias = "VIDEO_ID")]
    pub video_id: Option<String>,
    /// Extractor format selector.
    #[serde(rename = "formatId")]
    pub format_id: Option<String>,
}

impl DownloadQuery {
    /// The video id, or `None` when absent or empty.
    pub fn video_id(&self) -> Option<&str> {
        non_empty(self.video_id.as_deref())
    }

    /// The format selector to pass to the extractor.
    pub fn format_selector(&self) -> &str {
        non_empty(self.format_id.as_deref()).unwrap_or(DEFAULT_FORMAT_SELECTOR)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
