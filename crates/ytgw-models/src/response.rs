//! JSON bodies produced by the gateway itself.
//!
//! Successful `/info` responses are the extractor's document verbatim and
//! have no type here.

use serde::{Deserialize, Serialize};

/// `{ "message": ... }` body served at the root route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageBody {
    pub message: String,
}

impl MessageBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Error body shared by every failing route.
///
/// `details`, `url` and `formatId` are only present on extractor failures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub url: Option<String>,
    #[serde(
        rename = "formatId",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub format_id: Option<String>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            ..Default::default()
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_format_id(mut self, format_id: Option<String>) -> Self {
        self.format_id = format_id;
        self
    }
}
