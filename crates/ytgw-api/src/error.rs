//! API error types.

use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use ytgw_extractor::ExtractorError;
use ytgw_models::ErrorBody;

pub type ApiResult<T> = Result<T, ApiError>;

/// Client-facing message for a failed metadata lookup.
pub const INFO_FAILED_MESSAGE: &str = "Could not fetch video information.";

/// Client-facing message for a failed URL resolution.
pub const DOWNLOAD_FAILED_MESSAGE: &str = "Could not get the download link.";

/// Client-facing message when resolution produced nothing usable.
pub const NO_DOWNLOAD_URL_MESSAGE: &str = "Could not generate a download URL for this format.";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Metadata extraction failed: {0}")]
    Metadata(#[source] ExtractorError),

    #[error("Download URL resolution failed for {url}: {source}")]
    Download {
        source: ExtractorError,
        url: String,
        format_id: Option<String>,
    },
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Resolution failure carrying the watch URL and requested format.
    pub fn download(source: ExtractorError, url: impl Into<String>, format_id: Option<String>) -> Self {
        Self::Download {
            source,
            url: url.into(),
            format_id,
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Metadata(_) | ApiError::Download { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Extractor failures expose the raw message as `details`
        let body = match self {
            ApiError::BadRequest(message) | ApiError::NotFound(message) => ErrorBody::new(message),
            ApiError::Metadata(source) => {
                ErrorBody::new(INFO_FAILED_MESSAGE).with_details(source.to_string())
            }
            ApiError::Download {
                source,
                url,
                format_id,
            } => ErrorBody::new(DOWNLOAD_FAILED_MESSAGE)
                .with_details(source.to_string())
                .with_url(url)
                .with_format_id(format_id),
        };

        (status, Json(body)).into_response()
    }
}
