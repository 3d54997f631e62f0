//! Video handlers: metadata lookup and direct download redirects.
//!
//! Both routes hand the real work to the extractor and only translate its
//! result into HTTP. Media bytes never pass through the gateway; `/download`
//! redirects the client to the origin's delivery servers.

use std::time::Instant;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::Value;
use tracing::{error, info, warn};
use ytgw_extractor::ExtractorError;
use ytgw_models::{watch_url, DownloadQuery, VideoQuery};

use crate::error::{ApiError, ApiResult, NO_DOWNLOAD_URL_MESSAGE};
use crate::metrics;
use crate::state::AppState;

/// 400 message when `/info` has no `url`.
pub const MISSING_URL_MESSAGE: &str = "The \"url\" parameter is required";

/// 400 message when `/download` has no `videoId`.
pub const MISSING_VIDEO_ID_MESSAGE: &str = "The \"videoId\" parameter is required.";

/// Get the extractor's full metadata document for a video page.
///
/// GET /info?url=<page url>
pub async fn get_video_info(
    State(state): State<AppState>,
    query: Result<Query<VideoQuery>, QueryRejection>,
) -> ApiResult<Json<Value>> {
    let Query(query) = query?;
    let url = query
        .url()
        .ok_or_else(|| ApiError::bad_request(MISSING_URL_MESSAGE))?;

    let start = Instant::now();
    let result = state.extractor.fetch_metadata(url).await;
    metrics::record_extractor_call("metadata", &result, start.elapsed());

    let info = result.map_err(|e| {
        error!(url = %url, error = %e, kind = e.kind(), "Failed to fetch video info");
        ApiError::Metadata(e)
    })?;

    Ok(Json(info))
}

/// Resolve a direct media URL and redirect the client to it.
///
/// GET /download?videoId=<id>&formatId=<selector>
pub async fn download_video(
    State(state): State<AppState>,
    query: Result<Query<DownloadQuery>, QueryRejection>,
) -> ApiResult<Response> {
    let Query(query) = query?;
    let video_id = query
        .video_id()
        .ok_or_else(|| ApiError::bad_request(MISSING_VIDEO_ID_MESSAGE))?;
    let url = watch_url(video_id);
    let format = query.format_selector();

    let start = Instant::now();
    let result = state.extractor.resolve_direct_url(&url, format).await;
    metrics::record_extractor_call("resolve", &result, start.elapsed());

    let resolved = match result {
        Ok(resolved) => resolved,
        Err(e) => {
            error!(url = %url, format = %format, error = %e, kind = e.kind(), "Failed to resolve download URL");
            return Err(ApiError::download(e, url, query.format_id.clone()));
        }
    };

    let Some(direct_url) = resolved.direct_url() else {
        warn!(url = %url, format = %format, "Extractor returned no download URL");
        return Err(ApiError::not_found(NO_DOWNLOAD_URL_MESSAGE));
    };

    let location = match HeaderValue::from_str(direct_url) {
        Ok(location) => location,
        Err(e) => {
            error!(url = %url, error = %e, "Resolved URL is not a valid Location header");
            return Err(ApiError::download(
                ExtractorError::other(format!("Resolved URL is not a valid Location header: {e}")),
                url,
                query.format_id.clone(),
            ));
        }
    };

    info!(url = %direct_url, "Redirecting to direct media URL");
    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}
