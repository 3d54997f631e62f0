//! API integration tests.
//!
//! The router is driven in-process with `oneshot`; the extractor is a
//! `mockall` double so no yt-dlp binary is needed.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use mockall::mock;
use mockall::predicate::eq;
use serde_json::{json, Value};
use tower::ServiceExt;

use ytgw_api::{create_router, ApiConfig, AppState};
use ytgw_extractor::{ExtractorError, ExtractorResult, ResolvedUrls, VideoExtractor};

mock! {
    pub Extractor {}

    #[async_trait]
    impl VideoExtractor for Extractor {
        async fn fetch_metadata(&self, url: &str) -> ExtractorResult<Value>;
        async fn resolve_direct_url(&self, watch_url: &str, format: &str) -> ExtractorResult<ResolvedUrls>;
        async fn version(&self) -> ExtractorResult<String>;
    }
}

fn router(extractor: MockExtractor) -> axum::Router {
    let state = AppState::with_extractor(ApiConfig::default(), Arc::new(extractor));
    create_router(state, None)
}

async fn get(app: axum::Router, uri: &str) -> Response<Body> {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap()
}

/// Test root welcome route.
#[tokio::test]
async fn test_root_message() {
    let response = get(router(MockExtractor::new()), "/").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["message"].as_str().unwrap().contains("/info"));
}

/// Test health endpoint.
#[tokio::test]
async fn test_health_endpoint() {
    let response = get(router(MockExtractor::new()), "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "healthy");
}

#[tokio::test]
async fn test_info_requires_url() {
    let mut extractor = MockExtractor::new();
    extractor.expect_fetch_metadata().never();
    let app = router(extractor);

    for uri in ["/info", "/info?url=", "/info?other=1"] {
        let response = get(app.clone(), uri).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
        let body = body_json(response).await;
        assert!(body["error"].is_string(), "{uri}");
        assert!(body.get("details").is_none(), "{uri}");
    }
}

#[tokio::test]
async fn test_info_returns_metadata_verbatim() {
    let mut extractor = MockExtractor::new();
    extractor
        .expect_fetch_metadata()
        .with(eq("https://example.com/v"))
        .times(1)
        .returning(|_| Ok(json!({"title": "X"})));

    let response = get(router(extractor), "/info?url=https%3A%2F%2Fexample.com%2Fv").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/json"
    );
    assert_eq!(body_bytes(response).await, br#"{"title":"X"}"#);
}

#[tokio::test]
async fn test_info_keeps_extractor_key_order() {
    const DOCUMENT: &str = r#"{"id":"abc","title":"X","formats":[{"format_id":"251","ext":"webm"}],"duration":212}"#;

    let mut extractor = MockExtractor::new();
    extractor
        .expect_fetch_metadata()
        .returning(|_| Ok(serde_json::from_str(DOCUMENT).unwrap()));

    let response = get(router(extractor), "/info?url=u").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await, DOCUMENT.as_bytes());
}

#[tokio::test]
async fn test_info_extractor_failure() {
    let mut extractor = MockExtractor::new();
    extractor
        .expect_fetch_metadata()
        .returning(|_| Err(ExtractorError::other("boom")));

    let response = get(router(extractor), "/info?url=https://example.com/v").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert!(body["error"].is_string());
    assert_eq!(body["details"], "boom");
}

#[tokio::test]
async fn test_download_requires_video_id() {
    let mut extractor = MockExtractor::new();
    extractor.expect_resolve_direct_url().never();
    let app = router(extractor);

    for uri in ["/download", "/download?videoId=", "/download?formatId=22"] {
        let response = get(app.clone(), uri).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
        assert!(body_json(response).await["error"].is_string(), "{uri}");
    }
}

#[tokio::test]
async fn test_download_redirects_to_trimmed_first_url() {
    let mut extractor = MockExtractor::new();
    extractor
        .expect_resolve_direct_url()
        .with(eq("https://www.youtube.com/watch?v=abc"), eq("bestaudio/best"))
        .times(1)
        .returning(|_, _| Ok(vec!["https://cdn.example/a.mp4\n".to_string()].into()));

    let response = get(router(extractor), "/download?videoId=abc").await;

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "https://cdn.example/a.mp4");
}

#[tokio::test]
async fn test_download_uses_requested_format() {
    let mut extractor = MockExtractor::new();
    extractor
        .expect_resolve_direct_url()
        .with(eq("https://www.youtube.com/watch?v=abc"), eq("22"))
        .times(1)
        .returning(|_, _| Ok(" https://cdn.example/v22.mp4 \n".into()));

    let response = get(router(extractor), "/download?videoId=abc&formatId=22").await;

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "https://cdn.example/v22.mp4");
}

#[tokio::test]
async fn test_download_accepts_legacy_parameter_name() {
    let mut extractor = MockExtractor::new();
    extractor
        .expect_resolve_direct_url()
        .with(eq("https://www.youtube.com/watch?v=xyz"), eq("bestaudio/best"))
        .times(1)
        .returning(|_, _| Ok("https://cdn.example/x.m4a".into()));

    let response = get(router(extractor), "/download?VIDEO_ID=xyz").await;

    assert_eq!(response.status(), StatusCode::FOUND);
}

#[tokio::test]
async fn test_download_empty_result_is_not_found() {
    let mut extractor = MockExtractor::new();
    extractor
        .expect_resolve_direct_url()
        .returning(|_, _| Ok("".into()));

    let response = get(router(extractor), "/download?videoId=abc").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(response.headers().get(header::LOCATION).is_none());
    assert!(body_json(response).await["error"].is_string());
}

#[tokio::test]
async fn test_download_extractor_failure() {
    let mut extractor = MockExtractor::new();
    extractor
        .expect_resolve_direct_url()
        .returning(|_, _| Err(ExtractorError::other("boom")));
    let app = router(extractor);

    let response = get(app.clone(), "/download?videoId=abc").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["details"], "boom");
    assert_eq!(body["url"], "https://www.youtube.com/watch?v=abc");
    assert!(body.get("formatId").is_none());

    let response = get(app, "/download?videoId=abc&formatId=137").await;
    let body = body_json(response).await;
    assert_eq!(body["details"], "boom");
    assert_eq!(body["formatId"], "137");
}

#[tokio::test]
async fn test_download_rejects_unusable_location() {
    let mut extractor = MockExtractor::new();
    extractor
        .expect_resolve_direct_url()
        .returning(|_, _| Ok("https://cdn.example/a\u{7f}b".into()));

    let response = get(router(extractor), "/download?videoId=abc").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(response).await["url"],
        "https://www.youtube.com/watch?v=abc"
    );
}

#[tokio::test]
async fn test_repeated_requests_are_identical() {
    let mut extractor = MockExtractor::new();
    extractor
        .expect_fetch_metadata()
        .times(3)
        .returning(|_| Ok(json!({"title": "X", "formats": []})));
    extractor
        .expect_resolve_direct_url()
        .times(3)
        .returning(|_, _| Ok("https://cdn.example/a.mp4".into()));
    let app = router(extractor);

    let mut info = Vec::new();
    let mut download = Vec::new();
    for _ in 0..3 {
        let response = get(app.clone(), "/info?url=https://example.com/v").await;
        info.push((response.status(), body_bytes(response).await));

        let response = get(app.clone(), "/download?videoId=abc").await;
        download.push((response.status(), location(&response).to_string()));
    }

    assert!(info.windows(2).all(|w| w[0] == w[1]));
    assert!(download.windows(2).all(|w| w[0] == w[1]));
    assert_eq!(download[0].0, StatusCode::FOUND);
}

#[tokio::test]
async fn test_ready_reports_extractor_version() {
    let mut extractor = MockExtractor::new();
    extractor
        .expect_version()
        .returning(|| Ok("2024.12.13".to_string()));

    let response = get(router(extractor), "/ready").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ready");
    assert_eq!(body["extractor"]["version"], "2024.12.13");
}

#[tokio::test]
async fn test_ready_unavailable_without_extractor() {
    let mut extractor = MockExtractor::new();
    extractor
        .expect_version()
        .returning(|| Err(ExtractorError::BinaryNotFound("yt-dlp".to_string())));

    let response = get(router(extractor), "/ready").await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(
        body_json(response).await["extractor"]["error"],
        "yt-dlp not found in PATH"
    );
}

/// Test security and request id headers.
#[tokio::test]
async fn test_security_headers() {
    let response = get(router(MockExtractor::new()), "/health").await;
    let headers = response.headers();

    assert!(headers.contains_key("X-Content-Type-Options"));
    assert!(headers.contains_key("X-Frame-Options"));
    assert!(headers.contains_key("X-Request-ID"));
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let response = router(MockExtractor::new())
        .oneshot(
            Request::builder()
                .uri("/")
                .header("X-Request-ID", "req-123")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.headers().get("X-Request-ID").unwrap(), "req-123");
}

/// Test CORS headers.
#[tokio::test]
async fn test_cors_preflight() {
    let response = router(MockExtractor::new())
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/info")
                .header("Origin", "http://localhost:5173")
                .header("Access-Control-Request-Method", "GET")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.status() == StatusCode::OK || response.status() == StatusCode::NO_CONTENT);
    assert!(response
        .headers()
        .contains_key("access-control-allow-origin"));
}

/// Installs the process-wide Prometheus recorder; no other test may do so.
#[tokio::test]
async fn test_metrics_route_when_enabled() {
    let handle = ytgw_api::metrics::init_metrics().unwrap();

    let mut extractor = MockExtractor::new();
    extractor
        .expect_fetch_metadata()
        .returning(|_| Ok(json!({"title": "X"})));
    let state = AppState::with_extractor(ApiConfig::default(), Arc::new(extractor));
    let app = create_router(state, Some(handle));

    let response = get(app.clone(), "/info?url=https://example.com/v").await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get(app, "/metrics").await;
    assert_eq!(response.status(), StatusCode::OK);
    let text = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(text.contains("ytgw_http_requests_total"));
    assert!(text.contains(r#"path="/info""#));
    assert!(text.contains("ytgw_extractor_calls_total"));
    assert!(text.contains(r#"outcome="ok""#));
}

#[tokio::test]
async fn test_metrics_route_absent_when_disabled() {
    let response = get(router(MockExtractor::new()), "/metrics").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
