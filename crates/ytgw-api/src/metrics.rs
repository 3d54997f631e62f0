//! Prometheus metrics for the API server.

use std::time::{Duration, Instant};

use axum::body::Body;
use axum::extract::MatchedPath;
use axum::http::{Request, Response};
use axum::middleware::Next;
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use ytgw_extractor::ExtractorResult;

/// Install the Prometheus recorder.
/// Returns a handle that can be used to render metrics.
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new().install_recorder()
}

/// Metric names as constants for consistency.
pub mod names {
    // HTTP metrics
    pub const HTTP_REQUESTS_TOTAL: &str = "ytgw_http_requests_total";
    pub const HTTP_REQUEST_DURATION_SECONDS: &str = "ytgw_http_request_duration_seconds";
    pub const HTTP_REQUESTS_IN_FLIGHT: &str = "ytgw_http_requests_in_flight";

    // Extractor metrics
    pub const EXTRACTOR_CALLS_TOTAL: &str = "ytgw_extractor_calls_total";
    pub const EXTRACTOR_DURATION_SECONDS: &str = "ytgw_extractor_duration_seconds";
}

/// Route label for requests that matched no route.
const UNMATCHED_ROUTE: &str = "unmatched";

/// Record an HTTP request.
pub fn record_http_request(method: &str, route: &str, status: u16, duration_secs: f64) {
    let labels = [
        ("method", method.to_string()),
        ("path", route.to_string()),
        ("status", status.to_string()),
    ];

    counter!(names::HTTP_REQUESTS_TOTAL, &labels).increment(1);
    histogram!(names::HTTP_REQUEST_DURATION_SECONDS, &labels).record(duration_secs);
}

/// Record one extractor invocation and its outcome.
pub fn record_extractor_call<T>(operation: &'static str, result: &ExtractorResult<T>, duration: Duration) {
    let outcome = match result {
        Ok(_) => "ok",
        Err(e) => e.kind(),
    };
    let labels = [("operation", operation), ("outcome", outcome)];

    counter!(names::EXTRACTOR_CALLS_TOTAL, &labels).increment(1);
    histogram!(names::EXTRACTOR_DURATION_SECONDS, "operation" => operation)
        .record(duration.as_secs_f64());
}

/// Metrics middleware for HTTP requests.
///
/// Labels by the matched route template so arbitrary paths cannot blow up
/// label cardinality.
pub async fn metrics_middleware(request: Request<Body>, next: Next) -> Response<Body> {
    let method = request.method().to_string();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_string())
        .unwrap_or_else(|| UNMATCHED_ROUTE.to_string());
    let start = Instant::now();

    gauge!(names::HTTP_REQUESTS_IN_FLIGHT).increment(1.0);

    let response = next.run(request).await;

    gauge!(names::HTTP_REQUESTS_IN_FLIGHT).decrement(1.0);

    record_http_request(&method, &route, response.status().as_u16(), start.elapsed().as_secs_f64());

    response
}
