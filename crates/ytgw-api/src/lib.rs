//! Axum HTTP gateway over yt-dlp.
//!
//! This crate provides:
//! - `/info`: the extractor's metadata document for a page URL
//! - `/download`: a 302 redirect to a video's direct media URL
//! - Health, readiness and Prometheus metrics endpoints
//! - Request id, logging, CORS and security header middleware

pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod routes;
pub mod state;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use state::AppState;
