//! Application state.

use std::sync::Arc;

use ytgw_extractor::{VideoExtractor, YtDlp};

use crate::config::ApiConfig;

/// Shared application state.
///
/// Holds no per-request data; the extractor is stateless apart from its
/// optional concurrency limiter.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub extractor: Arc<dyn VideoExtractor>,
}

impl AppState {
    /// Create state backed by yt-dlp as configured.
    pub async fn new(config: ApiConfig) -> Self {
        let extractor = YtDlp::from_config(config.extractor.clone()).await;
        Self::with_extractor(config, Arc::new(extractor))
    }

    /// Create state around any extractor implementation.
    pub fn with_extractor(config: ApiConfig, extractor: Arc<dyn VideoExtractor>) -> Self {
        Self { config, extractor }
    }
}
