//! API configuration.

use std::path::PathBuf;
use std::time::Duration;

use ytgw_extractor::{YtDlpConfig, DEFAULT_YTDLP_BINARY};

/// API server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// CORS origins
    pub cors_origins: Vec<String>,
    /// Expose Prometheus metrics at /metrics
    pub metrics_enabled: bool,
    /// yt-dlp invocation settings
    pub extractor: YtDlpConfig,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            cors_origins: vec!["*".to_string()],
            metrics_enabled: true,
            extractor: YtDlpConfig::default(),
        }
    }
}

impl ApiConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create config from an arbitrary variable lookup.
    ///
    /// Missing or unparseable values fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let parsed = |key: &str| non_empty(key).and_then(|v| v.trim().parse::<u64>().ok());

        Self {
            host: non_empty("HOST").unwrap_or(defaults.host),
            port: non_empty("PORT")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(defaults.port),
            cors_origins: non_empty("CORS_ORIGINS")
                .map(|s| s.split(',').map(|s| s.trim().to_string()).collect())
                .unwrap_or(defaults.cors_origins),
            metrics_enabled: non_empty("METRICS_ENABLED")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(defaults.metrics_enabled),
            extractor: YtDlpConfig {
                binary: non_empty("YTDLP_PATH").unwrap_or_else(|| DEFAULT_YTDLP_BINARY.to_string()),
                cookies_file: non_empty("YTDLP_COOKIES_FILE").map(PathBuf::from),
                timeout: parsed("EXTRACTOR_TIMEOUT_SECS")
                    .filter(|secs| *secs > 0)
                    .map(Duration::from_secs),
                max_concurrency: parsed("EXTRACTOR_MAX_CONCURRENCY")
                    .filter(|limit| *limit > 0)
                    .map(|limit| limit as usize),
            },
        }
    }

    /// Address string passed to the listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
