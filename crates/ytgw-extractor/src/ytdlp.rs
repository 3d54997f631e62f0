//! yt-dlp backed extractor.
//!
//! Every call spawns its own yt-dlp process and waits for it to exit. By
//! default nothing bounds how many processes run at once or how long one may
//! take; both limits are opt-in through [`YtDlpConfig`].

use std::path::PathBuf;
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tokio::process::Command;
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

use crate::cookies::validated_cookies_path;
use crate::error::{ExtractorError, ExtractorResult};
use crate::extractor::{ResolvedUrls, VideoExtractor};

/// Binary looked up on `PATH` when none is configured.
pub const DEFAULT_YTDLP_BINARY: &str = "yt-dlp";

/// yt-dlp invocation settings.
#[derive(Debug, Clone)]
pub struct YtDlpConfig {
    /// Program name on `PATH` or path to the executable
    pub binary: String,
    /// Netscape cookies file to authenticate with
    pub cookies_file: Option<PathBuf>,
    /// Kill the process and fail after this long
    pub timeout: Option<Duration>,
    /// Maximum number of simultaneous yt-dlp processes
    pub max_concurrency: Option<usize>,
}

impl Default for YtDlpConfig {
    fn default() -> Self {
        Self {
            binary: DEFAULT_YTDLP_BINARY.to_string(),
            cookies_file: None,
            timeout: None,
            max_concurrency: None,
        }
    }
}

/// Extractor running the yt-dlp command line tool.
#[derive(Debug, Clone)]
pub struct YtDlp {
    binary: String,
    cookies: Option<PathBuf>,
    timeout: Option<Duration>,
    permits: Option<Arc<Semaphore>>,
}

impl Default for YtDlp {
    fn default() -> Self {
        Self::new(DEFAULT_YTDLP_BINARY)
    }
}

impl YtDlp {
    /// Create an extractor with no cookies, timeout or concurrency cap.
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            cookies: None,
            timeout: None,
            permits: None,
        }
    }

    /// Build from config, validating the cookies file once up front.
    pub async fn from_config(config: YtDlpConfig) -> Self {
        let mut extractor = Self::new(config.binary);

        if let Some(source) = config.cookies_file {
            extractor.cookies = validated_cookies_path(&source).await;
        }
        if let Some(timeout) = config.timeout {
            extractor = extractor.with_timeout(timeout);
        }
        if let Some(limit) = config.max_concurrency {
            extractor = extractor.with_max_concurrency(limit);
        }

        extractor
    }

    /// Fail invocations that run longer than `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Allow at most `limit` yt-dlp processes at once; extra callers wait.
    pub fn with_max_concurrency(mut self, limit: usize) -> Self {
        self.permits = Some(Arc::new(Semaphore::new(limit.max(1))));
        self
    }

    /// Pass `path` to yt-dlp with `--cookies` as is.
    pub fn with_cookies(mut self, path: impl Into<PathBuf>) -> Self {
        self.cookies = Some(path.into());
        self
    }

    pub fn binary(&self) -> &str {
        &self.binary
    }

    fn metadata_args(&self, url: &str) -> Vec<String> {
        let mut args = vec!["--dump-single-json".to_string(), "--no-warnings".to_string()];
        self.push_common_args(&mut args, url);
        args
    }

    fn resolve_args(&self, watch_url: &str, format: &str) -> Vec<String> {
        let mut args = vec![
            "--get-url".to_string(),
            "--format".to_string(),
            format.to_string(),
            "--no-warnings".to_string(),
        ];
        self.push_common_args(&mut args, watch_url);
        args
    }

    /// Cookies, then the target after `--` so it is never read as an option.
    fn push_common_args(&self, args: &mut Vec<String>, target: &str) {
        if let Some(cookies) = &self.cookies {
            args.push("--cookies".to_string());
            args.push(cookies.to_string_lossy().into_owned());
        }
        args.push("--".to_string());
        args.push(target.to_string());
    }

    /// Run yt-dlp with `args` and return its stdout.
    async fn run(&self, args: &[String]) -> ExtractorResult<String> {
        let program = which::which(&self.binary)
            .map_err(|_| ExtractorError::BinaryNotFound(self.binary.clone()))?;

        let _permit = match &self.permits {
            Some(permits) => Some(
                permits
                    .acquire()
                    .await
                    .map_err(|_| ExtractorError::other("Extractor concurrency limiter closed"))?,
            ),
            None => None,
        };

        debug!(program = %program.display(), args = ?args, "Running extractor");

        let mut command = Command::new(&program);
        command
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let output = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, command.output())
                .await
                .map_err(|_| ExtractorError::Timeout(limit.as_secs()))?,
            None => command.output().await,
        }
        .map_err(|source| ExtractorError::Spawn {
            program: self.binary.clone(),
            source,
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!(
                program = %self.binary,
                status = %output.status,
                stderr = %stderr.trim_end(),
                "Extractor exited with an error"
            );
            return Err(ExtractorError::failed(&self.binary, output.status, &stderr));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[async_trait]
impl VideoExtractor for YtDlp {
    async fn fetch_metadata(&self, url: &str) -> ExtractorResult<Value> {
        info!(url = %url, "Fetching video metadata");
        let stdout = self.run(&self.metadata_args(url)).await?;
        Ok(serde_json::from_str(&stdout)?)
    }

    async fn resolve_direct_url(
        &self,
        watch_url: &str,
        format: &str,
    ) -> ExtractorResult<ResolvedUrls> {
        info!(url = %watch_url, format = %format, "Resolving direct media URL");
        let stdout = self.run(&self.resolve_args(watch_url, format)).await?;
        Ok(ResolvedUrls::from_stdout(&stdout))
    }

    async fn version(&self) -> ExtractorResult<String> {
        let stdout = self.run(&["--version".to_string()]).await?;
        Ok(stdout.trim().to_string())
    }
}
