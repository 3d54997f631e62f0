//! Error types for extractor invocations.

use thiserror::Error;

/// Result type for extractor operations.
pub type ExtractorResult<T> = Result<T, ExtractorError>;

/// Errors that can occur while running the extractor.
#[derive(Debug, Error)]
pub enum ExtractorError {
    #[error("{0} not found in PATH")]
    BinaryNotFound(String),

    #[error("Failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} failed ({status}): {message}")]
    Failed {
        program: String,
        status: String,
        message: String,
    },

    #[error("Invalid JSON from extractor: {0}")]
    MalformedOutput(#[from] serde_json::Error),

    #[error("Extractor timed out after {0} seconds")]
    Timeout(u64),

    #[error("{0}")]
    Other(String),
}

impl ExtractorError {
    /// Create an error carrying only a message.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into())
    }

    /// Create a non-zero exit error from the process status and stderr.
    ///
    /// Only the last non-empty stderr line is kept; yt-dlp puts its
    /// `ERROR:` summary there.
    pub fn failed(program: impl Into<String>, status: impl ToString, stderr: &str) -> Self {
        let message = stderr
            .lines()
            .rev()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .unwrap_or("Unknown error")
            .to_string();
        Self::Failed {
            program: program.into(),
            status: status.to_string(),
            message,
        }
    }

    /// Short label used for metrics and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ExtractorError::BinaryNotFound(_) => "not_found",
            ExtractorError::Spawn { .. } => "spawn",
            ExtractorError::Failed { .. } => "failed",
            ExtractorError::MalformedOutput(_) => "malformed_output",
            ExtractorError::Timeout(_) => "timeout",
            ExtractorError::Other(_) => "other",
        }
    }
}
