//! yt-dlp wrapper for the ytgw gateway.
//!
//! This crate provides:
//! - The `VideoExtractor` capability the HTTP layer depends on
//! - A yt-dlp backed implementation running one subprocess per call
//! - Normalization of the `--get-url` output shapes
//! - Cookies file validation for authenticated extraction

pub mod cookies;
pub mod error;
pub mod extractor;
pub mod ytdlp;

pub use cookies::validated_cookies_path;
pub use error::{ExtractorError, ExtractorResult};
pub use extractor::{ResolvedUrls, VideoExtractor};
pub use ytdlp::{YtDlp, YtDlpConfig, DEFAULT_YTDLP_BINARY};
