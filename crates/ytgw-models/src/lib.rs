//! Shared request and response models for the ytgw gateway.
//!
//! This crate provides Serde types for:
//! - Query parameters accepted by `/info` and `/download`
//! - JSON bodies returned by the gateway itself
//! - The canonical YouTube watch URL template

pub mod query;
pub mod response;
pub mod youtube;

pub use query::{DownloadQuery, VideoQuery, DEFAULT_FORMAT_SELECTOR};
pub use response::{ErrorBody, MessageBody};
pub use youtube::{watch_url, WATCH_URL_PREFIX};
