//! Root route.

use axum::Json;
use ytgw_models::MessageBody;

/// Message served at `/` so clients can tell the gateway is up.
pub const WELCOME_MESSAGE: &str = "YouTube downloader API is running. Use /info or /download.";

pub async fn index() -> Json<MessageBody> {
    Json(MessageBody::new(WELCOME_MESSAGE))
}
