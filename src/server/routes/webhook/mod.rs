use crate::server::router::BotState;
use axum::{Router, routing::post};

pub mod extract;
pub mod handlers;

/// Header/query-authenticated webhook. The `/{secret}` route is added by the top-level
/// router because its path depends on configuration.
pub fn router() -> Router<BotState> {
    Router::new().route("/webhook", post(handlers::header_secret_webhook))
}
