use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error as ThisError;

/// Inbound rejections. Bodies stay terse so callers learn nothing about routing.
#[derive(Debug, ThisError)]
pub enum WebhookError {
    #[error("webhook secret missing or mismatched")]
    Forbidden,

    #[error("malformed update payload: {0}")]
    MalformedPayload(String),

    #[error("missing chat_id")]
    MissingChatId,
}

impl IntoResponse for WebhookError {
    fn into_response(self) -> Response {
        match self {
            WebhookError::Forbidden => (StatusCode::FORBIDDEN, "forbidden").into_response(),
            WebhookError::MalformedPayload(reason) => {
                tracing::warn!(reason = %reason, "Webhook payload rejected");
                (StatusCode::BAD_REQUEST, "Bad Request").into_response()
            }
            WebhookError::MissingChatId => {
                (StatusCode::BAD_REQUEST, "missing chat_id").into_response()
            }
        }
    }
}
