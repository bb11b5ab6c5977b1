use super::extract::UpdatePayload;
use crate::server::guards::auth::RequireWebhookSecret;
use crate::server::router::BotState;
use axum::extract::State;

/// Acknowledgement body for every accepted update.
const ACK: &str = "OK";

/// `POST /{secret}`: the path itself is the credential.
pub(crate) async fn secret_path_webhook(
    State(state): State<BotState>,
    UpdatePayload(update): UpdatePayload,
) -> &'static str {
    state.dispatcher.handle(&update).await;
    ACK
}

/// `POST /webhook`: secret in a header or `?secret=`.
pub(crate) async fn header_secret_webhook(
    _auth: RequireWebhookSecret,
    State(state): State<BotState>,
    UpdatePayload(update): UpdatePayload,
) -> &'static str {
    state.dispatcher.handle(&update).await;
    ACK
}
