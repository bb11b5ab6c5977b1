use crate::error::WebhookError;
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use botpicks_schema::Update;
use serde_json::Value;
use tracing::{Level, debug, warn};

pub(crate) struct UpdatePayload(pub(crate) Update);

impl<S> FromRequest<S> for UpdatePayload
where
    S: Send + Sync,
{
    type Rejection = WebhookError;

    /// Parse the webhook body into an `Update`.
    ///
    /// - Content-Type is not enforced; the chat platform and ad-hoc callers differ.
    /// - Unparseable JSON => `400 Bad Request`.
    /// - Well-formed JSON that does not fit the `Update` shape is accepted as an empty
    ///   update, so the platform gets its 200 and does not redeliver it.
    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| WebhookError::MalformedPayload(e.to_string()))?;

        let raw: Value = serde_json::from_slice(&bytes)
            .map_err(|e| WebhookError::MalformedPayload(e.to_string()))?;

        if tracing::enabled!(Level::DEBUG) {
            let pretty = serde_json::to_string_pretty(&raw)
                .unwrap_or_else(|error| format!("<pretty serialize failed: {error}>"));
            debug!(body = %pretty, "Webhook update received");
        }

        let update = serde_json::from_value::<Update>(raw).unwrap_or_else(|e| {
            warn!(error = %e, "Webhook update has an unexpected shape; ignoring it");
            Update::default()
        });

        Ok(Self(update))
    }
}
