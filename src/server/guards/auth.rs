use crate::error::WebhookError;
use crate::server::router::BotState;
use axum::{extract::FromRequestParts, http::request::Parts};
use subtle::ConstantTimeEq;

/// Header set by Telegram when the webhook was registered with `secret_token`.
const TELEGRAM_SECRET_HEADER: &str = "x-telegram-bot-api-secret-token";
const WEBHOOK_SECRET_HEADER: &str = "x-webhook-secret";

fn extract_header_secret(headers: &axum::http::HeaderMap) -> Option<String> {
    [TELEGRAM_SECRET_HEADER, WEBHOOK_SECRET_HEADER]
        .into_iter()
        .find_map(|name| headers.get(name).and_then(|v| v.to_str().ok()))
        .map(str::to_string)
}

fn extract_query_secret(query: Option<&str>) -> Option<String> {
    query.and_then(|q| {
        url::form_urlencoded::parse(q.as_bytes())
            .find(|(k, _)| k == "secret")
            .map(|(_, v)| v.into_owned())
    })
}

/// Rejects with 403 unless the request carries the webhook secret.
#[derive(Debug, Clone, Copy)]
pub struct RequireWebhookSecret;

impl FromRequestParts<BotState> for RequireWebhookSecret {
    type Rejection = WebhookError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &BotState,
    ) -> Result<Self, Self::Rejection> {
        let secret = extract_header_secret(&parts.headers)
            .or_else(|| extract_query_secret(parts.uri.query()));

        let expected = state.webhook_secret.as_ref();
        match secret {
            Some(secret)
                if !expected.is_empty()
                    && bool::from(secret.as_bytes().ct_eq(expected.as_bytes())) =>
            {
                Ok(RequireWebhookSecret)
            }
            _ => Err(WebhookError::Forbidden),
        }
    }
}
