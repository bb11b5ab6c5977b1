use crate::bot::replies::PING_TEXT;
use crate::error::WebhookError;
use crate::server::router::{BotState, Presence};
use axum::{
    Json, Router,
    extract::{Query, Request, State},
    routing::get,
};
use botpicks_schema::{ChatId, SendMessage, TelegramResponse};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

pub fn router() -> Router<BotState> {
    Router::new()
        .route("/health", get(health_handler))
        .route("/echo", get(echo_handler))
        .route("/send", get(send_handler))
}

#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub ok: bool,
    pub has: Presence,
}

async fn health_handler(State(state): State<BotState>) -> Json<HealthReport> {
    Json(HealthReport {
        ok: state.presence.all_present(),
        has: state.presence,
    })
}

#[derive(Debug, Serialize)]
pub struct EchoReport {
    pub method: String,
    pub uri: String,
    pub headers: BTreeMap<String, String>,
}

async fn echo_handler(req: Request) -> Json<EchoReport> {
    let mut headers: BTreeMap<String, String> = BTreeMap::new();
    for (name, value) in req.headers() {
        let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
        headers
            .entry(name.as_str().to_string())
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(&value);
            })
            .or_insert(value);
    }

    Json(EchoReport {
        method: req.method().to_string(),
        uri: req.uri().to_string(),
        headers,
    })
}

#[derive(Debug, Deserialize)]
pub struct SendQuery {
    chat_id: Option<String>,
}

/// Sends a fixed ping to a numeric chat id or `@channelusername` and returns the Bot API's answer (or the failure) as JSON.
async fn send_handler(
    State(state): State<BotState>,
    Query(query): Query<SendQuery>,
) -> Result<Json<TelegramResponse>, WebhookError> {
    let chat_id = query
        .chat_id
        .as_deref()
        .and_then(ChatId::parse)
        .ok_or(WebhookError::MissingChatId)?;

    let message = SendMessage::to(chat_id, PING_TEXT);
    let body = match state.dispatcher.sender().send_message(&message).await {
        Ok(resp) => resp,
        Err(e) => {
            warn!(chat_id = %message.chat_id, error = %e, "[Telegram] Diagnostic ping failed");
            TelegramResponse {
                ok: false,
                description: Some(e.to_string()),
                ..Default::default()
            }
        }
    };
    Ok(Json(body))
}
