use super::{MessageSender, TelegramApi};
use crate::config::TelegramConfig;
use crate::error::BotError;
use async_trait::async_trait;
use botpicks_schema::{SendMessage, TelegramResponse};
use std::time::Instant;
use tracing::debug;
use url::Url;

/// Bot API client. One attempt per message; no retries.
#[derive(Clone)]
pub struct TelegramClient {
    client: reqwest::Client,
    api_base: Url,
    bot_token: Option<String>,
}

impl TelegramClient {
    pub fn new(cfg: &TelegramConfig, client: reqwest::Client) -> Self {
        Self {
            client,
            api_base: cfg.api_base.clone(),
            bot_token: cfg.bot_token().map(str::to_string),
        }
    }
}

#[async_trait]
impl MessageSender for TelegramClient {
    async fn send_message(&self, message: &SendMessage) -> Result<TelegramResponse, BotError> {
        let token = self.bot_token.as_deref().ok_or(BotError::MissingBotToken)?;

        let start = Instant::now();
        let req =
            TelegramApi::build_send_message_request(&self.client, &self.api_base, token, message)?;
        let resp = self.client.execute(req).await?;

        if !resp.status().is_success() {
            return Err(BotError::from_upstream(resp).await);
        }

        let body: TelegramResponse = resp.json().await?;
        debug!(
            chat_id = %message.chat_id,
            ok = body.ok,
            took_ms = start.elapsed().as_millis() as u64,
            "[Telegram] sendMessage delivered"
        );
        Ok(body)
    }
}
