mod api;
mod client;

pub use api::TelegramApi;
pub use client::TelegramClient;

use crate::error::BotError;
use async_trait::async_trait;
use botpicks_schema::{SendMessage, TelegramResponse};

/// Fixed User-Agent for outbound Bot API and store calls.
pub(crate) const BOTPICKS_USER_AGENT: &str = concat!("botpicks/", env!("CARGO_PKG_VERSION"));

/// Outbound chat delivery.
#[async_trait]
pub trait MessageSender: Send + Sync {
    async fn send_message(&self, message: &SendMessage) -> Result<TelegramResponse, BotError>;
}
