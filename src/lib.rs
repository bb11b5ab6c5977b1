pub mod bot;
pub mod config;
pub mod error;
pub mod server;
pub mod store;
pub mod telegram;

pub use error::{BotError, ConfigError, WebhookError};
