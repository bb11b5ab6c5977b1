mod bot;
mod config;
mod webhook;

pub use bot::BotError;
pub use config::ConfigError;
pub use webhook::WebhookError;
