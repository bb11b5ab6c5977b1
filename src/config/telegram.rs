use serde::{Deserialize, Serialize};
use url::Url;

/// Telegram Bot API configuration managed by Figment.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TelegramConfig {
    /// Bot token used to build `/bot{token}/{method}` URLs.
    /// TOML: `telegram.bot_token`. Env: `TELEGRAM_BOT_TOKEN`.
    /// Sends fail (and are logged) while unset.
    #[serde(default)]
    pub bot_token: Option<String>,

    /// Bot API base URL.
    /// TOML: `telegram.api_base`. Default: `https://api.telegram.org`.
    #[serde(default = "default_api_base")]
    pub api_base: Url,

    /// Optional upstream HTTP proxy for Bot API calls.
    /// TOML: `telegram.proxy`. Example: `http://127.0.0.1:1080`.
    #[serde(default)]
    pub proxy: Option<Url>,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            bot_token: None,
            api_base: default_api_base(),
            proxy: None,
        }
    }
}

impl TelegramConfig {
    pub fn bot_token(&self) -> Option<&str> {
        self.bot_token
            .as_deref()
            .map(str::trim)
            .filter(|token| !token.is_empty())
    }
}

fn default_api_base() -> Url {
    Url::parse("https://api.telegram.org").expect("valid Telegram Bot API base URL")
}
