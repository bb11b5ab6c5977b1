use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// How the webhook handler waits on its reply.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReplyMode {
    /// Await the send before acknowledging the update.
    #[default]
    Await,
    /// Spawn the send as a best-effort task and acknowledge immediately.
    Detached,
}

/// Bot behavior configuration managed by Figment.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BotConfig {
    /// Settings key under which the bankroll is stored.
    /// TOML: `bot.setting_key`. Default: `bankroll`.
    #[serde(default = "default_setting_key")]
    pub setting_key: String,

    /// Bankroll reported when the store has no usable value.
    /// TOML: `bot.default_bankroll`. Env: `DEFAULT_BANKROLL`. Default: `500`.
    #[serde(default = "default_bankroll")]
    pub default_bankroll: f64,

    /// Preset amounts offered on the `/config` keyboard.
    /// TOML: `bot.bankroll_choices`. Default: `[300, 500, 1000, 2000]`.
    #[serde(default = "default_bankroll_choices")]
    pub bankroll_choices: Vec<f64>,

    /// TOML: `bot.reply_mode` (`await` | `detached`). Default: `await`.
    #[serde(default)]
    pub reply_mode: ReplyMode,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            setting_key: default_setting_key(),
            default_bankroll: default_bankroll(),
            bankroll_choices: default_bankroll_choices(),
            reply_mode: ReplyMode::default(),
        }
    }
}

impl BotConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.setting_key.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "bot.setting_key must be non-empty".to_string(),
            ));
        }
        if !self.default_bankroll.is_finite() {
            return Err(ConfigError::Invalid(
                "bot.default_bankroll must be a finite number".to_string(),
            ));
        }
        if self.bankroll_choices.iter().any(|c| !c.is_finite() || *c < 0.0) {
            return Err(ConfigError::Invalid(
                "bot.bankroll_choices must be finite, non-negative numbers".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_setting_key() -> String {
    "bankroll".to_string()
}

fn default_bankroll() -> f64 {
    500.0
}

fn default_bankroll_choices() -> Vec<f64> {
    vec![300.0, 500.0, 1000.0, 2000.0]
}
