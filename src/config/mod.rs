mod basic;
mod bot;
mod store;
mod telegram;

pub use basic::{BasicConfig, RESERVED_PATHS};
pub use bot::{BotConfig, ReplyMode};
pub use store::StoreConfig;
pub use telegram::TelegramConfig;

use crate::error::ConfigError;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
    value::Uncased,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration managed by Figment.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Core server configuration (see `basic` table in config.toml).
    #[serde(default)]
    pub basic: BasicConfig,

    /// Telegram Bot API settings (see `telegram` table in config.toml).
    #[serde(default)]
    pub telegram: TelegramConfig,

    /// Settings store settings (see `store` table in config.toml).
    #[serde(default)]
    pub store: StoreConfig,

    /// Command behavior (see `bot` table in config.toml).
    #[serde(default)]
    pub bot: BotConfig,
}

const DEFAULT_CONFIG_FILE: &str = "config.toml";
const ENV_PREFIX: &str = "BOTPICKS_";

/// Flat environment names used by existing deployments, mapped onto config paths.
const LEGACY_ENV: [(&str, &str); 2] = [
    ("SUPABASE_URL", "store.url"),
    ("DEFAULT_BANKROLL", "bot.default_bankroll"),
];

/// Credentials taken verbatim. `Env` parses values by type, which would turn a
/// secret like `0123` into the integer `123`.
const LEGACY_STRING_ENV: [(&str, &str); 3] = [
    ("WEBHOOK_SECRET_TOKEN", "basic.webhook_secret"),
    ("TELEGRAM_BOT_TOKEN", "telegram.bot_token"),
    ("SUPABASE_SERVICE_ROLE", "store.service_role"),
];

const PREFIXED_STRING_ENV: [(&str, &str); 3] = [
    ("BOTPICKS_BASIC__WEBHOOK_SECRET", "basic.webhook_secret"),
    ("BOTPICKS_TELEGRAM__BOT_TOKEN", "telegram.bot_token"),
    ("BOTPICKS_STORE__SERVICE_ROLE", "store.service_role"),
];

fn legacy_env() -> Env {
    let names: Vec<&str> = LEGACY_ENV.iter().map(|(name, _)| *name).collect();
    Env::raw().only(&names).map(|key| {
        LEGACY_ENV
            .iter()
            .find(|(name, _)| key == *name)
            .map(|(_, path)| Uncased::from(*path))
            .unwrap_or_else(|| Uncased::from(key.as_str()))
    })
}

/// Merges each set variable in `vars` as a plain string at its config path.
fn merge_string_env(figment: Figment, vars: &[(&str, &str)]) -> Figment {
    vars.iter()
        .fold(figment, |figment, (name, path)| match std::env::var(name) {
            Ok(value) => figment.merge(Serialized::default(*path, value)),
            Err(_) => figment,
        })
}

impl Config {
    /// Builds a Figment that merges, in order: defaults, `config.toml` if present, the
    /// legacy flat environment names, and `BOTPICKS_`-prefixed variables (`__` nests).
    pub fn figment() -> Figment {
        let figment = Figment::new().merge(Serialized::defaults(Config::default()));
        let figment = if PathBuf::from(DEFAULT_CONFIG_FILE).is_file() {
            figment.merge(Toml::file(DEFAULT_CONFIG_FILE))
        } else {
            figment
        };
        let figment = merge_string_env(figment.merge(legacy_env()), &LEGACY_STRING_ENV);
        merge_string_env(
            figment.merge(Env::prefixed(ENV_PREFIX).split("__")),
            &PREFIXED_STRING_ENV,
        )
    }

    /// Loads configuration from all layers and validates required fields.
    pub fn load() -> Result<Self, ConfigError> {
        let cfg: Self = Self::figment().extract().map_err(Box::new)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.basic.validate()?;
        self.bot.validate()?;
        Ok(())
    }
}
