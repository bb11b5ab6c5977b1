use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::net::{IpAddr, Ipv4Addr};

use crate::error::ConfigError;

/// Path segments served by the router itself; the webhook secret may not shadow them.
pub const RESERVED_PATHS: [&str; 4] = ["health", "echo", "send", "webhook"];

/// Basic (core) configuration managed by Figment.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BasicConfig {
    /// HTTP server listen address (e.g., "0.0.0.0", "127.0.0.1").
    /// TOML: `basic.listen_addr`. Default: `0.0.0.0`.
    #[serde(default = "default_listen_ip")]
    pub listen_addr: IpAddr,

    /// HTTP server listen port.
    /// TOML: `basic.listen_port`. Default: `8188`.
    #[serde(default = "default_listen_port")]
    pub listen_port: u16,

    /// Log level for tracing subscriber initialization (e.g., "error", "warn", "info", "debug", "trace").
    /// TOML: `basic.loglevel`. Default: `info`.
    #[serde(default)]
    pub loglevel: String,

    /// Shared secret for inbound webhook validation (required, non-empty).
    /// Served as the `/{secret}` path and accepted by `/webhook` as a header or `?secret=`.
    /// TOML: `basic.webhook_secret`. Env: `WEBHOOK_SECRET_TOKEN`.
    #[serde(default)]
    #[serde(deserialize_with = "deserialize_string_lax")]
    pub webhook_secret: String,

    /// Serve `/health`, `/echo` and `/send`.
    /// TOML: `basic.enable_diagnostics`. Default: `true`.
    #[serde(default = "default_enable_diagnostics")]
    pub enable_diagnostics: bool,
}

impl Default for BasicConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_ip(),
            listen_port: default_listen_port(),
            loglevel: "info".to_string(),
            // No insecure default. `Config::validate()` enforces a usable secret.
            webhook_secret: "".to_string(),
            enable_diagnostics: default_enable_diagnostics(),
        }
    }
}

impl BasicConfig {
    /// The secret doubles as a route segment, so it must be non-empty, limited to
    /// Telegram's `secret_token` alphabet, and distinct from the built-in paths.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let secret = self.webhook_secret.as_str();
        if secret.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "basic.webhook_secret must be set and non-empty".to_string(),
            ));
        }
        if !secret
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(ConfigError::Invalid(
                "basic.webhook_secret may only contain A-Z, a-z, 0-9, '_' and '-'".to_string(),
            ));
        }
        if RESERVED_PATHS.contains(&secret) {
            return Err(ConfigError::Invalid(format!(
                "basic.webhook_secret must not be a reserved path ({secret})"
            )));
        }
        Ok(())
    }
}

fn deserialize_string_lax<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(deserializer)?;

    match v {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        _ => Err(serde::de::Error::custom(
            "expected a string or a number for basic.webhook_secret",
        )),
    }
}

/// Default IP address for the HTTP server listen address.
fn default_listen_ip() -> IpAddr {
    Ipv4Addr::new(0, 0, 0, 0).into()
}

/// Default port for the HTTP server.
fn default_listen_port() -> u16 {
    8188
}

fn default_enable_diagnostics() -> bool {
    true
}
