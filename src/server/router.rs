use crate::bot::Dispatcher;
use crate::config::Config;
use crate::error::ConfigError;
use crate::server::routes::{diagnostics, webhook};
use crate::store::{MemorySettingsStore, RestSettingsStore, SettingsStore};
use crate::telegram::{BOTPICKS_USER_AGENT, MessageSender, TelegramClient};

use axum::{
    Router,
    extract::{Request, State},
    http::{HeaderName, Version, header::USER_AGENT},
    middleware::{self, Next},
    response::Response,
    routing::post,
};
use base64::Engine as _;
use rand::RngCore;
use reqwest::header::HeaderValue;
use serde::Serialize;
use std::time::Instant;
use std::{sync::Arc, time::Duration};
use tracing::{error, info, warn};

const MAX_REQUEST_ID_LEN: usize = 128;
const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");
const REDACTED_WEBHOOK_PATH: &str = "/<webhook-secret>";

fn generate_request_id() -> String {
    // 96 bits => 16 chars base64url (no padding).
    let mut bytes = [0u8; 12];
    rand::rng().fill_bytes(&mut bytes);
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

fn format_http_version(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "HTTP/0.9",
        Version::HTTP_10 => "HTTP/1.0",
        Version::HTTP_11 => "HTTP/1.1",
        Version::HTTP_2 => "HTTP/2",
        Version::HTTP_3 => "HTTP/3",
        _ => "HTTP/?",
    }
}

/// Which collaborators are configured, as reported by `/health`. Keys use the
/// deployment's environment variable names so existing health checks keep working.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Presence {
    #[serde(rename = "TELEGRAM_BOT_TOKEN")]
    pub telegram_bot_token: bool,
    #[serde(rename = "SUPABASE_URL")]
    pub store_url: bool,
    #[serde(rename = "SUPABASE_SERVICE_ROLE")]
    pub store_service_role: bool,
    /// Always true once the config has validated; kept for the report's shape.
    #[serde(rename = "WEBHOOK_SECRET_TOKEN")]
    pub webhook_secret: bool,
}

impl Presence {
    fn from_config(cfg: &Config) -> Self {
        Self {
            telegram_bot_token: cfg.telegram.bot_token().is_some(),
            store_url: cfg.store.url.is_some(),
            store_service_role: cfg.store.service_role().is_some(),
            webhook_secret: !cfg.basic.webhook_secret.trim().is_empty(),
        }
    }

    pub fn all_present(&self) -> bool {
        self.telegram_bot_token && self.store_url && self.store_service_role
    }
}

#[derive(Clone)]
pub struct BotState {
    pub dispatcher: Dispatcher,
    pub webhook_secret: Arc<str>,
    pub presence: Presence,
    pub enable_diagnostics: bool,
}

impl BotState {
    /// Wires the state from explicit collaborators.
    pub fn new(
        cfg: &Config,
        sender: Arc<dyn MessageSender>,
        settings: Arc<dyn SettingsStore>,
    ) -> Result<Self, ConfigError> {
        cfg.validate()?;
        Ok(Self {
            dispatcher: Dispatcher::new(sender, settings, Arc::new(cfg.bot.clone())),
            webhook_secret: Arc::from(cfg.basic.webhook_secret.as_str()),
            presence: Presence::from_config(cfg),
            enable_diagnostics: cfg.basic.enable_diagnostics,
        })
    }

    /// Builds the Bot API client and the settings store described by `cfg`.
    pub fn from_config(cfg: &Config) -> Result<Self, ConfigError> {
        fn build_client(proxy: Option<&url::Url>) -> Result<reqwest::Client, ConfigError> {
            let mut builder = reqwest::Client::builder()
                .user_agent(BOTPICKS_USER_AGENT)
                .redirect(reqwest::redirect::Policy::none())
                .connect_timeout(Duration::from_secs(10))
                .timeout(Duration::from_secs(30));

            if let Some(proxy_url) = proxy {
                builder = builder.proxy(reqwest::Proxy::all(proxy_url.as_str())?);
            }

            Ok(builder.build()?)
        }

        let telegram_http = build_client(cfg.telegram.proxy.as_ref())?;
        let sender: Arc<dyn MessageSender> =
            Arc::new(TelegramClient::new(&cfg.telegram, telegram_http));

        let settings: Arc<dyn SettingsStore> = match cfg.store.url.clone() {
            Some(base) => {
                if cfg.store.service_role().is_none() {
                    warn!("store.url is set but store.service_role is missing; store calls will fail");
                }
                let store_http = build_client(None)?;
                Arc::new(RestSettingsStore::new(&cfg.store, base, store_http))
            }
            None => {
                warn!("store.url is not set; settings are kept in memory and lost on restart");
                Arc::new(MemorySettingsStore::new())
            }
        };

        if cfg.telegram.bot_token().is_none() {
            warn!("telegram.bot_token is not set; replies will be dropped");
        }

        Self::new(cfg, sender, settings)
    }

    pub fn webhook_path(&self) -> String {
        format!("/{}", self.webhook_secret)
    }
}

async fn passthrough_handler() -> &'static str {
    "OK"
}

async fn access_log(State(state): State<BotState>, req: Request, next: Next) -> Response {
    // Capture request metadata before moving `req` into the handler stack.
    let method = req.method().clone();
    let uri = req.uri().clone();
    let version = req.version();

    let request_id = req
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty() && v.len() <= MAX_REQUEST_ID_LEN)
        .map(str::to_string)
        .unwrap_or_else(generate_request_id);

    let user_agent = req
        .headers()
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string();

    let start = Instant::now();
    let mut resp = next.run(req).await;

    // Always reflect `x-request-id` for easier correlation, even if the client didn't send one.
    if let Ok(value) = HeaderValue::from_str(&request_id) {
        resp.headers_mut().insert(X_REQUEST_ID, value);
    }

    let status = resp.status();
    let latency_ms = start.elapsed().as_millis() as u64;
    // The secret path is a credential; keep it out of the logs.
    let path = if uri.path() == state.webhook_path() {
        REDACTED_WEBHOOK_PATH
    } else {
        uri.path()
    };
    let protocol = format_http_version(version);

    if status.is_server_error() {
        error!(
            "| {:>3} | {} | {:^7} | {:<8} | {} | {}ms | {}",
            status.as_u16(),
            request_id,
            method.as_str(),
            protocol,
            path,
            latency_ms,
            user_agent
        );
    } else if status.is_client_error() {
        warn!(
            "| {:>3} | {} | {:^7} | {:<8} | {} | {}ms | {}",
            status.as_u16(),
            request_id,
            method.as_str(),
            protocol,
            path,
            latency_ms,
            user_agent
        );
    } else {
        info!(
            "| {:>3} | {} | {:^7} | {:<8} | {} | {}ms | {}",
            status.as_u16(),
            request_id,
            method.as_str(),
            protocol,
            path,
            latency_ms,
            user_agent
        );
    }

    resp
}

/// Webhook routes, optional diagnostics, and a benign `200 OK` for everything else so
/// the chat platform never sees an error it would retry.
pub fn bot_router(state: BotState) -> Router {
    let webhook_path = state.webhook_path();

    let mut router = Router::new()
        .route(&webhook_path, post(webhook::handlers::secret_path_webhook))
        .merge(webhook::router());

    if state.enable_diagnostics {
        router = router.merge(diagnostics::router());
    }

    router
        .fallback(passthrough_handler)
        .layer(middleware::from_fn_with_state(state.clone(), access_log))
        .with_state(state)
}
