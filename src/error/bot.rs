use reqwest::StatusCode;
use thiserror::Error as ThisError;

/// Failures talking to the Bot API or the settings store.
///
/// These never reach the webhook caller; the dispatcher logs them and acknowledges the
/// update anyway.
#[derive(Debug, ThisError)]
pub enum BotError {
    #[error("Upstream error with status {status}: {body:.200}")]
    UpstreamStatus {
        status: StatusCode,
        /// Truncated upstream body, for logs only.
        body: String,
    },

    #[error("HTTP request error: {0}")]
    ReqwestError(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("URL parse error: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Telegram bot token is not configured")]
    MissingBotToken,

    #[error("Settings store credentials are not configured")]
    MissingStoreCredentials,
}

/// Max characters of an upstream error body kept for diagnostics.
pub(crate) const UPSTREAM_BODY_PREVIEW_CHARS: usize = 300;

impl BotError {
    /// Drains a non-success response into an `UpstreamStatus` error.
    pub(crate) async fn from_upstream(resp: reqwest::Response) -> Self {
        let status = resp.status();
        let body = match resp.bytes().await {
            Ok(bytes) => {
                let raw_body = String::from_utf8_lossy(&bytes);
                format!("{:.len$}", raw_body, len = UPSTREAM_BODY_PREVIEW_CHARS)
            }
            Err(e) => format!("<failed to read body: {e}>"),
        };
        BotError::UpstreamStatus { status, body }
    }
}
