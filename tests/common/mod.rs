#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use botpicks::config::Config;
use botpicks::error::BotError;
use botpicks::server::{BotState, bot_router};
use botpicks::store::{MemorySettingsStore, SettingsStore};
use botpicks::telegram::MessageSender;
use botpicks_schema::{SendMessage, SettingRow, TelegramResponse};
use reqwest::StatusCode as UpstreamStatus;
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicBool, AtomicUsize, Ordering},
};
use std::time::Duration;
use tower::ServiceExt;

pub const SECRET: &str = "test_secret-01";

/// Records every outbound message; optionally fails each send after recording it.
#[derive(Default)]
pub struct RecordingSender {
    sent: Mutex<Vec<SendMessage>>,
    fail: AtomicBool,
}

impl RecordingSender {
    pub fn failing() -> Self {
        Self {
            fail: AtomicBool::new(true),
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<SendMessage> {
        self.sent.lock().expect("sender lock poisoned").clone()
    }
}

#[async_trait]
impl MessageSender for RecordingSender {
    async fn send_message(&self, message: &SendMessage) -> Result<TelegramResponse, BotError> {
        self.sent
            .lock()
            .expect("sender lock poisoned")
            .push(message.clone());
        if self.fail.load(Ordering::SeqCst) {
            return Err(BotError::UpstreamStatus {
                status: UpstreamStatus::BAD_GATEWAY,
                body: "upstream down".to_string(),
            });
        }
        Ok(TelegramResponse {
            ok: true,
            ..Default::default()
        })
    }
}

/// In-memory store that counts calls and can simulate an unreachable backend.
#[derive(Default)]
pub struct CountingStore {
    inner: MemorySettingsStore,
    reads: AtomicUsize,
    writes: AtomicUsize,
    fail: AtomicBool,
}

impl CountingStore {
    pub fn failing() -> Self {
        Self {
            fail: AtomicBool::new(true),
            ..Self::default()
        }
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub async fn value(&self, key: &str) -> Option<String> {
        self.inner.row(key).await.map(|row| row.value)
    }

    pub async fn seed(&self, key: &str, value: &str) {
        self.inner
            .upsert_setting(SettingRow::now(key, value))
            .await
            .expect("seed write");
    }
}

#[async_trait]
impl SettingsStore for CountingStore {
    async fn get_setting(&self, key: &str) -> Result<Option<String>, BotError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(BotError::MissingStoreCredentials);
        }
        self.inner.get_setting(key).await
    }

    async fn upsert_setting(&self, row: SettingRow) -> Result<(), BotError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(BotError::MissingStoreCredentials);
        }
        self.inner.upsert_setting(row).await
    }
}

pub struct Harness {
    pub app: Router,
    pub sender: Arc<RecordingSender>,
    pub store: Arc<CountingStore>,
}

pub fn test_config() -> Config {
    let mut cfg = Config::default();
    cfg.basic.webhook_secret = SECRET.to_string();
    cfg
}

pub fn harness() -> Harness {
    harness_with(
        test_config(),
        RecordingSender::default(),
        CountingStore::default(),
    )
}

pub fn harness_with(cfg: Config, sender: RecordingSender, store: CountingStore) -> Harness {
    let sender = Arc::new(sender);
    let store = Arc::new(store);
    let state = BotState::new(&cfg, sender.clone(), store.clone()).expect("valid test state");
    Harness {
        app: bot_router(state),
        sender,
        store,
    }
}

pub fn webhook_uri() -> String {
    format!("/{SECRET}")
}

pub async fn send(app: &Router, req: Request<Body>) -> (StatusCode, String) {
    let resp = app.clone().oneshot(req).await.expect("request failed");
    let status = resp.status();
    let body = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    let body = String::from_utf8(body.to_vec()).expect("response body was not utf-8");
    (status, body)
}

pub async fn post(app: &Router, uri: &str, body: impl Into<String>) -> (StatusCode, String) {
    let req = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.into()))
        .expect("failed to build request");
    send(app, req).await
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, String) {
    let req = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .expect("failed to build request");
    send(app, req).await
}

pub fn text_update(chat_id: i64, text: &str) -> String {
    serde_json::json!({
        "update_id": 1,
        "message": {"message_id": 10, "chat": {"id": chat_id, "type": "private"}, "text": text}
    })
    .to_string()
}

pub fn callback_update(chat_id: i64, data: &str) -> String {
    serde_json::json!({
        "update_id": 2,
        "callback_query": {"id": "cb-1", "data": data, "message": {"message_id": 11, "chat": {"id": chat_id}}}
    })
    .to_string()
}

/// Polls until `sender` has recorded `count` messages or a second passes.
pub async fn wait_for_sent(sender: &RecordingSender, count: usize) -> Vec<SendMessage> {
    for _ in 0..100 {
        let sent = sender.sent();
        if sent.len() >= count {
            return sent;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    sender.sent()
}
