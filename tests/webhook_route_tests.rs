mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use botpicks::bot::replies::INVALID_AMOUNT_TEXT;
use botpicks::config::ReplyMode;
use botpicks_schema::ChatId;
use common::{
    CountingStore, RecordingSender, SECRET, callback_update, get, harness, harness_with, post,
    send, test_config, text_update, wait_for_sent, webhook_uri,
};

#[tokio::test]
async fn header_route_rejects_missing_or_wrong_secret_regardless_of_body() {
    let h = harness();

    for body in [text_update(1, "/start"), "not-json".to_string(), String::new()] {
        let (status, text) = post(&h.app, "/webhook", body.clone()).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(text, "forbidden");

        let req = Request::builder()
            .method("POST")
            .uri("/webhook?secret=nope")
            .header("x-webhook-secret", "also-wrong")
            .body(Body::from(body))
            .expect("failed to build request");
        let (status, _) = send(&h.app, req).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    assert!(h.sender.sent().is_empty());
    assert_eq!(h.store.reads() + h.store.writes(), 0);
}

#[tokio::test]
async fn header_route_accepts_secret_from_header_or_query() {
    let h = harness();

    let req = Request::builder()
        .method("POST")
        .uri("/webhook")
        .header("x-telegram-bot-api-secret-token", SECRET)
        .body(Body::from(text_update(5, "/start")))
        .expect("failed to build request");
    let (status, body) = send(&h.app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");

    let (status, _) = post(
        &h.app,
        &format!("/webhook?secret={SECRET}"),
        text_update(6, "/start"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let chats: Vec<ChatId> = h.sender.sent().into_iter().map(|m| m.chat_id).collect();
    assert_eq!(chats, vec![ChatId::Id(5), ChatId::Id(6)]);
}

#[tokio::test]
async fn unconfigured_paths_and_methods_are_benign() {
    let h = harness();

    let (status, body) = post(&h.app, "/not-the-secret", text_update(1, "/start")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");

    let (status, body) = get(&h.app, "/anything/else").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");

    let (status, _) = get(&h.app, &webhook_uri()).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);

    let (status, _) = get(&h.app, "/webhook").await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);

    assert!(h.sender.sent().is_empty());
    assert_eq!(h.store.reads() + h.store.writes(), 0);
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let h = harness();

    let (status, _) = post(&h.app, &webhook_uri(), "{not json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Well-formed JSON of an unexpected shape is acknowledged and ignored.
    let (status, body) = post(&h.app, &webhook_uri(), r#"{"message": 5}"#).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");

    assert!(h.sender.sent().is_empty());
}

#[tokio::test]
async fn start_sends_one_welcome_and_never_touches_the_store() {
    let h = harness();

    let (status, body) = post(&h.app, &webhook_uri(), text_update(42, "/start@BotPicksBot hi")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");

    let sent = h.sender.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].chat_id, ChatId::Id(42));
    assert!(sent[0].text.contains("BotPicks en línea"));
    assert!(sent[0].reply_markup.is_none());
    assert_eq!(h.store.reads(), 0);
    assert_eq!(h.store.writes(), 0);
}

#[tokio::test]
async fn config_reads_once_and_renders_keyboard_with_default() {
    let h = harness();

    let (status, _) = post(&h.app, &webhook_uri(), text_update(8, "/config")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(h.store.reads(), 1);
    assert_eq!(h.store.writes(), 0);

    let sent = h.sender.sent();
    assert_eq!(sent.len(), 1);
    let keyboard = sent[0].reply_markup.as_ref().expect("keyboard attached");
    let callbacks: Vec<&str> = keyboard
        .buttons()
        .map(|b| b.callback_data.as_str())
        .collect();
    assert_eq!(
        callbacks,
        vec![
            "noop",
            "bank:300",
            "bank:500",
            "bank:1000",
            "bank:2000",
            "bank:custom"
        ]
    );
    assert_eq!(keyboard.inline_keyboard[0][0].text, "Bank actual: 500");
}

#[tokio::test]
async fn config_shows_stored_bankroll() {
    let h = harness();
    h.store.seed("bankroll", "1250.5").await;

    post(&h.app, &webhook_uri(), text_update(8, "/config")).await;

    let sent = h.sender.sent();
    let keyboard = sent[0].reply_markup.as_ref().expect("keyboard attached");
    assert_eq!(keyboard.inline_keyboard[0][0].text, "Bank actual: 1250.5");
}

#[tokio::test]
async fn config_falls_back_to_default_when_store_is_down() {
    let h = harness_with(
        test_config(),
        RecordingSender::default(),
        CountingStore::failing(),
    );

    let (status, _) = post(&h.app, &webhook_uri(), text_update(8, "/config")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(h.store.reads(), 1);

    let sent = h.sender.sent();
    assert_eq!(sent.len(), 1);
    let keyboard = sent[0].reply_markup.as_ref().expect("keyboard attached");
    assert_eq!(keyboard.inline_keyboard[0][0].text, "Bank actual: 500");
}

#[tokio::test]
async fn preset_callback_writes_and_confirms() {
    let h = harness();

    let (status, _) = post(&h.app, &webhook_uri(), callback_update(9, "bank:500")).await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(h.store.writes(), 1);
    assert_eq!(h.store.value("bankroll").await.as_deref(), Some("500"));

    let sent = h.sender.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].chat_id, ChatId::Id(9));
    assert!(sent[0].text.contains("500"));
}

#[tokio::test]
async fn custom_callback_prompts_then_bare_number_is_saved() {
    let h = harness();

    post(&h.app, &webhook_uri(), callback_update(9, "bank:custom")).await;
    assert_eq!(h.store.writes(), 0);
    let sent = h.sender.sent();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].text.contains("solo números"));

    let (status, _) = post(&h.app, &webhook_uri(), text_update(9, "750")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(h.store.writes(), 1);
    assert_eq!(h.store.value("bankroll").await.as_deref(), Some("750"));

    let sent = h.sender.sent();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[1].text, "✅ Bank inicial actualizado a 750");
}

#[tokio::test]
async fn bare_number_too_large_for_a_float_is_rejected() {
    let h = harness();

    let (status, body) = post(&h.app, &webhook_uri(), text_update(9, &"9".repeat(400))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");
    assert_eq!(h.store.writes(), 0);

    let sent = h.sender.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].text, INVALID_AMOUNT_TEXT);
}

#[tokio::test]
async fn non_numeric_text_is_silently_acknowledged() {
    let h = harness();

    let (status, body) = post(&h.app, &webhook_uri(), text_update(9, "setecientos")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");
    assert!(h.sender.sent().is_empty());
    assert_eq!(h.store.reads() + h.store.writes(), 0);
}

#[tokio::test]
async fn invalid_and_noop_callbacks() {
    let h = harness();

    post(&h.app, &webhook_uri(), callback_update(9, "bank:abc")).await;
    let sent = h.sender.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].text, "❌ Número inválido");

    post(&h.app, &webhook_uri(), callback_update(9, "noop")).await;
    assert_eq!(h.sender.sent().len(), 1);
    assert_eq!(h.store.reads() + h.store.writes(), 0);
}

#[tokio::test]
async fn send_failures_still_acknowledge() {
    let h = harness_with(
        test_config(),
        RecordingSender::failing(),
        CountingStore::default(),
    );

    let (status, body) = post(&h.app, &webhook_uri(), callback_update(3, "bank:1000")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");
    assert_eq!(h.sender.sent().len(), 1);
    assert_eq!(h.store.value("bankroll").await.as_deref(), Some("1000"));
}

#[tokio::test]
async fn detached_replies_are_still_delivered_once() {
    let mut cfg = test_config();
    cfg.bot.reply_mode = ReplyMode::Detached;
    let h = harness_with(cfg, RecordingSender::default(), CountingStore::default());

    let (status, _) = post(&h.app, &webhook_uri(), text_update(4, "/start")).await;
    assert_eq!(status, StatusCode::OK);

    let sent = wait_for_sent(&h.sender, 1).await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].chat_id, ChatId::Id(4));
}

#[tokio::test]
async fn configured_setting_key_and_choices_are_used() {
    let mut cfg = test_config();
    cfg.bot.setting_key = "bank_v2".to_string();
    cfg.bot.bankroll_choices = vec![50.0, 75.5];
    cfg.bot.default_bankroll = 100.0;
    let h = harness_with(cfg, RecordingSender::default(), CountingStore::default());

    post(&h.app, &webhook_uri(), text_update(2, "/config")).await;
    let sent = h.sender.sent();
    let keyboard = sent[0].reply_markup.as_ref().expect("keyboard attached");
    assert_eq!(keyboard.inline_keyboard[0][0].text, "Bank actual: 100");
    assert_eq!(keyboard.inline_keyboard[1][1].callback_data, "bank:75.5");

    post(&h.app, &webhook_uri(), callback_update(2, "bank:75.5")).await;
    assert_eq!(h.store.value("bank_v2").await.as_deref(), Some("75.5"));
    assert_eq!(h.store.value("bankroll").await, None);
}
