use serde::{Deserialize, Serialize};

/// Inbound Telegram update as delivered to the webhook.
///
/// Only the fields the bot routes on are modelled; everything else in the payload is
/// ignored during deserialization.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Update {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_id: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<Message>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edited_message: Option<Message>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callback_query: Option<CallbackQuery>,
}

impl Update {
    /// The message the update is about, preferring a fresh message over an edit.
    pub fn effective_message(&self) -> Option<&Message> {
        self.message.as_ref().or(self.edited_message.as_ref())
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Message {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chat: Option<Chat>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl Message {
    pub fn chat_id(&self) -> Option<i64> {
        self.chat.as_ref().map(|chat| chat.id)
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct Chat {
    pub id: i64,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct CallbackQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<Message>,
}

impl CallbackQuery {
    pub fn chat_id(&self) -> Option<i64> {
        self.message.as_ref().and_then(Message::chat_id)
    }
}
