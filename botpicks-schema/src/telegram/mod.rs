mod send_message;
mod update;

pub use send_message::{
    ChatId, InlineKeyboardButton, InlineKeyboardMarkup, SendMessage, TelegramResponse,
};
pub use update::{CallbackQuery, Chat, Message, Update};
