pub mod settings;
pub mod telegram;

pub use settings::{SettingRow, SettingValue};
pub use telegram::{
    CallbackQuery, Chat, ChatId, InlineKeyboardButton, InlineKeyboardMarkup, Message, SendMessage,
    TelegramResponse, Update,
};
