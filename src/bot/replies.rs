use super::action::{BANK_CUSTOM, BANK_PREFIX, NOOP};
use botpicks_schema::{InlineKeyboardButton, InlineKeyboardMarkup, SendMessage};

pub const WELCOME_TEXT: &str = "BotPicks en línea ✅\nUsa /config para abrir Configuración.";
pub const CONFIG_TEXT: &str = "⚙️ Configuración";
pub const CUSTOM_PROMPT_TEXT: &str = "Escribe el valor de Bank inicial (solo números), ej: 750";
pub const INVALID_AMOUNT_TEXT: &str = "❌ Número inválido";
pub const PING_TEXT: &str = "Ping desde BotPicks ✅";
const CUSTOM_BUTTON_TEXT: &str = "Ingresar valor personalizado";

/// Renders an amount the way users type it: `500`, `2.5`.
pub fn format_amount(amount: f64) -> String {
    amount.to_string()
}

pub fn welcome(chat_id: i64) -> SendMessage {
    SendMessage::text(chat_id, WELCOME_TEXT)
}

pub fn custom_prompt(chat_id: i64) -> SendMessage {
    SendMessage::text(chat_id, CUSTOM_PROMPT_TEXT)
}

pub fn invalid_amount(chat_id: i64) -> SendMessage {
    SendMessage::text(chat_id, INVALID_AMOUNT_TEXT)
}

pub fn bankroll_updated(chat_id: i64, amount: f64) -> SendMessage {
    SendMessage::text(
        chat_id,
        format!("✅ Bank inicial actualizado a {}", format_amount(amount)),
    )
}

pub fn config_menu(chat_id: i64, current: f64, choices: &[f64]) -> SendMessage {
    SendMessage::text(chat_id, CONFIG_TEXT).with_keyboard(config_keyboard(current, choices))
}

/// Current value (informational), one row of presets, then the custom-entry button.
pub fn config_keyboard(current: f64, choices: &[f64]) -> InlineKeyboardMarkup {
    let current_row = vec![InlineKeyboardButton::callback(
        format!("Bank actual: {}", format_amount(current)),
        NOOP,
    )];
    let presets = choices
        .iter()
        .map(|choice| {
            let label = format_amount(*choice);
            InlineKeyboardButton::callback(label.clone(), format!("{BANK_PREFIX}{label}"))
        })
        .collect();
    let custom_row = vec![InlineKeyboardButton::callback(
        CUSTOM_BUTTON_TEXT,
        format!("{BANK_PREFIX}{BANK_CUSTOM}"),
    )];

    InlineKeyboardMarkup {
        inline_keyboard: vec![current_row, presets, custom_row],
    }
}
