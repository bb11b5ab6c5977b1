use botpicks_schema::Update;
use regex::Regex;
use std::sync::LazyLock;

/// Callback data prefix shared by the keyboard and the parser.
pub const BANK_PREFIX: &str = "bank:";
pub const BANK_CUSTOM: &str = "custom";
/// Callback data of the informational "current bankroll" button.
pub const NOOP: &str = "noop";

// ASCII digits only; `\d` would also accept other scripts that f64 parsing rejects.
static BARE_AMOUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+(\.[0-9]+)?$").expect("valid bare amount regex"));

/// Slash commands the bot answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Config,
}

impl Command {
    /// Matches the first token of `text`, ignoring case, surrounding whitespace,
    /// trailing arguments and an `@BotName` suffix.
    pub fn parse(text: &str) -> Option<Self> {
        let token = text.split_whitespace().next()?;
        let name = token.split('@').next().unwrap_or(token).to_lowercase();
        match name.as_str() {
            "/start" => Some(Command::Start),
            "/config" => Some(Command::Config),
            _ => None,
        }
    }
}

/// Parsed `callback_query.data`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Callback {
    /// `bank:<number>`
    SetAmount(f64),
    /// `bank:custom`
    Custom,
    /// `bank:<anything else>`
    InvalidAmount,
    /// Any other payload, including `noop`.
    Unrecognized,
}

impl Callback {
    pub fn parse(data: &str) -> Self {
        let Some(rest) = data.strip_prefix(BANK_PREFIX) else {
            return Callback::Unrecognized;
        };
        let suffix = rest.split(':').next().unwrap_or_default();
        if suffix == BANK_CUSTOM {
            return Callback::Custom;
        }
        match suffix.trim().parse::<f64>() {
            Ok(amount) if amount.is_finite() => Callback::SetAmount(amount),
            _ => Callback::InvalidAmount,
        }
    }
}

/// What the webhook should do for one update. First matching rule wins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BotAction {
    Start { chat_id: i64 },
    ShowConfig { chat_id: i64 },
    SetBankroll { chat_id: i64, amount: f64 },
    PromptCustom { chat_id: i64 },
    RejectAmount { chat_id: i64 },
    Ignore,
}

impl BotAction {
    pub fn classify(update: &Update) -> Self {
        let message = update.effective_message();
        let chat_id = message.and_then(|m| m.chat_id());
        let text = message
            .and_then(|m| m.text.as_deref())
            .map(str::trim)
            .unwrap_or_default();

        if let Some(chat_id) = chat_id {
            match Command::parse(text) {
                Some(Command::Start) => return BotAction::Start { chat_id },
                Some(Command::Config) => return BotAction::ShowConfig { chat_id },
                None => {}
            }
        }

        // A callback ends routing even when it carries nothing actionable.
        if let Some(cq) = update.callback_query.as_ref() {
            let data = cq.data.as_deref().unwrap_or_default();
            let Some(chat_id) = cq.chat_id() else {
                return BotAction::Ignore;
            };
            return match Callback::parse(data) {
                Callback::SetAmount(amount) => BotAction::SetBankroll { chat_id, amount },
                Callback::Custom => BotAction::PromptCustom { chat_id },
                Callback::InvalidAmount => BotAction::RejectAmount { chat_id },
                Callback::Unrecognized => BotAction::Ignore,
            };
        }

        // Digits that overflow to infinity match the pattern but get the invalid reply.
        if let Some(chat_id) = chat_id {
            if BARE_AMOUNT.is_match(text) {
                return match text.parse::<f64>() {
                    Ok(amount) if amount.is_finite() => BotAction::SetBankroll { chat_id, amount },
                    _ => BotAction::RejectAmount { chat_id },
                };
            }
        }

        BotAction::Ignore
    }

    pub fn chat_id(&self) -> Option<i64> {
        match *self {
            BotAction::Start { chat_id }
            | BotAction::ShowConfig { chat_id }
            | BotAction::SetBankroll { chat_id, .. }
            | BotAction::PromptCustom { chat_id }
            | BotAction::RejectAmount { chat_id } => Some(chat_id),
            BotAction::Ignore => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            BotAction::Start { .. } => "start",
            BotAction::ShowConfig { .. } => "config",
            BotAction::SetBankroll { .. } => "set_bankroll",
            BotAction::PromptCustom { .. } => "prompt_custom",
            BotAction::RejectAmount { .. } => "reject_amount",
            BotAction::Ignore => "ignore",
        }
    }
}
