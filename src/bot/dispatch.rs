use super::action::BotAction;
use super::replies;
use crate::config::{BotConfig, ReplyMode};
use crate::store::{SettingsStore, read_bankroll, write_bankroll};
use crate::telegram::MessageSender;
use botpicks_schema::{SendMessage, Update};
use std::sync::Arc;
use tracing::{info, warn};

/// Executes classified updates: at most one settings read or write and at most one
/// reply per update. Downstream failures are logged and swallowed.
#[derive(Clone)]
pub struct Dispatcher {
    sender: Arc<dyn MessageSender>,
    settings: Arc<dyn SettingsStore>,
    cfg: Arc<BotConfig>,
}

impl Dispatcher {
    pub fn new(
        sender: Arc<dyn MessageSender>,
        settings: Arc<dyn SettingsStore>,
        cfg: Arc<BotConfig>,
    ) -> Self {
        Self {
            sender,
            settings,
            cfg,
        }
    }

    pub fn sender(&self) -> &Arc<dyn MessageSender> {
        &self.sender
    }

    pub async fn handle(&self, update: &Update) -> BotAction {
        let action = BotAction::classify(update);
        info!(
            update_id = ?update.update_id,
            action = action.name(),
            chat_id = ?action.chat_id(),
            "Update classified"
        );

        let reply = match action {
            BotAction::Start { chat_id } => Some(replies::welcome(chat_id)),
            BotAction::ShowConfig { chat_id } => {
                let current = read_bankroll(
                    self.settings.as_ref(),
                    &self.cfg.setting_key,
                    self.cfg.default_bankroll,
                )
                .await;
                Some(replies::config_menu(
                    chat_id,
                    current,
                    &self.cfg.bankroll_choices,
                ))
            }
            BotAction::SetBankroll { chat_id, amount } => {
                // The reply goes out even when the write fails; the failure is in the logs.
                write_bankroll(self.settings.as_ref(), &self.cfg.setting_key, amount).await;
                Some(replies::bankroll_updated(chat_id, amount))
            }
            BotAction::PromptCustom { chat_id } => Some(replies::custom_prompt(chat_id)),
            BotAction::RejectAmount { chat_id } => Some(replies::invalid_amount(chat_id)),
            BotAction::Ignore => None,
        };

        if let Some(message) = reply {
            self.deliver(message).await;
        }
        action
    }

    /// Sends per the configured reply mode. Detached sends are best-effort tasks whose
    /// failures are logged from inside the task.
    pub async fn deliver(&self, message: SendMessage) {
        match self.cfg.reply_mode {
            ReplyMode::Await => send_logged(self.sender.as_ref(), &message).await,
            ReplyMode::Detached => {
                let sender = Arc::clone(&self.sender);
                tokio::spawn(async move {
                    send_logged(sender.as_ref(), &message).await;
                });
            }
        }
    }
}

async fn send_logged(sender: &dyn MessageSender, message: &SendMessage) {
    if let Err(e) = sender.send_message(message).await {
        warn!(
            chat_id = %message.chat_id,
            error = %e,
            "[Telegram] sendMessage failed; dropping reply"
        );
    }
}
