//! Command routing for inbound updates.
//!
//! - `action.rs`: closed set of commands and callback payloads, and update classification
//! - `replies.rs`: reply texts and the `/config` keyboard
//! - `dispatch.rs`: executes a classified update against the store and the messenger

mod action;
mod dispatch;
pub mod replies;

pub use action::{BANK_CUSTOM, BANK_PREFIX, BotAction, Callback, Command, NOOP};
pub use dispatch::Dispatcher;
