//! Settings persistence.
//!
//! - `rest.rs`: PostgREST-style store (Supabase `settings` table)
//! - `memory.rs`: in-process fallback when no store URL is configured
//! - `bankroll.rs`: best-effort read/write of the bankroll setting

mod bankroll;
mod memory;
mod rest;

pub use bankroll::{read_bankroll, write_bankroll};
pub use memory::MemorySettingsStore;
pub use rest::{RestSettingsStore, SettingsApi};

use crate::error::BotError;
use async_trait::async_trait;
use botpicks_schema::SettingRow;

/// Key/value settings with one row per key.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Current value for `key`, or `None` when no row exists.
    async fn get_setting(&self, key: &str) -> Result<Option<String>, BotError>;

    /// Insert or replace the row for `row.key`; last write wins.
    async fn upsert_setting(&self, row: SettingRow) -> Result<(), BotError>;
}
