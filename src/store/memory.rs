use super::SettingsStore;
use crate::error::BotError;
use ahash::AHashMap;
use async_trait::async_trait;
use botpicks_schema::SettingRow;
use tokio::sync::RwLock;

/// Process-local settings. Values live until the process exits.
#[derive(Default)]
pub struct MemorySettingsStore {
    rows: RwLock<AHashMap<String, SettingRow>>,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn row(&self, key: &str) -> Option<SettingRow> {
        self.rows.read().await.get(key).cloned()
    }
}

#[async_trait]
impl SettingsStore for MemorySettingsStore {
    async fn get_setting(&self, key: &str) -> Result<Option<String>, BotError> {
        Ok(self.rows.read().await.get(key).map(|row| row.value.clone()))
    }

    async fn upsert_setting(&self, row: SettingRow) -> Result<(), BotError> {
        self.rows.write().await.insert(row.key.clone(), row);
        Ok(())
    }
}
