use serde::{Deserialize, Serialize};
use url::Url;

/// Settings store (PostgREST / Supabase) configuration managed by Figment.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    /// Project URL; requests go to `{url}/rest/v1/{table}`.
    /// TOML: `store.url`. Env: `SUPABASE_URL`.
    /// When unset the bot keeps settings in process memory.
    #[serde(default)]
    pub url: Option<Url>,

    /// Service-role key sent as both `apikey` and bearer token.
    /// TOML: `store.service_role`. Env: `SUPABASE_SERVICE_ROLE`.
    #[serde(default)]
    pub service_role: Option<String>,

    /// Table holding `key`/`value`/`updated_at` rows.
    /// TOML: `store.table`. Default: `settings`.
    #[serde(default = "default_table")]
    pub table: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: None,
            service_role: None,
            table: default_table(),
        }
    }
}

impl StoreConfig {
    pub fn service_role(&self) -> Option<&str> {
        self.service_role
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}

fn default_table() -> String {
    "settings".to_string()
}
