use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One row of the `settings` table, as written with merge-on-conflict.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct SettingRow {
    pub key: String,
    pub value: String,
    pub updated_at: DateTime<Utc>,
}

impl SettingRow {
    pub fn now(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            updated_at: Utc::now(),
        }
    }
}

/// Projection returned by `select=value` reads.
///
/// Some deployments store the value as a JSON number rather than text, so both are
/// accepted here.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct SettingValue {
    #[serde(default, deserialize_with = "lax_string::deserialize")]
    pub value: Option<String>,
}

mod lax_string {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<Value>::deserialize(deserializer)? {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s)),
            Some(Value::Number(n)) => Ok(Some(n.to_string())),
            Some(other) => Ok(Some(other.to_string())),
        }
    }
}
