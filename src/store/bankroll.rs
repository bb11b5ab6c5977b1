use super::SettingsStore;
use botpicks_schema::SettingRow;
use tracing::warn;

/// Reads the bankroll, falling back to `default` on any failure, a missing row, or a
/// value that does not parse to a finite number.
pub async fn read_bankroll(store: &dyn SettingsStore, key: &str, default: f64) -> f64 {
    let raw = match store.get_setting(key).await {
        Ok(Some(raw)) => raw,
        Ok(None) => return default,
        Err(e) => {
            warn!(key, error = %e, "[Store] Setting read failed; using default");
            return default;
        }
    };

    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => {
            warn!(key, value = %raw, "[Store] Stored setting is not a finite number; using default");
            default
        }
    }
}

/// Upserts the bankroll. Returns whether the write landed; failures are logged here.
pub async fn write_bankroll(store: &dyn SettingsStore, key: &str, amount: f64) -> bool {
    match store
        .upsert_setting(SettingRow::now(key, amount.to_string()))
        .await
    {
        Ok(()) => true,
        Err(e) => {
            warn!(key, amount, error = %e, "[Store] Setting upsert failed");
            false
        }
    }
}
