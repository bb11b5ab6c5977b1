use super::SettingsStore;
use crate::config::StoreConfig;
use crate::error::BotError;
use async_trait::async_trait;
use botpicks_schema::{SettingRow, SettingValue};
use reqwest::header::{AUTHORIZATION, HeaderValue};
use tracing::debug;
use url::Url;

const PREFER_MERGE_DUPLICATES: HeaderValue = HeaderValue::from_static("resolution=merge-duplicates");

pub struct SettingsApi;

impl SettingsApi {
    /// `{base}/rest/v1/{table}`.
    pub fn table_url(base: &Url, table: &str) -> Result<Url, BotError> {
        let mut url = base.clone();
        url.path_segments_mut()
            .map_err(|_| BotError::UrlError(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .extend(["rest", "v1", table]);
        Ok(url)
    }

    pub fn build_get_request(
        client: &reqwest::Client,
        base: &Url,
        table: &str,
        service_role: &str,
        key: &str,
    ) -> Result<reqwest::Request, BotError> {
        let mut url = Self::table_url(base, table)?;
        url.query_pairs_mut()
            .append_pair("select", "value")
            .append_pair("key", &format!("eq.{key}"))
            .append_pair("limit", "1");

        Ok(Self::authorize(client.get(url), service_role).build()?)
    }

    pub fn build_upsert_request(
        client: &reqwest::Client,
        base: &Url,
        table: &str,
        service_role: &str,
        row: &SettingRow,
    ) -> Result<reqwest::Request, BotError> {
        let url = Self::table_url(base, table)?;
        Ok(Self::authorize(client.post(url), service_role)
            .header("Prefer", PREFER_MERGE_DUPLICATES)
            .json(&[row])
            .build()?)
    }

    fn authorize(builder: reqwest::RequestBuilder, service_role: &str) -> reqwest::RequestBuilder {
        builder
            .header("apikey", service_role)
            .header(AUTHORIZATION, format!("Bearer {service_role}"))
    }
}

/// Settings table behind a PostgREST endpoint.
#[derive(Clone)]
pub struct RestSettingsStore {
    client: reqwest::Client,
    base: Url,
    table: String,
    service_role: Option<String>,
}

impl RestSettingsStore {
    pub fn new(cfg: &StoreConfig, base: Url, client: reqwest::Client) -> Self {
        Self {
            client,
            base,
            table: cfg.table.clone(),
            service_role: cfg.service_role().map(str::to_string),
        }
    }

    fn service_role(&self) -> Result<&str, BotError> {
        self.service_role
            .as_deref()
            .ok_or(BotError::MissingStoreCredentials)
    }
}

#[async_trait]
impl SettingsStore for RestSettingsStore {
    async fn get_setting(&self, key: &str) -> Result<Option<String>, BotError> {
        let req = SettingsApi::build_get_request(
            &self.client,
            &self.base,
            &self.table,
            self.service_role()?,
            key,
        )?;
        let resp = self.client.execute(req).await?;
        if !resp.status().is_success() {
            return Err(BotError::from_upstream(resp).await);
        }

        let bytes = resp.bytes().await?;
        let rows: Vec<SettingValue> = serde_json::from_slice(&bytes)?;
        let value = rows.into_iter().next().and_then(|row| row.value);
        debug!(key, found = value.is_some(), "[Store] Setting read");
        Ok(value)
    }

    async fn upsert_setting(&self, row: SettingRow) -> Result<(), BotError> {
        let req = SettingsApi::build_upsert_request(
            &self.client,
            &self.base,
            &self.table,
            self.service_role()?,
            &row,
        )?;
        let resp = self.client.execute(req).await?;
        if !resp.status().is_success() {
            return Err(BotError::from_upstream(resp).await);
        }
        debug!(key = %row.key, value = %row.value, "[Store] Setting upserted");
        Ok(())
    }
}
