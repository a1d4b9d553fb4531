pub mod catalog;

use reqwest::StatusCode;
use serde_json::Value;
use tokio::time::Duration;

use crate::error::SyncError;
use crate::model::{CatalogBody, CoinId, UploadRecord};

pub const LOOKUP_TIMEOUT: Duration = Duration::from_secs(30);
pub const UPLOAD_TIMEOUT: Duration = Duration::from_secs(60);

/// Client for the local api core that owns the coin catalog and price table.
pub struct LocalApi {
    client: reqwest::Client,
    base_url: String,
}

impl LocalApi {
    pub fn new(base_url: &str) -> Result<Self, SyncError> {
        let client = reqwest::Client::builder()
            .timeout(LOOKUP_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /coins/`. Anything but a JSON array is rejected; entries are not inspected.
    pub async fn list_coins(&self) -> Result<Vec<Value>, SyncError> {
        let url = format!("{}/coins/", self.base_url);
        tracing::debug!(%url, "listing local coins");

        let resp = self.client.get(&url).send().await?;
        let status = resp.status();
        let body = resp.text().await?;
        if status != StatusCode::OK {
            return Err(SyncError::LocalLookup { status, body });
        }

        let parsed: CatalogBody =
            serde_json::from_str(&body).map_err(|e| SyncError::MalformedResponse {
                context: "coin catalog",
                reason: e.to_string(),
            })?;

        match parsed {
            CatalogBody::Listing(entries) => Ok(entries),
            CatalogBody::Unexpected(value) => Err(SyncError::CatalogShape {
                kind: json_kind(&value),
                content: value.to_string(),
            }),
        }
    }

    /// `POST /coins/{coin_id}/prices/bulk` with the whole batch in one request.
    pub async fn push_prices(
        &self,
        coin_id: &CoinId,
        records: &[UploadRecord],
    ) -> Result<(), SyncError> {
        let url = format!("{}/coins/{}/prices/bulk", self.base_url, coin_id);
        tracing::debug!(%url, records = records.len(), "pushing prices");

        let resp = self
            .client
            .post(&url)
            .json(records)
            .timeout(UPLOAD_TIMEOUT)
            .send()
            .await?;

        let status = resp.status();
        if status != StatusCode::OK {
            let body = resp.text().await?;
            return Err(SyncError::Upload { status, body });
        }
        Ok(())
    }
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
