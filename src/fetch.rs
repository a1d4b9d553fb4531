use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::StatusCode;
use tokio::time::Duration;

use crate::error::SyncError;
use crate::model::{MarketChart, PricePoint, TimeWindow};

pub const FETCH_TIMEOUT: Duration = Duration::from_secs(30);
const API_KEY_HEADER: &str = "x-cg-demo-api-key";

/// CoinGecko `market_chart/range` client.
pub struct GeckoClient {
    client: reqwest::Client,
    base_url: String,
}

impl GeckoClient {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, SyncError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let mut key = HeaderValue::from_str(api_key).map_err(|e| SyncError::InvalidSetting {
            name: "COINGECKO_API_KEY",
            reason: e.to_string(),
        })?;
        key.set_sensitive(true);
        headers.insert(API_KEY_HEADER, key);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(FETCH_TIMEOUT)
            .gzip(true)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// USD price history of `asset_id` across `window`, in the order CoinGecko sent it.
    pub async fn market_chart_range(
        &self,
        asset_id: &str,
        window: &TimeWindow,
    ) -> Result<Vec<PricePoint>, SyncError> {
        let url = format!("{}/coins/{}/market_chart/range", self.base_url, asset_id);
        tracing::debug!(%url, from = window.start_ts(), to = window.end_ts(), "requesting price history");

        let resp = self
            .client
            .get(&url)
            .query(&[
                ("vs_currency", "usd".to_string()),
                ("from", window.start_ts().to_string()),
                ("to", window.end_ts().to_string()),
            ])
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        if status != StatusCode::OK {
            return Err(SyncError::UpstreamFetch { status, body });
        }

        let chart: MarketChart =
            serde_json::from_str(&body).map_err(|e| SyncError::MalformedResponse {
                context: "price history",
                reason: e.to_string(),
            })?;
        Ok(chart.prices)
    }
}
