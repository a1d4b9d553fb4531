use chrono::{DateTime, Utc};

use crate::api::{catalog, LocalApi};
use crate::config::Settings;
use crate::error::SyncError;
use crate::fetch::GeckoClient;
use crate::model::{iso_timestamp, CoinId, PricePoint, SyncReport, TimeWindow, UploadRecord};

/// Copies one coin's CoinGecko price history into the local api core.
///
/// A run is strictly sequential: fetch, look up, reshape, push. The first
/// failure ends it and nothing is retried.
pub struct Synchronizer {
    settings: Settings,
    gecko: GeckoClient,
    local: LocalApi,
}

impl Synchronizer {
    pub fn new(settings: Settings) -> Result<Self, SyncError> {
        let gecko = GeckoClient::new(&settings.coingecko_url, &settings.coingecko_api_key)?;
        let local = LocalApi::new(&settings.api_core_url)?;
        Ok(Self {
            settings,
            gecko,
            local,
        })
    }

    pub async fn run(&self) -> Result<SyncReport, SyncError> {
        self.run_at(Utc::now()).await
    }

    /// Same as [`Synchronizer::run`] with the window ending at `now`.
    pub async fn run_at(&self, now: DateTime<Utc>) -> Result<SyncReport, SyncError> {
        let asset = &self.settings.coin_gecko_id;
        let window = TimeWindow::ending_at(now, self.settings.days_to_fetch).ok_or(
            SyncError::InvalidWindow {
                days: self.settings.days_to_fetch,
            },
        )?;
        tracing::info!(days = window.days(), asset = %asset, "fetching price history");

        let prices = self.gecko.market_chart_range(asset, &window).await?;
        tracing::info!(count = prices.len(), "received price points");

        tracing::info!(symbol = %asset, url = %self.local.base_url(), "looking up local coin");
        let coins = self.local.list_coins().await?;
        let entry = catalog::find_by_symbol(&coins, asset).ok_or_else(|| {
            SyncError::UnresolvedTarget {
                symbol: asset.clone(),
            }
        })?;
        let coin_id = catalog::coin_id(entry).ok_or_else(|| SyncError::MalformedResponse {
            context: "coin catalog",
            reason: format!("entry for {asset} has no id: {entry}"),
        })?;

        let batch = build_batch(&coin_id, &prices)?;

        tracing::info!(%coin_id, records = batch.len(), "pushing to local api");
        self.local.push_prices(&coin_id, &batch).await?;
        tracing::info!(%coin_id, "local database updated");

        Ok(SyncReport {
            coin_id,
            fetched: prices.len(),
            uploaded: batch.len(),
        })
    }
}

/// One upload record per price point, in source order.
pub fn build_batch(coin_id: &CoinId, prices: &[PricePoint]) -> Result<Vec<UploadRecord>, SyncError> {
    prices
        .iter()
        .map(|point| {
            let timestamp =
                iso_timestamp(point.millis()).ok_or_else(|| SyncError::MalformedResponse {
                    context: "price history",
                    reason: format!("timestamp {} ms is out of range", point.millis()),
                })?;
            Ok(UploadRecord {
                coin_id: coin_id.clone(),
                price: point.price(),
                timestamp,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_keeps_order_and_prices() {
        let id = CoinId::from("abc123");
        let prices = vec![
            PricePoint(1_700_003_600_000, 0.53),
            PricePoint(1_700_000_000_000, 0.52),
            PricePoint(1_700_007_200_000, 0.5412345678),
        ];
        let batch = build_batch(&id, &prices).unwrap();

        assert_eq!(batch.len(), 3);
        assert_eq!(batch[0].timestamp, "2023-11-14T23:13:20+00:00");
        assert_eq!(batch[1].timestamp, "2023-11-14T22:13:20+00:00");
        assert_eq!(batch[2].price, 0.5412345678);
        assert!(batch.iter().all(|r| r.coin_id == id));
    }

    #[test]
    fn empty_history_gives_empty_batch() {
        assert!(build_batch(&CoinId::from("x"), &[]).unwrap().is_empty());
    }

    #[test]
    fn unrepresentable_timestamp_is_malformed() {
        let err = build_batch(&CoinId::from("x"), &[PricePoint(i64::MAX, 1.0)]).unwrap_err();
        assert!(matches!(err, SyncError::MalformedResponse { .. }));
    }
}
