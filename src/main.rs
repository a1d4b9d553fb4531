use anyhow::{Context, Result};
use coin_price_sync::{Settings, Synchronizer};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = Settings::from_env().context("failed to load settings")?;
    let sync = Synchronizer::new(settings)?;

    match sync.run().await {
        Ok(report) => {
            println!(
                "Pushed {} of {} price points for coin {}",
                report.uploaded, report.fetched, report.coin_id
            );
            Ok(())
        }
        Err(err) if err.is_transport() => {
            Err(err).context("sync aborted by a network failure")
        }
        Err(err) => {
            tracing::error!("{err}");
            Ok(())
        }
    }
}
