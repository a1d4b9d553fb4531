use std::env;

use crate::error::ConfigError;

pub const DEFAULT_COINGECKO_URL: &str = "https://api.coingecko.com/api/v3";

/// Everything a sync run needs, read once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Base URL of the local api core, without a trailing slash.
    pub api_core_url: String,
    /// CoinGecko asset id; also the symbol looked up in the local catalog.
    pub coin_gecko_id: String,
    /// Requested history length. Clamped to a year when the window is built.
    pub days_to_fetch: i64,
    pub coingecko_api_key: String,
    pub coingecko_url: String,
}

impl Settings {
    /// Loads `.env` if present, then reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds settings from any variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &'static str| {
            lookup(name)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };
        let require = |name: &'static str| get(name).ok_or(ConfigError::Missing(name));

        let days_raw = require("DAYS_TO_FETCH")?;
        let days_to_fetch = days_raw.parse().map_err(|_| ConfigError::Invalid {
            name: "DAYS_TO_FETCH",
            value: days_raw.clone(),
        })?;

        Ok(Self {
            api_core_url: trim_base(require("API_CORE_URL")?),
            coin_gecko_id: require("COIN_GECKO_ID")?,
            days_to_fetch,
            coingecko_api_key: require("COINGECKO_API_KEY")?,
            coingecko_url: trim_base(
                get("COINGECKO_API_URL").unwrap_or_else(|| DEFAULT_COINGECKO_URL.to_string()),
            ),
        })
    }
}

fn trim_base(url: String) -> String {
    url.trim_end_matches('/').to_string()
}
