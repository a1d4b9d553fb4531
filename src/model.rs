use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// CoinGecko refuses `market_chart/range` requests spanning more than a year.
pub const MAX_FETCH_DAYS: i64 = 365;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    /// Window ending at `now`, `days` long after clamping to [`MAX_FETCH_DAYS`].
    ///
    /// Only the upper bound is clamped; a zero or negative count is used as given.
    /// Returns `None` when the start falls outside the representable range.
    pub fn ending_at(now: DateTime<Utc>, days: i64) -> Option<Self> {
        let days = days.min(MAX_FETCH_DAYS);
        let start = now.checked_sub_signed(Duration::try_days(days)?)?;
        Some(Self { start, end: now })
    }

    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    pub fn start_ts(&self) -> i64 {
        self.start.timestamp()
    }

    pub fn end_ts(&self) -> i64 {
        self.end.timestamp()
    }
}

/// One `[epoch_millis, price]` pair from `market_chart/range`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct PricePoint(pub i64, pub f64);

impl PricePoint {
    pub fn millis(&self) -> i64 {
        self.0
    }

    pub fn price(&self) -> f64 {
        self.1
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct MarketChart {
    #[serde(default)]
    pub prices: Vec<PricePoint>,
}

/// Local coin identifier, kept as whatever JSON value the catalog handed out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CoinId(pub Value);

impl fmt::Display for CoinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Value::String(s) => f.write_str(s),
            other => write!(f, "{other}"),
        }
    }
}

impl From<&str> for CoinId {
    fn from(s: &str) -> Self {
        CoinId(Value::String(s.to_string()))
    }
}

/// Body of the local `/coins/` listing.
///
/// Entries stay untyped: only the one matching the target symbol is read,
/// so an odd entry elsewhere in the list never blocks a run.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum CatalogBody {
    Listing(Vec<Value>),
    Unexpected(Value),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UploadRecord {
    pub coin_id: CoinId,
    pub price: f64,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SyncReport {
    pub coin_id: CoinId,
    pub fetched: usize,
    pub uploaded: usize,
}

/// ISO-8601 with an explicit `+00:00` offset. Microseconds are only shown
/// when the instant has a sub-second part.
pub fn iso_timestamp(millis: i64) -> Option<String> {
    let ts = DateTime::<Utc>::from_timestamp_millis(millis)?;
    let format = if ts.timestamp_subsec_nanos() == 0 {
        SecondsFormat::Secs
    } else {
        SecondsFormat::Micros
    };
    Some(ts.to_rfc3339_opts(format, false))
}
