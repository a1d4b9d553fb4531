use reqwest::StatusCode;
use thiserror::Error;

/// Problems reading [`crate::config::Settings`] from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required setting {0}")]
    Missing(&'static str),
    #[error("invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Why a sync run stopped.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("cannot build a {days}-day window ending now")]
    InvalidWindow { days: i64 },

    #[error("unusable setting {name}: {reason}")]
    InvalidSetting { name: &'static str, reason: String },

    #[error("gecko error: {status} - {body}")]
    UpstreamFetch { status: StatusCode, body: String },

    #[error("local api error: {status} - {body}")]
    LocalLookup { status: StatusCode, body: String },

    #[error("expected a list of coins, but got {kind}: {content}")]
    CatalogShape { kind: &'static str, content: String },

    #[error("{symbol} not found in local catalog; create it in the api core first")]
    UnresolvedTarget { symbol: String },

    #[error("api core error: {status} - {body}")]
    Upload { status: StatusCode, body: String },

    #[error("malformed {context}: {reason}")]
    MalformedResponse { context: &'static str, reason: String },

    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
}

impl SyncError {
    /// Timeouts and connection failures, as opposed to answers we didn't like.
    pub fn is_transport(&self) -> bool {
        matches!(self, SyncError::Transport(_))
    }
}
