pub mod api;
pub mod config;
pub mod error;
pub mod fetch;
pub mod model;
pub mod sync;

pub use config::Settings;
pub use error::{ConfigError, SyncError};
pub use model::SyncReport;
pub use sync::Synchronizer;
