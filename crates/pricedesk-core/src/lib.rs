mod app_config;
mod config;
pub mod envelope;
mod error;
pub mod fetch;
mod item;
pub mod policy;
pub mod select;
pub mod session;
pub mod transport;
pub mod update;

#[cfg(test)]
mod testing;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use envelope::{Envelope, PriceChange};
pub use error::{ClassifyFailure, ConfigError, FailureKind, ValidationError};
pub use fetch::{CatalogFetcher, CatalogSnapshot, Completeness, TruncationReason};
pub use item::{AccessToken, CatalogItem, Credentials, Page, CATALOG_FIELDS};
pub use policy::PricePolicy;
pub use select::{select_top_n, SelectionResult};
pub use session::{login, CatalogSession};
pub use transport::{AuthenticationClient, CatalogTransport};
pub use update::{propose_price, ItemError, PriceUpdater, UpdateBatchResult, UpdateOutcome};
