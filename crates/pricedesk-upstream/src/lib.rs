pub mod client;
pub mod error;
mod retry;
pub mod types;

pub use client::UpstreamClient;
pub use error::UpstreamError;
pub use types::UserSummary;
