//! Seams to the upstream catalog service.
//!
//! Implementations own the wire format and the HTTP client. The bearer token
//! travels as an explicit argument on every call so that no client state is
//! shared between sessions.

use std::future::Future;

use rust_decimal::Decimal;

use crate::error::ClassifyFailure;
use crate::item::{AccessToken, CatalogItem, Credentials, Page};

/// Exchanges credentials for a bearer token.
pub trait AuthenticationClient: Send + Sync {
    type Error: ClassifyFailure;

    fn authenticate(
        &self,
        credentials: &Credentials,
        expires_in_mins: u32,
    ) -> impl Future<Output = Result<AccessToken, Self::Error>> + Send;
}

/// Reads catalog pages and writes prices.
pub trait CatalogTransport: Send + Sync {
    type Error: ClassifyFailure;

    /// Fetches `limit` items starting at `offset`, restricted to `fields`.
    fn get_page(
        &self,
        token: &AccessToken,
        offset: usize,
        limit: usize,
        fields: &[&str],
    ) -> impl Future<Output = Result<Page, Self::Error>> + Send;

    /// Proposes `new_price` for `item_id` and returns the item as the
    /// upstream stored it.
    fn put_price(
        &self,
        token: &AccessToken,
        item_id: i64,
        new_price: Decimal,
    ) -> impl Future<Output = Result<CatalogItem, Self::Error>> + Send;
}
