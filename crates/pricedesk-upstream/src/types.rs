//! Wire types for the upstream catalog service.
//!
//! Field names are fixed by the upstream: requests send `username`,
//! `password`, `expiresInMins`, and `price`; responses carry `accessToken`,
//! `products`, `total`, and per-product `id`, `title`, `brand`, `category`,
//! `price`.
//!
//! ### `products`
//! Absent or `null` means the upstream did not return a collection at all,
//! which is treated as a malformed page. An empty array is a valid page.
//!
//! ### `brand`
//! Missing on some catalog entries (groceries, for instance). Defaulted to
//! an empty string by [`pricedesk_core::CatalogItem`].

use pricedesk_core::CatalogItem;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
    pub expires_in_mins: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LoginResponse {
    #[serde(default, alias = "token")]
    pub access_token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProductsResponse {
    #[serde(default)]
    pub products: Option<Vec<CatalogItem>>,
    #[serde(default)]
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub(crate) struct PriceUpdate {
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UsersResponse {
    #[serde(default)]
    pub users: Option<Vec<UserSummary>>,
}

/// Public profile of an upstream user. Passwords and contact details are
/// never read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}
