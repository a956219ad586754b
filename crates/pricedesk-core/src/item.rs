//! Catalog entities shared by the fetcher, selector, and updater.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Fields requested from the upstream list endpoint.
pub const CATALOG_FIELDS: &[&str] = &["title", "price", "brand", "category"];

/// One product as the upstream catalog reports it.
///
/// `price` is replaced wholesale by the value the upstream returns after an
/// update; it is never adjusted locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub category: String,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub price: Decimal,
}

/// A bounded slice of the catalog returned by one list request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub items: Vec<CatalogItem>,
    pub total: usize,
    pub offset: usize,
    pub limit: usize,
}

/// Bearer credential issued by the upstream auth endpoint.
///
/// `Debug` never prints the token.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AccessToken([redacted])")
    }
}

/// Username and password, checked non-empty on construction.
#[derive(Clone)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingCredentials`] if either value is
    /// empty or whitespace.
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let username = username.into().trim().to_owned();
        let password = password.into();
        if username.is_empty() || password.trim().is_empty() {
            return Err(ValidationError::MissingCredentials);
        }
        Ok(Self { username, password })
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[redacted]")
            .finish()
    }
}
