//! In-memory upstream used by the unit tests in this crate.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::error::{ClassifyFailure, FailureKind};
use crate::item::{AccessToken, CatalogItem, Credentials, Page};
use crate::transport::{AuthenticationClient, CatalogTransport};

#[derive(Debug, Error)]
pub(crate) enum FakeError {
    #[error("connection refused")]
    Transport,
    #[error("unexpected HTTP status 404")]
    Rejected,
    #[error("invalid credentials")]
    Auth,
}

impl ClassifyFailure for FakeError {
    fn kind(&self) -> FailureKind {
        match self {
            FakeError::Transport => FailureKind::Transport,
            FakeError::Rejected => FailureKind::UpstreamRejection,
            FakeError::Auth => FailureKind::Auth,
        }
    }
}

pub(crate) fn item(id: i64, category: &str, price: Decimal) -> CatalogItem {
    CatalogItem {
        id,
        title: format!("Item {id}"),
        brand: "Acme".to_string(),
        category: category.to_string(),
        price,
    }
}

/// `n` items with ids `1..=n`, all in category `"x"`, priced at their id.
pub(crate) fn catalog(n: usize) -> Vec<CatalogItem> {
    (1..=n)
        .map(|i| {
            let id = i64::try_from(i).expect("small test catalog");
            item(id, "x", Decimal::from(id))
        })
        .collect()
}

#[derive(Default)]
pub(crate) struct FakeCatalog {
    items: Vec<CatalogItem>,
    empty_page_at: Option<usize>,
    failing_page_at: Option<usize>,
    failing_updates: HashMap<i64, bool>,
    stored_prices: HashMap<i64, Decimal>,
    valid_logins: HashSet<(String, String)>,
    refused_token: Option<String>,
    page_requests: Mutex<Vec<(usize, usize)>>,
    tokens_seen: Mutex<Vec<String>>,
    proposed: Mutex<Vec<(i64, Decimal)>>,
}

impl FakeCatalog {
    pub(crate) fn new(items: Vec<CatalogItem>) -> Self {
        Self {
            items,
            ..Self::default()
        }
    }

    pub(crate) fn with_empty_page_at(mut self, offset: usize) -> Self {
        self.empty_page_at = Some(offset);
        self
    }

    pub(crate) fn with_failing_page_at(mut self, offset: usize) -> Self {
        self.failing_page_at = Some(offset);
        self
    }

    /// Makes the update of `id` fail with a transport error.
    pub(crate) fn with_failing_update(mut self, id: i64) -> Self {
        self.failing_updates.insert(id, true);
        self
    }

    /// Makes the update of `id` fail with a non-success status.
    pub(crate) fn with_rejected_update(mut self, id: i64) -> Self {
        self.failing_updates.insert(id, false);
        self
    }

    /// The price the upstream reports back for `id`, regardless of the proposal.
    pub(crate) fn with_stored_price(mut self, id: i64, price: Decimal) -> Self {
        self.stored_prices.insert(id, price);
        self
    }

    pub(crate) fn with_login(mut self, username: &str, password: &str) -> Self {
        self.valid_logins
            .insert((username.to_string(), password.to_string()));
        self
    }

    /// Makes every catalog call carrying `token` fail as unauthorized.
    pub(crate) fn with_refused_token(mut self, token: &str) -> Self {
        self.refused_token = Some(token.to_string());
        self
    }

    fn refuses(&self, token: &AccessToken) -> bool {
        self.refused_token.as_deref() == Some(token.as_str())
    }

    pub(crate) fn page_requests(&self) -> Vec<(usize, usize)> {
        self.page_requests.lock().expect("lock").clone()
    }

    pub(crate) fn tokens_seen(&self) -> Vec<String> {
        self.tokens_seen.lock().expect("lock").clone()
    }

    pub(crate) fn proposed(&self) -> Vec<(i64, Decimal)> {
        self.proposed.lock().expect("lock").clone()
    }
}

impl CatalogTransport for FakeCatalog {
    type Error = FakeError;

    async fn get_page(
        &self,
        token: &AccessToken,
        offset: usize,
        limit: usize,
        _fields: &[&str],
    ) -> Result<Page, FakeError> {
        self.page_requests
            .lock()
            .expect("lock")
            .push((offset, limit));
        self.tokens_seen
            .lock()
            .expect("lock")
            .push(token.as_str().to_string());

        if self.refuses(token) {
            return Err(FakeError::Auth);
        }
        if self.failing_page_at == Some(offset) {
            return Err(FakeError::Transport);
        }
        let items = if self.empty_page_at == Some(offset) {
            Vec::new()
        } else {
            self.items.iter().skip(offset).take(limit).cloned().collect()
        };
        Ok(Page {
            items,
            total: self.items.len(),
            offset,
            limit,
        })
    }

    async fn put_price(
        &self,
        token: &AccessToken,
        item_id: i64,
        new_price: Decimal,
    ) -> Result<CatalogItem, FakeError> {
        self.proposed.lock().expect("lock").push((item_id, new_price));
        self.tokens_seen
            .lock()
            .expect("lock")
            .push(token.as_str().to_string());

        if self.refuses(token) {
            return Err(FakeError::Auth);
        }
        match self.failing_updates.get(&item_id) {
            Some(true) => return Err(FakeError::Transport),
            Some(false) => return Err(FakeError::Rejected),
            None => {}
        }
        let mut updated = self
            .items
            .iter()
            .find(|i| i.id == item_id)
            .cloned()
            .ok_or(FakeError::Rejected)?;
        updated.price = self
            .stored_prices
            .get(&item_id)
            .copied()
            .unwrap_or(new_price);
        Ok(updated)
    }
}

impl AuthenticationClient for FakeCatalog {
    type Error = FakeError;

    async fn authenticate(
        &self,
        credentials: &Credentials,
        _expires_in_mins: u32,
    ) -> Result<AccessToken, FakeError> {
        let key = (
            credentials.username().to_string(),
            credentials.password().to_string(),
        );
        if self.valid_logins.contains(&key) {
            Ok(AccessToken::new(format!("token-for-{}", key.0)))
        } else {
            Err(FakeError::Auth)
        }
    }
}
