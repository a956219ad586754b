//! The fetch -> select -> update chain shared by the CLI and the HTTP API.

use rust_decimal::Decimal;

use crate::envelope::{Envelope, PriceChange};
use crate::error::ClassifyFailure;
use crate::fetch::{CatalogFetcher, CatalogSnapshot, DEFAULT_PAGE_SIZE};
use crate::item::{AccessToken, CatalogItem, Credentials};
use crate::select::select_top_n;
use crate::transport::{AuthenticationClient, CatalogTransport};
use crate::update::PriceUpdater;

/// Exchanges credentials for a token and wraps the outcome.
pub async fn login<A: AuthenticationClient>(
    auth: &A,
    credentials: &Credentials,
    expires_in_mins: u32,
) -> Envelope<AccessToken> {
    tracing::info!(username = credentials.username(), "attempting authentication");
    match auth.authenticate(credentials, expires_in_mins).await {
        Ok(token) => {
            tracing::info!(username = credentials.username(), "authentication successful");
            Envelope::ok(token, "Login successful")
        }
        Err(e) => {
            tracing::warn!(
                username = credentials.username(),
                kind = %e.kind(),
                error = %e,
                "authentication failed"
            );
            Envelope::failure("Login failed", vec![e.to_string()])
        }
    }
}

/// One authenticated request chain against the upstream catalog.
pub struct CatalogSession<'a, T> {
    transport: &'a T,
    token: AccessToken,
    page_size: usize,
}

impl<'a, T: CatalogTransport> CatalogSession<'a, T> {
    #[must_use]
    pub fn new(transport: &'a T, token: AccessToken) -> Self {
        Self {
            transport,
            token,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// The `n` most expensive items in `category`.
    ///
    /// A truncated catalog still yields a selection; the truncation is listed
    /// in `errors`.
    pub async fn top_items(&self, category: &str, n: usize) -> Envelope<Vec<CatalogItem>> {
        self.fetch_catalog().await.top_items(category, n)
    }

    /// Reads the whole catalog with the session token.
    pub async fn fetch_catalog(&self) -> CatalogSnapshot {
        CatalogFetcher::new(self.transport, &self.token)
            .with_page_size(self.page_size)
            .fetch_all()
            .await
    }

    /// Raises the prices of the `n` most expensive items in `category`.
    pub async fn raise_top_prices(
        &self,
        category: &str,
        n: usize,
        percentage_increase: Decimal,
    ) -> Envelope<Vec<PriceChange>> {
        let snapshot = self.fetch_catalog().await;
        let warnings: Vec<String> = snapshot.warning().into_iter().collect();
        let selection = select_top_n(&snapshot.items, category, n);
        if !selection.success {
            return Envelope::failure("No products available", warnings);
        }
        self.raise_prices(&selection.items, percentage_increase, warnings).await
    }

    /// Raises the prices of `items`, which the caller has already selected.
    pub async fn raise_prices(
        &self,
        items: &[CatalogItem],
        percentage_increase: Decimal,
        warnings: Vec<String>,
    ) -> Envelope<Vec<PriceChange>> {
        PriceUpdater::new(self.transport, &self.token)
            .update_prices(items, percentage_increase)
            .await
            .into_envelope(items, percentage_increase, warnings)
    }

}

impl CatalogSnapshot {
    /// The `n` most expensive items in `category`, with this snapshot's
    /// truncation note in `errors`.
    #[must_use]
    pub fn top_items(&self, category: &str, n: usize) -> Envelope<Vec<CatalogItem>> {
        let warnings = self.warning().into_iter().collect();
        select_top_n(&self.items, category, n).into_envelope(category, warnings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureKind;
    use crate::testing::{item, FakeCatalog};

    fn mixed_catalog() -> Vec<CatalogItem> {
        vec![
            item(1, "smartphones", Decimal::new(99_999, 2)),
            item(2, "laptops", Decimal::new(179_999, 2)),
            item(3, "smartphones", Decimal::new(89_999, 2)),
            item(4, "smartphones", Decimal::new(129_999, 2)),
            item(5, "smartphones", Decimal::new(29_999, 2)),
        ]
    }

    #[tokio::test]
    async fn login_wraps_token() {
        let fake = FakeCatalog::new(Vec::new()).with_login("emilys", "emilyspass");
        let creds = Credentials::new("emilys", "emilyspass").unwrap();
        let env = login(&fake, &creds, 60).await;
        assert!(env.success);
        assert_eq!(env.data.unwrap().as_str(), "token-for-emilys");
    }

    #[tokio::test]
    async fn login_failure_is_an_envelope_not_an_error() {
        let fake = FakeCatalog::new(Vec::new());
        let creds = Credentials::new("emilys", "wrong").unwrap();
        let env = login(&fake, &creds, 60).await;
        assert!(!env.success);
        assert!(env.data.is_none());
        assert_eq!(env.errors, vec!["invalid credentials"]);
    }

    #[tokio::test]
    async fn top_items_selects_most_expensive_in_category() {
        let fake = FakeCatalog::new(mixed_catalog());
        let session = CatalogSession::new(&fake, AccessToken::new("t"));
        let env = session.top_items("smartphones", 3).await;
        assert!(env.success);
        assert!(env.errors.is_empty());
        let ids: Vec<i64> = env.data.unwrap().iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![4, 1, 3]);
    }

    #[tokio::test]
    async fn top_items_reports_truncation_as_warning() {
        let fake = FakeCatalog::new(mixed_catalog()).with_failing_page_at(2);
        let session = CatalogSession::new(&fake, AccessToken::new("t")).with_page_size(2);
        let env = session.top_items("smartphones", 3).await;
        assert!(env.success);
        assert_eq!(env.errors.len(), 1);
        assert!(env.errors[0].contains("truncated at offset 2"), "{:?}", env.errors);
        let ids: Vec<i64> = env.data.unwrap().iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[tokio::test]
    async fn top_items_fails_when_catalog_unavailable() {
        let fake = FakeCatalog::new(mixed_catalog()).with_failing_page_at(0);
        let session = CatalogSession::new(&fake, AccessToken::new("t"));
        let env = session.top_items("smartphones", 3).await;
        assert!(!env.success);
        assert!(env.data.is_none());
        assert_eq!(env.errors.len(), 1);
    }

    #[tokio::test]
    async fn fetched_catalog_keeps_the_refusal_kind() {
        let fake = FakeCatalog::new(mixed_catalog()).with_refused_token("stale");
        let session = CatalogSession::new(&fake, AccessToken::new("stale"));
        let snapshot = session.fetch_catalog().await;
        assert_eq!(snapshot.failure_kind(), Some(FailureKind::Auth));
        let env = snapshot.top_items("smartphones", 3);
        assert!(!env.success);
        assert_eq!(env.message, "No products available");
    }

    #[tokio::test]
    async fn raise_top_prices_runs_whole_chain() {
        let fake = FakeCatalog::new(mixed_catalog()).with_failing_update(1);
        let session = CatalogSession::new(&fake, AccessToken::new("t"));
        let env = session
            .raise_top_prices("smartphones", 3, Decimal::from(10))
            .await;

        assert!(env.success);
        assert_eq!(env.errors, vec!["item 1: connection refused"]);
        let changes = env.data.unwrap();
        let ids: Vec<i64> = changes.iter().map(|c| c.item.id).collect();
        assert_eq!(ids, vec![4, 3]);
        assert_eq!(changes[0].item.price, Decimal::new(142_999, 2));
        assert_eq!(changes[0].original_price, Some(Decimal::new(129_999, 2)));
    }

    #[tokio::test]
    async fn raise_top_prices_with_no_matches_is_not_attempted() {
        let fake = FakeCatalog::new(mixed_catalog());
        let session = CatalogSession::new(&fake, AccessToken::new("t"));
        let env = session
            .raise_top_prices("tablets", 3, Decimal::from(10))
            .await;
        assert!(!env.success);
        assert!(fake.proposed().is_empty());
    }

    #[tokio::test]
    async fn every_call_uses_the_session_token() {
        let fake = FakeCatalog::new(mixed_catalog());
        let session = CatalogSession::new(&fake, AccessToken::new("abc"));
        session
            .raise_top_prices("smartphones", 2, Decimal::from(1))
            .await;
        assert!(fake.tokens_seen().iter().all(|t| t == "abc"));
        assert_eq!(fake.tokens_seen().len(), 3);
    }
}
