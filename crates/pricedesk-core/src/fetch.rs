//! Full-catalog retrieval over offset pagination.
//!
//! The upstream list endpoint reports the catalog size on every page. The
//! first page fixes that total; later pages are requested one at a time,
//! advancing the offset by the page size, until the accumulated count reaches
//! it. Failures never reach the caller: a broken first page yields an empty
//! snapshot, a broken later page truncates it. Either way the snapshot records
//! what happened in [`Completeness`].

use crate::error::{ClassifyFailure, FailureKind};
use crate::item::{AccessToken, CatalogItem, CATALOG_FIELDS};
use crate::transport::CatalogTransport;

/// Page size used by the upstream's own default listing.
pub const DEFAULT_PAGE_SIZE: usize = 30;

/// Why a fetch stopped before reaching the reported total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TruncationReason {
    /// The upstream returned a page with no items.
    EmptyPage,
    /// The page request failed.
    Failed { kind: FailureKind, message: String },
}

/// How much of the reported catalog a snapshot holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completeness {
    Complete,
    Truncated {
        at_offset: usize,
        reason: TruncationReason,
    },
    /// The first page could not be read, so nothing is known about the catalog.
    Unavailable { kind: FailureKind, message: String },
}

/// Items gathered by one [`CatalogFetcher::fetch_all`] call, in upstream order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogSnapshot {
    pub items: Vec<CatalogItem>,
    pub reported_total: usize,
    pub completeness: Completeness,
}

impl CatalogSnapshot {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.completeness == Completeness::Complete
    }

    /// Human-readable note for a truncated or unavailable snapshot.
    #[must_use]
    pub fn warning(&self) -> Option<String> {
        match &self.completeness {
            Completeness::Complete => None,
            Completeness::Truncated { at_offset, reason } => {
                let why = match reason {
                    TruncationReason::EmptyPage => "upstream returned an empty page".to_string(),
                    TruncationReason::Failed { kind, message } => format!("{kind}: {message}"),
                };
                Some(format!(
                    "catalog truncated at offset {at_offset} ({} of {} items): {why}",
                    self.items.len(),
                    self.reported_total
                ))
            }
            Completeness::Unavailable { kind, message } => {
                Some(format!("catalog unavailable ({kind}): {message}"))
            }
        }
    }

    /// Why the catalog could not be read at all, if it could not.
    #[must_use]
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match &self.completeness {
            Completeness::Unavailable { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    #[must_use]
    pub fn into_items(self) -> Vec<CatalogItem> {
        self.items
    }
}

/// Walks every page of the catalog for one session.
pub struct CatalogFetcher<'a, T> {
    transport: &'a T,
    token: &'a AccessToken,
    page_size: usize,
}

impl<'a, T: CatalogTransport> CatalogFetcher<'a, T> {
    #[must_use]
    pub fn new(transport: &'a T, token: &'a AccessToken) -> Self {
        Self {
            transport,
            token,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Overrides the page size. Zero is treated as one.
    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Retrieves the whole catalog, one page at a time.
    pub async fn fetch_all(&self) -> CatalogSnapshot {
        let first = match self
            .transport
            .get_page(self.token, 0, self.page_size, CATALOG_FIELDS)
            .await
        {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!(kind = %e.kind(), error = %e, "first catalog page failed");
                return CatalogSnapshot {
                    items: Vec::new(),
                    reported_total: 0,
                    completeness: Completeness::Unavailable {
                        kind: e.kind(),
                        message: e.to_string(),
                    },
                };
            }
        };

        let total = first.total;
        let mut items = first.items;
        let mut offset = 0usize;
        tracing::info!(count = items.len(), total, "initial catalog page fetched");

        while items.len() < total {
            offset += self.page_size;

            let page = match self
                .transport
                .get_page(self.token, offset, self.page_size, CATALOG_FIELDS)
                .await
            {
                Ok(page) => page,
                Err(e) => {
                    tracing::warn!(
                        offset,
                        kind = %e.kind(),
                        error = %e,
                        "catalog page failed; keeping items fetched so far"
                    );
                    return Self::truncated(
                        items,
                        total,
                        offset,
                        TruncationReason::Failed {
                            kind: e.kind(),
                            message: e.to_string(),
                        },
                    );
                }
            };

            if page.items.is_empty() {
                tracing::warn!(offset, "catalog page was empty before reaching reported total");
                return Self::truncated(items, total, offset, TruncationReason::EmptyPage);
            }

            items.extend(page.items);
        }

        tracing::info!(count = items.len(), total, "catalog fetch complete");
        CatalogSnapshot {
            items,
            reported_total: total,
            completeness: Completeness::Complete,
        }
    }

    fn truncated(
        items: Vec<CatalogItem>,
        total: usize,
        at_offset: usize,
        reason: TruncationReason,
    ) -> CatalogSnapshot {
        CatalogSnapshot {
            items,
            reported_total: total,
            completeness: Completeness::Truncated { at_offset, reason },
        }
    }
}
