use serde::Serialize;

use crate::item::CatalogItem;

/// The most expensive items of one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionResult {
    pub items: Vec<CatalogItem>,
    pub success: bool,
}

/// Keeps items whose category equals `category` exactly, orders them by price
/// descending and keeps the first `n`.
///
/// Items with equal prices keep their catalog order. An empty `items` slice
/// means there was no catalog to select from and is reported as
/// `success: false`; a catalog with no match in `category` is a successful,
/// empty selection.
#[must_use]
pub fn select_top_n(items: &[CatalogItem], category: &str, n: usize) -> SelectionResult {
    if items.is_empty() {
        tracing::warn!("no catalog items to select from");
        return SelectionResult {
            items: Vec::new(),
            success: false,
        };
    }

    let mut matching: Vec<CatalogItem> = items
        .iter()
        .filter(|item| item.category == category)
        .cloned()
        .collect();
    // `sort_by` is stable.
    matching.sort_by(|a, b| b.price.cmp(&a.price));
    matching.truncate(n);

    tracing::info!(
        category,
        requested = n,
        selected = matching.len(),
        "selected most expensive items"
    );

    SelectionResult {
        items: matching,
        success: true,
    }
}
