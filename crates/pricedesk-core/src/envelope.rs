//! The `{success, data, message, errors}` wrapper every caller receives.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::item::CatalogItem;
use crate::select::SelectionResult;
use crate::update::UpdateBatchResult;

/// Uniform result wrapper.
///
/// Built only through the constructors below, which keep `data` absent
/// whenever `success` is false.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: String,
    pub errors: Vec<String>,
}

impl<T> Envelope<T> {
    #[must_use]
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self::ok_with_errors(data, message, Vec::new())
    }

    #[must_use]
    pub fn ok_with_errors(data: T, message: impl Into<String>, errors: Vec<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: message.into(),
            errors,
        }
    }

    #[must_use]
    pub fn failure(message: impl Into<String>, errors: Vec<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: message.into(),
            errors,
        }
    }

    /// Transforms the payload, keeping status, message, and errors.
    #[must_use]
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Envelope<U> {
        Envelope {
            success: self.success,
            data: self.data.map(f),
            message: self.message,
            errors: self.errors,
        }
    }
}

/// An updated item together with the price it had before the batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceChange {
    #[serde(flatten)]
    pub item: CatalogItem,
    #[serde(serialize_with = "rust_decimal::serde::float_option::serialize")]
    pub original_price: Option<Decimal>,
}

impl SelectionResult {
    /// Wraps a selection; `warnings` come from the fetch that fed it.
    #[must_use]
    pub fn into_envelope(
        self,
        category: &str,
        warnings: Vec<String>,
    ) -> Envelope<Vec<CatalogItem>> {
        if !self.success {
            return Envelope::failure("No products available", warnings);
        }
        let message = format!(
            "Found {} products in category {category}",
            self.items.len()
        );
        Envelope::ok_with_errors(self.items, message, warnings)
    }
}

impl UpdateBatchResult {
    /// Wraps a batch, pairing each updated item with its price in `originals`.
    #[must_use]
    pub fn into_envelope(
        self,
        originals: &[CatalogItem],
        percentage_increase: Decimal,
        mut warnings: Vec<String>,
    ) -> Envelope<Vec<PriceChange>> {
        warnings.extend(self.errors.iter().map(ToString::to_string));

        if !self.success {
            return Envelope::failure("No products to update", warnings);
        }

        let attempted = self.updated.len() + self.errors.len();
        let message = format!(
            "Updated {} of {attempted} product prices by {percentage_increase}%",
            self.updated.len()
        );
        let changes = self
            .updated
            .into_iter()
            .map(|item| {
                let original_price = originals
                    .iter()
                    .find(|o| o.id == item.id)
                    .map(|o| o.price);
                PriceChange {
                    item,
                    original_price,
                }
            })
            .collect();
        Envelope::ok_with_errors(changes, message, warnings)
    }
}
