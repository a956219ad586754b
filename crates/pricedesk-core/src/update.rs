//! Percentage price increases applied one item at a time.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::error::{ClassifyFailure, FailureKind};
use crate::item::{AccessToken, CatalogItem};
use crate::transport::CatalogTransport;

/// A single item whose update did not go through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemError {
    pub item_id: i64,
    pub kind: FailureKind,
    pub message: String,
}

impl std::fmt::Display for ItemError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "item {}: {}", self.item_id, self.message)
    }
}

/// Per-item outcome of an update attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    Updated(CatalogItem),
    Failed(ItemError),
}

/// Result of one price-update batch.
///
/// `success` only says whether the batch was attempted. Individual failures
/// are listed in `errors`; check both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateBatchResult {
    pub updated: Vec<CatalogItem>,
    pub success: bool,
    pub errors: Vec<ItemError>,
}

impl UpdateBatchResult {
    fn not_attempted() -> Self {
        Self {
            updated: Vec::new(),
            success: false,
            errors: Vec::new(),
        }
    }

    fn from_outcomes(outcomes: Vec<UpdateOutcome>) -> Self {
        let mut updated = Vec::new();
        let mut errors = Vec::new();
        for outcome in outcomes {
            match outcome {
                UpdateOutcome::Updated(item) => updated.push(item),
                UpdateOutcome::Failed(err) => errors.push(err),
            }
        }
        Self {
            updated,
            success: true,
            errors,
        }
    }
}

/// Computes the price to propose for `price` raised by `percentage_increase`
/// percent, rounded to cents with midpoint-to-even rounding.
///
/// Returns `None` if the arithmetic overflows.
#[must_use]
pub fn propose_price(price: Decimal, percentage_increase: Decimal) -> Option<Decimal> {
    let factor = Decimal::ONE.checked_add(percentage_increase.checked_div(Decimal::ONE_HUNDRED)?)?;
    let raw = price.checked_mul(factor)?;
    Some(raw.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven))
}

/// Sends price proposals for one session.
pub struct PriceUpdater<'a, T> {
    transport: &'a T,
    token: &'a AccessToken,
}

impl<'a, T: CatalogTransport> PriceUpdater<'a, T> {
    #[must_use]
    pub fn new(transport: &'a T, token: &'a AccessToken) -> Self {
        Self { transport, token }
    }

    /// Raises every item's price by `percentage_increase` percent.
    ///
    /// Items are updated sequentially in input order. A failed item is
    /// recorded and skipped; the rest of the batch still runs. The percentage
    /// is not range-checked here.
    pub async fn update_prices(
        &self,
        items: &[CatalogItem],
        percentage_increase: Decimal,
    ) -> UpdateBatchResult {
        if items.is_empty() {
            tracing::warn!("price update requested for an empty selection");
            return UpdateBatchResult::not_attempted();
        }

        tracing::info!(
            count = items.len(),
            percentage = %percentage_increase,
            "starting price update batch"
        );

        let mut outcomes = Vec::with_capacity(items.len());
        for item in items {
            outcomes.push(self.update_one(item, percentage_increase).await);
        }

        let result = UpdateBatchResult::from_outcomes(outcomes);
        tracing::info!(
            updated = result.updated.len(),
            failed = result.errors.len(),
            "price update batch finished"
        );
        result
    }

    async fn update_one(&self, item: &CatalogItem, percentage_increase: Decimal) -> UpdateOutcome {
        let Some(new_price) = propose_price(item.price, percentage_increase) else {
            tracing::warn!(item_id = item.id, "proposed price overflows");
            return UpdateOutcome::Failed(ItemError {
                item_id: item.id,
                kind: FailureKind::Validation,
                message: format!(
                    "price {} raised by {percentage_increase}% is out of range",
                    item.price
                ),
            });
        };

        match self
            .transport
            .put_price(self.token, item.id, new_price)
            .await
        {
            Ok(updated) => {
                tracing::info!(
                    item_id = item.id,
                    old_price = %item.price,
                    proposed = %new_price,
                    stored = %updated.price,
                    "price updated"
                );
                UpdateOutcome::Updated(updated)
            }
            Err(e) => {
                tracing::warn!(
                    item_id = item.id,
                    kind = %e.kind(),
                    error = %e,
                    "price update failed; continuing with next item"
                );
                UpdateOutcome::Failed(ItemError {
                    item_id: item.id,
                    kind: e.kind(),
                    message: e.to_string(),
                })
            }
        }
    }
}
