use rust_decimal::Decimal;

use crate::error::ValidationError;

/// Range of percentage increases callers accept before calling the updater.
///
/// The updater itself takes any decimal; this is the policy the CLI and the
/// HTTP API share.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricePolicy {
    pub min_percentage: Decimal,
    pub max_percentage: Decimal,
}

impl Default for PricePolicy {
    fn default() -> Self {
        Self {
            min_percentage: Decimal::ZERO,
            max_percentage: Decimal::ONE_THOUSAND,
        }
    }
}

impl PricePolicy {
    #[must_use]
    pub fn with_max(max_percentage: Decimal) -> Self {
        Self {
            max_percentage,
            ..Self::default()
        }
    }

    /// # Errors
    ///
    /// Returns [`ValidationError::PercentageOutOfRange`] when `percentage`
    /// falls outside `min_percentage..=max_percentage`.
    pub fn check_percentage(&self, percentage: Decimal) -> Result<Decimal, ValidationError> {
        if percentage < self.min_percentage || percentage > self.max_percentage {
            return Err(ValidationError::PercentageOutOfRange {
                value: percentage.to_string(),
                min: self.min_percentage.to_string(),
                max: self.max_percentage.to_string(),
            });
        }
        Ok(percentage)
    }
}
