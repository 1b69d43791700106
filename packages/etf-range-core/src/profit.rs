//! Profit estimates against a purchase price.

use serde::{Deserialize, Serialize};

use crate::stats::round2;

/// Share of a gain kept after the 20.315% withholding applied to foreign ETF
/// gains held in a Japanese specified account.
pub const TAX_RETENTION_FACTOR: f64 = 0.79685;

/// Pre-tax and tax-adjusted profit percentages.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ProfitEstimate {
    /// `(current - purchase) / purchase * 100`, rounded to 2 decimals
    pub profit_percent: f64,
    /// `profit_percent * retention factor`, rounded to 2 decimals
    pub tax_adjusted_profit_percent: f64,
}

impl ProfitEstimate {
    /// Estimate profit for a position bought at `purchase_price`.
    ///
    /// Returns `None` when there is no purchase price or it is not positive.
    pub fn compute(
        current_price: f64,
        purchase_price: Option<f64>,
        retention_factor: f64,
    ) -> Option<Self> {
        let profit = profit_percent(current_price, purchase_price?)?;
        Some(Self {
            profit_percent: profit,
            tax_adjusted_profit_percent: tax_adjusted(profit, retention_factor),
        })
    }
}

/// Profit percentage of `current_price` over `purchase_price`, rounded to 2 decimals.
///
/// Returns `None` when `purchase_price` is not a positive number.
pub fn profit_percent(current_price: f64, purchase_price: f64) -> Option<f64> {
    if !purchase_price.is_finite() || purchase_price <= 0.0 {
        return None;
    }
    Some(round2(
        (current_price - purchase_price) / purchase_price * 100.0,
    ))
}

/// Scale an already-rounded profit percentage by a retention factor.
pub fn tax_adjusted(profit_percent: f64, retention_factor: f64) -> f64 {
    round2(profit_percent * retention_factor)
}
