//! # Cart Pricing Engine
//!
//! Computes the order summary shown on the cart page.
//!
//! ## Calculation Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  subtotal = Σ unit price × quantity            (exact, integer cents)   │
//! │      │                                                                  │
//! │      ├──► shipping = 0          if subtotal >= free_shipping_threshold  │
//! │      │             = flat fee   otherwise                               │
//! │      │                                                                  │
//! │      └──► tax = subtotal × rate, rounded half-up  (ONLY rounding step)  │
//! │                                                                         │
//! │  total = subtotal + shipping + tax                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Tax is charged on the merchandise subtotal only, never on shipping.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{CartLineItem, TaxRate};
use crate::validation::validate_tax_rate_bps;

// =============================================================================
// Pricing Config
// =============================================================================

/// Store-wide pricing parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PricingConfig {
    /// Subtotal at or above which shipping is waived.
    pub free_shipping_threshold: Money,
    /// Charged when the subtotal is below the threshold.
    pub flat_shipping_fee: Money,
    pub tax_rate: TaxRate,
}

impl PricingConfig {
    /// Default storefront tax rate: 8%.
    pub const DEFAULT_TAX_RATE: TaxRate = TaxRate::from_bps(800);

    /// Rejects negative amounts and tax rates above 100%.
    pub fn validate(&self) -> CoreResult<()> {
        if self.free_shipping_threshold.is_negative() {
            return Err(CoreError::InvalidPricingConfig(
                "free shipping threshold cannot be negative".to_string(),
            ));
        }
        if self.flat_shipping_fee.is_negative() {
            return Err(CoreError::InvalidPricingConfig(
                "shipping fee cannot be negative".to_string(),
            ));
        }
        validate_tax_rate_bps(self.tax_rate.bps())
            .map_err(|e| CoreError::InvalidPricingConfig(e.to_string()))?;
        Ok(())
    }
}

impl Default for PricingConfig {
    fn default() -> Self {
        PricingConfig {
            free_shipping_threshold: Money::from_units(100),
            flat_shipping_fee: Money::from_units(10),
            tax_rate: Self::DEFAULT_TAX_RATE,
        }
    }
}

// =============================================================================
// Price Breakdown
// =============================================================================

/// The order summary for a cart.
///
/// Invariant: `total == subtotal + shipping + tax`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakdown {
    pub subtotal: Money,
    pub shipping: Money,
    pub tax: Money,
    pub total: Money,
    /// Number of distinct lines.
    pub line_count: usize,
    /// Sum of quantities across all lines.
    pub total_quantity: i64,
}

impl PriceBreakdown {
    /// Checks if shipping was waived for this cart.
    pub fn has_free_shipping(&self) -> bool {
        self.shipping.is_zero()
    }

    /// How much more merchandise qualifies the cart for free shipping.
    /// Zero once the threshold is met.
    pub fn remaining_for_free_shipping(&self, config: &PricingConfig) -> Money {
        if self.subtotal >= config.free_shipping_threshold {
            Money::zero()
        } else {
            config.free_shipping_threshold - self.subtotal
        }
    }
}

// =============================================================================
// Price
// =============================================================================

/// Prices a cart.
///
/// Lines are expected to carry `quantity >= 1`; anything else is a
/// contract violation reported as [`CoreError::InvalidQuantity`]. Sums that
/// do not fit in i64 cents are reported as [`CoreError::AmountOverflow`].
///
/// ## Example
/// ```rust
/// use maison_core::pricing::{price, PricingConfig};
///
/// let summary = price(&[], &PricingConfig::default()).unwrap();
/// assert!(summary.subtotal.is_zero());
/// assert_eq!(summary.shipping.cents(), 1000);
/// assert_eq!(summary.total.cents(), 1000);
/// ```
pub fn price(lines: &[CartLineItem], config: &PricingConfig) -> CoreResult<PriceBreakdown> {
    let mut subtotal = Money::zero();
    let mut total_quantity: i64 = 0;

    for line in lines {
        if line.quantity < 1 {
            return Err(CoreError::InvalidQuantity {
                line_id: line.id.clone(),
                quantity: line.quantity,
            });
        }
        let overflow = || CoreError::AmountOverflow {
            line_id: line.id.clone(),
        };
        let line_total = line
            .product
            .price
            .checked_multiply_quantity(line.quantity)
            .ok_or_else(overflow)?;
        subtotal = subtotal.checked_add(line_total).ok_or_else(overflow)?;
        total_quantity = total_quantity.checked_add(line.quantity).ok_or_else(overflow)?;
    }

    let shipping = if subtotal >= config.free_shipping_threshold {
        Money::zero()
    } else {
        config.flat_shipping_fee
    };
    let tax = subtotal.apply_rate(config.tax_rate);
    let total = subtotal
        .checked_add(shipping)
        .and_then(|m| m.checked_add(tax))
        .ok_or_else(|| CoreError::AmountOverflow {
            line_id: lines.last().map(|l| l.id.clone()).unwrap_or_default(),
        })?;

    Ok(PriceBreakdown {
        subtotal,
        shipping,
        tax,
        total,
        line_count: lines.len(),
        total_quantity,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
