//! # Money
//!
//! Prices, line totals and order summaries as whole cents.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  DECIMAL PRICES DRIFT                                                   │
//! │                                                                         │
//! │  With f64 prices:                                                       │
//! │    170 × 0.08 = 13.600000000000001                                      │
//! │    rounding to 2 places only hides it for display                       │
//! │                                                                         │
//! │  Here: i64 cents                                                        │
//! │    17000 cents × 800 bps = 1360 cents, exactly                          │
//! │    Tax rounds half-up once, in apply_rate                               │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use maison_core::money::Money;
//!
//! let price = Money::from_cents(129_900); // $1299.00
//! let line_total = price * 2;
//! assert_eq!(line_total.cents(), 259_800);
//! assert_eq!(Money::from_units(100), Money::from_cents(10_000));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

use crate::types::TaxRate;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                                                                         │
/// │  Product.price ──┬──► FilterSpec price range match                      │
/// │                  │                                                      │
/// │                  └──► CartLineItem snapshot ──► line total (× qty)      │
/// │                                                                         │
/// │  subtotal ──► shipping rule ──► tax (rounded once) ──► total            │
/// │                                                                         │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Wraps an amount already in cents.
    ///
    /// ```rust
    /// use maison_core::money::Money;
    ///
    /// let scarf = Money::from_cents(19_900); // $199.00
    /// assert_eq!(scarf.units(), 199);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from whole currency units.
    #[inline]
    pub const fn from_units(units: i64) -> Self {
        Money(units * 100)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-unit portion (truncated toward zero).
    ///
    /// ## Example
    /// ```rust
    /// use maison_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(1099).units(), 10);
    /// assert_eq!(Money::from_cents(-550).units(), -5);
    /// ```
    #[inline]
    pub const fn units(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the cents portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Applies a rate and rounds half-up at the cent boundary.
    ///
    /// ## Rounding
    /// ```text
    /// ┌─────────────────────────────────────────────────────────────────────┐
    /// │  ROUND HALF UP (away from zero for negative amounts)                │
    /// │                                                                     │
    /// │    82.5 cents → 83       82.4 cents → 82       0.5 cents → 1        │
    /// │                                                                     │
    /// │  Integer form: (amount × bps + 5000) / 10000                        │
    /// │  The +5000 is exactly half of the 10000 divisor.                    │
    /// └─────────────────────────────────────────────────────────────────────┘
    /// ```
    ///
    /// ## Example
    /// ```rust
    /// use maison_core::money::Money;
    /// use maison_core::types::TaxRate;
    ///
    /// let subtotal = Money::from_units(170);
    /// let tax = subtotal.apply_rate(TaxRate::from_bps(800)); // 8%
    /// assert_eq!(tax.cents(), 1360);
    ///
    /// // $10.00 × 8.25% = 82.5 cents → 83 cents
    /// let tax = Money::from_units(10).apply_rate(TaxRate::from_bps(825));
    /// assert_eq!(tax.cents(), 83);
    /// ```
    pub fn apply_rate(&self, rate: TaxRate) -> Money {
        // i128 keeps amount × bps from overflowing on large carts
        let scaled = (self.0 as i128).abs() * rate.bps() as i128;
        let rounded = i64::try_from((scaled + 5000) / 10000).unwrap_or(i64::MAX);
        if self.0 < 0 {
            Money(-rounded)
        } else {
            Money(rounded)
        }
    }

    /// Line total for `qty` units at this price, saturating at the i64
    /// bounds. Pricing uses [`Money::checked_multiply_quantity`].
    ///
    /// ```rust
    /// use maison_core::money::Money;
    ///
    /// let unit_price = Money::from_units(60);
    /// assert_eq!(unit_price.multiply_quantity(2).cents(), 12_000);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Line total, or `None` if it does not fit in i64 cents.
    ///
    /// ```rust
    /// use maison_core::money::Money;
    ///
    /// assert_eq!(Money::from_units(60).checked_multiply_quantity(2), Some(Money::from_units(120)));
    /// assert_eq!(Money::from_cents(i64::MAX).checked_multiply_quantity(2), None);
    /// ```
    #[inline]
    pub const fn checked_multiply_quantity(&self, qty: i64) -> Option<Self> {
        match self.0.checked_mul(qty) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    #[inline]
    pub const fn checked_add(&self, other: Money) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display is for logs and debugging. The CLI formats with the configured
/// currency symbol instead.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}${}.{:02}", sign, self.units().abs(), self.cents_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
