//! # Cart State
//!
//! Line mutation rules for the shopping cart.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart State Operations                                │
//! │                                                                         │
//! │  Command                  Cart Method             State Change          │
//! │  ───────                  ───────────             ────────────          │
//! │                                                                         │
//! │  cart add ───────────────► add() ───────────────► push or merge line   │
//! │                                                                         │
//! │  cart set ───────────────► set_quantity() ──────► lines[i].qty = n     │
//! │                                                                         │
//! │  cart inc / dec ─────────► increment() ─────────► lines[i].qty ± 1     │
//! │                            decrement()            (never below 1)      │
//! │                                                                         │
//! │  cart remove ────────────► remove() ────────────► lines.remove(i)      │
//! │                                                                         │
//! │  cart clear ─────────────► clear() ─────────────► lines.clear()        │
//! │                                                                         │
//! │  NOTE: there is no quantity-0 line. Removal is always explicit.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use uuid::Uuid;

use maison_core::validation::{validate_cart_size, validate_quantity};
use maison_core::{
    price, CartLineItem, CoreError, CoreResult, PriceBreakdown, PricingConfig, Product,
    ValidationError, MAX_CART_LINES, MAX_LINE_QUANTITY,
};

/// The shopping cart.
///
/// ## Invariants
/// - Lines are unique by product + size + color (adding again merges)
/// - Quantity is always within 1..=999
/// - At most 100 lines
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    lines: Vec<CartLineItem>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// Wraps lines loaded from the store.
    pub fn from_lines(lines: Vec<CartLineItem>) -> Self {
        Cart { lines }
    }

    pub fn lines(&self) -> &[CartLineItem] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Sum of quantities across lines.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    pub fn line(&self, line_id: &str) -> Option<&CartLineItem> {
        self.lines.iter().find(|l| l.id == line_id)
    }

    /// Adds a product variant, merging into an existing identical line.
    ///
    /// ## Behavior
    /// - Size is matched case-insensitively against the product's sizes and
    ///   stored with the product's own label
    /// - Color must be the product's color
    /// - Merging past 999 is an error and leaves the line unchanged
    ///
    /// ## Returns
    /// The line that now holds the variant.
    pub fn add(
        &mut self,
        product: &Product,
        size: &str,
        color: &str,
        quantity: i64,
    ) -> CoreResult<&CartLineItem> {
        let size = resolve_size(product, size)?;

        if color != product.color {
            return Err(ValidationError::NotAllowed {
                field: "color".to_string(),
                allowed: vec![product.color.clone()],
            }
            .into());
        }

        validate_quantity(quantity)?;

        if let Some(index) = self
            .lines
            .iter()
            .position(|l| l.is_variant(&product.id, &size, color))
        {
            let line = &mut self.lines[index];
            let merged = line.quantity + quantity;
            if merged > MAX_LINE_QUANTITY {
                return Err(CoreError::QuantityTooLarge {
                    requested: merged,
                    max: MAX_LINE_QUANTITY,
                });
            }
            line.quantity = merged;
            return Ok(&self.lines[index]);
        }

        validate_cart_size(self.lines.len())
            .map_err(|_| CoreError::CartTooLarge { max: MAX_CART_LINES })?;

        self.lines.push(CartLineItem::new(
            Uuid::new_v4().to_string(),
            product,
            size,
            quantity,
        ));
        let last = self.lines.len() - 1;
        Ok(&self.lines[last])
    }

    /// Sets a line's quantity.
    ///
    /// Values below 1 are clamped to 1; above 999 is an error.
    pub fn set_quantity(&mut self, line_id: &str, quantity: i64) -> CoreResult<&CartLineItem> {
        if quantity > MAX_LINE_QUANTITY {
            return Err(CoreError::QuantityTooLarge {
                requested: quantity,
                max: MAX_LINE_QUANTITY,
            });
        }

        let line = self.line_mut(line_id)?;
        line.quantity = quantity.max(1);
        Ok(line)
    }

    /// Adds one to a line's quantity.
    pub fn increment(&mut self, line_id: &str) -> CoreResult<&CartLineItem> {
        let current = self.line_mut(line_id)?.quantity;
        self.set_quantity(line_id, current + 1)
    }

    /// Takes one from a line's quantity. A quantity-1 line is left as is.
    pub fn decrement(&mut self, line_id: &str) -> CoreResult<&CartLineItem> {
        let current = self.line_mut(line_id)?.quantity;
        self.set_quantity(line_id, current - 1)
    }

    /// Removes a line, returning it.
    pub fn remove(&mut self, line_id: &str) -> CoreResult<CartLineItem> {
        let index = self
            .lines
            .iter()
            .position(|l| l.id == line_id)
            .ok_or_else(|| CoreError::LineNotFound(line_id.to_string()))?;
        Ok(self.lines.remove(index))
    }

    /// Removes every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Prices the cart.
    pub fn totals(&self, config: &PricingConfig) -> CoreResult<PriceBreakdown> {
        price(&self.lines, config)
    }

    pub fn into_lines(self) -> Vec<CartLineItem> {
        self.lines
    }

    fn line_mut(&mut self, line_id: &str) -> CoreResult<&mut CartLineItem> {
        self.lines
            .iter_mut()
            .find(|l| l.id == line_id)
            .ok_or_else(|| CoreError::LineNotFound(line_id.to_string()))
    }
}

fn resolve_size(product: &Product, requested: &str) -> CoreResult<String> {
    let requested = requested.trim();
    product
        .sizes
        .iter()
        .find(|s| s.eq_ignore_ascii_case(requested))
        .cloned()
        .ok_or_else(|| CoreError::SizeUnavailable {
            product: product.slug.clone(),
            size: requested.to_string(),
        })
}
