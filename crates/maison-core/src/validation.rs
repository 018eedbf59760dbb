//! # Validation Module
//!
//! Input validation utilities for the Maison storefront.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Catalog load (maison-store)                                  │
//! │  ├── Shape checks (deserialization)                                    │
//! │  └── THIS MODULE: per-field rules on every product                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Cart mutation (CLI state)                                    │
//! │  ├── THIS MODULE: quantity and cart-size rules                         │
//! │  └── Size availability against the product                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Pricing engine                                               │
//! │  └── Refuses any line with quantity < 1                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use maison_core::validation::{validate_slug, validate_quantity};
//!
//! validate_slug("silk-blend-scarf").unwrap();
//! validate_quantity(5).unwrap();
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::{MAX_CART_LINES, MAX_LINE_QUANTITY};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates that a string field is present and within a length limit.
///
/// ## Example
/// ```rust
/// use maison_core::validation::validate_required;
///
/// assert!(validate_required("name", "Silk Blend Scarf", 200).is_ok());
/// assert!(validate_required("name", "   ", 200).is_err());
/// ```
pub fn validate_required(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

/// Validates a product slug.
///
/// ## Rules
/// - Must not be empty
/// - At most 100 characters
/// - Lowercase ASCII letters, digits and single hyphens only
/// - Cannot start or end with a hyphen
///
/// ## Example
/// ```rust
/// use maison_core::validation::validate_slug;
///
/// assert!(validate_slug("premium-leather-jacket").is_ok());
/// assert!(validate_slug("Leather Jacket").is_err());
/// assert!(validate_slug("-jacket").is_err());
/// ```
pub fn validate_slug(slug: &str) -> ValidationResult<()> {
    if slug.is_empty() {
        return Err(ValidationError::Required {
            field: "slug".to_string(),
        });
    }

    if slug.len() > 100 {
        return Err(ValidationError::TooLong {
            field: "slug".to_string(),
            max: 100,
        });
    }

    let charset_ok = slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    let hyphens_ok = !slug.starts_with('-') && !slug.ends_with('-') && !slug.contains("--");

    if !charset_ok || !hyphens_ok {
        return Err(ValidationError::InvalidFormat {
            field: "slug".to_string(),
            reason: "must be lowercase letters, digits and single hyphens".to_string(),
        });
    }

    Ok(())
}

/// Validates a product's size list and returns the trimmed labels.
///
/// ## Rules
/// - At least one size
/// - No blank labels
/// - No repeated labels
pub fn validate_sizes(sizes: &[String]) -> ValidationResult<Vec<String>> {
    if sizes.is_empty() {
        return Err(ValidationError::Required {
            field: "size".to_string(),
        });
    }

    let mut cleaned: Vec<String> = Vec::with_capacity(sizes.len());
    for label in sizes {
        let label = label.trim();
        if label.is_empty() {
            return Err(ValidationError::InvalidFormat {
                field: "size".to_string(),
                reason: "size labels cannot be blank".to_string(),
            });
        }
        if cleaned.iter().any(|s| s == label) {
            return Err(ValidationError::Duplicate {
                field: "size".to_string(),
                value: label.to_string(),
            });
        }
        cleaned.push(label.to_string());
    }

    Ok(cleaned)
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity value.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_LINE_QUANTITY (999)
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Cart: Add Item                                                         │
/// │                                                                         │
/// │  maison cart add silk-blend-scarf --size "One Size" --quantity 5        │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_quantity(5) ← THIS FUNCTION                                  │
/// │       │                                                                 │
/// │       ├── qty <= 0? → Error: "quantity must be positive"               │
/// │       │                                                                 │
/// │       ├── qty > 999? → Error: "quantity must be between 1 and 999"     │
/// │       │                                                                 │
/// │       └── OK → merge into cart                                         │
/// │                                                                         │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_LINE_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_LINE_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a price in cents.
///
/// ## Example
/// ```rust
/// use maison_core::validation::validate_price_cents;
///
/// assert!(validate_price_cents(1099).is_ok());
/// assert!(validate_price_cents(0).is_ok());
/// assert!(validate_price_cents(-100).is_err());
/// ```
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates that an original (pre-discount) price exceeds the selling price.
pub fn validate_original_price(original: Money, price: Money) -> ValidationResult<()> {
    if original <= price {
        return Err(ValidationError::InvalidFormat {
            field: "originalPrice".to_string(),
            reason: format!("must be greater than price ({})", price),
        });
    }

    Ok(())
}

/// Converts a decimal currency amount to cents, rounding half away from zero.
///
/// This is the one place floating point meets money: catalog documents
/// carry decimal prices, everything downstream is integer cents.
///
/// ## Example
/// ```rust
/// use maison_core::validation::cents_from_units;
///
/// assert_eq!(cents_from_units("price", 1299.0).unwrap(), 129_900);
/// assert_eq!(cents_from_units("price", 0.125).unwrap(), 13);
/// assert!(cents_from_units("price", f64::NAN).is_err());
/// ```
pub fn cents_from_units(field: &str, units: f64) -> ValidationResult<i64> {
    // i64::MAX / 100 is ~9.2e16; anything near that is not a price
    const LIMIT: f64 = 1e15;

    if !units.is_finite() || units.abs() > LIMIT {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must be a finite amount".to_string(),
        });
    }

    Ok((units * 100.0).round() as i64)
}

/// Validates an average product rating (0.0 to 5.0).
pub fn validate_rating(rating: f32) -> ValidationResult<()> {
    if !rating.is_finite() || !(0.0..=5.0).contains(&rating) {
        return Err(ValidationError::OutOfRange {
            field: "rating".to_string(),
            min: 0,
            max: 5,
        });
    }

    Ok(())
}

/// Validates a single review's star rating (1 to 5).
pub fn validate_review_rating(stars: i64) -> ValidationResult<u8> {
    if !(1..=5).contains(&stars) {
        return Err(ValidationError::OutOfRange {
            field: "review rating".to_string(),
            min: 1,
            max: 5,
        });
    }

    Ok(stars as u8)
}

/// Validates a tax rate in basis points.
///
/// ## Rules
/// - Must be between 0 and 10000 (0% to 100%)
pub fn validate_tax_rate_bps(bps: u32) -> ValidationResult<()> {
    if bps > 10000 {
        return Err(ValidationError::OutOfRange {
            field: "tax_rate".to_string(),
            min: 0,
            max: 10000,
        });
    }

    Ok(())
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Validates that one more line fits in the cart.
///
/// ## Rules
/// - Must not exceed MAX_CART_LINES (100)
pub fn validate_cart_size(current_lines: usize) -> ValidationResult<()> {
    if current_lines >= MAX_CART_LINES {
        return Err(ValidationError::OutOfRange {
            field: "cart lines".to_string(),
            min: 0,
            max: MAX_CART_LINES as i64,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_required() {
        assert!(validate_required("name", "Leather Wallet", 200).is_ok());
        assert!(validate_required("name", "", 200).is_err());
        assert!(validate_required("name", "   ", 200).is_err());
        assert!(validate_required("name", &"A".repeat(201), 200).is_err());
    }

    #[test]
    fn test_validate_slug() {
        assert!(validate_slug("premium-leather-jacket").is_ok());
        assert!(validate_slug("item2").is_ok());

        assert!(validate_slug("").is_err());
        assert!(validate_slug("Leather").is_err());
        assert!(validate_slug("has space").is_err());
        assert!(validate_slug("double--hyphen").is_err());
        assert!(validate_slug("trailing-").is_err());
        assert!(validate_slug(&"a".repeat(101)).is_err());
    }

    #[test]
    fn test_validate_sizes() {
        let sizes = vec![" S ".to_string(), "M".to_string()];
        assert_eq!(validate_sizes(&sizes).unwrap(), vec!["S", "M"]);

        assert!(validate_sizes(&[]).is_err());
        assert!(validate_sizes(&["".to_string()]).is_err());
        assert!(matches!(
            validate_sizes(&["M".to_string(), "M".to_string()]),
            Err(ValidationError::Duplicate { .. })
        ));
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(999).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(1000).is_err());
    }

    #[test]
    fn test_validate_original_price() {
        let price = Money::from_units(1299);
        assert!(validate_original_price(Money::from_units(1599), price).is_ok());
        assert!(validate_original_price(price, price).is_err());
        assert!(validate_original_price(Money::from_units(999), price).is_err());
    }

    #[test]
    fn test_cents_from_units() {
        assert_eq!(cents_from_units("price", 89.0).unwrap(), 8900);
        assert_eq!(cents_from_units("price", 10.99).unwrap(), 1099);
        assert_eq!(cents_from_units("price", -0.125).unwrap(), -13);
        assert!(cents_from_units("price", f64::INFINITY).is_err());
        assert!(cents_from_units("price", 1e20).is_err());
    }

    #[test]
    fn test_validate_ratings() {
        assert!(validate_rating(0.0).is_ok());
        assert!(validate_rating(4.8).is_ok());
        assert!(validate_rating(5.0).is_ok());
        assert!(validate_rating(5.1).is_err());
        assert!(validate_rating(f32::NAN).is_err());

        assert_eq!(validate_review_rating(5).unwrap(), 5);
        assert!(validate_review_rating(0).is_err());
        assert!(validate_review_rating(6).is_err());
    }

    #[test]
    fn test_validate_tax_rate_bps() {
        assert!(validate_tax_rate_bps(0).is_ok());
        assert!(validate_tax_rate_bps(800).is_ok());
        assert!(validate_tax_rate_bps(10000).is_ok());
        assert!(validate_tax_rate_bps(10001).is_err());
    }

    #[test]
    fn test_validate_cart_size() {
        assert!(validate_cart_size(0).is_ok());
        assert!(validate_cart_size(99).is_ok());
        assert!(validate_cart_size(100).is_err());
    }
}
