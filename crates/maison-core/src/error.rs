//! # Error Types
//!
//! Domain-specific error types for maison-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  maison-core errors (this file)                                        │
//! │  ├── CoreError        - Cart and pricing rule violations               │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  maison-store errors (separate crate)                                  │
//! │  └── StoreError       - Persisted state and catalog loading failures   │
//! │                                                                         │
//! │  CLI errors (in app)                                                   │
//! │  └── AppError         - What the user sees                             │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → StoreError → AppError → Terminal  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Note
//! The catalog query engine has no error type at all: it is total over
//! every `FilterSpec`. Only cart pricing and cart mutation can fail, and
//! only on contract violations.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product cannot be found in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Cart line cannot be found.
    #[error("Cart line not found: {0}")]
    LineNotFound(String),

    /// A cart line carries a quantity below one.
    ///
    /// ## When This Occurs
    /// - Hand-edited or stale persisted cart handed straight to `price`
    /// - A caller built a `CartLineItem` without going through the cart view
    ///
    /// The pricing engine has no authority to fix cart state, so it refuses.
    #[error("Cart line {line_id} has invalid quantity {quantity}")]
    InvalidQuantity { line_id: String, quantity: i64 },

    /// Item quantity exceeds maximum allowed.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: i64, max: i64 },

    /// Cart has exceeded maximum allowed lines.
    #[error("Cart cannot have more than {max} lines")]
    CartTooLarge { max: usize },

    /// The requested size is not offered for the product.
    ///
    /// ## User Workflow
    /// ```text
    /// Product page: "Designer Sneakers"  sizes [7, 8, 9, 10, 11]
    ///      │
    ///      ▼
    /// Add to cart (size: "12")
    ///      │
    ///      ▼
    /// SizeUnavailable { product: "designer-sneakers", size: "12" }
    /// ```
    #[error("Size '{size}' is not available for {product}")]
    SizeUnavailable { product: String, size: String },

    /// A line total or cart sum does not fit in i64 cents.
    #[error("Cart amount overflows at line {line_id}")]
    AmountOverflow { line_id: String },

    /// Pricing configuration is not usable.
    #[error("Invalid pricing configuration: {0}")]
    InvalidPricingConfig(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised by the catalog-loading step and by cart mutations before any
/// business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., bad slug, bad date).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },

    /// Duplicate value (e.g., two products sharing a slug).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;
