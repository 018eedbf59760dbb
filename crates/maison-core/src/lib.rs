//! # maison-core: Pure Business Logic for the Maison Storefront
//!
//! This crate holds the storefront's two engines, the catalog query engine
//! and the cart pricing engine, as pure functions with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Maison Storefront Architecture                     │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 maison CLI (presentation layer)                 │   │
//! │  │    shop ──► product ──► cart ──► wishlist                       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ maison-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  catalog  │  │  pricing  │  │   │
//! │  │   │  Product  │  │   Money   │  │   query   │  │   price   │  │   │
//! │  │   │ CartLine  │  │  TaxRate  │  │ FilterSpec│  │ Breakdown │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO LOGGING • PURE FUNCTIONS             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 maison-store (persistence boundary)             │   │
//! │  │         key-value port, cart/wishlist repos, catalog load       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, CartLineItem, Category, etc.)
//! - [`money`] - Money type with integer arithmetic
//! - [`catalog`] - Catalog query engine (filter + sort)
//! - [`pricing`] - Cart pricing engine (subtotal, shipping, tax)
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Example Usage
//!
//! ```rust
//! use maison_core::money::Money;
//! use maison_core::types::TaxRate;
//!
//! let subtotal = Money::from_units(170);
//! let tax = subtotal.apply_rate(TaxRate::from_bps(800));
//! assert_eq!(tax.cents(), 1360);
//! assert_eq!((subtotal + tax).cents(), 18_360);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::{query, Catalog, FilterSpec, PriceRange};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use pricing::{price, PriceBreakdown, PricingConfig};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum distinct lines allowed in a single cart.
pub const MAX_CART_LINES: usize = 100;

/// Maximum quantity of a single cart line.
///
/// Catches typos such as 1000 instead of 10.
pub const MAX_LINE_QUANTITY: i64 = 999;
