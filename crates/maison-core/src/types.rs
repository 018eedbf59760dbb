//! # Domain Types
//!
//! Core domain types used throughout the Maison storefront.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │  CartLineItem   │   │     Review      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id, slug       │   │  id (per line)  │   │  rating 1..=5   │       │
//! │  │  price (Money)  │   │  product (snap) │   │  date (ISO)     │       │
//! │  │  category       │   │  quantity >= 1  │   │  verified       │       │
//! │  │  sizes, rating  │   │  size, color    │   │                 │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Category     │   │     SortBy      │   │    TaxRate      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  Clothing       │   │  price-asc      │   │  bps (u32)      │       │
//! │  │  Jewelry  ...   │   │  rating  ...    │   │  800 = 8%       │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format
//! Products and cart lines serialize in camelCase, the same shape the
//! rendering layer and the persisted `"cart"` key use.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 800 bps = 8% (the storefront default)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a percentage (for configuration input).
    pub fn from_percentage(pct: f64) -> Self {
        TaxRate((pct * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }

    /// Checks if tax rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

// =============================================================================
// Category
// =============================================================================

/// The fixed set of catalog categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Category {
    Clothing,
    Jewelry,
    Accessories,
    Shoes,
    Bags,
    Watches,
}

impl Category {
    /// Every category, in storefront display order.
    pub const ALL: [Category; 6] = [
        Category::Clothing,
        Category::Jewelry,
        Category::Accessories,
        Category::Shoes,
        Category::Bags,
        Category::Watches,
    ];

    /// Returns the display name (also the wire name).
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Clothing => "Clothing",
            Category::Jewelry => "Jewelry",
            Category::Accessories => "Accessories",
            Category::Shoes => "Shoes",
            Category::Bags => "Bags",
            Category::Watches => "Watches",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    /// Parses a category name, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "category".to_string(),
                allowed: Category::ALL.iter().map(|c| c.as_str().to_string()).collect(),
            })
    }
}

// =============================================================================
// Listing Metadata
// =============================================================================

/// Category listing entry shown in navigation and filter panels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CategoryInfo {
    pub id: String,
    pub name: Category,
    pub image: String,
    pub slug: String,
}

/// Brand listing entry shown in filter panels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BrandInfo {
    pub id: String,
    pub name: String,
    pub image: String,
    pub description: String,
    pub slug: String,
}

// =============================================================================
// Review
// =============================================================================

/// A customer review. Owned by exactly one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    /// Star rating, 1 to 5.
    pub rating: u8,
    pub comment: String,
    #[ts(as = "String")]
    pub date: NaiveDate,
    pub verified: bool,
}

// =============================================================================
// Product
// =============================================================================

/// A product in the catalog. Immutable for the lifetime of a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier.
    pub id: String,

    /// Display name.
    pub name: String,

    pub description: String,

    /// Current selling price.
    pub price: Money,

    /// Pre-discount price. Always greater than `price` when present.
    pub original_price: Option<Money>,

    /// Image URIs in display order. May be empty.
    pub images: Vec<String>,

    pub category: Category,

    pub brand: String,

    pub material: String,

    pub color: String,

    /// Size labels on offer. Never empty.
    #[serde(rename = "size")]
    pub sizes: Vec<String>,

    pub in_stock: bool,

    /// Shown on the home page.
    pub featured: bool,

    /// Average rating, 0.0 to 5.0.
    pub rating: f32,

    pub reviews: Vec<Review>,

    pub tags: Vec<String>,

    /// Unique, URL-safe identifier used by the product detail view.
    pub slug: String,

    /// When the product entered the catalog. Drives the "newest" sort.
    #[ts(as = "Option<String>")]
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    /// Relative popularity. Drives the "popular" sort.
    #[serde(default)]
    pub popularity_score: Option<u32>,
}

impl Product {
    /// Checks if the product is marked down from an original price.
    pub fn is_discounted(&self) -> bool {
        matches!(self.original_price, Some(original) if original > self.price)
    }

    /// Returns the markdown as a whole percentage of the original price.
    ///
    /// ## Example
    /// ```text
    /// original 1599.00, price 1299.00 → (300 / 1599) × 100 = 18.76 → 19
    /// ```
    pub fn discount_percent(&self) -> Option<u32> {
        let original = self.original_price?;
        if !original.is_positive() || original <= self.price {
            return None;
        }
        let saved = (original - self.price).cents() as i128;
        // Round half-up on the integer ratio
        let pct = (saved * 200 + original.cents() as i128) / (original.cents() as i128 * 2);
        Some(pct as u32)
    }

    /// Checks if the product is offered in the given size label.
    pub fn has_size(&self, size: &str) -> bool {
        self.sizes.iter().any(|s| s == size)
    }

    /// Returns the size preselected when no choice is made (e.g. adding
    /// straight from the wishlist).
    pub fn default_size(&self) -> Option<&str> {
        self.sizes.first().map(String::as_str)
    }
}

// =============================================================================
// Sort Order
// =============================================================================

/// Sort order applied to a catalog query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum SortBy {
    /// Price, low to high.
    PriceAsc,
    /// Price, high to low.
    PriceDesc,
    /// Rating, high to low.
    Rating,
    /// Most recently added first.
    Newest,
    /// Highest popularity score first.
    #[default]
    Popular,
}

impl SortBy {
    /// Returns the wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::PriceAsc => "price-asc",
            SortBy::PriceDesc => "price-desc",
            SortBy::Rating => "rating",
            SortBy::Newest => "newest",
            SortBy::Popular => "popular",
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortBy {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "price-asc" | "price_asc" => Ok(SortBy::PriceAsc),
            "price-desc" | "price_desc" => Ok(SortBy::PriceDesc),
            "rating" => Ok(SortBy::Rating),
            "newest" => Ok(SortBy::Newest),
            "popular" | "popularity" => Ok(SortBy::Popular),
            _ => Err(ValidationError::NotAllowed {
                field: "sort".to_string(),
                allowed: vec![
                    "price-asc".to_string(),
                    "price-desc".to_string(),
                    "rating".to_string(),
                    "newest".to_string(),
                    "popular".to_string(),
                ],
            }),
        }
    }
}

// =============================================================================
// Cart Line Item
// =============================================================================

/// One row in the cart.
/// Uses snapshot pattern to freeze product data at the time it was added.
///
/// ## Identity
/// A line is distinguished by product + size + color. The same product in
/// two sizes occupies two lines, each with its own `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    /// Unique per line, not per product.
    pub id: String,
    pub product_id: String,
    /// Product data at the time of adding (frozen).
    pub product: Product,
    /// Always >= 1 while the line exists.
    pub quantity: i64,
    pub size: String,
    pub color: String,
}

impl CartLineItem {
    /// Creates a line for a product in the given size, using the product's
    /// color.
    pub fn new(id: impl Into<String>, product: &Product, size: impl Into<String>, quantity: i64) -> Self {
        CartLineItem {
            id: id.into(),
            product_id: product.id.clone(),
            product: product.clone(),
            quantity,
            size: size.into(),
            color: product.color.clone(),
        }
    }

    /// Returns the frozen unit price.
    #[inline]
    pub fn unit_price(&self) -> Money {
        self.product.price
    }

    /// Returns unit price × quantity.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.product.price.multiply_quantity(self.quantity)
    }

    /// Checks if this line holds the given product/size/color combination.
    pub fn is_variant(&self, product_id: &str, size: &str, color: &str) -> bool {
        self.product_id == product_id && self.size == size && self.color == color
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
