//! # Catalog Query Engine
//!
//! Filters and orders the catalog for the shop view.
//!
//! ## Query Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        query(catalog, spec)                             │
//! │                                                                         │
//! │  &[Product] ──► text ──► category ──► brand ──► price ──► stock         │
//! │   (catalog       match     set         set       [min,max]  flag        │
//! │    order)                                                               │
//! │                                  │                                      │
//! │                                  ▼                                      │
//! │                     stable sort by spec.sort_by                         │
//! │                     (ties keep catalog order)                           │
//! │                                  │                                      │
//! │                                  ▼                                      │
//! │                           Vec<&Product>                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The engine is total: every `FilterSpec` produces a result, possibly
//! empty. An inverted price range (`min > max`) matches nothing.
//!
//! ## Usage
//! ```rust
//! use maison_core::catalog::{query, FilterSpec};
//! use maison_core::types::SortBy;
//!
//! let spec = FilterSpec {
//!     search_query: "leather".to_string(),
//!     sort_by: SortBy::PriceAsc,
//!     ..FilterSpec::default()
//! };
//! assert!(query(&[], &spec).is_empty());
//! ```

use std::cmp::Ordering;
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{BrandInfo, Category, CategoryInfo, Product, SortBy};

// =============================================================================
// Price Range
// =============================================================================

/// Closed price interval `[min, max]`, both ends inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PriceRange {
    pub min: Money,
    pub max: Money,
}

impl PriceRange {
    pub const fn new(min: Money, max: Money) -> Self {
        PriceRange { min, max }
    }

    /// A range that admits every non-negative price.
    pub const fn unbounded() -> Self {
        PriceRange {
            min: Money::zero(),
            max: Money::from_cents(i64::MAX),
        }
    }

    /// Checks if `min > max`, in which case nothing can match.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.min > self.max
    }

    #[inline]
    pub fn contains(&self, price: Money) -> bool {
        self.min <= price && price <= self.max
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        PriceRange::unbounded()
    }
}

// =============================================================================
// Filter Spec
// =============================================================================

/// Filter predicates plus a sort order.
///
/// `FilterSpec::default()` restricts nothing and sorts by popularity.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterSpec {
    /// Empty means any category.
    pub categories: BTreeSet<Category>,
    /// Empty means any brand. Exact, case-sensitive match.
    pub brands: BTreeSet<String>,
    pub price_range: PriceRange,
    pub in_stock_only: bool,
    /// Trimmed, then matched case-insensitively against name, description
    /// and brand.
    pub search_query: String,
    pub sort_by: SortBy,
}

impl FilterSpec {
    /// Checks whether a product passes every predicate.
    ///
    /// ## Example
    /// ```rust
    /// use maison_core::catalog::{FilterSpec, PriceRange};
    /// use maison_core::money::Money;
    ///
    /// let spec = FilterSpec {
    ///     price_range: PriceRange::new(Money::from_units(100), Money::from_units(50)),
    ///     ..FilterSpec::default()
    /// };
    /// assert!(spec.price_range.is_empty());
    /// ```
    pub fn matches(&self, product: &Product) -> bool {
        self.matches_with_needle(product, &normalize_query(&self.search_query))
    }

    fn matches_with_needle(&self, product: &Product, needle: &str) -> bool {
        matches_text(product, needle)
            && (self.categories.is_empty() || self.categories.contains(&product.category))
            && (self.brands.is_empty() || self.brands.contains(&product.brand))
            && self.price_range.contains(product.price)
            && (!self.in_stock_only || product.in_stock)
    }
}

fn normalize_query(raw: &str) -> String {
    raw.trim().to_lowercase()
}

fn matches_text(product: &Product, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    product.name.to_lowercase().contains(needle)
        || product.description.to_lowercase().contains(needle)
        || product.brand.to_lowercase().contains(needle)
}

// =============================================================================
// Query
// =============================================================================

/// Filters the catalog and orders the survivors.
///
/// Pure and deterministic: the same catalog and spec always produce the
/// same sequence. Ties under the chosen sort keep catalog order.
///
/// ## Example
/// ```rust
/// use std::collections::BTreeSet;
/// use maison_core::catalog::{query, FilterSpec, PriceRange};
/// use maison_core::money::Money;
/// use maison_core::types::Category;
///
/// let spec = FilterSpec {
///     categories: BTreeSet::from([Category::Jewelry]),
///     price_range: PriceRange::new(Money::zero(), Money::from_units(1000)),
///     ..FilterSpec::default()
/// };
/// let results = query(&[], &spec);
/// assert!(results.iter().all(|p| p.price <= Money::from_units(1000)));
/// ```
pub fn query<'a>(catalog: &'a [Product], spec: &FilterSpec) -> Vec<&'a Product> {
    if spec.price_range.is_empty() {
        return Vec::new();
    }

    let needle = normalize_query(&spec.search_query);
    let mut results: Vec<&Product> = catalog
        .iter()
        .filter(|p| spec.matches_with_needle(p, &needle))
        .collect();

    sort_products(&mut results, spec.sort_by);
    results
}

/// Stable sort; equal keys keep their relative (catalog) order.
fn sort_products(products: &mut [&Product], sort_by: SortBy) {
    match sort_by {
        SortBy::PriceAsc => products.sort_by(|a, b| a.price.cmp(&b.price)),
        SortBy::PriceDesc => products.sort_by(|a, b| b.price.cmp(&a.price)),
        SortBy::Rating => products.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
        SortBy::Newest => products.sort_by(|a, b| descending_present_first(a.created_at, b.created_at)),
        SortBy::Popular => {
            products.sort_by(|a, b| descending_present_first(a.popularity_score, b.popularity_score))
        }
    }
}

/// Larger values first; `None` after every `Some`.
fn descending_present_first<T: Ord>(a: Option<T>, b: Option<T>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// The full, static set of products plus the listing metadata used by
/// filter panels.
///
/// Built by the catalog loader after validation; never mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    categories: Vec<CategoryInfo>,
    brands: Vec<BrandInfo>,
}

impl Catalog {
    pub fn new(products: Vec<Product>, categories: Vec<CategoryInfo>, brands: Vec<BrandInfo>) -> Self {
        Catalog {
            products,
            categories,
            brands,
        }
    }

    /// All products in catalog order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Runs [`query`] over this catalog.
    pub fn query(&self, spec: &FilterSpec) -> Vec<&Product> {
        query(&self.products, spec)
    }

    pub fn find_by_slug(&self, slug: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.slug == slug)
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Featured products for the home page, in catalog order.
    pub fn featured(&self) -> Vec<&Product> {
        self.products.iter().filter(|p| p.featured).collect()
    }

    pub fn categories(&self) -> &[CategoryInfo] {
        &self.categories
    }

    pub fn brands(&self) -> &[BrandInfo] {
        &self.brands
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::tests::product;
    use chrono::{TimeZone, Utc};

    fn item(id: &str, name: &str, units: i64, category: Category, brand: &str, rating: f32) -> Product {
        let mut p = product(id, units);
        p.name = name.to_string();
        p.category = category;
        p.brand = brand.to_string();
        p.rating = rating;
        p
    }

    /// A slice of the storefront catalog, in its original order.
    fn fixture() -> Vec<Product> {
        vec![
            item("1", "Premium Leather Jacket", 1299, Category::Clothing, "Urban Luxe", 4.8),
            item("6", "Cashmere Turtleneck Sweater", 449, Category::Clothing, "Elite Style", 4.7),
            item("2", "Gold Chain Necklace", 899, Category::Jewelry, "Elite Style", 4.9),
            item("5", "Diamond Stud Earrings", 2199, Category::Jewelry, "Elite Style", 5.0),
            item("9", "Rose Gold Layered Necklace", 649, Category::Jewelry, "Urban Luxe", 4.8),
            item("3", "Designer Sneakers", 399, Category::Shoes, "Street Couture", 4.7),
            item("14", "Leather Gloves", 159, Category::Accessories, "Street Couture", 4.5),
        ]
    }

    fn ids(results: &[&Product]) -> Vec<String> {
        results.iter().map(|p| p.id.clone()).collect()
    }

    #[test]
    fn test_default_spec_returns_catalog_order() {
        let catalog = fixture();
        let results = query(&catalog, &FilterSpec::default());
        assert_eq!(ids(&results), vec!["1", "6", "2", "5", "9", "3", "14"]);
    }

    #[test]
    fn test_query_is_idempotent() {
        let catalog = fixture();
        let spec = FilterSpec {
            search_query: "gold".to_string(),
            sort_by: SortBy::PriceDesc,
            ..FilterSpec::default()
        };
        assert_eq!(ids(&query(&catalog, &spec)), ids(&query(&catalog, &spec)));
    }

    #[test]
    fn test_jewelry_under_1000_excludes_2199() {
        let catalog = fixture();
        let spec = FilterSpec {
            categories: BTreeSet::from([Category::Jewelry]),
            price_range: PriceRange::new(Money::zero(), Money::from_units(1000)),
            ..FilterSpec::default()
        };
        let results = query(&catalog, &spec);
        assert_eq!(ids(&results), vec!["2", "9"]);
        assert!(results.iter().all(|p| p.category == Category::Jewelry));
        assert!(results.iter().all(|p| p.price <= Money::from_units(1000)));
    }

    #[test]
    fn test_price_range_is_inclusive() {
        let catalog = fixture();
        let spec = FilterSpec {
            price_range: PriceRange::new(Money::from_units(449), Money::from_units(899)),
            ..FilterSpec::default()
        };
        assert_eq!(ids(&query(&catalog, &spec)), vec!["6", "2", "9"]);
    }

    #[test]
    fn test_inverted_price_range_matches_nothing() {
        let catalog = fixture();
        let spec = FilterSpec {
            price_range: PriceRange::new(Money::from_units(1000), Money::from_units(100)),
            ..FilterSpec::default()
        };
        assert!(query(&catalog, &spec).is_empty());
    }

    #[test]
    fn test_search_is_trimmed_and_case_insensitive() {
        let catalog = fixture();
        let spec = FilterSpec {
            search_query: "  LEATHER ".to_string(),
            ..FilterSpec::default()
        };
        assert_eq!(ids(&query(&catalog, &spec)), vec!["1", "14"]);
    }

    #[test]
    fn test_search_matches_brand() {
        let catalog = fixture();
        let spec = FilterSpec {
            search_query: "street couture".to_string(),
            ..FilterSpec::default()
        };
        assert_eq!(ids(&query(&catalog, &spec)), vec!["3", "14"]);
    }

    #[test]
    fn test_brand_filter_is_exact() {
        let catalog = fixture();
        let spec = FilterSpec {
            brands: BTreeSet::from(["Urban Luxe".to_string()]),
            ..FilterSpec::default()
        };
        assert_eq!(ids(&query(&catalog, &spec)), vec!["1", "9"]);

        let spec = FilterSpec {
            brands: BTreeSet::from(["urban luxe".to_string()]),
            ..FilterSpec::default()
        };
        assert!(query(&catalog, &spec).is_empty());
    }

    #[test]
    fn test_in_stock_only() {
        let mut catalog = fixture();
        catalog[0].in_stock = false;
        let spec = FilterSpec {
            in_stock_only: true,
            ..FilterSpec::default()
        };
        let results = query(&catalog, &spec);
        assert_eq!(results.len(), catalog.len() - 1);
        assert!(results.iter().all(|p| p.in_stock));
    }

    #[test]
    fn test_results_satisfy_every_predicate() {
        let catalog = fixture();
        let spec = FilterSpec {
            categories: BTreeSet::from([Category::Clothing, Category::Jewelry]),
            brands: BTreeSet::from(["Elite Style".to_string()]),
            price_range: PriceRange::new(Money::from_units(400), Money::from_units(2500)),
            search_query: "e".to_string(),
            ..FilterSpec::default()
        };
        let results = query(&catalog, &spec);
        assert_eq!(ids(&results), vec!["6", "2", "5"]);
        assert!(results.iter().all(|p| spec.matches(p)));
    }

    #[test]
    fn test_sort_by_price() {
        let catalog = fixture();
        let asc = FilterSpec {
            sort_by: SortBy::PriceAsc,
            ..FilterSpec::default()
        };
        let desc = FilterSpec {
            sort_by: SortBy::PriceDesc,
            ..FilterSpec::default()
        };
        let asc_ids = ids(&query(&catalog, &asc));
        assert_eq!(asc_ids, vec!["14", "3", "6", "9", "2", "1", "5"]);

        // No price ties in the fixture: descending is the exact reverse
        let mut reversed = asc_ids.clone();
        reversed.reverse();
        assert_eq!(ids(&query(&catalog, &desc)), reversed);
    }

    #[test]
    fn test_sort_by_rating_keeps_catalog_order_on_ties() {
        let catalog = fixture();
        let spec = FilterSpec {
            sort_by: SortBy::Rating,
            ..FilterSpec::default()
        };
        // 4.8 tie: "1" before "9"; 4.7 tie: "6" before "3"
        assert_eq!(ids(&query(&catalog, &spec)), vec!["5", "2", "1", "9", "6", "3", "14"]);
    }

    #[test]
    fn test_sort_newest_puts_undated_last() {
        let mut catalog = fixture();
        catalog[2].created_at = Some(Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap());
        catalog[5].created_at = Some(Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap());
        let spec = FilterSpec {
            sort_by: SortBy::Newest,
            ..FilterSpec::default()
        };
        assert_eq!(ids(&query(&catalog, &spec)), vec!["3", "2", "1", "6", "5", "9", "14"]);
    }

    #[test]
    fn test_sort_popular_without_scores_is_catalog_order() {
        let catalog = fixture();
        let spec = FilterSpec {
            sort_by: SortBy::Popular,
            ..FilterSpec::default()
        };
        assert_eq!(ids(&query(&catalog, &spec)), ids(&query(&catalog, &FilterSpec::default())));
    }

    #[test]
    fn test_sort_popular_by_score() {
        let mut catalog = fixture();
        catalog[6].popularity_score = Some(90);
        catalog[3].popularity_score = Some(40);
        catalog[0].popularity_score = Some(90);
        let spec = FilterSpec {
            sort_by: SortBy::Popular,
            ..FilterSpec::default()
        };
        assert_eq!(ids(&query(&catalog, &spec)), vec!["1", "14", "5", "6", "2", "9", "3"]);
    }

    #[test]
    fn test_empty_catalog() {
        assert!(query(&[], &FilterSpec::default()).is_empty());
    }

    #[test]
    fn test_filter_spec_wire_format() {
        let spec: FilterSpec = serde_json::from_str(r#"{"searchQuery":"silk","sortBy":"price-asc"}"#).unwrap();
        assert_eq!(spec.search_query, "silk");
        assert_eq!(spec.sort_by, SortBy::PriceAsc);
        assert!(spec.categories.is_empty());
        assert_eq!(spec.price_range, PriceRange::unbounded());
    }

    #[test]
    fn test_catalog_lookups() {
        let mut products = fixture();
        products[0].featured = true;
        products[3].featured = true;
        let catalog = Catalog::new(products, Vec::new(), Vec::new());

        assert_eq!(catalog.len(), 7);
        assert!(!catalog.is_empty());
        assert_eq!(catalog.find_by_slug("product-5").map(|p| p.id.as_str()), Some("5"));
        assert!(catalog.find_by_slug("missing").is_none());
        assert_eq!(catalog.find_by_id("9").map(|p| p.slug.as_str()), Some("product-9"));
        assert_eq!(ids(&catalog.featured()), vec!["1", "5"]);
        assert_eq!(catalog.query(&FilterSpec::default()).len(), 7);
    }
}
