//! # Catalog Loading
//!
//! Turns a catalog document into a validated [`Catalog`].
//!
//! ## Load Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  catalog.json (camelCase, decimal prices)                               │
//! │       │                                                                 │
//! │       ▼  serde_json                                                     │
//! │  CatalogDocument { categories, brands, products: Vec<ProductRecord> }   │
//! │       │                                                                 │
//! │       ▼  per record: strings, prices → cents, sizes, ratings,           │
//! │          review dates, slug format, category name                      │
//! │       │                                                                 │
//! │       ▼  whole catalog: unique ids, unique slugs                        │
//! │  Catalog (immutable for the session)                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The first failing record aborts the load with
//! [`StoreError::InvalidCatalog`] naming the product.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use tracing::{debug, info};

use maison_core::validation::{
    cents_from_units, validate_original_price, validate_price_cents, validate_rating, validate_required,
    validate_review_rating, validate_sizes, validate_slug, ValidationResult,
};
use maison_core::{BrandInfo, Catalog, Category, CategoryInfo, Money, Product, Review, ValidationError};

use crate::error::{StoreError, StoreResult};

/// The catalog shipped with the binary.
pub const SAMPLE_CATALOG: &str = include_str!("../data/catalog.json");

const MAX_NAME_LEN: usize = 200;
const MAX_TEXT_LEN: usize = 2000;

// =============================================================================
// Document Shape
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogDocument {
    #[serde(default)]
    categories: Vec<CategoryInfo>,
    #[serde(default)]
    brands: Vec<BrandInfo>,
    products: Vec<ProductRecord>,
}

/// A product as written in the document, before validation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProductRecord {
    id: String,
    name: String,
    description: String,
    price: f64,
    original_price: Option<f64>,
    #[serde(default)]
    images: Vec<String>,
    category: String,
    brand: String,
    material: String,
    color: String,
    size: Vec<String>,
    in_stock: bool,
    #[serde(default)]
    featured: bool,
    rating: f32,
    #[serde(default)]
    reviews: Vec<ReviewRecord>,
    #[serde(default)]
    tags: Vec<String>,
    slug: String,
    created_at: Option<DateTime<Utc>>,
    popularity_score: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReviewRecord {
    id: String,
    user_id: String,
    user_name: String,
    rating: i64,
    comment: String,
    date: String,
    verified: bool,
}

// =============================================================================
// Record Validation
// =============================================================================

impl ProductRecord {
    /// Name used in error messages: the slug when present, else the id.
    fn label(&self) -> String {
        if self.slug.trim().is_empty() {
            format!("#{}", self.id)
        } else {
            self.slug.clone()
        }
    }

    fn into_product(self) -> ValidationResult<Product> {
        validate_required("id", &self.id, 64)?;
        validate_required("name", &self.name, MAX_NAME_LEN)?;
        validate_required("description", &self.description, MAX_TEXT_LEN)?;
        validate_required("brand", &self.brand, MAX_NAME_LEN)?;
        validate_required("material", &self.material, MAX_NAME_LEN)?;
        validate_required("color", &self.color, MAX_NAME_LEN)?;
        validate_slug(&self.slug)?;

        let price = Money::from_cents(cents_from_units("price", self.price)?);
        validate_price_cents(price.cents())?;

        let original_price = match self.original_price {
            Some(units) => {
                let original = Money::from_cents(cents_from_units("originalPrice", units)?);
                validate_original_price(original, price)?;
                Some(original)
            }
            None => None,
        };

        let category: Category = self.category.parse()?;
        let sizes = validate_sizes(&self.size)?;
        validate_rating(self.rating)?;

        let reviews = self
            .reviews
            .into_iter()
            .map(ReviewRecord::into_review)
            .collect::<ValidationResult<Vec<Review>>>()?;

        Ok(Product {
            id: self.id,
            name: self.name,
            description: self.description,
            price,
            original_price,
            images: self.images,
            category,
            brand: self.brand,
            material: self.material,
            color: self.color,
            sizes,
            in_stock: self.in_stock,
            featured: self.featured,
            rating: self.rating,
            reviews,
            tags: self.tags,
            slug: self.slug,
            created_at: self.created_at,
            popularity_score: self.popularity_score,
        })
    }
}

impl ReviewRecord {
    fn into_review(self) -> ValidationResult<Review> {
        validate_required("review id", &self.id, 64)?;
        validate_required("review userName", &self.user_name, MAX_NAME_LEN)?;
        let rating = validate_review_rating(self.rating)?;
        let date = NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").map_err(|_| {
            ValidationError::InvalidFormat {
                field: "review date".to_string(),
                reason: format!("'{}' is not an ISO date (YYYY-MM-DD)", self.date),
            }
        })?;

        Ok(Review {
            id: self.id,
            user_id: self.user_id,
            user_name: self.user_name,
            rating,
            comment: self.comment,
            date,
            verified: self.verified,
        })
    }
}

// =============================================================================
// Loading
// =============================================================================

/// Parses and validates a catalog document.
///
/// ## Example
/// ```rust
/// use maison_store::catalog::load_catalog;
///
/// let catalog = load_catalog(r#"{ "products": [] }"#).unwrap();
/// assert!(catalog.is_empty());
/// ```
pub fn load_catalog(json: &str) -> StoreResult<Catalog> {
    let document: CatalogDocument = serde_json::from_str(json)?;

    let mut seen_ids: HashSet<String> = HashSet::new();
    let mut seen_slugs: HashSet<String> = HashSet::new();
    let mut products = Vec::with_capacity(document.products.len());

    for record in document.products {
        let label = record.label();
        let product = record
            .into_product()
            .map_err(|e| StoreError::invalid_catalog(label.clone(), e))?;

        if !seen_ids.insert(product.id.clone()) {
            return Err(StoreError::invalid_catalog(
                label,
                ValidationError::Duplicate {
                    field: "id".to_string(),
                    value: product.id,
                },
            ));
        }
        if !seen_slugs.insert(product.slug.clone()) {
            return Err(StoreError::invalid_catalog(
                label,
                ValidationError::Duplicate {
                    field: "slug".to_string(),
                    value: product.slug,
                },
            ));
        }

        debug!(slug = %product.slug, price = %product.price, "Validated product");
        products.push(product);
    }

    info!(
        products = products.len(),
        categories = document.categories.len(),
        brands = document.brands.len(),
        "Catalog loaded"
    );

    Ok(Catalog::new(products, document.categories, document.brands))
}

/// Reads and validates a catalog document from disk.
pub fn load_catalog_file(path: &Path) -> StoreResult<Catalog> {
    info!(path = %path.display(), "Reading catalog");
    let json = fs::read_to_string(path)?;
    load_catalog(&json)
}

/// Loads the catalog compiled into the binary.
pub fn sample_catalog() -> StoreResult<Catalog> {
    load_catalog(SAMPLE_CATALOG)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use maison_core::{FilterSpec, PriceRange, SortBy};
    use std::collections::BTreeSet;

    fn one_product(overrides: &str) -> String {
        let mut product: serde_json::Value = serde_json::json!({
            "id": "1",
            "name": "Premium Leather Jacket",
            "description": "Crafted from the finest Italian leather",
            "price": 1299,
            "originalPrice": 1599,
            "images": [],
            "category": "Clothing",
            "brand": "Urban Luxe",
            "material": "Leather",
            "color": "Black",
            "size": ["S", "M"],
            "inStock": true,
            "featured": true,
            "rating": 4.8,
            "reviews": [],
            "tags": [],
            "slug": "premium-leather-jacket"
        });
        let patch: serde_json::Value = serde_json::from_str(overrides).unwrap();
        for (k, v) in patch.as_object().unwrap() {
            product[k] = v.clone();
        }
        serde_json::json!({ "products": [product] }).to_string()
    }

    fn rejection(overrides: &str) -> ValidationError {
        match load_catalog(&one_product(overrides)) {
            Err(StoreError::InvalidCatalog { source, .. }) => source,
            other => panic!("expected InvalidCatalog, got {:?}", other.map(|c| c.len())),
        }
    }

    #[test]
    fn test_sample_catalog_loads() {
        let catalog = sample_catalog().unwrap();
        assert_eq!(catalog.len(), 20);
        assert_eq!(catalog.categories().len(), 6);
        assert_eq!(catalog.brands().len(), 3);
        assert_eq!(catalog.featured().len(), 9);
    }

    #[test]
    fn test_sample_prices_are_cents() {
        let catalog = sample_catalog().unwrap();
        let jacket = catalog.find_by_slug("premium-leather-jacket").unwrap();
        assert_eq!(jacket.price, Money::from_cents(129_900));
        assert_eq!(jacket.original_price, Some(Money::from_cents(159_900)));
        assert_eq!(jacket.discount_percent(), Some(19));
        assert_eq!(jacket.reviews.len(), 1);
        assert_eq!(jacket.reviews[0].date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
    }

    #[test]
    fn test_sample_sizes_are_trimmed() {
        let catalog = sample_catalog().unwrap();
        let scarf = catalog.find_by_slug("silk-scarf").unwrap();
        assert_eq!(scarf.sizes, vec!["One Size"]);
    }

    #[test]
    fn test_sample_jewelry_under_1000() {
        let catalog = sample_catalog().unwrap();
        let spec = FilterSpec {
            categories: BTreeSet::from([Category::Jewelry]),
            price_range: PriceRange::new(Money::zero(), Money::from_units(1000)),
            ..FilterSpec::default()
        };
        let slugs: Vec<&str> = catalog.query(&spec).iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(
            slugs,
            vec!["gold-chain-necklace", "rose-gold-layered-necklace", "minimalist-bracelet-set"]
        );
        assert!(!slugs.contains(&"diamond-earrings"));
    }

    #[test]
    fn test_sample_sorts_use_loaded_keys() {
        let catalog = sample_catalog().unwrap();
        let popular = catalog.query(&FilterSpec::default());
        assert_eq!(popular[0].slug, "premium-leather-jacket");

        let newest = catalog.query(&FilterSpec {
            sort_by: SortBy::Newest,
            ..FilterSpec::default()
        });
        assert_eq!(newest[0].slug, "structured-leather-tote");
    }

    #[test]
    fn test_valid_record_loads() {
        let catalog = load_catalog(&one_product("{}")).unwrap();
        let product = &catalog.products()[0];
        assert_eq!(product.category, Category::Clothing);
        assert_eq!(product.created_at, None);
        assert_eq!(product.popularity_score, None);
    }

    #[test]
    fn test_rejects_original_price_not_above_price() {
        let err = rejection(r#"{ "originalPrice": 1299 }"#);
        assert!(matches!(err, ValidationError::InvalidFormat { ref field, .. } if field == "originalPrice"));
    }

    #[test]
    fn test_rejects_negative_price() {
        assert!(matches!(rejection(r#"{ "price": -1 }"#), ValidationError::OutOfRange { .. }));
    }

    #[test]
    fn test_rejects_empty_sizes() {
        assert!(matches!(rejection(r#"{ "size": [] }"#), ValidationError::Required { .. }));
    }

    #[test]
    fn test_rejects_unknown_category() {
        assert!(matches!(rejection(r#"{ "category": "Furniture" }"#), ValidationError::NotAllowed { .. }));
    }

    #[test]
    fn test_rejects_bad_slug() {
        assert!(matches!(rejection(r#"{ "slug": "Leather Jacket" }"#), ValidationError::InvalidFormat { .. }));
    }

    #[test]
    fn test_rejects_rating_out_of_range() {
        assert!(matches!(rejection(r#"{ "rating": 7.5 }"#), ValidationError::OutOfRange { .. }));
    }

    #[test]
    fn test_rejects_bad_review() {
        let review = r#"{ "reviews": [{ "id": "r1", "userId": "u1", "userName": "Alex Chen",
            "rating": 6, "comment": "!", "date": "2024-01-15", "verified": true }] }"#;
        assert!(matches!(rejection(review), ValidationError::OutOfRange { .. }));

        let review = r#"{ "reviews": [{ "id": "r1", "userId": "u1", "userName": "Alex Chen",
            "rating": 5, "comment": "!", "date": "15/01/2024", "verified": true }] }"#;
        assert!(matches!(rejection(review), ValidationError::InvalidFormat { .. }));
    }

    #[test]
    fn test_rejects_duplicate_slug() {
        let mut doc: serde_json::Value = serde_json::from_str(&one_product("{}")).unwrap();
        let mut second = doc["products"][0].clone();
        second["id"] = serde_json::json!("2");
        doc["products"].as_array_mut().unwrap().push(second);

        match load_catalog(&doc.to_string()) {
            Err(StoreError::InvalidCatalog { product, source }) => {
                assert_eq!(product, "premium-leather-jacket");
                assert!(matches!(source, ValidationError::Duplicate { ref field, .. } if field == "slug"));
            }
            other => panic!("expected duplicate slug, got {:?}", other.map(|c| c.len())),
        }
    }

    #[test]
    fn test_malformed_document() {
        assert!(matches!(load_catalog("{ products: oops"), Err(StoreError::Serialization(_))));
    }

    #[test]
    fn test_load_catalog_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        fs::write(&path, SAMPLE_CATALOG).unwrap();
        assert_eq!(load_catalog_file(&path).unwrap().len(), 20);

        assert!(matches!(
            load_catalog_file(&dir.path().join("missing.json")),
            Err(StoreError::Io(_))
        ));
    }
}
