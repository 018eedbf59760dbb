//! # Shop Commands
//!
//! Catalog browsing: the filtered listing and the featured list.
//!
//! ## Filter Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  maison shop --category jewelry --max-price 1000 --sort price-asc      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ShopArgs ──► FilterSpec                                               │
//! │               (decimal prices → integer cents, unset bounds open)      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Catalog::query (filter, then stable sort)                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  one row per product, or JSON with --json                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::debug;

use maison_core::validation::cents_from_units;
use maison_core::{FilterSpec, Money, PriceRange, Product};
use maison_store::KeyValueStore;

use super::{product_row, Session};
use crate::cli::ShopArgs;
use crate::config::AppConfig;
use crate::error::AppResult;

/// Builds the query from command line arguments.
pub fn filter_spec(args: &ShopArgs) -> AppResult<FilterSpec> {
    let unbounded = PriceRange::unbounded();
    let min = match args.min_price {
        Some(units) => Money::from_cents(cents_from_units("min price", units)?),
        None => unbounded.min,
    };
    let max = match args.max_price {
        Some(units) => Money::from_cents(cents_from_units("max price", units)?),
        None => unbounded.max,
    };

    Ok(FilterSpec {
        categories: args.categories.iter().copied().collect(),
        brands: args.brands.iter().map(|b| b.trim().to_string()).collect(),
        price_range: PriceRange::new(min, max),
        in_stock_only: args.in_stock,
        search_query: args.search.clone().unwrap_or_default(),
        sort_by: args.sort,
    })
}

/// Lists products matching the filters.
pub fn shop<S: KeyValueStore>(session: &Session<S>, args: &ShopArgs) -> AppResult<String> {
    let spec = filter_spec(args)?;
    let products = session.catalog.query(&spec);
    debug!(matches = products.len(), sort = %spec.sort_by, "Catalog query");

    if args.json {
        return Ok(serde_json::to_string_pretty(&products)?);
    }

    if products.is_empty() {
        return Ok("No products match your filters.".to_string());
    }

    let heading = format!(
        "{} {}, sorted by {}",
        products.len(),
        if products.len() == 1 { "product" } else { "products" },
        spec.sort_by
    );
    Ok(listing(&session.config, &heading, &products))
}

/// Lists the products shown on the home page.
pub fn featured<S: KeyValueStore>(session: &Session<S>) -> AppResult<String> {
    let products = session.catalog.featured();
    if products.is_empty() {
        return Ok("No featured products.".to_string());
    }

    let heading = format!("Featured at {}", session.config.store.name);
    Ok(listing(&session.config, &heading, &products))
}

pub(crate) fn listing(config: &AppConfig, heading: &str, products: &[&Product]) -> String {
    let mut out = String::from(heading);
    for product in products {
        out.push('\n');
        out.push_str(&product_row(config, product));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::tests::session;
    use maison_core::{Category, SortBy};

    fn slugs(out: &str) -> Vec<&str> {
        out.lines()
            .skip(1)
            .filter_map(|l| l.split_whitespace().next())
            .collect()
    }

    #[test]
    fn test_filter_spec_defaults_are_open() {
        let spec = filter_spec(&ShopArgs::default()).unwrap();
        assert_eq!(spec, FilterSpec::default());
    }

    #[test]
    fn test_filter_spec_converts_prices() {
        let args = ShopArgs {
            min_price: Some(49.99),
            max_price: Some(1000.0),
            ..ShopArgs::default()
        };
        let spec = filter_spec(&args).unwrap();
        assert_eq!(spec.price_range.min, Money::from_cents(4999));
        assert_eq!(spec.price_range.max, Money::from_units(1000));
    }

    #[test]
    fn test_filter_spec_rejects_non_finite_price() {
        let args = ShopArgs {
            max_price: Some(f64::INFINITY),
            ..ShopArgs::default()
        };
        assert!(filter_spec(&args).is_err());
    }

    #[test]
    fn test_jewelry_under_1000_by_price() {
        let session = session();
        let args = ShopArgs {
            categories: vec![Category::Jewelry],
            max_price: Some(1000.0),
            sort: SortBy::PriceAsc,
            ..ShopArgs::default()
        };

        let out = shop(&session, &args).unwrap();
        assert!(out.starts_with("3 products, sorted by price-asc"));
        assert_eq!(
            slugs(&out),
            [
                "minimalist-bracelet-set",
                "rose-gold-layered-necklace",
                "gold-chain-necklace"
            ]
        );
        assert!(!out.contains("diamond-earrings"));
    }

    #[test]
    fn test_search_matches_brand() {
        let session = session();
        let args = ShopArgs {
            search: Some("  street COUTURE ".to_string()),
            categories: vec![Category::Shoes],
            ..ShopArgs::default()
        };
        let out = shop(&session, &args).unwrap();
        assert_eq!(slugs(&out), ["designer-sneakers"]);
        assert!(out.starts_with("1 product,"));
    }

    #[test]
    fn test_inverted_range_is_empty() {
        let session = session();
        let args = ShopArgs {
            min_price: Some(500.0),
            max_price: Some(100.0),
            ..ShopArgs::default()
        };
        assert_eq!(shop(&session, &args).unwrap(), "No products match your filters.");
    }

    #[test]
    fn test_json_output() {
        let session = session();
        let args = ShopArgs {
            brands: vec!["Elite Style".to_string()],
            categories: vec![Category::Watches],
            json: true,
            ..ShopArgs::default()
        };
        let out = shop(&session, &args).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), 1);
        assert_eq!(parsed[0]["slug"], "minimalist-watch");
    }

    #[test]
    fn test_featured_in_catalog_order() {
        let session = session();
        let out = featured(&session).unwrap();
        assert!(out.starts_with("Featured at Maison"));
        let listed = slugs(&out);
        assert_eq!(listed.len(), 9);
        assert_eq!(listed[0], "premium-leather-jacket");
        assert_eq!(listed[8], "sports-chronograph");
    }
}
