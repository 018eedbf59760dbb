//! # Product Command
//!
//! Product detail view: price and markdown, sizes, description and reviews.

use maison_store::KeyValueStore;

use super::Session;
use crate::error::AppResult;

/// Renders the detail view for a product.
pub fn show<S: KeyValueStore>(session: &Session<S>, slug: &str) -> AppResult<String> {
    let config = &session.config;
    let product = session.product(slug)?;
    let wishlisted = session.load_wishlist()?.contains(&product.id);
    let in_cart: i64 = session
        .load_cart()?
        .lines()
        .iter()
        .filter(|l| l.product_id == product.id)
        .map(|l| l.quantity)
        .sum();

    let mut out = format!(
        "{}\n{} / {}\n{}",
        product.name,
        product.brand,
        product.category,
        config.format_currency(product.price)
    );
    if let (Some(original), Some(pct)) = (product.original_price, product.discount_percent()) {
        out.push_str(&format!("  was {} (-{}%)", config.format_currency(original), pct));
    }
    out.push('\n');

    out.push_str(&format!(
        "Rating {:.1}/5 from {} {}\n",
        product.rating,
        product.reviews.len(),
        if product.reviews.len() == 1 { "review" } else { "reviews" }
    ));
    out.push_str(if product.in_stock { "In stock\n" } else { "Out of stock\n" });
    out.push_str(&format!("Color: {}   Material: {}\n", product.color, product.material));
    out.push_str(&format!("Sizes: {}\n", product.sizes.join(", ")));

    if wishlisted {
        out.push_str("In your wishlist\n");
    }
    if in_cart > 0 {
        out.push_str(&format!("In your cart: {}\n", in_cart));
    }

    out.push_str(&format!("\n{}\n", product.description));

    if !product.tags.is_empty() {
        out.push_str(&format!("Tags: {}\n", product.tags.join(", ")));
    }

    if !product.reviews.is_empty() {
        out.push_str("\nReviews\n");
        for review in &product.reviews {
            out.push_str(&format!(
                "  {}/5  {}{}  {}\n      {}\n",
                review.rating,
                review.user_name,
                if review.verified { " (verified)" } else { "" },
                review.date,
                review.comment
            ));
        }
    }

    Ok(out.trim_end().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::tests::session;
    use crate::error::ErrorCode;
    use crate::state::Wishlist;

    #[test]
    fn test_show_product() {
        let session = session();
        let out = show(&session, "premium-leather-jacket").unwrap();

        assert!(out.starts_with("Premium Leather Jacket\nUrban Luxe / Clothing\n"));
        assert!(out.contains("$1299.00  was $1599.00 (-19%)"));
        assert!(out.contains("Sizes: S, M, L, XL"));
        assert!(out.contains("In stock"));
        assert!(!out.contains("In your wishlist"));
    }

    #[test]
    fn test_show_marks_wishlist_and_cart() {
        let session = session();
        let scarf = session.product("silk-scarf").unwrap().clone();

        let mut wishlist = Wishlist::new();
        wishlist.add(&scarf);
        session.save_wishlist(&wishlist).unwrap();

        let mut cart = session.load_cart().unwrap();
        cart.add(&scarf, "One Size", &scarf.color, 2).unwrap();
        session.save_cart(&cart).unwrap();

        let out = show(&session, "silk-scarf").unwrap();
        assert!(out.contains("Sizes: One Size"));
        assert!(out.contains("In your wishlist"));
        assert!(out.contains("In your cart: 2"));
    }

    #[test]
    fn test_unknown_product() {
        let session = session();
        let err = show(&session, "velvet-cape").unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }
}
