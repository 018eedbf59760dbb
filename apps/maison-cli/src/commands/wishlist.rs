//! # Wishlist Commands

use tracing::info;

use maison_store::KeyValueStore;

use super::cart::summary_line;
use super::shop::listing;
use super::Session;
use crate::error::AppResult;

/// Lists saved products in catalog order.
pub fn show<S: KeyValueStore>(session: &Session<S>) -> AppResult<String> {
    let wishlist = session.load_wishlist()?;
    let products = wishlist.products(&session.catalog);

    if products.is_empty() {
        return Ok("Your wishlist is empty.".to_string());
    }

    let heading = format!(
        "Your wishlist: {} {}",
        products.len(),
        if products.len() == 1 { "product" } else { "products" }
    );
    Ok(listing(&session.config, &heading, &products))
}

pub fn add<S: KeyValueStore>(session: &Session<S>, slug: &str) -> AppResult<String> {
    let product = session.product(slug)?;
    let mut wishlist = session.load_wishlist()?;

    if !wishlist.add(product) {
        return Ok(format!("{} is already in your wishlist", product.name));
    }

    session.save_wishlist(&wishlist)?;
    Ok(format!("Saved {} to your wishlist", product.name))
}

pub fn remove<S: KeyValueStore>(session: &Session<S>, slug: &str) -> AppResult<String> {
    let product = session.product(slug)?;
    let mut wishlist = session.load_wishlist()?;

    if !wishlist.remove(&product.id) {
        return Ok(format!("{} is not in your wishlist", product.name));
    }

    session.save_wishlist(&wishlist)?;
    Ok(format!("Removed {} from your wishlist", product.name))
}

pub fn toggle<S: KeyValueStore>(session: &Session<S>, slug: &str) -> AppResult<String> {
    let product = session.product(slug)?;
    let mut wishlist = session.load_wishlist()?;

    let saved = wishlist.toggle(product);
    session.save_wishlist(&wishlist)?;

    Ok(if saved {
        format!("Saved {} to your wishlist", product.name)
    } else {
        format!("Removed {} from your wishlist", product.name)
    })
}

pub fn clear<S: KeyValueStore>(session: &Session<S>) -> AppResult<String> {
    let mut wishlist = session.load_wishlist()?;
    wishlist.clear();
    session.save_wishlist(&wishlist)?;
    Ok("Your wishlist is empty.".to_string())
}

/// Moves a saved product into the cart in its first size.
///
/// The cart is written first; a failed wishlist write leaves the product in
/// both.
pub fn move_to_cart<S: KeyValueStore>(session: &Session<S>, slug: &str) -> AppResult<String> {
    let product = session.product(slug)?;
    let mut wishlist = session.load_wishlist()?;

    if !wishlist.contains(&product.id) {
        return Ok(format!("{} is not in your wishlist", product.name));
    }

    let mut cart = session.load_cart()?;
    wishlist.move_to_cart(product, &mut cart)?;
    session.save_cart(&cart)?;
    session.save_wishlist(&wishlist)?;
    info!(product = %product.id, "Moved wishlist item to cart");

    let totals = cart.totals(&session.config.pricing())?;
    Ok(format!(
        "Moved {} to your cart\n{}",
        product.name,
        summary_line(&session.config, &totals)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::tests::session;
    use crate::error::ErrorCode;

    #[test]
    fn test_add_show_remove() {
        let session = session();
        assert_eq!(show(&session).unwrap(), "Your wishlist is empty.");

        assert_eq!(
            add(&session, "minimalist-watch").unwrap(),
            "Saved Minimalist Watch to your wishlist"
        );
        add(&session, "premium-leather-jacket").unwrap();
        assert!(add(&session, "minimalist-watch")
            .unwrap()
            .contains("already in your wishlist"));

        let out = show(&session).unwrap();
        let mut lines = out.lines();
        assert_eq!(lines.next(), Some("Your wishlist: 2 products"));
        // Catalog order, not insertion order
        assert!(lines.next().unwrap().starts_with("premium-leather-jacket"));
        assert!(lines.next().unwrap().starts_with("minimalist-watch"));

        remove(&session, "minimalist-watch").unwrap();
        assert_eq!(session.load_wishlist().unwrap().ids(), ["1"]);
        assert!(remove(&session, "minimalist-watch").unwrap().contains("not in your wishlist"));
    }

    #[test]
    fn test_toggle_and_clear() {
        let session = session();
        assert!(toggle(&session, "silk-scarf").unwrap().starts_with("Saved"));
        assert!(toggle(&session, "silk-scarf").unwrap().starts_with("Removed"));
        assert!(session.load_wishlist().unwrap().is_empty());

        add(&session, "silk-scarf").unwrap();
        clear(&session).unwrap();
        assert!(session.load_wishlist().unwrap().is_empty());
    }

    #[test]
    fn test_move_to_cart() {
        let session = session();
        add(&session, "designer-sneakers").unwrap();

        let out = move_to_cart(&session, "designer-sneakers").unwrap();
        assert!(out.starts_with("Moved Designer Sneakers to your cart"));

        let cart = session.load_cart().unwrap();
        assert_eq!(cart.lines()[0].size, "7");
        assert_eq!(cart.lines()[0].quantity, 1);
        assert!(session.load_wishlist().unwrap().is_empty());
    }

    #[test]
    fn test_move_unsaved_product_is_noop() {
        let session = session();
        let out = move_to_cart(&session, "designer-sneakers").unwrap();
        assert!(out.contains("not in your wishlist"));
        assert!(session.load_cart().unwrap().is_empty());
    }

    #[test]
    fn test_unknown_slug() {
        let session = session();
        assert_eq!(add(&session, "nope").unwrap_err().code, ErrorCode::NotFound);
    }
}
