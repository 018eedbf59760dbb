//! # Wishlist State
//!
//! Product ids the shopper saved for later, in the order they were added.

use maison_core::{Catalog, CoreResult, Product, ValidationError};

use super::Cart;

/// Saved product ids. Each id appears at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Wishlist {
    ids: Vec<String>,
}

impl Wishlist {
    pub fn new() -> Self {
        Wishlist { ids: Vec::new() }
    }

    /// Wraps ids loaded from the store, dropping repeats.
    pub fn from_ids(ids: Vec<String>) -> Self {
        let mut wishlist = Wishlist::new();
        for id in ids {
            wishlist.insert(id);
        }
        wishlist
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, product_id: &str) -> bool {
        self.ids.iter().any(|id| id == product_id)
    }

    /// Saves a product. Returns `false` if it was already saved.
    pub fn add(&mut self, product: &Product) -> bool {
        self.insert(product.id.clone())
    }

    /// Drops a product. Returns `false` if it was not saved.
    pub fn remove(&mut self, product_id: &str) -> bool {
        let before = self.ids.len();
        self.ids.retain(|id| id != product_id);
        self.ids.len() != before
    }

    /// Flips membership. Returns `true` if the product is now saved.
    pub fn toggle(&mut self, product: &Product) -> bool {
        if self.remove(&product.id) {
            false
        } else {
            self.insert(product.id.clone())
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Resolves saved ids against the catalog, in catalog order.
    ///
    /// Ids no longer in the catalog are skipped.
    pub fn products<'c>(&self, catalog: &'c Catalog) -> Vec<&'c Product> {
        catalog
            .products()
            .iter()
            .filter(|p| self.contains(&p.id))
            .collect()
    }

    /// Moves a product into the cart in its first size and own color,
    /// quantity 1.
    ///
    /// The product leaves the wishlist only if the cart accepts it.
    pub fn move_to_cart(&mut self, product: &Product, cart: &mut Cart) -> CoreResult<()> {
        let size = product
            .default_size()
            .ok_or_else(|| ValidationError::Required {
                field: "size".to_string(),
            })?
            .to_string();

        cart.add(product, &size, &product.color, 1)?;
        self.remove(&product.id);
        Ok(())
    }

    fn insert(&mut self, id: String) -> bool {
        if self.contains(&id) {
            return false;
        }
        self.ids.push(id);
        true
    }
}
