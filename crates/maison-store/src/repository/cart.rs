//! # Cart Repository
//!
//! Persists cart line items under the `"cart"` key.
//!
//! ## Stored Shape
//! ```text
//! "cart" → [
//!   { "id": "6f1c…", "productId": "1", "product": { …snapshot… },
//!     "quantity": 2, "size": "M", "color": "Black" },
//!   …
//! ]
//! ```
//!
//! A line loaded with a quantity outside `1..=MAX_LINE_QUANTITY` is clamped
//! into that range so the pricing engine never sees one.

use maison_core::{CartLineItem, MAX_LINE_QUANTITY};
use tracing::{debug, warn};

use super::load_list;
use crate::error::StoreResult;
use crate::kv::KeyValueStore;

/// Storage key for the cart.
pub const CART_KEY: &str = "cart";

/// Repository for the persisted cart.
///
/// ## Usage
/// ```rust
/// use maison_store::kv::MemoryStore;
/// use maison_store::repository::CartRepository;
///
/// let backend = MemoryStore::new();
/// let repo = CartRepository::new(&backend);
/// assert!(repo.load().unwrap().is_empty());
/// ```
pub struct CartRepository<'a, S: KeyValueStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: KeyValueStore + ?Sized> CartRepository<'a, S> {
    pub fn new(store: &'a S) -> Self {
        CartRepository { store }
    }

    /// Loads the cart. Missing or unreadable state loads as an empty cart.
    pub fn load(&self) -> StoreResult<Vec<CartLineItem>> {
        let mut lines: Vec<CartLineItem> = load_list(self.store, CART_KEY)?;

        for line in lines.iter_mut() {
            let clamped = line.quantity.clamp(1, MAX_LINE_QUANTITY);
            if clamped != line.quantity {
                warn!(
                    line_id = %line.id,
                    quantity = line.quantity,
                    normalized = clamped,
                    "Normalizing persisted cart quantity"
                );
                line.quantity = clamped;
            }
        }

        debug!(lines = lines.len(), "Loaded cart");
        Ok(lines)
    }

    /// Replaces the persisted cart with `lines`.
    pub fn save(&self, lines: &[CartLineItem]) -> StoreResult<()> {
        let json = serde_json::to_string(lines)?;
        self.store.set(CART_KEY, &json)?;
        debug!(lines = lines.len(), "Saved cart");
        Ok(())
    }

    /// Removes the persisted cart entirely.
    pub fn clear(&self) -> StoreResult<()> {
        self.store.remove(CART_KEY)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::sample_catalog;
    use crate::kv::MemoryStore;

    fn sample_lines() -> Vec<CartLineItem> {
        let catalog = sample_catalog().unwrap();
        let jacket = catalog.find_by_slug("premium-leather-jacket").unwrap();
        let scarf = catalog.find_by_slug("silk-scarf").unwrap();
        vec![
            CartLineItem::new("line-1", jacket, "M", 1),
            CartLineItem::new("line-2", scarf, "One Size", 3),
        ]
    }

    #[test]
    fn test_load_missing_is_empty() {
        let backend = MemoryStore::new();
        assert!(CartRepository::new(&backend).load().unwrap().is_empty());
    }

    #[test]
    fn test_save_and_load() {
        let backend = MemoryStore::new();
        let repo = CartRepository::new(&backend);
        let lines = sample_lines();

        repo.save(&lines).unwrap();
        assert_eq!(repo.load().unwrap(), lines);
    }

    #[test]
    fn test_corrupt_value_loads_as_empty() {
        let backend = MemoryStore::new();
        backend.set(CART_KEY, "{not json").unwrap();
        assert!(CartRepository::new(&backend).load().unwrap().is_empty());

        backend.set(CART_KEY, "{\"id\": 1}").unwrap();
        assert!(CartRepository::new(&backend).load().unwrap().is_empty());
    }

    #[test]
    fn test_zero_quantity_is_normalized() {
        let backend = MemoryStore::new();
        let repo = CartRepository::new(&backend);
        let mut lines = sample_lines();
        lines[0].quantity = 0;
        lines[1].quantity = -4;
        repo.save(&lines).unwrap();

        let loaded = repo.load().unwrap();
        assert!(loaded.iter().all(|l| l.quantity == 1));
    }

    #[test]
    fn test_oversized_quantity_is_capped() {
        let backend = MemoryStore::new();
        let repo = CartRepository::new(&backend);
        let mut lines = sample_lines();
        lines[0].quantity = 5000;
        lines[1].quantity = i64::MAX;
        repo.save(&lines).unwrap();

        let loaded = repo.load().unwrap();
        assert!(loaded.iter().all(|l| l.quantity == MAX_LINE_QUANTITY));
    }

    #[test]
    fn test_clear() {
        let backend = MemoryStore::new();
        let repo = CartRepository::new(&backend);
        repo.save(&sample_lines()).unwrap();
        repo.clear().unwrap();
        assert_eq!(backend.get(CART_KEY).unwrap(), None);
        assert!(repo.load().unwrap().is_empty());
    }

    #[test]
    fn test_works_through_trait_object() {
        let backend = MemoryStore::new();
        let dynamic: &dyn KeyValueStore = &backend;
        let repo = CartRepository::new(dynamic);
        repo.save(&sample_lines()).unwrap();
        assert_eq!(repo.load().unwrap().len(), 2);
    }
}
