//! # Wishlist Repository
//!
//! Persists wishlisted product ids under the `"wishlist"` key, as a JSON
//! array of strings in the order they were added.

use tracing::debug;

use super::load_list;
use crate::error::StoreResult;
use crate::kv::KeyValueStore;

/// Storage key for the wishlist.
pub const WISHLIST_KEY: &str = "wishlist";

/// Repository for the persisted wishlist.
pub struct WishlistRepository<'a, S: KeyValueStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: KeyValueStore + ?Sized> WishlistRepository<'a, S> {
    pub fn new(store: &'a S) -> Self {
        WishlistRepository { store }
    }

    /// Loads wishlisted ids, dropping repeats (first occurrence wins).
    pub fn load(&self) -> StoreResult<Vec<String>> {
        let raw: Vec<String> = load_list(self.store, WISHLIST_KEY)?;

        let mut ids: Vec<String> = Vec::with_capacity(raw.len());
        for id in raw {
            if !ids.contains(&id) {
                ids.push(id);
            }
        }

        debug!(items = ids.len(), "Loaded wishlist");
        Ok(ids)
    }

    /// Replaces the persisted wishlist with `ids`.
    pub fn save(&self, ids: &[String]) -> StoreResult<()> {
        let json = serde_json::to_string(ids)?;
        self.store.set(WISHLIST_KEY, &json)?;
        debug!(items = ids.len(), "Saved wishlist");
        Ok(())
    }

    pub fn clear(&self) -> StoreResult<()> {
        self.store.remove(WISHLIST_KEY)
    }
}
