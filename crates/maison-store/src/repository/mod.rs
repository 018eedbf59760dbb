//! # Repository Module
//!
//! Typed access to persisted storefront state.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repositories over the Key-Value Port                 │
//! │                                                                         │
//! │  CLI command                                                           │
//! │       │                                                                 │
//! │       │  store.cart().load()                                            │
//! │       ▼                                                                 │
//! │  CartRepository ──────────► key "cart"      JSON array of line items   │
//! │  WishlistRepository ──────► key "wishlist"  JSON array of product ids  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  KeyValueStore (MemoryStore | FileStore)                               │
//! │                                                                         │
//! │  Reads are forgiving: missing or corrupt values load as empty.         │
//! │  Writes replace the whole value.                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`CartRepository`] - Cart line items
//! - [`WishlistRepository`] - Wishlisted product ids

pub mod cart;
pub mod wishlist;

pub use cart::CartRepository;
pub use wishlist::WishlistRepository;

use serde::de::DeserializeOwned;
use tracing::warn;

use crate::error::StoreResult;
use crate::kv::KeyValueStore;

/// Reads a JSON array under `key`, treating absence and corruption as empty.
fn load_list<T, S>(store: &S, key: &str) -> StoreResult<Vec<T>>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let Some(raw) = store.get(key)? else {
        return Ok(Vec::new());
    };

    match serde_json::from_str::<Vec<T>>(&raw) {
        Ok(items) => Ok(items),
        Err(e) => {
            warn!(key = %key, error = %e, "Discarding unreadable persisted value");
            Ok(Vec::new())
        }
    }
}
