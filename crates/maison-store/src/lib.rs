//! # maison-store: Persistence Boundary for the Maison Storefront
//!
//! Everything that touches storage lives here: the key-value port and its
//! backends, the cart and wishlist repositories, and validated catalog
//! loading.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Maison Data Flow                                 │
//! │                                                                         │
//! │  CLI command (cart add)                                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   maison-store (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │  LocalStore   │    │ Repositories  │    │   Catalog    │  │   │
//! │  │   │   (lib.rs)    │    │  cart.rs      │    │  loader      │  │   │
//! │  │   │               │───►│  wishlist.rs  │    │  + sample    │  │   │
//! │  │   │ KeyValueStore │    │               │    │  document    │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │        <data dir>/cart.json   <data dir>/wishlist.json          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`kv`] - Key-value port, memory and file backends
//! - [`repository`] - Cart and wishlist repositories
//! - [`catalog`] - Catalog document validation and the sample catalog
//! - [`error`] - Store error types
//!
//! ## Usage
//!
//! ```rust
//! use maison_store::{LocalStore, MemoryStore};
//!
//! let store = LocalStore::new(MemoryStore::new());
//! store.wishlist().save(&["5".to_string()]).unwrap();
//! assert_eq!(store.wishlist().load().unwrap(), vec!["5"]);
//! assert!(store.cart().load().unwrap().is_empty());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
pub mod kv;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use catalog::{load_catalog, load_catalog_file, sample_catalog};
pub use error::{StoreError, StoreResult};
pub use kv::{FileStore, KeyValueStore, MemoryStore};
pub use repository::{CartRepository, WishlistRepository};

use std::path::Path;

// =============================================================================
// Local Store
// =============================================================================

/// Owns a storage backend and hands out repositories over it.
#[derive(Debug)]
pub struct LocalStore<S: KeyValueStore> {
    backend: S,
}

impl<S: KeyValueStore> LocalStore<S> {
    pub fn new(backend: S) -> Self {
        LocalStore { backend }
    }

    pub fn cart(&self) -> CartRepository<'_, S> {
        CartRepository::new(&self.backend)
    }

    pub fn wishlist(&self) -> WishlistRepository<'_, S> {
        WishlistRepository::new(&self.backend)
    }

    /// Direct access to the backend.
    pub fn backend(&self) -> &S {
        &self.backend
    }
}

impl LocalStore<FileStore> {
    /// Opens a file-backed store in `dir`, creating it if needed.
    pub fn open(dir: impl AsRef<Path>) -> StoreResult<Self> {
        Ok(LocalStore::new(FileStore::open(dir.as_ref())?))
    }
}

impl LocalStore<MemoryStore> {
    /// An empty, ephemeral store.
    pub fn in_memory() -> Self {
        LocalStore::new(MemoryStore::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repositories_share_backend() {
        let store = LocalStore::in_memory();
        store.wishlist().save(&["1".to_string()]).unwrap();
        store.cart().save(&[]).unwrap();
        assert_eq!(store.backend().keys().unwrap(), vec!["cart", "wishlist"]);
    }

    #[test]
    fn test_open_file_store() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = LocalStore::open(dir.path()).unwrap();
            store.wishlist().save(&["18".to_string()]).unwrap();
        }
        let reopened = LocalStore::open(dir.path()).unwrap();
        assert_eq!(reopened.wishlist().load().unwrap(), vec!["18"]);
        assert_eq!(reopened.backend().root(), dir.path());
    }
}
