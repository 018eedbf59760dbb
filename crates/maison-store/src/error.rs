//! # Store Error Types
//!
//! Error types for persistence and catalog loading.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error / serde_json::Error / ValidationError                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds context and categorization            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  AppError (in CLI) ← Error code + message                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Terminal prints the message, exit status 1                            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Repositories never surface `Serialization` for reads: a corrupt
//! persisted value is logged and read as empty.

use maison_core::ValidationError;
use thiserror::Error;

/// Persistence and catalog errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing directory failed.
    ///
    /// ## When This Occurs
    /// - Data directory cannot be created
    /// - File permissions issue
    /// - Disk full
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// A value could not be encoded, or a catalog document is not valid JSON.
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Key contains characters outside `[A-Za-z0-9_-]`.
    #[error("Invalid storage key: '{0}'")]
    InvalidKey(String),

    /// A catalog record failed validation.
    ///
    /// ## When This Occurs
    /// - Missing name, slug or sizes
    /// - Original price not above price
    /// - Duplicate id or slug
    #[error("Invalid catalog entry {product}: {source}")]
    InvalidCatalog {
        product: String,
        source: ValidationError,
    },

    /// Backend-specific failure (e.g. a poisoned lock).
    #[error("Storage backend error: {0}")]
    Backend(String),
}

impl StoreError {
    /// Creates an InvalidCatalog error for the given product.
    pub fn invalid_catalog(product: impl Into<String>, source: ValidationError) -> Self {
        StoreError::InvalidCatalog {
            product: product.into(),
            source,
        }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
