//! # Application Error Type
//!
//! Unified error type for CLI commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Maison CLI                         │
//! │                                                                         │
//! │  maison cart add silk-scarf --size XL                                  │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  AppResult<String>                                               │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Storage Error? ─── StoreError::Io(..) ─────────────┐           │  │
//! │  │         │                                          │            │  │
//! │  │         ▼                                          ▼            │  │
//! │  │  Cart rule? ─── CoreError::SizeUnavailable ───── AppError ─────►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ─── rendered text on stdout ──────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  stderr: error[CART_ERROR]: Size 'XL' is not available for ...         │
//! │  exit status 1                                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use maison_core::{CoreError, ValidationError};
use maison_store::StoreError;

use crate::config::ConfigError;

/// Error returned from CLI commands.
#[derive(Debug, Clone)]
pub struct AppError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

/// Error categories, printed in brackets before the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Product, line or wishlist entry not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Cart rule violated (size, line or quantity limits)
    CartError,

    /// Persisted state or catalog could not be read or written
    StorageError,

    /// Configuration could not be loaded or is invalid
    ConfigError,

    /// Anything else
    Internal,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::CartError => "CART_ERROR",
            ErrorCode::StorageError => "STORAGE_ERROR",
            ErrorCode::ConfigError => "CONFIG_ERROR",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

impl AppError {
    /// Creates a new application error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        AppError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        AppError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::Internal, message)
    }
}

/// Converts core errors to application errors.
impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(slug) => AppError::not_found("Product", &slug),
            CoreError::LineNotFound(line) => AppError::not_found("Cart line", &line),
            CoreError::InvalidQuantity { .. }
            | CoreError::QuantityTooLarge { .. }
            | CoreError::CartTooLarge { .. }
            | CoreError::SizeUnavailable { .. }
            | CoreError::AmountOverflow { .. } => AppError::new(ErrorCode::CartError, err.to_string()),
            CoreError::InvalidPricingConfig(_) => AppError::new(ErrorCode::ConfigError, err.to_string()),
            CoreError::Validation(e) => AppError::validation(e.to_string()),
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::validation(err.to_string())
    }
}

/// Converts store errors to application errors.
impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::InvalidCatalog { .. } => AppError::validation(err.to_string()),
            StoreError::Io(ref e) => {
                // Log the underlying error, show a short message
                tracing::error!(error = %e, "Storage I/O failed");
                AppError::new(ErrorCode::StorageError, err.to_string())
            }
            StoreError::Serialization(_) | StoreError::InvalidKey(_) | StoreError::Backend(_) => {
                AppError::new(ErrorCode::StorageError, err.to_string())
            }
        }
    }
}

/// Converts configuration errors to application errors.
impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::new(ErrorCode::ConfigError, err.to_string())
    }
}

/// JSON rendering failures.
impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::internal(format!("Failed to render JSON: {}", err))
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error[{}]: {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for AppError {}

/// Result type for CLI commands.
pub type AppResult<T> = Result<T, AppError>;
