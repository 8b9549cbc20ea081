//! # App Error Type
//!
//! Unified error type for storefront handlers.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Storefront                         │
//! │                                                                         │
//! │  Handler (add_item, checkout, ...)                                      │
//! │  Result<T, AppError>                                                    │
//! │         │                                                               │
//! │         ├── Storage error? ── StorageError::QueryFailed ──┐             │
//! │         │                                                 ▼             │
//! │         ├── Core error? ───── CoreError::Validation ──── AppError ──►   │
//! │         │                                                               │
//! │         └── Success ─────────────────────────────────────────────────►  │
//! │                                                                         │
//! │  Details are logged here; the message stays generic.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Silent recoveries (malformed cart, out-of-range removal, empty checkout)
//! are outcome values, not errors, and never reach this type.

use foodcart_core::{CoreError, ValidationError};
use foodcart_storage::StorageError;
use serde::Serialize;

/// Error returned from storefront handlers.
///
/// ```json
/// { "code": "STORAGE_ERROR", "message": "Storage operation failed" }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Unknown menu item
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Storage backend failed
    StorageError,

    /// Cart operation failed
    CartError,

    /// Configuration could not be resolved
    ConfigError,

    /// Internal error
    Internal,
}

/// Result type for storefront handlers.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        AppError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        AppError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::ValidationError, message)
    }

    pub fn config(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::ConfigError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::Internal, message)
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::ConnectionFailed(e) => {
                tracing::error!("Storage connection failed: {}", e);
                AppError::new(ErrorCode::StorageError, "Storage connection failed")
            }
            StorageError::MigrationFailed(e) => {
                tracing::error!("Storage migration failed: {}", e);
                AppError::new(ErrorCode::StorageError, "Storage migration failed")
            }
            StorageError::QueryFailed(e) => {
                tracing::error!("Storage query failed: {}", e);
                AppError::new(ErrorCode::StorageError, "Storage operation failed")
            }
            StorageError::PoolExhausted => {
                AppError::new(ErrorCode::StorageError, "Storage pool exhausted")
            }
            StorageError::Internal(e) => {
                tracing::error!("Internal storage error: {}", e);
                AppError::new(ErrorCode::StorageError, "Storage operation failed")
            }
        }
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::MalformedCart { reason } => {
                tracing::error!("Cart payload error: {}", reason);
                AppError::new(ErrorCode::CartError, "Cart could not be saved")
            }
            CoreError::EmptyCart => AppError::new(ErrorCode::CartError, err.to_string()),
            CoreError::Validation(e) => AppError::validation(e.to_string()),
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::validation(err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for AppError {}
