//! # Error Types
//!
//! Domain-specific error types for foodcart-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  foodcart-core errors (this file)                                      │
//! │  ├── CoreError        - Domain failures (bad payload, empty cart)      │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  foodcart-storage errors (separate crate)                              │
//! │  └── StorageError     - Backend read/write failures                    │
//! │                                                                         │
//! │  storefront errors (in app)                                            │
//! │  └── AppError         - What the handler boundary reports              │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → StorageError → AppError           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Most of these never reach the user: a malformed cart payload is
//! recovered as an empty cart and only logged.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core storefront errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The persisted cart payload could not be decoded.
    ///
    /// ## When This Occurs
    /// - Stored value is not JSON, or not an array of line items
    /// - An entry has quantity 0 or an empty id
    /// - Two entries share an id
    #[error("Malformed cart payload: {reason}")]
    MalformedCart { reason: String },

    /// Checkout attempted with nothing in the cart.
    #[error("Your cart is empty!")]
    EmptyCart,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Creates a MalformedCart error.
    pub fn malformed(reason: impl Into<String>) -> Self {
        CoreError::MalformedCart {
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., unparsable price).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(CoreError::EmptyCart.to_string(), "Your cart is empty!");

        let err = CoreError::malformed("expected an array");
        assert_eq!(err.to_string(), "Malformed cart payload: expected an array");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "id".to_string(),
        };
        assert_eq!(err.to_string(), "id is required");

        let err = ValidationError::InvalidFormat {
            field: "price".to_string(),
            reason: "not a number".to_string(),
        };
        assert_eq!(err.to_string(), "price has invalid format: not a number");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
