//! # Validation Module
//!
//! Input checks for the storefront.
//!
//! ## Where Validation Applies
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Add to cart (page click)                                              │
//! │  └── NOT rejected: malformed input is accepted as-is and logged        │
//! │                                                                         │
//! │  Stored cart payload (decode)                                          │
//! │  └── THIS MODULE: any violation marks the payload malformed            │
//! │      → the cart store recovers with an empty cart                      │
//! │                                                                         │
//! │  Command-line arguments                                                │
//! │  └── THIS MODULE: prices and indices parsed before dispatch            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::money::Money;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates a product identifier.
///
/// ## Rules
/// - Must not be empty or whitespace
///
/// ## Example
/// ```rust
/// use foodcart_core::validation::validate_item_id;
///
/// assert!(validate_item_id("p1").is_ok());
/// assert!(validate_item_id("  ").is_err());
/// ```
pub fn validate_item_id(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    Ok(())
}

/// Validates a unit price.
///
/// ## Rules
/// - Must be non-negative (zero is a free item)
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a line quantity.
///
/// ## Rules
/// - Must be at least 1; a line at zero is removed, never stored
pub fn validate_quantity(qty: u32) -> ValidationResult<()> {
    if qty == 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Parses a cart position as typed by a user.
///
/// Only the format is checked here; whether the position exists is the
/// cart's call (an out-of-range index is a no-op, not an error).
///
/// ## Example
/// ```rust
/// use foodcart_core::validation::parse_cart_index;
///
/// assert_eq!(parse_cart_index("0").unwrap(), 0);
/// assert!(parse_cart_index("-1").is_err());
/// ```
pub fn parse_cart_index(raw: &str) -> ValidationResult<usize> {
    raw.trim()
        .parse()
        .map_err(|_| ValidationError::InvalidFormat {
            field: "index".to_string(),
            reason: "must be a non-negative whole number".to_string(),
        })
}

// =============================================================================
// Unit Tests
// =============================================================================
