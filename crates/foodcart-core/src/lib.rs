//! # foodcart-core: Pure Storefront Logic
//!
//! This crate is the **heart** of the Foodcart storefront. It contains the cart
//! model, money math, menu filtering and the view models the page renders,
//! all as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Foodcart Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Page (menu, cart, badge)                     │   │
//! │  │    Food cards ──► Add to cart ──► Cart listing ──► Checkout     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ Page events                            │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 Storefront controller (apps/storefront)         │   │
//! │  └──────────────┬─────────────────────────────────┬────────────────┘   │
//! │                 │                                 │                     │
//! │  ┌──────────────▼──────────────────┐  ┌──────────▼─────────────────┐   │
//! │  │   ★ foodcart-core (THIS) ★      │  │   foodcart-storage         │   │
//! │  │  cart · money · menu · render   │  │   memory / SQLite + events │   │
//! │  └─────────────────────────────────┘  └────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`cart`] - Cart, line items, totals, payload encode/decode
//! - [`money`] - Money type with integer arithmetic
//! - [`menu`] - Menu cards, search/category filter, sort orders, layouts
//! - [`render`] - View models for the cart listing
//! - [`types`] - Identifiers, payment method, theme
//! - [`eta`] - Delivery time estimate
//! - [`error`] - Domain error types
//! - [`validation`] - Input checks
//!
//! ## Example Usage
//!
//! ```rust
//! use foodcart_core::cart::{AddItem, Cart};
//! use foodcart_core::money::Money;
//!
//! let mut cart = Cart::new();
//! cart.add(&AddItem::new("p1", "Burger", Money::from_cents(500)));
//! cart.add(&AddItem::new("p1", "Burger", Money::from_cents(500)));
//! cart.add(&AddItem::new("p2", "Fries", Money::from_cents(250)));
//!
//! let totals = cart.totals(Money::from_cents(200));
//! assert_eq!(totals.subtotal.cents(), 1250);
//! assert_eq!(totals.total.cents(), 1450);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod eta;
pub mod menu;
pub mod money;
pub mod render;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{AddItem, AddOutcome, Cart, CartTotals, LineItem, RemoveOutcome};
pub use error::{CoreError, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Storage Keys
// =============================================================================

/// Key holding the serialized cart.
pub const CART_KEY: &str = "cart";

/// Key holding the theme preference (`"dark"` / `"light"`).
pub const THEME_KEY: &str = "theme";

/// Key holding the delivery estimate captured at checkout.
pub const ETA_KEY: &str = "eta";

/// Key holding the payment method captured at checkout.
pub const PAYMENT_KEY: &str = "payment";

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Flat delivery charge applied to any non-empty cart ($2.00).
pub const DEFAULT_DELIVERY_FEE_CENTS: i64 = 200;

/// Payment method recorded when nothing is selected.
pub const DEFAULT_PAYMENT_METHOD: &str = "Cash";

/// Delivery estimate recorded when the page shows none.
pub const DEFAULT_ETA: &str = "30 min";

/// Where a successful checkout navigates to.
pub const CONFIRMATION_PATH: &str = "/thankyou";

/// How long a toast stays visible, in milliseconds.
pub const TOAST_DURATION_MS: u64 = 2000;
