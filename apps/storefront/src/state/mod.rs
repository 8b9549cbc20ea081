//! # State Module
//!
//! Per-page state owned by the storefront controller.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────┐  ┌──────────────────┐  ┌──────────────────────┐  │
//! │  │  CartStore<S>    │  │  theme           │  │  StorefrontConfig    │  │
//! │  │                  │  │                  │  │                      │  │
//! │  │  in-memory Cart  │  │  load_theme      │  │  delivery fee        │  │
//! │  │  mirrored to     │  │  save_theme      │  │  confirmation path   │  │
//! │  │  storage["cart"] │  │  storage["theme"]│  │  defaults            │  │
//! │  └──────────────────┘  └──────────────────┘  └──────────────────────┘  │
//! │                                                                         │
//! │  One writer per page; other pages reload on change events.             │
//! │  Config is read-only after initialization.                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;
mod config;
mod theme;

pub use cart::{CartStore, LoadOutcome};
pub use config::StorefrontConfig;
pub use theme::{load_theme, save_theme};
