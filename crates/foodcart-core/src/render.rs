//! # Cart Rendering
//!
//! View models for the cart listing. The page replaces its whole listing
//! with a fresh [`CartView`] on every render; nothing is patched in place.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │  Burger ($5.00) × 2                                 [Remove 0] │
//! │  Fries ($2.50) × 1                                  [Remove 1] │
//! ├────────────────────────────────────────────────────────────────┤
//! │  Subtotal                                              $12.50  │
//! │  Delivery                                               $2.00  │
//! │  Total                                                 $14.50  │
//! └────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;

use crate::cart::{Cart, CartTotals};

/// One rendered cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartRowView {
    /// Position passed back by the row's remove control.
    pub index: usize,
    pub name: String,
    pub unit_price: String,
    pub quantity: u32,
}

impl CartRowView {
    /// `"Burger ($5.00) × 2"`
    pub fn label(&self) -> String {
        format!("{} ({}) × {}", self.name, self.unit_price, self.quantity)
    }
}

/// The full cart listing plus formatted totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub rows: Vec<CartRowView>,
    pub subtotal: String,
    pub delivery: String,
    pub total: String,
}

impl CartView {
    /// Builds the view for a cart and its totals.
    pub fn build(cart: &Cart, totals: &CartTotals, currency_symbol: &str) -> Self {
        let rows = cart
            .items()
            .iter()
            .enumerate()
            .map(|(index, item)| CartRowView {
                index,
                name: item.name.clone(),
                unit_price: item.price.format_with(currency_symbol),
                quantity: item.quantity,
            })
            .collect();

        CartView {
            rows,
            subtotal: totals.subtotal.format_with(currency_symbol),
            delivery: totals.delivery_fee.format_with(currency_symbol),
            total: totals.total.format_with(currency_symbol),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::AddItem;
    use crate::money::Money;

    #[test]
    fn test_build_view() {
        let mut cart = Cart::new();
        cart.add(&AddItem::new("p1", "Burger", Money::from_cents(500)));
        cart.add(&AddItem::new("p1", "Burger", Money::from_cents(500)));
        cart.add(&AddItem::new("p2", "Fries", Money::from_cents(250)));
        let totals = cart.totals(Money::from_cents(200));

        let view = CartView::build(&cart, &totals, "$");

        assert_eq!(view.rows.len(), 2);
        assert_eq!(view.rows[0].label(), "Burger ($5.00) × 2");
        assert_eq!(view.rows[1].index, 1);
        assert_eq!(view.rows[1].label(), "Fries ($2.50) × 1");
        assert_eq!(view.subtotal, "$12.50");
        assert_eq!(view.delivery, "$2.00");
        assert_eq!(view.total, "$14.50");
    }

    #[test]
    fn test_build_empty_view() {
        let cart = Cart::new();
        let view = CartView::build(&cart, &cart.totals(Money::from_cents(200)), "$");

        assert!(view.is_empty());
        assert_eq!(view.subtotal, "$0.00");
        assert_eq!(view.delivery, "$0.00");
        assert_eq!(view.total, "$0.00");
    }
}
