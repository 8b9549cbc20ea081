//! # Cart Module
//!
//! The shopping cart: an ordered list of line items, unique by product id.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Page Action              Cart Method              Effect               │
//! │  ───────────              ───────────              ──────               │
//! │                                                                         │
//! │  Click "Add" ───────────► add(&AddItem) ─────────► push or qty += 1     │
//! │                                                                         │
//! │  Click "Remove" ────────► remove_at(index) ──────► items.remove(i)      │
//! │                                                   (no-op if out of      │
//! │                                                    range)               │
//! │                                                                         │
//! │  Render / checkout ─────► totals(fee) ───────────► (read only)          │
//! │                                                                         │
//! │  Persist / load ────────► encode() / decode() ───► JSON array           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Persisted Shape
//! ```json
//! [{"id":"p1","name":"Burger","price":5.0,"quantity":2},
//!  {"id":"p2","name":"Fries","price":2.5,"quantity":1}]
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::warn;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::ItemId;
use crate::validation::validate_quantity;

// =============================================================================
// Line Item
// =============================================================================

/// One product entry in the cart with an aggregated quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineItem {
    /// Product identifier (unique within a cart).
    pub id: ItemId,

    /// Display name captured when the item was first added.
    pub name: String,

    /// Unit price captured when the item was first added.
    #[ts(type = "number")]
    pub price: Money,

    /// Always at least 1.
    pub quantity: u32,
}

impl LineItem {
    /// Unit price × quantity.
    pub fn line_total(&self) -> Money {
        self.price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Add Request
// =============================================================================

/// A request to add a product to the cart.
///
/// ## Quantity
/// Callers may pass a quantity, but adding always contributes exactly one
/// unit: a new line starts at 1 and an existing line goes up by 1. The
/// supplied quantity is carried only so the cart store can log it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddItem {
    pub id: ItemId,
    pub name: String,
    pub price: Money,
    pub quantity: u32,
}

impl AddItem {
    /// Creates an add request with the default quantity of 1.
    pub fn new(id: impl Into<ItemId>, name: impl Into<String>, price: Money) -> Self {
        AddItem {
            id: id.into(),
            name: name.into(),
            price,
            quantity: 1,
        }
    }

    /// Sets the requested quantity (ignored by [`Cart::add`]).
    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }
}

/// What [`Cart::add`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new line was appended with quantity 1.
    Inserted,
    /// An existing line was bumped; carries the new quantity.
    Incremented { quantity: u32 },
}

/// What [`Cart::remove_at`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// The line at the index was removed.
    Removed(LineItem),
    /// The index was out of range; nothing changed.
    Unchanged,
}

impl RemoveOutcome {
    pub fn is_removed(&self) -> bool {
        matches!(self, RemoveOutcome::Removed(_))
    }
}

// =============================================================================
// Totals
// =============================================================================

/// Derived cart totals.
///
/// ## Invariants
/// - `total == subtotal + delivery_fee`
/// - `delivery_fee` is charged only when `subtotal` is positive; a zero or
///   negative subtotal pays no delivery
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    #[ts(type = "number")]
    pub subtotal: Money,
    #[ts(type = "number")]
    pub delivery_fee: Money,
    #[ts(type = "number")]
    pub total: Money,
}

impl CartTotals {
    /// Totals for a given subtotal and flat delivery charge.
    pub fn compute(subtotal: Money, delivery_fee: Money) -> Self {
        let delivery_fee = if subtotal.is_positive() {
            delivery_fee
        } else {
            Money::zero()
        };

        CartTotals {
            subtotal,
            delivery_fee,
            total: subtotal + delivery_fee,
        }
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
///
/// ## Invariants
/// - Items are unique by `id` (adding the same product bumps its quantity)
/// - Every quantity is at least 1
/// - Insertion order is display order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    /// Adds one unit of a product.
    ///
    /// ## Behavior
    /// - Product already in cart: quantity + 1 (name and price keep their
    ///   first-seen values)
    /// - Product not in cart: appended with quantity 1
    ///
    /// Never fails; blank ids and negative prices are accepted as given.
    pub fn add(&mut self, request: &AddItem) -> AddOutcome {
        if let Some(item) = self.items.iter_mut().find(|i| i.id == request.id) {
            item.quantity = item.quantity.saturating_add(1);
            return AddOutcome::Incremented {
                quantity: item.quantity,
            };
        }

        self.items.push(LineItem {
            id: request.id.clone(),
            name: request.name.clone(),
            price: request.price,
            quantity: 1,
        });
        AddOutcome::Inserted
    }

    /// Removes the line at a zero-based position.
    ///
    /// An out-of-range index leaves the cart untouched.
    pub fn remove_at(&mut self, index: usize) -> RemoveOutcome {
        if index >= self.items.len() {
            return RemoveOutcome::Unchanged;
        }
        RemoveOutcome::Removed(self.items.remove(index))
    }

    /// Clears all items from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Line items in display order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Returns the number of lines in the cart.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the total quantity of all items (the badge count).
    pub fn total_quantity(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |sum, i| sum.saturating_add(i.quantity))
    }

    /// Σ(price × quantity).
    pub fn subtotal(&self) -> Money {
        self.items.iter().map(LineItem::line_total).sum()
    }

    /// Computes subtotal, delivery and total. Pure.
    pub fn totals(&self, delivery_fee: Money) -> CartTotals {
        CartTotals::compute(self.subtotal(), delivery_fee)
    }

    // -------------------------------------------------------------------------
    // Persistence encoding
    // -------------------------------------------------------------------------

    /// Serializes the cart as a JSON array.
    pub fn encode(&self) -> CoreResult<String> {
        serde_json::to_string(&self.items).map_err(|e| CoreError::malformed(e.to_string()))
    }

    /// Decodes a persisted JSON array.
    ///
    /// ## Rejected Payloads
    /// - Not JSON / not an array of `{id, name, price, quantity}`
    /// - Any line with quantity 0
    /// - Two lines with the same id
    /// - A line total or subtotal that does not fit in `i64` cents
    ///
    /// Anything [`Cart::add`] can produce decodes back to an equal cart.
    pub fn decode(payload: &str) -> CoreResult<Self> {
        let items: Vec<LineItem> =
            serde_json::from_str(payload).map_err(|e| CoreError::malformed(e.to_string()))?;

        {
            let mut seen = HashSet::with_capacity(items.len());
            let mut subtotal = Money::zero();
            for item in &items {
                validate_quantity(item.quantity)
                    .map_err(|e| CoreError::malformed(format!("line {}: {}", item.id, e)))?;
                if !seen.insert(item.id.as_str()) {
                    return Err(CoreError::malformed(format!("duplicate id {}", item.id)));
                }
                subtotal = item
                    .price
                    .checked_multiply_quantity(item.quantity)
                    .and_then(|line| subtotal.checked_add(line))
                    .ok_or_else(|| {
                        CoreError::malformed(format!("line {}: total out of range", item.id))
                    })?;
            }
        }

        Ok(Cart { items })
    }

    /// Badge count straight from a persisted payload.
    ///
    /// Absent or malformed payloads count as zero.
    pub fn badge_count_of(payload: Option<&str>) -> u32 {
        match payload {
            None => 0,
            Some(raw) => match Cart::decode(raw) {
                Ok(cart) => cart.total_quantity(),
                Err(e) => {
                    warn!(error = %e, "Ignoring malformed cart payload for badge count");
                    0
                }
            },
        }
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a LineItem;
    type IntoIter = std::slice::Iter<'a, LineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const FEE: Money = Money::from_cents(200);

    fn burger() -> AddItem {
        AddItem::new("p1", "Burger", Money::from_cents(500))
    }

    fn fries() -> AddItem {
        AddItem::new("p2", "Fries", Money::from_cents(250))
    }

    #[test]
    fn test_burger_and_fries_example() {
        let mut cart = Cart::new();
        assert_eq!(cart.add(&burger()), AddOutcome::Inserted);
        assert_eq!(cart.add(&burger()), AddOutcome::Incremented { quantity: 2 });
        assert_eq!(cart.add(&fries()), AddOutcome::Inserted);

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.items()[0].id.as_str(), "p1");
        assert_eq!(cart.items()[0].quantity, 2);
        assert_eq!(cart.items()[1].id.as_str(), "p2");
        assert_eq!(cart.items()[1].quantity, 1);

        let totals = cart.totals(FEE);
        assert_eq!(totals.subtotal.cents(), 1250);
        assert_eq!(totals.delivery_fee.cents(), 200);
        assert_eq!(totals.total.cents(), 1450);
    }

    #[test]
    fn test_add_ignores_requested_quantity() {
        let mut cart = Cart::new();
        cart.add(&burger().with_quantity(5));
        cart.add(&burger().with_quantity(5));

        assert_eq!(cart.total_quantity(), 2);
    }

    #[test]
    fn test_add_never_duplicates_ids() {
        let mut cart = Cart::new();
        let ids = ["a", "b", "a", "c", "b", "a"];
        for id in ids {
            cart.add(&AddItem::new(id, id, Money::from_cents(100)));
        }

        let mut seen = HashSet::new();
        assert!(cart.items().iter().all(|i| seen.insert(i.id.clone())));
        assert_eq!(cart.len(), 3);
        assert_eq!(cart.total_quantity(), ids.len() as u32);
    }

    #[test]
    fn test_add_keeps_first_name_and_price() {
        let mut cart = Cart::new();
        cart.add(&burger());
        cart.add(&AddItem::new("p1", "Renamed", Money::from_cents(999)));

        assert_eq!(cart.items()[0].name, "Burger");
        assert_eq!(cart.items()[0].price.cents(), 500);
    }

    #[test]
    fn test_add_accepts_malformed_input() {
        let mut cart = Cart::new();
        cart.add(&AddItem::new("", "", Money::from_cents(-100)));
        assert_eq!(cart.len(), 1);

        // still round-trips
        let decoded = Cart::decode(&cart.encode().unwrap()).unwrap();
        assert_eq!(decoded, cart);
    }

    #[test]
    fn test_remove_at_valid_index() {
        let mut cart = Cart::new();
        cart.add(&burger());
        cart.add(&fries());

        let outcome = cart.remove_at(0);
        assert!(outcome.is_removed());
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].id.as_str(), "p2");
    }

    #[test]
    fn test_remove_at_out_of_range_is_noop() {
        let mut cart = Cart::new();
        cart.add(&burger());
        let before = cart.clone();

        assert_eq!(cart.remove_at(1), RemoveOutcome::Unchanged);
        assert_eq!(cart.remove_at(usize::MAX), RemoveOutcome::Unchanged);
        assert_eq!(cart, before);
    }

    #[test]
    fn test_totals_empty_cart_has_no_delivery() {
        let totals = Cart::new().totals(FEE);
        assert!(totals.subtotal.is_zero());
        assert!(totals.delivery_fee.is_zero());
        assert!(totals.total.is_zero());
    }

    #[test]
    fn test_totals_free_items_have_no_delivery() {
        let mut cart = Cart::new();
        cart.add(&AddItem::new("water", "Tap Water", Money::zero()));

        let totals = cart.totals(FEE);
        assert!(totals.delivery_fee.is_zero());
    }

    #[test]
    fn test_totals_negative_subtotal_has_no_delivery() {
        let mut cart = Cart::new();
        cart.add(&AddItem::new("r", "Refund", Money::from_cents(-500)));

        let totals = cart.totals(FEE);
        assert_eq!(totals.subtotal, Money::from_cents(-500));
        assert!(totals.delivery_fee.is_zero());
        assert_eq!(totals.total, Money::from_cents(-500));
    }

    #[test]
    fn test_totals_are_idempotent() {
        let mut cart = Cart::new();
        cart.add(&burger());
        cart.add(&fries());

        let first = cart.totals(FEE);
        let second = cart.totals(FEE);
        assert_eq!(first, second);
        assert_eq!(first.total, first.subtotal + first.delivery_fee);
    }

    #[test]
    fn test_encode_shape() {
        let mut cart = Cart::new();
        cart.add(&burger());
        cart.add(&burger());

        assert_eq!(
            cart.encode().unwrap(),
            r#"[{"id":"p1","name":"Burger","price":5.0,"quantity":2}]"#
        );
    }

    #[test]
    fn test_encode_decode_preserves_order_and_values() {
        let mut cart = Cart::new();
        cart.add(&fries());
        cart.add(&burger());
        cart.add(&fries());
        cart.add(&AddItem::new("6", "Chicken Biryani", Money::from_cents(700)));

        let decoded = Cart::decode(&cart.encode().unwrap()).unwrap();
        assert_eq!(decoded, cart);
    }

    #[test]
    fn test_decode_legacy_payload() {
        // numeric ids and string prices, as older pages wrote them
        let cart =
            Cart::decode(r#"[{"id":3,"name":"Chicken Wrap","price":"5.99","quantity":2}]"#)
                .unwrap();

        assert_eq!(cart.items()[0].id.as_str(), "3");
        assert_eq!(cart.items()[0].price.cents(), 599);
        assert_eq!(cart.subtotal().cents(), 1198);
    }

    #[test]
    fn test_decode_rejects_malformed() {
        assert!(Cart::decode("not json").is_err());
        assert!(Cart::decode("{}").is_err());
        assert!(Cart::decode(r#"[{"id":"p1"}]"#).is_err());
        assert!(Cart::decode(r#"[{"id":"p1","name":"B","price":5,"quantity":0}]"#).is_err());
        assert!(Cart::decode(
            r#"[{"id":"p1","name":"B","price":5,"quantity":1},
                {"id":"p1","name":"B","price":5,"quantity":1}]"#
        )
        .is_err());
    }

    #[test]
    fn test_decode_rejects_out_of_range_prices() {
        // price itself overflows cents
        assert!(Cart::decode(r#"[{"id":"a","name":"x","price":100000000000000000,"quantity":1}]"#)
            .is_err());
        assert!(Cart::decode(r#"[{"id":"a","name":"x","price":1e20,"quantity":2}]"#).is_err());

        // price fits, line total does not
        assert!(Cart::decode(
            r#"[{"id":"a","name":"x","price":90000000000000000.0,"quantity":2}]"#
        )
        .is_err());

        // lines fit, subtotal does not
        assert!(Cart::decode(
            r#"[{"id":"a","name":"x","price":50000000000000000.0,"quantity":1},
                {"id":"b","name":"y","price":50000000000000000.0,"quantity":1}]"#
        )
        .is_err());

        assert_eq!(
            Cart::badge_count_of(Some(
                r#"[{"id":"a","name":"x","price":1e20,"quantity":3}]"#
            )),
            0
        );
    }

    #[test]
    fn test_decode_empty_array() {
        assert!(Cart::decode("[]").unwrap().is_empty());
    }

    #[test]
    fn test_badge_count_of() {
        assert_eq!(Cart::badge_count_of(None), 0);
        assert_eq!(Cart::badge_count_of(Some("garbage")), 0);
        assert_eq!(
            Cart::badge_count_of(Some(
                r#"[{"id":"p1","name":"Burger","price":5.0,"quantity":2},
                    {"id":"p2","name":"Fries","price":2.5,"quantity":1}]"#
            )),
            3
        );
    }
}
