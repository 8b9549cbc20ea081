//! # Cart Store
//!
//! The authoritative in-memory cart for one page, mirrored to the `cart`
//! key after every mutation.
//!
//! ## Mirroring
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Store                                           │
//! │                                                                         │
//! │  load()          storage["cart"] ──decode──► Cart (or empty)           │
//! │                                                                         │
//! │  add_item()      Cart.add ──encode──► storage["cart"]                  │
//! │  remove_item()   Cart.remove_at ──encode──► storage["cart"]            │
//! │                  (out of range: nothing written)                       │
//! │                                                                         │
//! │  badge_count()   storage["cart"] ──decode──► Σ quantity                │
//! │                  (reads storage, not the in-memory cart)               │
//! │                                                                         │
//! │  clear()         remove storage["cart"], empty the in-memory cart      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No deferred flush: every mutation is written before the call returns.
//! A mutation whose write fails is not kept, so the stored payload always
//! encodes the in-memory cart.

use foodcart_core::{
    AddItem, AddOutcome, Cart, CartTotals, LineItem, Money, RemoveOutcome, CART_KEY,
};
use foodcart_storage::KeyValueStorage;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::AppResult;

/// What [`CartStore::load`] found in storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum LoadOutcome {
    /// No cart stored; starting empty.
    Missing,
    /// A valid cart was stored.
    Loaded { items: usize },
    /// The stored value was unusable; starting empty.
    Recovered { reason: String },
}

/// Cart state for one page.
#[derive(Debug)]
pub struct CartStore<S> {
    storage: S,
    cart: Cart,
    delivery_fee: Money,
}

impl<S: KeyValueStorage> CartStore<S> {
    /// An empty store. Call [`load`](Self::load) to pick up a persisted cart.
    pub fn new(storage: S, delivery_fee: Money) -> Self {
        CartStore {
            storage,
            cart: Cart::new(),
            delivery_fee,
        }
    }

    /// Replaces the in-memory cart with the persisted one.
    ///
    /// A malformed payload is logged and treated as an empty cart.
    pub async fn load(&mut self) -> AppResult<LoadOutcome> {
        let stored = self.storage.get_item(CART_KEY).await?;

        let outcome = match stored {
            None => {
                self.cart = Cart::new();
                LoadOutcome::Missing
            }
            Some(payload) => match Cart::decode(&payload) {
                Ok(cart) => {
                    self.cart = cart;
                    LoadOutcome::Loaded {
                        items: self.cart.len(),
                    }
                }
                Err(e) => {
                    warn!(error = %e, "Stored cart is malformed, starting empty");
                    self.cart = Cart::new();
                    LoadOutcome::Recovered {
                        reason: e.to_string(),
                    }
                }
            },
        };

        debug!(?outcome, "Cart loaded");
        Ok(outcome)
    }

    /// Adds one unit of a product and persists.
    ///
    /// An existing line is bumped by exactly one; the requested quantity is
    /// not used.
    pub async fn add_item(&mut self, request: &AddItem) -> AppResult<AddOutcome> {
        if request.id.is_blank() {
            warn!(name = %request.name, "Adding item with empty id");
        }
        if request.price.is_negative() {
            warn!(id = %request.id, price = %request.price, "Adding item with negative price");
        }
        if request.quantity != 1 {
            debug!(
                id = %request.id,
                requested = request.quantity,
                "Requested quantity ignored, adding one"
            );
        }

        let mut next = self.cart.clone();
        let outcome = next.add(request);
        self.commit(next).await?;

        debug!(id = %request.id, ?outcome, "Item added to cart");
        Ok(outcome)
    }

    /// Removes the line at `index` and persists.
    ///
    /// Out of range is a no-op and writes nothing.
    pub async fn remove_item(&mut self, index: usize) -> AppResult<RemoveOutcome> {
        let mut next = self.cart.clone();
        let outcome = next.remove_at(index);

        match &outcome {
            RemoveOutcome::Removed(item) => {
                self.commit(next).await?;
                debug!(index, id = %item.id, "Item removed from cart");
            }
            RemoveOutcome::Unchanged => {
                debug!(index, len = self.cart.len(), "Remove index out of range");
            }
        }

        Ok(outcome)
    }

    /// Current totals. Pure.
    pub fn totals(&self) -> CartTotals {
        self.cart.totals(self.delivery_fee)
    }

    /// Sum of quantities in the *persisted* cart.
    pub async fn badge_count(&self) -> AppResult<u32> {
        let stored = self.storage.get_item(CART_KEY).await?;
        Ok(Cart::badge_count_of(stored.as_deref()))
    }

    /// Deletes the persisted cart and empties the in-memory one.
    pub async fn clear(&mut self) -> AppResult<()> {
        self.storage.remove_item(CART_KEY).await?;
        self.cart.clear();
        debug!("Cart cleared");
        Ok(())
    }

    /// Writes the in-memory cart to storage.
    pub async fn persist(&self) -> AppResult<()> {
        let payload = self.cart.encode()?;
        self.storage.set_item(CART_KEY, &payload).await?;
        Ok(())
    }

    /// Writes `next` and adopts it only once the write succeeded.
    async fn commit(&mut self, next: Cart) -> AppResult<()> {
        let payload = next.encode()?;
        self.storage.set_item(CART_KEY, &payload).await?;
        self.cart = next;
        Ok(())
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn items(&self) -> &[LineItem] {
        self.cart.items()
    }

    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn delivery_fee(&self) -> Money {
        self.delivery_fee
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use foodcart_storage::{MemoryStorage, SqliteStorage, StorageConfig};

    fn store() -> CartStore<MemoryStorage> {
        CartStore::new(MemoryStorage::new(), Money::from_cents(200))
    }

    fn burger() -> AddItem {
        AddItem::new("p1", "Burger", Money::from_cents(500))
    }

    fn fries() -> AddItem {
        AddItem::new("p2", "Fries", Money::from_cents(250))
    }

    #[tokio::test]
    async fn test_load_missing() {
        let mut store = store();
        assert_eq!(store.load().await.unwrap(), LoadOutcome::Missing);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_load_malformed_recovers() {
        let storage = MemoryStorage::new();
        storage.set_item(CART_KEY, "{not json").await.unwrap();

        let mut store = CartStore::new(storage, Money::from_cents(200));
        let outcome = store.load().await.unwrap();

        assert!(matches!(outcome, LoadOutcome::Recovered { .. }));
        assert!(store.is_empty());
        assert_eq!(store.badge_count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_add_persists_every_time() {
        let mut store = store();

        assert_eq!(store.add_item(&burger()).await.unwrap(), AddOutcome::Inserted);
        assert_eq!(
            store.add_item(&burger()).await.unwrap(),
            AddOutcome::Incremented { quantity: 2 }
        );
        store.add_item(&fries()).await.unwrap();

        let stored = store.storage().get_item(CART_KEY).await.unwrap().unwrap();
        assert_eq!(
            stored,
            r#"[{"id":"p1","name":"Burger","price":5.0,"quantity":2},{"id":"p2","name":"Fries","price":2.5,"quantity":1}]"#
        );

        let totals = store.totals();
        assert_eq!(totals.subtotal, Money::from_cents(1250));
        assert_eq!(totals.delivery_fee, Money::from_cents(200));
        assert_eq!(totals.total, Money::from_cents(1450));
        assert_eq!(store.badge_count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_requested_quantity_is_ignored() {
        let mut store = store();
        store.add_item(&burger().with_quantity(5)).await.unwrap();
        store.add_item(&burger().with_quantity(5)).await.unwrap();

        assert_eq!(store.items()[0].quantity, 2);
    }

    #[tokio::test]
    async fn test_persist_then_load_round_trips() {
        let storage = MemoryStorage::new();
        let mut writer = CartStore::new(storage.open_view(), Money::from_cents(200));
        writer.add_item(&burger()).await.unwrap();
        writer.add_item(&fries()).await.unwrap();
        writer.add_item(&burger()).await.unwrap();

        let mut reader = CartStore::new(storage, Money::from_cents(200));
        assert_eq!(reader.load().await.unwrap(), LoadOutcome::Loaded { items: 2 });
        assert_eq!(reader.cart(), writer.cart());
    }

    #[tokio::test]
    async fn test_remove_in_and_out_of_range() {
        let mut store = store();
        store.add_item(&burger()).await.unwrap();
        store.add_item(&fries()).await.unwrap();

        let outcome = store.remove_item(0).await.unwrap();
        assert!(matches!(outcome, RemoveOutcome::Removed(ref item) if item.name == "Burger"));
        assert_eq!(store.items().len(), 1);
        assert_eq!(store.badge_count().await.unwrap(), 1);

        assert_eq!(store.remove_item(5).await.unwrap(), RemoveOutcome::Unchanged);
        assert_eq!(store.items().len(), 1);
    }

    #[tokio::test]
    async fn test_out_of_range_remove_writes_nothing() {
        let storage = MemoryStorage::new();
        let mut store = CartStore::new(storage.open_view(), Money::from_cents(200));

        store.remove_item(0).await.unwrap();
        assert_eq!(storage.get_item(CART_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_badge_reads_storage_not_memory() {
        let storage = MemoryStorage::new();
        let store = CartStore::new(storage.open_view(), Money::from_cents(200));

        storage
            .set_item(CART_KEY, r#"[{"id":"9","name":"Beef Wrap","price":"7.00","quantity":4}]"#)
            .await
            .unwrap();

        assert!(store.is_empty());
        assert_eq!(store.badge_count().await.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_load_out_of_range_price_recovers() {
        let storage = MemoryStorage::new();
        let payload = r#"[{"id":"a","name":"x","price":100000000000000000,"quantity":1}]"#;
        storage.set_item(CART_KEY, payload).await.unwrap();

        let mut store = CartStore::new(storage, Money::from_cents(200));
        let outcome = store.load().await.unwrap();

        assert!(matches!(outcome, LoadOutcome::Recovered { .. }));
        assert!(store.is_empty());
        assert_eq!(store.badge_count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_failed_write_keeps_cart_unchanged() {
        let storage = SqliteStorage::new(StorageConfig::in_memory()).await.unwrap();
        let mut store = CartStore::new(storage, Money::from_cents(200));
        store.add_item(&burger()).await.unwrap();
        store.storage().close().await;

        assert!(store.add_item(&fries()).await.is_err());
        assert_eq!(store.items().len(), 1);
        assert_eq!(store.items()[0].quantity, 1);

        assert!(store.remove_item(0).await.is_err());
        assert_eq!(store.items().len(), 1);
        assert_eq!(store.items()[0].name, "Burger");
    }

    #[tokio::test]
    async fn test_clear() {
        let mut store = store();
        store.add_item(&burger()).await.unwrap();
        store.clear().await.unwrap();

        assert!(store.is_empty());
        assert_eq!(store.storage().get_item(CART_KEY).await.unwrap(), None);
        assert_eq!(store.totals().total, Money::zero());
    }
}
