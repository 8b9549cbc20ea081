//! # Storefront Controller
//!
//! One page instance: its cart store, menu board, theme and page surface.
//!
//! ## Event Handling
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Storefront Event Flow                                │
//! │                                                                         │
//! │  open()                                                                 │
//! │    load cart ─► apply saved theme ─► render ─► badge ─► ETA ─► menu     │
//! │                                                                         │
//! │  user events                          storage events (other views)      │
//! │  ───────────                          ────────────────────────────      │
//! │  add_item ──► persist, toast, badge   key "cart" / resync               │
//! │  remove_item ► persist, render, badge   └─► reload, render, badge       │
//! │  checkout ──► payment + eta, clear,   other keys                        │
//! │               alert, navigate           └─► ignored                     │
//! │  toggle_theme / set_layout / sort_menu / apply_filter / toggle_nav      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every handler finishes its storage writes before returning.

use chrono::{DateTime, Utc};
use foodcart_core::eta::DeliveryEstimate;
use foodcart_core::menu::{Layout, LayoutTransition, MenuBoard, MenuFilter, MenuItem, SortOrder};
use foodcart_core::render::CartView;
use foodcart_core::{
    AddItem, AddOutcome, CartTotals, CoreError, LineItem, PaymentMethod, RemoveOutcome, Theme,
    CART_KEY, ETA_KEY, PAYMENT_KEY,
};
use foodcart_storage::{KeyValueStorage, StorageEvent, StorageEvents};
use rand::Rng;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{AppError, AppResult};
use crate::page::{Element, Page};
use crate::state::{load_theme, save_theme, CartStore, LoadOutcome, StorefrontConfig};

// =============================================================================
// Checkout Types
// =============================================================================

/// What was ordered, captured at checkout.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub items: Vec<LineItem>,
    pub totals: CartTotals,
    pub payment: PaymentMethod,
    pub eta: String,
    pub placed_at: DateTime<Utc>,
}

/// Result of [`Storefront::checkout`].
#[derive(Debug, Clone, PartialEq)]
pub enum CheckoutOutcome {
    /// Nothing in the cart; the user was alerted and nothing changed.
    EmptyCart,
    Placed(Receipt),
}

/// Values shown on the thank-you view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Confirmation {
    pub eta: String,
    pub payment: Option<String>,
}

// =============================================================================
// Storefront
// =============================================================================

/// The page controller.
pub struct Storefront<S, P> {
    cart: CartStore<S>,
    page: P,
    config: StorefrontConfig,
    menu: MenuBoard,
    theme: Theme,
    events: StorageEvents,
}

impl<S: KeyValueStorage, P: Page> Storefront<S, P> {
    /// Opens a page over `storage`.
    ///
    /// Subscribes to change events first so nothing written after this call
    /// is missed.
    pub async fn open<R: Rng>(
        storage: S,
        page: P,
        config: StorefrontConfig,
        menu: Vec<MenuItem>,
        rng: &mut R,
    ) -> AppResult<Self> {
        let events = storage.subscribe();
        let view = storage.view_id();

        let mut storefront = Storefront {
            cart: CartStore::new(storage, config.delivery_fee),
            page,
            config,
            menu: MenuBoard::new(menu),
            theme: Theme::default(),
            events,
        };

        let outcome = storefront.cart.load().await?;
        storefront.apply_saved_theme().await?;
        storefront.render();
        storefront.update_badge().await?;
        storefront.show_delivery_time(rng);
        storefront.redraw_menu(None);

        info!(%view, ?outcome, theme = %storefront.theme, "Storefront opened");
        Ok(storefront)
    }

    // -------------------------------------------------------------------------
    // Cart
    // -------------------------------------------------------------------------

    /// Adds one unit, toasts and recounts the badge.
    pub async fn add_item(&mut self, request: AddItem) -> AppResult<AddOutcome> {
        debug!(id = %request.id, name = %request.name, "add_item");

        let outcome = self.cart.add_item(&request).await?;
        self.show_toast(&format!("{} added to cart!", request.name));
        self.update_badge().await?;

        Ok(outcome)
    }

    /// Adds a menu card by id.
    pub async fn add_menu_item(&mut self, id: &str) -> AppResult<AddOutcome> {
        let item = self
            .menu
            .find(id)
            .ok_or_else(|| AppError::not_found("Menu item", id))?;
        let request = AddItem::new(item.id.clone(), item.name.clone(), item.price);

        self.add_item(request).await
    }

    /// Removes the line at `index`; out of range changes nothing.
    pub async fn remove_item(&mut self, index: usize) -> AppResult<RemoveOutcome> {
        debug!(index, "remove_item");

        let outcome = self.cart.remove_item(index).await?;
        if outcome.is_removed() {
            self.render();
            self.update_badge().await?;
        }

        Ok(outcome)
    }

    pub fn totals(&self) -> CartTotals {
        self.cart.totals()
    }

    /// Redraws the cart listing and totals from the in-memory cart.
    pub fn render(&mut self) {
        if !self.page.has(Element::CartItems) {
            return;
        }

        let totals = self.cart.totals();
        let view = CartView::build(self.cart.cart(), &totals, &self.config.currency_symbol);

        self.page.replace_cart_rows(&view.rows);
        self.page.set_text(Element::Subtotal, &view.subtotal);
        self.page.set_text(Element::Delivery, &view.delivery);
        self.page.set_text(Element::Total, &view.total);
    }

    /// Recounts the badge from the persisted cart.
    pub async fn update_badge(&mut self) -> AppResult<u32> {
        let count = self.cart.badge_count().await?;
        self.page.set_text(Element::CartCount, &count.to_string());
        Ok(count)
    }

    /// Places the order.
    ///
    /// ## Steps
    /// 1. Empty cart: alert and stop (no writes, no navigation)
    /// 2. Record payment method and ETA
    /// 3. Clear the persisted cart
    /// 4. Confirm and navigate to the thank-you path
    pub async fn checkout(&mut self) -> AppResult<CheckoutOutcome> {
        if self.cart.is_empty() {
            debug!("Checkout with empty cart");
            self.page.alert(&CoreError::EmptyCart.to_string());
            return Ok(CheckoutOutcome::EmptyCart);
        }

        let payment = PaymentMethod::resolve(
            self.page.selected_payment().as_deref(),
            &self.config.default_payment,
        );
        let eta = self
            .page
            .text(Element::Eta)
            .filter(|text| !text.trim().is_empty())
            .unwrap_or_else(|| self.config.default_eta.clone());

        let receipt = Receipt {
            items: self.cart.items().to_vec(),
            totals: self.cart.totals(),
            payment,
            eta,
            placed_at: Utc::now(),
        };

        let storage = self.cart.storage();
        storage.set_item(PAYMENT_KEY, receipt.payment.as_str()).await?;
        storage.set_item(ETA_KEY, &receipt.eta).await?;
        self.cart.clear().await?;

        self.page.alert(&format!(
            "Order placed successfully! Payment: {}",
            receipt.payment
        ));
        self.page.navigate(&self.config.confirmation_path);

        info!(
            payment = %receipt.payment,
            eta = %receipt.eta,
            total = %receipt.totals.total,
            "Order placed"
        );
        Ok(CheckoutOutcome::Placed(receipt))
    }

    /// Values for the thank-you view.
    pub async fn confirmation(&self) -> AppResult<Confirmation> {
        let storage = self.cart.storage();
        let eta = storage
            .get_item(ETA_KEY)
            .await?
            .unwrap_or_else(|| self.config.default_eta.clone());
        let payment = storage.get_item(PAYMENT_KEY).await?;

        Ok(Confirmation { eta, payment })
    }

    // -------------------------------------------------------------------------
    // Page effects
    // -------------------------------------------------------------------------

    /// Writes a random estimate into the ETA element.
    pub fn show_delivery_time<R: Rng>(&mut self, rng: &mut R) -> Option<DeliveryEstimate> {
        if !self.page.has(Element::Eta) {
            return None;
        }

        let estimate = DeliveryEstimate::sample(rng, self.config.eta_window.clone());
        self.page.set_text(Element::Eta, &estimate.to_string());
        Some(estimate)
    }

    pub fn show_toast(&mut self, message: &str) {
        if self.page.has(Element::Toast) {
            self.page.show_toast(message, self.config.toast_duration);
        }
    }

    /// Returns whether the navbar is now open.
    pub fn toggle_nav(&mut self) -> bool {
        if !self.page.has(Element::Navbar) {
            return false;
        }
        self.page.toggle_nav()
    }

    /// Hides non-matching cards. Returns how many stay visible.
    pub fn apply_filter(&mut self, search: &str, category: &str) -> usize {
        self.menu.apply_filter(&MenuFilter::new(search, category));
        self.redraw_menu(None);

        let visible = self.menu.visible().count();
        debug!(search, category, visible, "Menu filtered");
        visible
    }

    pub fn sort_menu(&mut self, order: SortOrder) {
        self.menu.sort(order);
        self.redraw_menu(None);
        debug!(?order, "Menu sorted");
    }

    /// Switches layout with the fade transition.
    pub fn set_layout(&mut self, layout: Layout) -> LayoutTransition {
        let transition = LayoutTransition::default();
        self.menu.set_layout(layout);
        self.redraw_menu(Some(transition));
        debug!(%layout, "Menu layout changed");
        transition
    }

    fn redraw_menu(&mut self, transition: Option<LayoutTransition>) {
        if self.page.has(Element::Menu) {
            self.page.render_menu(&self.menu, transition);
        }
    }

    // -------------------------------------------------------------------------
    // Theme
    // -------------------------------------------------------------------------

    /// Flips the theme, persists it and updates the button icon.
    pub async fn toggle_theme(&mut self) -> AppResult<Theme> {
        let theme = self.theme.toggled();
        save_theme(self.cart.storage(), theme).await?;

        self.theme = theme;
        self.page.set_dark(theme.is_dark());
        self.page.set_text(Element::ThemeButton, theme.button_icon());
        Ok(theme)
    }

    /// Applies a stored `"dark"` preference. Light leaves the page as is.
    pub async fn apply_saved_theme(&mut self) -> AppResult<Theme> {
        let theme = load_theme(self.cart.storage()).await?;
        self.theme = theme;

        if theme.is_dark() {
            self.page.set_dark(true);
            self.page.set_text(Element::ThemeButton, theme.button_icon());
        }
        Ok(theme)
    }

    // -------------------------------------------------------------------------
    // Cross-view sync
    // -------------------------------------------------------------------------

    /// Reacts to a change made by another view.
    ///
    /// Returns whether the cart was reloaded.
    pub async fn handle_storage_event(&mut self, event: &StorageEvent) -> AppResult<bool> {
        if !event.affects(CART_KEY) {
            debug!(key = ?event.key, "Ignoring storage event");
            return Ok(false);
        }

        let outcome = self.cart.load().await?;
        self.render();
        self.update_badge().await?;

        debug!(key = ?event.key, ?outcome, "Cart reloaded from storage event");
        Ok(true)
    }

    /// Handles every event already queued. Returns how many reloaded the cart.
    pub async fn sync_pending(&mut self) -> AppResult<usize> {
        let mut reloads = 0;
        while let Some(event) = self.events.try_recv() {
            if self.handle_storage_event(&event).await? {
                reloads += 1;
            }
        }
        Ok(reloads)
    }

    /// Waits for the next event and handles it.
    ///
    /// Returns `Ok(false)` once the storage has been dropped.
    pub async fn sync_next(&mut self) -> AppResult<bool> {
        match self.events.recv().await {
            Some(event) => {
                self.handle_storage_event(&event).await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut P {
        &mut self.page
    }

    pub fn cart(&self) -> &CartStore<S> {
        &self.cart
    }

    pub fn menu(&self) -> &MenuBoard {
        &self.menu
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    /// Reloads the cart from storage without touching the page.
    pub async fn reload(&mut self) -> AppResult<LoadOutcome> {
        self.cart.load().await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
