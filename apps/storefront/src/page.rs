//! # Page Surface
//!
//! Everything the storefront controller can touch on a page, behind the
//! [`Page`] trait, plus [`HeadlessPage`], a recorder used by tests and the
//! command-line front end.
//!
//! ## Elements
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  navbar ☰  [themeButton 🌙]                          🛒 cartCount: 3    │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │  menuContainer (grid / grid4 / grid6 / list)                            │
//! │   ┌────────────┐ ┌────────────┐ ┌────────────┐                          │
//! │   │ food-card  │ │ food-card  │ │ food-card  │                          │
//! │   └────────────┘ └────────────┘ └────────────┘                          │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │  cart-items                                                             │
//! │   Burger ($5.00) × 2   [Remove]                                         │
//! │  subtotal  delivery  total        eta: "27 min"   ( ) Cash  ( ) Card    │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │  toast: "Burger added to cart!"                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Pages differ in which elements they carry. The controller checks
//! [`Page::has`] first and skips any update whose target is missing.

use foodcart_core::menu::{Layout, LayoutTransition, MenuBoard, MenuCard};
use foodcart_core::render::CartRowView;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::time::Duration;

// =============================================================================
// Element
// =============================================================================

/// An addressable element of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Element {
    CartItems,
    Subtotal,
    Delivery,
    Total,
    Eta,
    CartCount,
    ThemeButton,
    Navbar,
    Menu,
    Toast,
}

impl Element {
    /// Every element, in page order.
    pub const ALL: [Element; 10] = [
        Element::Navbar,
        Element::ThemeButton,
        Element::CartCount,
        Element::Menu,
        Element::CartItems,
        Element::Subtotal,
        Element::Delivery,
        Element::Total,
        Element::Eta,
        Element::Toast,
    ];

    /// DOM id of the element.
    pub const fn dom_id(&self) -> &'static str {
        match self {
            Element::CartItems => "cart-items",
            Element::Subtotal => "subtotal",
            Element::Delivery => "delivery",
            Element::Total => "total",
            Element::Eta => "eta",
            Element::CartCount => "cartCount",
            Element::ThemeButton => "themeButton",
            Element::Navbar => "navbar",
            Element::Menu => "menuContainer",
            Element::Toast => "toast",
        }
    }
}

// =============================================================================
// Page Trait
// =============================================================================

/// The page surface driven by the storefront controller.
///
/// All effects are synchronous; storage I/O happens before they are applied.
pub trait Page {
    /// Whether the element exists on this page.
    fn has(&self, element: Element) -> bool;

    /// Replaces the element's text content.
    fn set_text(&mut self, element: Element, text: &str);

    /// Current text content, if the element exists.
    fn text(&self, element: Element) -> Option<String>;

    /// Replaces the whole cart listing.
    fn replace_cart_rows(&mut self, rows: &[CartRowView]);

    /// Checked payment radio value, if any.
    fn selected_payment(&self) -> Option<String>;

    /// Shows a transient notification for `duration`.
    fn show_toast(&mut self, message: &str, duration: Duration);

    /// Blocking alert.
    fn alert(&mut self, message: &str);

    fn navigate(&mut self, path: &str);

    /// Adds or removes the `dark` class on the body.
    fn set_dark(&mut self, dark: bool);

    /// Toggles the navbar's `active` class; returns the new state.
    fn toggle_nav(&mut self) -> bool;

    /// Redraws the food cards. `transition` is set when the layout changed.
    fn render_menu(&mut self, board: &MenuBoard, transition: Option<LayoutTransition>);
}

// =============================================================================
// Headless Page
// =============================================================================

/// A toast as it was shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    pub message: String,
    pub duration: Duration,
}

/// In-memory page that records every effect.
#[derive(Debug, Clone, Default)]
pub struct HeadlessPage {
    elements: HashSet<Element>,
    texts: HashMap<Element, String>,
    payment: Option<String>,
    cart_rows: Vec<CartRowView>,
    toasts: Vec<Toast>,
    alerts: Vec<String>,
    navigations: Vec<String>,
    dark: bool,
    nav_active: bool,
    menu: Vec<MenuCard>,
    layout: Layout,
    transitions: Vec<LayoutTransition>,
}

impl HeadlessPage {
    /// A page with no elements at all.
    pub fn new() -> Self {
        HeadlessPage::default()
    }

    /// A page carrying every element.
    pub fn full() -> Self {
        Element::ALL
            .iter()
            .fold(HeadlessPage::new(), |page, element| page.with(*element))
    }

    /// The cart page: listing, totals, ETA, badge, theme button, toast.
    pub fn cart_page() -> Self {
        HeadlessPage::full().without(Element::Menu)
    }

    /// The menu page: cards, badge, navbar, theme button, toast.
    pub fn menu_page() -> Self {
        [
            Element::CartItems,
            Element::Subtotal,
            Element::Delivery,
            Element::Total,
            Element::Eta,
        ]
        .iter()
        .fold(HeadlessPage::full(), |page, element| page.without(*element))
    }

    pub fn with(mut self, element: Element) -> Self {
        self.elements.insert(element);
        self
    }

    pub fn without(mut self, element: Element) -> Self {
        self.elements.remove(&element);
        self.texts.remove(&element);
        self
    }

    /// Checks a payment radio.
    pub fn with_payment(mut self, method: impl Into<String>) -> Self {
        self.payment = Some(method.into());
        self
    }

    pub fn select_payment(&mut self, method: Option<String>) {
        self.payment = method;
    }

    pub fn cart_rows(&self) -> &[CartRowView] {
        &self.cart_rows
    }

    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    pub fn navigations(&self) -> &[String] {
        &self.navigations
    }

    pub fn is_dark(&self) -> bool {
        self.dark
    }

    pub fn nav_active(&self) -> bool {
        self.nav_active
    }

    /// Cards as last rendered, in display order.
    pub fn menu(&self) -> &[MenuCard] {
        &self.menu
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn transitions(&self) -> &[LayoutTransition] {
        &self.transitions
    }
}

impl Page for HeadlessPage {
    fn has(&self, element: Element) -> bool {
        self.elements.contains(&element)
    }

    fn set_text(&mut self, element: Element, text: &str) {
        if self.has(element) {
            self.texts.insert(element, text.to_string());
        }
    }

    fn text(&self, element: Element) -> Option<String> {
        if !self.has(element) {
            return None;
        }
        Some(self.texts.get(&element).cloned().unwrap_or_default())
    }

    fn replace_cart_rows(&mut self, rows: &[CartRowView]) {
        if self.has(Element::CartItems) {
            self.cart_rows = rows.to_vec();
        }
    }

    fn selected_payment(&self) -> Option<String> {
        self.payment.clone()
    }

    fn show_toast(&mut self, message: &str, duration: Duration) {
        if self.has(Element::Toast) {
            self.texts.insert(Element::Toast, message.to_string());
            self.toasts.push(Toast {
                message: message.to_string(),
                duration,
            });
        }
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }

    fn navigate(&mut self, path: &str) {
        self.navigations.push(path.to_string());
    }

    fn set_dark(&mut self, dark: bool) {
        self.dark = dark;
    }

    fn toggle_nav(&mut self) -> bool {
        if self.has(Element::Navbar) {
            self.nav_active = !self.nav_active;
        }
        self.nav_active
    }

    fn render_menu(&mut self, board: &MenuBoard, transition: Option<LayoutTransition>) {
        if !self.has(Element::Menu) {
            return;
        }
        self.menu = board.cards().to_vec();
        self.layout = board.layout();
        if let Some(transition) = transition {
            self.transitions.push(transition);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_elements_ignore_updates() {
        let mut page = HeadlessPage::new().with(Element::Total);
        page.set_text(Element::Subtotal, "$1.00");
        page.set_text(Element::Total, "$3.00");
        page.show_toast("hello", Duration::from_secs(2));

        assert_eq!(page.text(Element::Subtotal), None);
        assert_eq!(page.text(Element::Total).as_deref(), Some("$3.00"));
        assert!(page.toasts().is_empty());
    }

    #[test]
    fn test_page_presets() {
        let cart = HeadlessPage::cart_page();
        assert!(cart.has(Element::CartItems));
        assert!(!cart.has(Element::Menu));

        let menu = HeadlessPage::menu_page();
        assert!(menu.has(Element::Menu));
        assert!(menu.has(Element::CartCount));
        assert!(!menu.has(Element::Eta));
    }

    #[test]
    fn test_present_element_starts_blank() {
        let page = HeadlessPage::new().with(Element::Eta);
        assert_eq!(page.text(Element::Eta).as_deref(), Some(""));
    }

    #[test]
    fn test_dom_ids() {
        assert_eq!(Element::CartItems.dom_id(), "cart-items");
        assert_eq!(Element::Menu.dom_id(), "menuContainer");
    }
}
