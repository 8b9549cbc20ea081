//! # Menu Commands
//!
//! The food catalog and the menu page handlers: listing with filter, sort
//! and layout, the theme button and the navbar toggle.

use foodcart_core::menu::{Layout, MenuItem, SortOrder, ALL_CATEGORIES};
use foodcart_core::Money;
use foodcart_storage::KeyValueStorage;
use std::convert::Infallible;

use crate::error::AppResult;
use crate::page::HeadlessPage;
use crate::storefront::Storefront;

/// The foods on offer: `(id, name, price in cents, category)`.
const CATALOG: [(&str, &str, i64, &str); 9] = [
    ("1", "Cheeseburger", 699, "Burgers"),
    ("2", "Veggie Pizza", 849, "Pizza"),
    ("3", "Chicken Wrap", 599, "Wraps"),
    ("4", "Pasta Alfredo", 799, "Pasta"),
    ("5", "French Fries", 349, "Sides"),
    ("6", "Chicken Biryani", 700, "Biryani"),
    ("7", "Beef Burger", 400, "Fast Food"),
    ("8", "Double Beef Burger", 1000, "Burger"),
    ("9", "Beef Wrap", 700, "Wrap"),
];

/// The menu, in catalog order.
pub fn seeded_menu() -> Vec<MenuItem> {
    CATALOG
        .iter()
        .map(|(id, name, cents, category)| {
            MenuItem::new(*id, *name, *category, Money::from_cents(*cents))
        })
        .collect()
}

/// `foodcart menu [--search Q] [--category C] [--sort S] [--layout L]`
pub fn list<S: KeyValueStorage>(
    storefront: &mut Storefront<S, HeadlessPage>,
    search: &str,
    category: &str,
    sort: Option<&str>,
    layout: Option<&str>,
) -> Vec<String> {
    let category = if category.is_empty() { ALL_CATEGORIES } else { category };
    storefront.apply_filter(search, category);

    if let Some(sort) = sort {
        let order: SortOrder = sort.parse().unwrap_or_else(|e: Infallible| match e {});
        storefront.sort_menu(order);
    }
    if let Some(layout) = layout {
        let layout: Layout = layout.parse().unwrap_or_else(|e: Infallible| match e {});
        storefront.set_layout(layout);
    }

    let symbol = storefront.config().currency_symbol.clone();
    let page = storefront.page();
    let mut lines = vec![format!("Layout: {}", page.layout())];
    lines.extend(page.menu().iter().filter(|card| card.visible).map(|card| {
        format!(
            "{:>3}  {:<20} {:<10} {:>8}",
            card.item.id,
            card.item.name,
            card.item.category,
            card.item.price.format_with(&symbol)
        )
    }));
    if lines.len() == 1 {
        lines.push("No foods match.".to_string());
    }
    lines
}

/// `foodcart theme [toggle]`
pub async fn theme<S: KeyValueStorage>(
    storefront: &mut Storefront<S, HeadlessPage>,
    toggle: bool,
) -> AppResult<Vec<String>> {
    let theme = if toggle {
        storefront.toggle_theme().await?
    } else {
        storefront.theme()
    };

    Ok(vec![format!("Theme: {} {}", theme, theme.button_icon())])
}

/// `foodcart nav`
pub fn nav<S: KeyValueStorage>(storefront: &mut Storefront<S, HeadlessPage>) -> Vec<String> {
    let open = storefront.toggle_nav();
    vec![format!("Navbar: {}", if open { "open" } else { "closed" })]
}
