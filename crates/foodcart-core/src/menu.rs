//! # Menu Module
//!
//! Food cards on the menu page: search/category filtering, sorting and the
//! grid/list layout switcher.
//!
//! ## Card State
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  MenuBoard                                                              │
//! │                                                                         │
//! │   layout: Grid4                                                         │
//! │   cards (display order):                                                │
//! │   ┌──────────────┐ ┌──────────────┐ ┌──────────────┐                    │
//! │   │ Cheeseburger │ │ Veggie Pizza │ │ French Fries │  ...               │
//! │   │ Burgers $6.99│ │ Pizza  $8.49 │ │ Sides  $3.49 │                    │
//! │   │ visible      │ │ hidden       │ │ visible      │                    │
//! │   └──────────────┘ └──────────────┘ └──────────────┘                    │
//! │                                                                         │
//! │   apply_filter ──► flips `visible`, never drops cards                   │
//! │   sort         ──► reorders, keeps `visible`                            │
//! │   set_layout   ──► changes layout only                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use ts_rs::TS;

use crate::money::Money;
use crate::types::ItemId;

/// Category value that matches every card.
pub const ALL_CATEGORIES: &str = "All";

// =============================================================================
// Menu Item
// =============================================================================

/// A food on the menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MenuItem {
    pub id: ItemId,
    pub name: String,
    pub category: String,
    #[ts(type = "number")]
    pub price: Money,
}

impl MenuItem {
    pub fn new(
        id: impl Into<ItemId>,
        name: impl Into<String>,
        category: impl Into<String>,
        price: Money,
    ) -> Self {
        MenuItem {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            price,
        }
    }
}

// =============================================================================
// Filter
// =============================================================================

/// Search box + category dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuFilter {
    search: String,
    category: String,
}

impl MenuFilter {
    /// The search text is matched case-insensitively as a substring of the
    /// card name; the category must match exactly unless it is `"All"`.
    pub fn new(search: &str, category: &str) -> Self {
        MenuFilter {
            search: search.to_lowercase(),
            category: category.to_string(),
        }
    }

    pub fn matches(&self, item: &MenuItem) -> bool {
        let matches_search = item.name.to_lowercase().contains(&self.search);
        let matches_category = self.category == ALL_CATEGORIES || item.category == self.category;
        matches_search && matches_category
    }
}

impl Default for MenuFilter {
    fn default() -> Self {
        MenuFilter::new("", ALL_CATEGORIES)
    }
}

// =============================================================================
// Sort Order
// =============================================================================

/// Menu sort selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Any unrecognised selector value: keep the current order.
    #[default]
    Unsorted,
    PriceLow,
    PriceHigh,
    Name,
}

impl SortOrder {
    fn compare(&self, a: &MenuItem, b: &MenuItem) -> Ordering {
        match self {
            SortOrder::Unsorted => Ordering::Equal,
            SortOrder::PriceLow => a.price.cmp(&b.price),
            SortOrder::PriceHigh => b.price.cmp(&a.price),
            SortOrder::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        }
    }
}

impl FromStr for SortOrder {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "price-low" => SortOrder::PriceLow,
            "price-high" => SortOrder::PriceHigh,
            "name" => SortOrder::Name,
            _ => SortOrder::Unsorted,
        })
    }
}

// =============================================================================
// Layout
// =============================================================================

/// Menu container layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// Plain grid with no column class (any unrecognised switcher value).
    #[default]
    Grid,
    Grid4,
    Grid6,
    List,
}

impl Layout {
    /// Class added to the container, if any.
    pub const fn container_class(&self) -> Option<&'static str> {
        match self {
            Layout::Grid4 => Some("grid4"),
            Layout::Grid6 => Some("grid6"),
            Layout::Grid | Layout::List => None,
        }
    }

    /// List layout stacks cards in a flex column and marks each card.
    pub const fn is_list(&self) -> bool {
        matches!(self, Layout::List)
    }
}

impl FromStr for Layout {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "grid4" => Layout::Grid4,
            "grid6" => Layout::Grid6,
            "list" => Layout::List,
            _ => Layout::Grid,
        })
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Layout::Grid => "grid",
            Layout::Grid4 => "grid4",
            Layout::Grid6 => "grid6",
            Layout::List => "list",
        };
        f.write_str(name)
    }
}

/// Timings of the layout switch animation.
///
/// ```text
///  t=0      fade-out on every card
///  t=200ms  swap layout classes
///  t=300ms  fade-out off, fade-in on
///  t=700ms  fade-in off
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutTransition {
    pub fade_out: Duration,
    pub fade_in_delay: Duration,
    pub fade_in: Duration,
}

impl Default for LayoutTransition {
    fn default() -> Self {
        LayoutTransition {
            fade_out: Duration::from_millis(200),
            fade_in_delay: Duration::from_millis(100),
            fade_in: Duration::from_millis(400),
        }
    }
}

// =============================================================================
// Menu Board
// =============================================================================

/// A card as currently shown on the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuCard {
    pub item: MenuItem,
    pub visible: bool,
}

/// Display state of the menu: card order, visibility and layout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuBoard {
    cards: Vec<MenuCard>,
    layout: Layout,
}

impl MenuBoard {
    /// All cards visible, in catalogue order, plain grid.
    pub fn new(items: impl IntoIterator<Item = MenuItem>) -> Self {
        MenuBoard {
            cards: items
                .into_iter()
                .map(|item| MenuCard {
                    item,
                    visible: true,
                })
                .collect(),
            layout: Layout::default(),
        }
    }

    /// Shows matching cards and hides the rest.
    pub fn apply_filter(&mut self, filter: &MenuFilter) {
        for card in &mut self.cards {
            card.visible = filter.matches(&card.item);
        }
    }

    /// Reorders the cards. Stable, so ties keep their current order.
    pub fn sort(&mut self, order: SortOrder) {
        self.cards.sort_by(|a, b| order.compare(&a.item, &b.item));
    }

    pub fn set_layout(&mut self, layout: Layout) {
        self.layout = layout;
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn cards(&self) -> &[MenuCard] {
        &self.cards
    }

    pub fn visible(&self) -> impl Iterator<Item = &MenuItem> {
        self.cards.iter().filter(|c| c.visible).map(|c| &c.item)
    }

    /// Looks a card up by id (hidden cards included).
    pub fn find(&self, id: &str) -> Option<&MenuItem> {
        self.cards
            .iter()
            .map(|c| &c.item)
            .find(|item| item.id.as_str() == id)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
