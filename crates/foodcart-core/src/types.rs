//! # Domain Types
//!
//! Small value types shared by the cart, the menu and the page controller.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │     ItemId      │   │  PaymentMethod  │   │      Theme      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  "p1", "7"      │   │  "Cash" default │   │  Light (default)│       │
//! │  │  string/number  │   │  free text      │   │  Dark           │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::DEFAULT_PAYMENT_METHOD;

// =============================================================================
// Item Identifier
// =============================================================================

/// Product identifier of a cart line.
///
/// Food cards carry database ids that end up in the payload either as JSON
/// numbers or strings; both decode to the same `ItemId`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, TS)]
#[ts(export)]
pub struct ItemId(String);

impl ItemId {
    /// Creates an identifier from anything string-like.
    pub fn new(id: impl Into<String>) -> Self {
        ItemId(id.into())
    }

    /// Returns the identifier as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Checks whether the identifier is blank.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        ItemId::new(id)
    }
}

impl From<String> for ItemId {
    fn from(id: String) -> Self {
        ItemId(id)
    }
}

struct ItemIdVisitor;

impl<'de> Visitor<'de> for ItemIdVisitor {
    type Value = ItemId;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an item id as a string or integer")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<ItemId, E> {
        Ok(ItemId::new(v))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<ItemId, E> {
        Ok(ItemId(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<ItemId, E> {
        Ok(ItemId(v.to_string()))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<ItemId, E> {
        Ok(ItemId(v.to_string()))
    }
}

impl<'de> Deserialize<'de> for ItemId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ItemIdVisitor)
    }
}

// =============================================================================
// Payment Method
// =============================================================================

/// Payment method chosen on the cart page.
///
/// The page offers free-form radio values, so this is a string newtype.
/// Nothing selected means `"Cash"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PaymentMethod(String);

impl PaymentMethod {
    /// Creates a payment method from the selected radio value.
    pub fn new(method: impl Into<String>) -> Self {
        PaymentMethod(method.into())
    }

    /// Resolves an optional selection, falling back to the default.
    pub fn or_default(selected: Option<&str>) -> Self {
        Self::resolve(selected, DEFAULT_PAYMENT_METHOD)
    }

    /// Resolves an optional selection; a missing or blank one becomes
    /// `fallback`.
    pub fn resolve(selected: Option<&str>, fallback: &str) -> Self {
        match selected.map(str::trim) {
            Some(method) if !method.is_empty() => PaymentMethod::new(method),
            _ => PaymentMethod::new(fallback),
        }
    }

    /// Returns the method as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for PaymentMethod {
    fn default() -> Self {
        PaymentMethod(DEFAULT_PAYMENT_METHOD.to_string())
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// Theme
// =============================================================================

/// Page colour theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Reads a stored preference. Only `"dark"` selects the dark theme;
    /// anything else (including nothing) is light.
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            Some("dark") => Theme::Dark,
            _ => Theme::Light,
        }
    }

    /// The value persisted under the `theme` key.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// The opposite theme.
    pub const fn toggled(&self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    #[inline]
    pub const fn is_dark(&self) -> bool {
        matches!(self, Theme::Dark)
    }

    /// Icon shown on the theme button: a sun offers the way back to light.
    pub const fn button_icon(&self) -> &'static str {
        match self {
            Theme::Dark => "☀️",
            Theme::Light => "🌙",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_id_from_number_or_string() {
        let id: ItemId = serde_json::from_str("7").unwrap();
        assert_eq!(id.as_str(), "7");

        let id: ItemId = serde_json::from_str("\"p1\"").unwrap();
        assert_eq!(id.as_str(), "p1");

        assert_eq!(serde_json::to_string(&ItemId::new("p1")).unwrap(), "\"p1\"");
        assert!(serde_json::from_str::<ItemId>("[1]").is_err());
    }

    #[test]
    fn test_item_id_blank() {
        assert!(ItemId::new("  ").is_blank());
        assert!(!ItemId::new("p1").is_blank());
    }

    #[test]
    fn test_payment_method_default() {
        assert_eq!(PaymentMethod::or_default(None).as_str(), "Cash");
        assert_eq!(PaymentMethod::or_default(Some("")).as_str(), "Cash");
        assert_eq!(PaymentMethod::or_default(Some("Card")).as_str(), "Card");

        assert_eq!(PaymentMethod::resolve(Some(" "), "Card").as_str(), "Card");
        assert_eq!(PaymentMethod::resolve(None, "Card").as_str(), "Card");
        assert_eq!(PaymentMethod::resolve(Some("UPI"), "Card").as_str(), "UPI");
    }

    #[test]
    fn test_theme_from_stored() {
        assert_eq!(Theme::from_stored(Some("dark")), Theme::Dark);
        assert_eq!(Theme::from_stored(Some("light")), Theme::Light);
        assert_eq!(Theme::from_stored(Some("DARK")), Theme::Light);
        assert_eq!(Theme::from_stored(None), Theme::Light);
    }

    #[test]
    fn test_theme_toggle_and_icon() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(Theme::Dark.button_icon(), "☀️");
        assert_eq!(Theme::Light.button_icon(), "🌙");
    }
}
