//! # Storefront Configuration
//!
//! Settings resolved once at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`FOODCART_*`)
//! 2. Defaults (this file)
//!
//! Read-only after initialization, so no lock is needed.

use foodcart_core::eta::DEFAULT_ETA_MINUTES;
use foodcart_core::{
    Money, CONFIRMATION_PATH, DEFAULT_DELIVERY_FEE_CENTS, DEFAULT_ETA, DEFAULT_PAYMENT_METHOD,
    TOAST_DURATION_MS,
};
use serde::Serialize;
use std::ops::Range;
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

/// Storefront configuration.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StorefrontConfig {
    /// SQLite file override. `None` means the platform data directory.
    pub database_path: Option<PathBuf>,

    /// Flat delivery charge for a non-empty cart.
    pub delivery_fee: Money,

    /// Where a successful checkout navigates to.
    pub confirmation_path: String,

    /// Currency symbol used when formatting prices.
    pub currency_symbol: String,

    /// Payment method recorded when none is selected.
    pub default_payment: String,

    /// Delivery estimate recorded when the page shows none.
    pub default_eta: String,

    /// How long a toast stays visible.
    pub toast_duration: Duration,

    /// Window, in minutes, for the random delivery estimate.
    pub eta_window: Range<u32>,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        StorefrontConfig {
            database_path: None,
            delivery_fee: Money::from_cents(DEFAULT_DELIVERY_FEE_CENTS),
            confirmation_path: CONFIRMATION_PATH.to_string(),
            currency_symbol: "$".to_string(),
            default_payment: DEFAULT_PAYMENT_METHOD.to_string(),
            default_eta: DEFAULT_ETA.to_string(),
            toast_duration: Duration::from_millis(TOAST_DURATION_MS),
            eta_window: DEFAULT_ETA_MINUTES,
        }
    }
}

impl StorefrontConfig {
    /// Creates a config from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `FOODCART_DB_PATH`: SQLite file
    /// - `FOODCART_DELIVERY_FEE`: decimal fee, e.g. `"2.50"`
    /// - `FOODCART_CONFIRMATION_PATH`: e.g. `"/thankyou"`
    /// - `FOODCART_CURRENCY_SYMBOL`: e.g. `"£"`
    pub fn from_env() -> Self {
        StorefrontConfig::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = StorefrontConfig::default();

        if let Some(path) = lookup("FOODCART_DB_PATH") {
            config.database_path = Some(PathBuf::from(path));
        }

        if let Some(fee) = lookup("FOODCART_DELIVERY_FEE") {
            match fee.parse::<Money>() {
                Ok(fee) if !fee.is_negative() => config.delivery_fee = fee,
                _ => warn!(value = %fee, "Ignoring invalid FOODCART_DELIVERY_FEE"),
            }
        }

        if let Some(path) = lookup("FOODCART_CONFIRMATION_PATH") {
            config.confirmation_path = path;
        }

        if let Some(symbol) = lookup("FOODCART_CURRENCY_SYMBOL") {
            config.currency_symbol = symbol;
        }

        config
    }

    /// Formats an amount with the configured symbol.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let config = StorefrontConfig::default();
    /// assert_eq!(config.format_money(Money::from_cents(1234)), "$12.34");
    /// ```
    pub fn format_money(&self, amount: Money) -> String {
        amount.format_with(&self.currency_symbol)
    }
}
