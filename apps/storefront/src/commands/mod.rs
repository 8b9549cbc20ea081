//! # Commands Module
//!
//! The `foodcart` command line. Each invocation is one page load: open the
//! storefront over the store, run one handler, print what the page showed.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (argument parsing, dispatch)
//! ├── menu.rs     ◄─── Catalog, menu listing, theme, navbar
//! └── cart.rs     ◄─── add, remove, cart, badge, checkout, confirmation
//! ```
//!
//! ## Usage
//! ```bash
//! foodcart menu --search burger --sort price-low --layout list
//! foodcart add 1
//! foodcart add p9 Lassi 1.50
//! foodcart remove 0
//! foodcart checkout --payment Card
//! foodcart confirmation
//! ```

pub mod cart;
pub mod menu;

use clap::{Parser, Subcommand, ValueEnum};
use foodcart_storage::KeyValueStorage;
use rand::Rng;
use tracing::debug;

use crate::error::AppResult;
use crate::page::HeadlessPage;
use crate::state::StorefrontConfig;
use crate::storefront::Storefront;

#[derive(Debug, Parser)]
#[command(name = "foodcart")]
#[command(author, version, about = "Foodcart storefront")]
pub struct Cli {
    /// Use a throwaway in-memory store instead of the SQLite file
    #[arg(long, global = true)]
    pub memory: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List the menu
    Menu {
        /// Case-insensitive name search
        #[arg(long, default_value = "")]
        search: String,

        /// Exact category, or "All"
        #[arg(long, default_value = "All")]
        category: String,

        /// price-low, price-high or name
        #[arg(long)]
        sort: Option<String>,

        /// grid4, grid6 or list
        #[arg(long)]
        layout: Option<String>,
    },
    /// Add a menu item by id, or a custom item with name and price
    Add {
        id: String,
        name: Option<String>,
        price: Option<String>,
    },
    /// Remove the cart line at a zero-based index
    Remove {
        #[arg(allow_hyphen_values = true)]
        index: String,
    },
    /// Show the cart and totals
    Cart,
    /// Print the cart badge count
    Badge,
    /// Place the order
    Checkout {
        /// Payment method (default: Cash)
        #[arg(long)]
        payment: Option<String>,
    },
    /// Show or toggle the theme
    Theme {
        #[arg(value_enum)]
        action: Option<ThemeAction>,
    },
    /// Toggle the navbar
    Nav,
    /// Show the thank-you view
    Confirmation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThemeAction {
    Toggle,
}

/// Opens a page over `storage` and runs one command.
///
/// Returns the lines to print.
pub async fn execute<S: KeyValueStorage, R: Rng>(
    command: &Command,
    storage: S,
    config: StorefrontConfig,
    rng: &mut R,
) -> AppResult<Vec<String>> {
    debug!(?command, "Executing command");

    let mut storefront =
        Storefront::open(storage, HeadlessPage::full(), config, menu::seeded_menu(), rng).await?;

    match command {
        Command::Menu {
            search,
            category,
            sort,
            layout,
        } => Ok(menu::list(
            &mut storefront,
            search,
            category,
            sort.as_deref(),
            layout.as_deref(),
        )),
        Command::Add { id, name, price } => {
            cart::add(&mut storefront, id, name.as_deref(), price.as_deref()).await
        }
        Command::Remove { index } => cart::remove(&mut storefront, index).await,
        Command::Cart => Ok(cart::show(&storefront)),
        Command::Badge => cart::badge(&mut storefront).await,
        Command::Checkout { payment } => cart::checkout(&mut storefront, payment.clone()).await,
        Command::Theme { action } => {
            menu::theme(&mut storefront, *action == Some(ThemeAction::Toggle)).await
        }
        Command::Nav => Ok(menu::nav(&mut storefront)),
        Command::Confirmation => cart::confirmation(&storefront).await,
    }
}
