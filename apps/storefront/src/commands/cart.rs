//! # Cart Commands
//!
//! Cart page handlers for the command-line front end.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ In Cart  │────►│ Checkout │────►│ Thank-you│       │
//! │  │  Cart    │     │          │     │          │     │   view   │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │                        │                                                │
//! │                   add <id>                                              │
//! │                   add <id> <name> <price>                               │
//! │                   remove <index>                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use foodcart_core::validation::{parse_cart_index, validate_price};
use foodcart_core::{AddItem, AddOutcome, Money, RemoveOutcome};
use foodcart_storage::KeyValueStorage;
use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::page::{Element, HeadlessPage, Page};
use crate::storefront::{CheckoutOutcome, Storefront};

/// `foodcart add <id> [<name> <price>]`
///
/// With only an id the item comes from the menu; otherwise the given name
/// and price are used as-is.
pub async fn add<S: KeyValueStorage>(
    storefront: &mut Storefront<S, HeadlessPage>,
    id: &str,
    name: Option<&str>,
    price: Option<&str>,
) -> AppResult<Vec<String>> {
    debug!(id, ?name, ?price, "add command");

    let outcome = match (name, price) {
        (None, None) => storefront.add_menu_item(id).await?,
        (Some(name), Some(price)) => {
            let price: Money = price.parse()?;
            if let Err(e) = validate_price(price) {
                debug!(error = %e, "Adding with an unusual price");
            }
            storefront.add_item(AddItem::new(id, name, price)).await?
        }
        _ => return Err(AppError::validation("price is required when a name is given")),
    };

    let mut lines = match outcome {
        AddOutcome::Inserted => vec!["Added a new line.".to_string()],
        AddOutcome::Incremented { quantity } => vec![format!("Quantity is now {}.", quantity)],
    };
    lines.extend(page_effects(storefront.page()));
    Ok(lines)
}

/// `foodcart remove <index>`
pub async fn remove<S: KeyValueStorage>(
    storefront: &mut Storefront<S, HeadlessPage>,
    raw_index: &str,
) -> AppResult<Vec<String>> {
    let index = parse_cart_index(raw_index)?;

    let mut lines = match storefront.remove_item(index).await? {
        RemoveOutcome::Removed(item) => vec![format!("Removed {}.", item.name)],
        RemoveOutcome::Unchanged => vec![format!("No line at index {}.", index)],
    };
    lines.extend(listing(storefront.page()));
    Ok(lines)
}

/// `foodcart cart`
pub fn show<S: KeyValueStorage>(storefront: &Storefront<S, HeadlessPage>) -> Vec<String> {
    listing(storefront.page())
}

/// `foodcart badge`
pub async fn badge<S: KeyValueStorage>(
    storefront: &mut Storefront<S, HeadlessPage>,
) -> AppResult<Vec<String>> {
    let count = storefront.update_badge().await?;
    Ok(vec![count.to_string()])
}

/// `foodcart checkout [--payment P]`
pub async fn checkout<S: KeyValueStorage>(
    storefront: &mut Storefront<S, HeadlessPage>,
    payment: Option<String>,
) -> AppResult<Vec<String>> {
    storefront.page_mut().select_payment(payment);

    let mut lines = match storefront.checkout().await? {
        CheckoutOutcome::EmptyCart => Vec::new(),
        CheckoutOutcome::Placed(receipt) => {
            let total = storefront.config().format_money(receipt.totals.total);
            vec![
                format!("Paid {} by {}.", total, receipt.payment),
                format!("Ready in {}.", receipt.eta),
            ]
        }
    };
    lines.extend(page_effects(storefront.page()));
    Ok(lines)
}

/// `foodcart confirmation`
pub async fn confirmation<S: KeyValueStorage>(
    storefront: &Storefront<S, HeadlessPage>,
) -> AppResult<Vec<String>> {
    let confirmation = storefront.confirmation().await?;

    let mut lines = vec![format!("Thank you! Your food will arrive in {}.", confirmation.eta)];
    if let Some(payment) = confirmation.payment {
        lines.push(format!("Payment: {}", payment));
    }
    Ok(lines)
}

// =============================================================================
// Output
// =============================================================================

/// Cart rows and totals as rendered on the page.
fn listing(page: &HeadlessPage) -> Vec<String> {
    if page.cart_rows().is_empty() {
        return vec!["Your cart is empty.".to_string()];
    }

    let mut lines: Vec<String> = page
        .cart_rows()
        .iter()
        .map(|row| format!("[{}] {}", row.index, row.label()))
        .collect();

    for (label, element) in [
        ("Subtotal", Element::Subtotal),
        ("Delivery", Element::Delivery),
        ("Total", Element::Total),
    ] {
        if let Some(text) = page.text(element) {
            lines.push(format!("{:<10}{:>10}", label, text));
        }
    }
    if let Some(eta) = page.text(Element::Eta) {
        lines.push(format!("ETA: {}", eta));
    }
    lines
}

/// Alerts, toasts, badge and navigation recorded on the page.
fn page_effects(page: &HeadlessPage) -> Vec<String> {
    let mut lines: Vec<String> = page.alerts().iter().map(|a| format!("! {}", a)).collect();
    lines.extend(page.toasts().iter().map(|t| format!("* {}", t.message)));
    if let Some(count) = page.text(Element::CartCount) {
        lines.push(format!("Cart: {}", count));
    }
    lines.extend(page.navigations().iter().map(|path| format!("-> {}", path)));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::menu::seeded_menu;
    use crate::state::StorefrontConfig;
    use foodcart_storage::MemoryStorage;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    async fn open(storage: MemoryStorage) -> Storefront<MemoryStorage, HeadlessPage> {
        Storefront::open(
            storage,
            HeadlessPage::full(),
            StorefrontConfig::default(),
            seeded_menu(),
            &mut StdRng::seed_from_u64(11),
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_add_from_menu_and_custom() {
        let mut storefront = open(MemoryStorage::new()).await;

        let lines = add(&mut storefront, "2", None, None).await.unwrap();
        assert_eq!(lines[0], "Added a new line.");
        assert!(lines.contains(&"* Veggie Pizza added to cart!".to_string()));
        assert!(lines.contains(&"Cart: 1".to_string()));

        let lines = add(&mut storefront, "p9", Some("Lassi"), Some("$1.50")).await.unwrap();
        assert_eq!(lines[0], "Added a new line.");
        assert_eq!(storefront.totals().subtotal, Money::from_cents(999));
    }

    #[tokio::test]
    async fn test_add_rejects_bad_input() {
        let mut storefront = open(MemoryStorage::new()).await;

        assert!(add(&mut storefront, "p9", Some("Lassi"), None).await.is_err());
        assert!(add(&mut storefront, "p9", Some("Lassi"), Some("abc")).await.is_err());
        assert!(add(&mut storefront, "404", None, None).await.is_err());
        assert!(storefront.cart().is_empty());
    }

    #[tokio::test]
    async fn test_remove_command() {
        let mut storefront = open(MemoryStorage::new()).await;
        add(&mut storefront, "5", None, None).await.unwrap();

        let lines = remove(&mut storefront, "3").await.unwrap();
        assert_eq!(lines[0], "No line at index 3.");

        let lines = remove(&mut storefront, "0").await.unwrap();
        assert_eq!(lines, vec!["Removed French Fries.", "Your cart is empty."]);

        assert!(remove(&mut storefront, "-1").await.is_err());
    }

    #[tokio::test]
    async fn test_checkout_command() {
        let storage = MemoryStorage::new();
        let mut storefront = open(storage.open_view()).await;

        let lines = checkout(&mut storefront, None).await.unwrap();
        assert_eq!(lines[0], "! Your cart is empty!");

        add(&mut storefront, "1", None, None).await.unwrap();
        let lines = checkout(&mut storefront, Some("Card".to_string())).await.unwrap();
        assert_eq!(lines[0], "Paid $8.99 by Card.");
        assert!(lines.contains(&"-> /thankyou".to_string()));

        let thanks = open(storage).await;
        let lines = confirmation(&thanks).await.unwrap();
        assert!(lines[0].starts_with("Thank you! Your food will arrive in "));
        assert_eq!(lines[1], "Payment: Card");
    }

    #[tokio::test]
    async fn test_cart_listing() {
        let mut storefront = open(MemoryStorage::new()).await;
        assert_eq!(show(&storefront), vec!["Your cart is empty."]);

        add(&mut storefront, "7", None, None).await.unwrap();
        storefront.render();
        let lines = show(&storefront);
        assert_eq!(lines[0], "[0] Beef Burger ($4.00) × 1");
        assert_eq!(lines[3], format!("{:<10}{:>10}", "Total", "$6.00"));

        assert_eq!(badge(&mut storefront).await.unwrap(), vec!["1"]);
    }
}
