//! # Cart Commands
//!
//! Cart display and line mutation.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐   cart add     ┌──────────┐                              │
//! │  │  Empty   │───────────────►│ In Cart  │◄──── cart inc / dec / set    │
//! │  │  Cart    │◄───────────────│          │                              │
//! │  └──────────┘   cart clear   └──────────┘                              │
//! │        ▲        (or removing       │                                    │
//! │        │         the last line)    │ wishlist move-to-cart            │
//! │        └───────────────────────────┘                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Lines are addressed by their position in `cart show` (1-based) or by
//! line id.

use serde::Serialize;
use tracing::{debug, info};

use maison_core::{CartLineItem, CoreError, PriceBreakdown};
use maison_store::KeyValueStore;

use super::Session;
use crate::config::AppConfig;
use crate::error::AppResult;
use crate::state::Cart;

/// Cart response including lines and totals, for `--json`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView<'a> {
    pub lines: &'a [CartLineItem],
    pub totals: PriceBreakdown,
}

/// Shows the cart with its order summary.
///
/// ```text
/// Your cart: 2 lines, 3 items
///   1. Premium Leather Jacket        M / Black        x2     $1299.00    $2598.00
///   2. Silk Scarf                    One Size / Multi x1      $199.00     $199.00
///
///   Subtotal                $2797.00
///   Shipping                FREE
///   Tax (8.00%)              $223.76
///   Total                   $3020.76
/// ```
pub fn show<S: KeyValueStore>(session: &Session<S>, json: bool) -> AppResult<String> {
    let cart = session.load_cart()?;
    let pricing = session.config.pricing();
    let totals = cart.totals(&pricing)?;

    if json {
        let view = CartView {
            lines: cart.lines(),
            totals,
        };
        return Ok(serde_json::to_string_pretty(&view)?);
    }

    if cart.is_empty() {
        return Ok("Your cart is empty.".to_string());
    }

    let config = &session.config;
    let mut out = format!(
        "Your cart: {} {}, {} {}\n",
        totals.line_count,
        if totals.line_count == 1 { "line" } else { "lines" },
        totals.total_quantity,
        if totals.total_quantity == 1 { "item" } else { "items" }
    );

    for (index, line) in cart.lines().iter().enumerate() {
        out.push_str(&format!(
            "  {}. {:<30} {:<16} x{:<4} {:>10}  {:>10}\n",
            index + 1,
            line.product.name,
            format!("{} / {}", line.size, line.color),
            line.quantity,
            config.format_currency(line.unit_price()),
            config.format_currency(line.line_total())
        ));
    }

    out.push('\n');
    out.push_str(&summary_row("Subtotal", &config.format_currency(totals.subtotal)));
    if totals.has_free_shipping() {
        out.push_str(&summary_row("Shipping", "FREE"));
    } else {
        out.push_str(&format!(
            "  {:<22} {:>10}  (add {} more for free shipping)\n",
            "Shipping",
            config.format_currency(totals.shipping),
            config.format_currency(totals.remaining_for_free_shipping(&pricing))
        ));
    }
    out.push_str(&summary_row(
        &format!("Tax ({:.2}%)", pricing.tax_rate.percentage()),
        &config.format_currency(totals.tax),
    ));
    out.push_str(&format!("  {:<22} {:>10}", "Total", config.format_currency(totals.total)));

    Ok(out)
}

/// Adds a product in the given size, using the product's color.
pub fn add<S: KeyValueStore>(
    session: &Session<S>,
    slug: &str,
    size: &str,
    quantity: i64,
) -> AppResult<String> {
    let product = session.product(slug)?;
    let mut cart = session.load_cart()?;

    let line = cart.add(product, size, &product.color, quantity)?;
    let message = format!(
        "Added {} x {} ({} / {}). Line quantity: {}",
        quantity, product.name, line.size, line.color, line.quantity
    );
    info!(product = %product.id, size = %line.size, quantity, "Added to cart");

    session.save_cart(&cart)?;
    Ok(message)
}

pub fn increment<S: KeyValueStore>(session: &Session<S>, reference: &str) -> AppResult<String> {
    mutate(session, reference, |cart, id| cart.increment(id).map(describe))
}

pub fn decrement<S: KeyValueStore>(session: &Session<S>, reference: &str) -> AppResult<String> {
    mutate(session, reference, |cart, id| cart.decrement(id).map(describe))
}

/// Sets a line's quantity. Values below 1 become 1.
pub fn set_quantity<S: KeyValueStore>(
    session: &Session<S>,
    reference: &str,
    quantity: i64,
) -> AppResult<String> {
    mutate(session, reference, |cart, id| {
        cart.set_quantity(id, quantity).map(describe)
    })
}

pub fn remove<S: KeyValueStore>(session: &Session<S>, reference: &str) -> AppResult<String> {
    mutate(session, reference, |cart, id| {
        cart.remove(id)
            .map(|line| format!("Removed {} ({} / {})", line.product.name, line.size, line.color))
    })
}

pub fn clear<S: KeyValueStore>(session: &Session<S>) -> AppResult<String> {
    let mut cart = session.load_cart()?;
    let removed = cart.line_count();
    cart.clear();
    session.save_cart(&cart)?;
    info!(lines = removed, "Cleared cart");
    Ok("Your cart is empty.".to_string())
}

/// Resolves a 1-based position or a line id to a line id.
pub fn resolve_line(cart: &Cart, reference: &str) -> AppResult<String> {
    let reference = reference.trim();

    if let Some(line) = cart.line(reference) {
        return Ok(line.id.clone());
    }

    reference
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| cart.lines().get(i))
        .map(|line| line.id.clone())
        .ok_or_else(|| CoreError::LineNotFound(reference.to_string()).into())
}

/// Load, resolve the line, apply one mutation, save.
fn mutate<S, F>(session: &Session<S>, reference: &str, f: F) -> AppResult<String>
where
    S: KeyValueStore,
    F: FnOnce(&mut Cart, &str) -> Result<String, CoreError>,
{
    let mut cart = session.load_cart()?;
    let line_id = resolve_line(&cart, reference)?;
    let message = f(&mut cart, &line_id)?;
    session.save_cart(&cart)?;
    debug!(line = %line_id, "Cart updated");
    Ok(message)
}

fn summary_row(label: &str, amount: &str) -> String {
    format!("  {:<22} {:>10}\n", label, amount)
}

fn describe(line: &CartLineItem) -> String {
    format!(
        "{} ({} / {}): quantity {}",
        line.product.name, line.size, line.color, line.quantity
    )
}

/// Formats the order summary as a single line.
pub(crate) fn summary_line(config: &AppConfig, totals: &PriceBreakdown) -> String {
    format!(
        "Subtotal {}, shipping {}, tax {}, total {}",
        config.format_currency(totals.subtotal),
        config.format_currency(totals.shipping),
        config.format_currency(totals.tax),
        config.format_currency(totals.total)
    )
}
