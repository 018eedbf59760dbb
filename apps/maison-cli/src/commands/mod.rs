//! # Commands Module
//!
//! One function per CLI command. Each takes the [`Session`] plus its
//! arguments and returns the text to print.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (Session, dispatch, shared rendering)
//! ├── shop.rs      ◄─── Catalog browsing, featured list
//! ├── product.rs   ◄─── Product detail view
//! ├── cart.rs      ◄─── Cart line mutation and totals
//! ├── wishlist.rs  ◄─── Wishlist management
//! └── config.rs    ◄─── Effective configuration
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  maison cart add premium-leather-jacket --size M                       │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  dispatch(&session, Command::Cart(CartCommand::Add { .. }))            │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  cart::add()                                                            │
//! │    1. Look up product by slug in the catalog                            │
//! │    2. Load cart from the local store                                    │
//! │    3. Cart::add (size, quantity and merge rules)                        │
//! │    4. Save cart                                                         │
//! │    5. Render the updated line                                           │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  AppResult<String> ──► stdout, or error[CODE] on stderr                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cart;
pub mod config;
pub mod product;
pub mod shop;
pub mod wishlist;

use maison_core::{Catalog, CoreError, Product};
use maison_store::{KeyValueStore, LocalStore};

use crate::cli::{CartCommand, Command, WishlistCommand};
use crate::config::AppConfig;
use crate::error::AppResult;
use crate::state::{Cart, Wishlist};

/// Everything a command needs: configuration, the loaded catalog and the
/// shopper's local store.
pub struct Session<S: KeyValueStore> {
    pub config: AppConfig,
    pub catalog: Catalog,
    pub store: LocalStore<S>,
}

impl<S: KeyValueStore> Session<S> {
    pub fn new(config: AppConfig, catalog: Catalog, store: LocalStore<S>) -> Self {
        Session {
            config,
            catalog,
            store,
        }
    }

    /// Looks up a product by slug.
    pub fn product(&self, slug: &str) -> AppResult<&Product> {
        self.catalog
            .find_by_slug(slug.trim())
            .ok_or_else(|| CoreError::ProductNotFound(slug.to_string()).into())
    }

    pub fn load_cart(&self) -> AppResult<Cart> {
        Ok(Cart::from_lines(self.store.cart().load()?))
    }

    pub fn save_cart(&self, cart: &Cart) -> AppResult<()> {
        Ok(self.store.cart().save(cart.lines())?)
    }

    pub fn load_wishlist(&self) -> AppResult<Wishlist> {
        Ok(Wishlist::from_ids(self.store.wishlist().load()?))
    }

    pub fn save_wishlist(&self, wishlist: &Wishlist) -> AppResult<()> {
        Ok(self.store.wishlist().save(wishlist.ids())?)
    }
}

/// Routes a parsed command to its handler.
pub fn dispatch<S: KeyValueStore>(session: &Session<S>, command: Command) -> AppResult<String> {
    match command {
        Command::Shop(args) => shop::shop(session, &args),
        Command::Featured => shop::featured(session),
        Command::Product { slug } => product::show(session, &slug),
        Command::Cart(cmd) => match cmd {
            CartCommand::Show { json } => cart::show(session, json),
            CartCommand::Add {
                slug,
                size,
                quantity,
            } => cart::add(session, &slug, &size, quantity),
            CartCommand::Inc { line } => cart::increment(session, &line),
            CartCommand::Dec { line } => cart::decrement(session, &line),
            CartCommand::Set { line, quantity } => cart::set_quantity(session, &line, quantity),
            CartCommand::Remove { line } => cart::remove(session, &line),
            CartCommand::Clear => cart::clear(session),
        },
        Command::Wishlist(cmd) => match cmd {
            WishlistCommand::Show => wishlist::show(session),
            WishlistCommand::Add { slug } => wishlist::add(session, &slug),
            WishlistCommand::Remove { slug } => wishlist::remove(session, &slug),
            WishlistCommand::Toggle { slug } => wishlist::toggle(session, &slug),
            WishlistCommand::Clear => wishlist::clear(session),
            WishlistCommand::MoveToCart { slug } => wishlist::move_to_cart(session, &slug),
        },
        Command::Config => config::show(session),
    }
}

/// One-line listing entry shared by the shop, featured and wishlist views.
///
/// ```text
/// premium-leather-jacket         Premium Leather Jacket      Urban Luxe    $1299.00  $1599.00 -19%  4.8/5
/// ```
pub(crate) fn product_row(config: &AppConfig, product: &Product) -> String {
    let mut row = format!(
        "{:<30} {:<30} {:<15} {:>10}",
        product.slug,
        product.name,
        product.brand,
        config.format_currency(product.price)
    );

    if let (Some(original), Some(pct)) = (product.original_price, product.discount_percent()) {
        row.push_str(&format!("  {} -{}%", config.format_currency(original), pct));
    }

    row.push_str(&format!("  {:.1}/5", product.rating));

    if !product.in_stock {
        row.push_str("  (out of stock)");
    }

    row
}
