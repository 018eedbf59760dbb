//! # State Module
//!
//! In-memory views of the shopper's cart and wishlist.
//!
//! Each command loads state from the local store, applies one mutation and
//! writes it back. The types here own the mutation rules; they never touch
//! storage themselves.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  LocalStore ──load──► Cart / Wishlist ──mutate──► LocalStore (save)    │
//! │                                                                         │
//! │  ┌──────────────────────┐        ┌──────────────────────┐              │
//! │  │        Cart          │        │      Wishlist        │              │
//! │  │  Vec<CartLineItem>   │◄───────│  Vec<product id>     │              │
//! │  │  add / set / inc /   │ move-  │  add / remove /      │              │
//! │  │  dec / remove / clear│ to-cart│  toggle / clear      │              │
//! │  └──────────────────────┘        └──────────────────────┘              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;
mod wishlist;

pub use cart::Cart;
pub use wishlist::Wishlist;
