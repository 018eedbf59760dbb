//! Command line grammar.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use maison_core::{Category, SortBy};

#[derive(Debug, Parser)]
#[command(name = "maison")]
#[command(about = "Maison storefront: browse the catalog, manage your cart and wishlist")]
#[command(version)]
pub struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding cart and wishlist state
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Catalog JSON document (defaults to the built-in sample catalog)
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Browse and filter the catalog
    Shop(ShopArgs),

    /// List featured products
    Featured,

    /// Show a product's details
    Product {
        /// Product slug
        slug: String,
    },

    /// Inspect or change the cart
    #[command(subcommand)]
    Cart(CartCommand),

    /// Inspect or change the wishlist
    #[command(subcommand)]
    Wishlist(WishlistCommand),

    /// Print the effective configuration
    Config,
}

#[derive(Debug, Clone, Default, Args)]
pub struct ShopArgs {
    /// Search name, description and brand
    #[arg(long)]
    pub search: Option<String>,

    /// Restrict to a category (repeatable)
    #[arg(long = "category")]
    pub categories: Vec<Category>,

    /// Restrict to a brand (repeatable, exact match)
    #[arg(long = "brand")]
    pub brands: Vec<String>,

    /// Lowest price, in currency units
    #[arg(long)]
    pub min_price: Option<f64>,

    /// Highest price, in currency units
    #[arg(long)]
    pub max_price: Option<f64>,

    /// Hide out-of-stock products
    #[arg(long)]
    pub in_stock: bool,

    /// price-asc, price-desc, rating, newest or popular
    #[arg(long, default_value_t = SortBy::Popular)]
    pub sort: SortBy,

    /// Print matching products as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Subcommand)]
pub enum CartCommand {
    /// Show lines and totals
    Show {
        /// Print lines and totals as JSON
        #[arg(long)]
        json: bool,
    },

    /// Add a product to the cart
    Add {
        /// Product slug
        slug: String,

        /// Size label, one of the product's sizes
        #[arg(long)]
        size: String,

        #[arg(long, default_value_t = 1)]
        quantity: i64,
    },

    /// Add one to a line
    Inc {
        /// Line number (as shown by `cart show`) or line id
        line: String,
    },

    /// Take one from a line (never below 1)
    Dec {
        /// Line number (as shown by `cart show`) or line id
        line: String,
    },

    /// Set a line's quantity
    Set {
        /// Line number (as shown by `cart show`) or line id
        line: String,

        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },

    /// Remove a line
    Remove {
        /// Line number (as shown by `cart show`) or line id
        line: String,
    },

    /// Remove every line
    Clear,
}

#[derive(Debug, Subcommand)]
pub enum WishlistCommand {
    /// List saved products
    Show,

    /// Save a product
    Add { slug: String },

    /// Drop a saved product
    Remove { slug: String },

    /// Save or drop a product
    Toggle { slug: String },

    /// Drop every saved product
    Clear,

    /// Add a saved product to the cart and drop it from the wishlist
    MoveToCart { slug: String },
}
