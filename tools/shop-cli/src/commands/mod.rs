//! CLI command implementations.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;

use clap::{Args, Subcommand};
use shop_commerce::catalog::SortOption;

/// Arguments for the catalog command.
#[derive(Args)]
pub struct CatalogArgs {
    #[command(subcommand)]
    pub command: CatalogCommand,
}

#[derive(Subcommand)]
pub enum CatalogCommand {
    /// List products.
    List {
        /// Only show this category ("all" shows every category).
        #[arg(long)]
        category: Option<String>,

        /// Match name, brand or category.
        #[arg(short, long)]
        search: Option<String>,

        /// Sort order: default, price-low, price-high, name, rating.
        #[arg(long, default_value = "default")]
        sort: SortOption,
    },
    /// Show details for a product.
    Show {
        /// Product ID.
        id: String,
    },
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartCommand>,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Show cart lines and totals.
    Show,
    /// Add a product to the cart.
    Add {
        /// Product ID.
        id: String,

        /// Units to add.
        #[arg(short, long, default_value = "1", allow_hyphen_values = true)]
        quantity: String,
    },
    /// Remove a product from the cart.
    Remove {
        /// Product ID.
        id: String,
    },
    /// Set a line's quantity (zero or less removes it).
    Set {
        /// Product ID.
        id: String,

        /// New quantity.
        #[arg(allow_hyphen_values = true)]
        quantity: String,
    },
}

/// Arguments for the checkout command.
#[derive(Args)]
pub struct CheckoutArgs {
    /// Skip confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}
