//! CLI command implementations.

pub mod config;
pub mod inventory;
pub mod products;
pub mod shop;

use clap::{Args, Subcommand};

/// Arguments for the shop command.
#[derive(Args)]
pub struct ShopArgs {
    /// Catalog page to open first.
    #[arg(short, long, default_value = "1", value_parser = clap::value_parser!(i64).range(1..))]
    pub page: i64,

    /// Confirm purchases without asking.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the products command.
#[derive(Args)]
pub struct ProductsArgs {
    #[command(subcommand)]
    pub command: ProductsCommand,
}

#[derive(Subcommand)]
pub enum ProductsCommand {
    /// List one page of products.
    List {
        /// Page number, starting at 1.
        #[arg(short, long, default_value = "1", value_parser = clap::value_parser!(i64).range(1..))]
        page: i64,

        /// Products per page (default: from config).
        #[arg(long, value_parser = clap::value_parser!(i64).range(1..))]
        page_size: Option<i64>,
    },
    /// Show one product.
    Get {
        /// Product ID.
        id: String,
    },
    /// Create a product.
    Create {
        #[command(flatten)]
        fields: ProductFields,
    },
    /// Replace a product's fields.
    Update {
        /// Product ID.
        id: String,

        #[command(flatten)]
        fields: ProductFields,
    },
    /// Delete a product.
    Delete {
        /// Product ID.
        id: String,

        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Product fields sent on create and update.
#[derive(Args)]
pub struct ProductFields {
    /// Display name.
    #[arg(long)]
    pub name: String,

    /// Description.
    #[arg(long, default_value = "")]
    pub description: String,

    /// Unit price as a decimal number.
    #[arg(long)]
    pub price: f64,
}

/// Arguments for the inventory command.
#[derive(Args)]
pub struct InventoryArgs {
    #[command(subcommand)]
    pub command: InventoryCommand,
}

#[derive(Subcommand)]
pub enum InventoryCommand {
    /// Show the stock of a product.
    Get {
        /// Product ID.
        product_id: String,
    },
    /// Overwrite the stock of a product.
    Set {
        /// Product ID.
        product_id: String,

        /// New stock level.
        #[arg(value_parser = clap::value_parser!(i64).range(0..))]
        stock: i64,
    },
    /// Create the inventory record of a product.
    Create {
        /// Product ID.
        product_id: String,

        /// Initial stock level.
        #[arg(value_parser = clap::value_parser!(i64).range(0..))]
        stock: i64,
    },
    /// Delete the inventory record of a product.
    Delete {
        /// Product ID.
        product_id: String,

        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration.
    Show,
    /// Write a default storefront.toml.
    Init {
        /// Overwrite an existing file.
        #[arg(short, long)]
        force: bool,
    },
}

/// Ask before a destructive action. Non-interactive runs need `--yes`.
pub(crate) fn confirm(prompt: &str) -> anyhow::Result<bool> {
    use std::io::IsTerminal;

    if !std::io::stdin().is_terminal() {
        anyhow::bail!("Refusing to prompt without a terminal; pass --yes to confirm");
    }
    Ok(dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()?)
}
