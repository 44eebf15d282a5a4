//! Storefront CLI - terminal storefront for the catalog and inventory services.
//!
//! Commands:
//! - `storefront shop` - Browse products, fill a cart and check out
//! - `storefront products` - Manage catalog products
//! - `storefront inventory` - Manage stock levels
//! - `storefront config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;
mod session;
mod views;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{ConfigArgs, ConfigCommand, InventoryArgs, ProductsArgs, ShopArgs};

/// Storefront CLI - browse the catalog, fill a cart, confirm purchases
#[derive(Parser)]
#[command(name = "storefront")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive shopping session
    Shop(ShopArgs),

    /// Manage catalog products
    Products(ProductsArgs),

    /// Manage inventory records
    Inventory(InventoryArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

impl Commands {
    /// `config init` must work even when the existing config file is broken.
    fn skips_config(&self) -> bool {
        matches!(
            self,
            Commands::Config(ConfigArgs {
                command: ConfigCommand::Init { .. }
            })
        )
    }
}

/// Log to stderr so views on stdout stay clean. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let loaded = if cli.command.skips_config() {
        context::Context::current_dir_only(output.clone())
    } else {
        context::Context::load(cli.config.as_deref(), output.clone())
    };
    let ctx = match loaded {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };
    ctx.output.debug(&format!(
        "catalog: {}, inventory: {}",
        ctx.config.catalog.base_url, ctx.config.inventory.base_url
    ));

    // Execute command
    let result = match cli.command {
        Commands::Shop(args) => commands::shop::run(args, &ctx).await,
        Commands::Products(args) => commands::products::run(args, &ctx).await,
        Commands::Inventory(args) => commands::inventory::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args.iter().copied()).unwrap()
    }

    #[test]
    fn test_only_config_init_skips_config() {
        assert!(parse(&["storefront", "config", "init"]).command.skips_config());
        assert!(parse(&["storefront", "--json", "config", "init", "--force"])
            .command
            .skips_config());

        assert!(!parse(&["storefront", "config", "show"]).command.skips_config());
        assert!(!parse(&["storefront", "shop"]).command.skips_config());
    }
}
