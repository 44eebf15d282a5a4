//! Configuration management commands.

use anyhow::{bail, Context as _, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::generate_default_config;
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    let config = ctx.config.redacted();

    if ctx.output.is_json() {
        ctx.output.json(&config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }
    ctx.output.kv("api_key", &config.api_key);

    ctx.output.info("[catalog]");
    ctx.output.kv("base_url", &config.catalog.base_url);

    ctx.output.info("[inventory]");
    ctx.output.kv("base_url", &config.inventory.base_url);

    ctx.output.info("[shop]");
    ctx.output.kv("page_size", &config.shop.page_size.to_string());
    ctx.output.kv("currency", config.shop.currency.code());
    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let path = ctx.cwd.join("storefront.toml");

    if path.exists() && !force {
        bail!(
            "{} already exists. Use --force to overwrite.",
            path.display()
        );
    }

    std::fs::write(&path, generate_default_config())
        .with_context(|| format!("Failed to write {}", path.display()))?;
    ctx.output
        .success(&format!("Created {}", path.display()));
    Ok(())
}
