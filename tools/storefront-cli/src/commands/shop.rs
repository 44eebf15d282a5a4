//! Interactive storefront session.

use std::future::Future;
use std::io::{IsTerminal, Write};

use anyhow::{Context as _, Result};
use clap::{CommandFactory, Parser, Subcommand};
use console::style;
use dialoguer::Confirm;
use storefront_commerce::ProductId;
use storefront_data::{CatalogApi, InventoryApi};
use storefront_router::RouteTable;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use super::ShopArgs;
use crate::context::Context;
use crate::output::Output;
use crate::session::{Session, SessionError};
use crate::views::render_screen;

/// One line typed at the shop prompt.
#[derive(Parser, Debug, PartialEq)]
#[command(
    name = "shop",
    no_binary_name = true,
    disable_help_subcommand = true,
    disable_help_flag = true,
    disable_version_flag = true
)]
struct ShellLine {
    #[command(subcommand)]
    command: ShellCommand,
}

#[derive(Subcommand, Debug, PartialEq)]
enum ShellCommand {
    /// Go to a location, e.g. `/cart` or `/products/42`. A bare `/...` works too.
    Open { location: String },
    /// Show the product list.
    #[command(alias = "ls")]
    List,
    /// Next list page.
    Next,
    /// Previous list page.
    Prev,
    /// Open the n-th product of the list page.
    View { n: usize },
    /// Add the product being viewed to the cart.
    Add,
    /// Remove a product from the cart.
    #[command(alias = "rm")]
    Remove { id: String },
    /// Empty the cart.
    Clear,
    /// Show the cart.
    Cart,
    /// Buy everything in the cart.
    Checkout,
    /// Show this help.
    Help,
    /// Leave the shop.
    #[command(aliases = ["exit", "q"])]
    Quit,
}

/// What the loop does after a command.
enum Step {
    Render,
    Stay,
    Quit,
}

struct ShellOptions {
    interactive: bool,
    assume_yes: bool,
}

/// Run the shop command.
pub async fn run(args: ShopArgs, ctx: &Context) -> Result<()> {
    let mut session = Session::new(
        ctx.catalog(),
        ctx.inventory(),
        RouteTable::storefront().context("Invalid route table")?,
        ctx.config.page_size(),
        ctx.config.shop.currency,
    );
    let options = ShellOptions {
        interactive: std::io::stdin().is_terminal(),
        assume_yes: args.yes,
    };

    let start = if args.page > 1 {
        format!("/?page={}", args.page)
    } else {
        "/".to_string()
    };
    let step = execute(&mut session, ShellCommand::Open { location: start }, &options, &ctx.output).await?;
    finish(&mut session, step, &ctx.output);
    if options.interactive {
        ctx.output.info("Type `help` for commands.");
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        if options.interactive {
            prompt(&session)?;
        }
        let Some(line) = lines.next_line().await.context("Failed to read input")? else {
            break;
        };

        let command = match parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                ctx.output.warn(&message);
                continue;
            }
        };
        debug!(?command, "shell command");

        let step = execute(&mut session, command, &options, &ctx.output).await?;
        if matches!(step, Step::Quit) {
            break;
        }
        finish(&mut session, step, &ctx.output);
    }

    Ok(())
}

/// Parse a prompt line. `Ok(None)` for a blank line, `Err` with a message
/// for anything unrecognised.
fn parse_line(line: &str) -> Result<Option<ShellCommand>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    if line.starts_with('/') {
        return Ok(Some(ShellCommand::Open {
            location: line.to_string(),
        }));
    }

    ShellLine::try_parse_from(line.split_whitespace())
        .map(|parsed| Some(parsed.command))
        .map_err(|e| {
            let rendered = e.to_string();
            let first = rendered.lines().next().unwrap_or_default();
            format!("{} (type `help` for commands)", first.trim_start_matches("error: "))
        })
}

async fn execute<C: CatalogApi, I: InventoryApi>(
    session: &mut Session<C, I>,
    command: ShellCommand,
    options: &ShellOptions,
    output: &Output,
) -> Result<Step> {
    if command == ShellCommand::Checkout
        && !session.cart().is_empty()
        && !confirm_checkout(session, options, output)?
    {
        output.warn("Checkout cancelled");
        return Ok(Step::Stay);
    }

    let outcome: Result<Step, SessionError> = match command {
        ShellCommand::Open { location } => {
            with_spinner(output, "Loading...", session.navigate(&location))
                .await
                .map(|_| Step::Render)
        }
        ShellCommand::List => with_spinner(output, "Loading products...", session.list())
            .await
            .map(|_| Step::Render),
        ShellCommand::Next => with_spinner(output, "Loading products...", session.next_page())
            .await
            .map(|_| Step::Render),
        ShellCommand::Prev => with_spinner(output, "Loading products...", session.prev_page())
            .await
            .map(|_| Step::Render),
        ShellCommand::View { n } => with_spinner(output, "Loading product...", session.view(n))
            .await
            .map(|_| Step::Render),
        ShellCommand::Add => session.add_current().map(|_| Step::Render),
        ShellCommand::Remove { id } => {
            session.remove(&ProductId::new(id));
            Ok(Step::Stay)
        }
        ShellCommand::Clear => {
            session.clear();
            Ok(Step::Stay)
        }
        ShellCommand::Cart => session.navigate("/cart").await.map(|_| Step::Render),
        ShellCommand::Checkout => {
            with_spinner(output, "Confirming purchase...", session.checkout())
                .await
                .map(|_| Step::Render)
        }
        ShellCommand::Help => {
            output.view(&ShellLine::command().render_help().to_string());
            Ok(Step::Stay)
        }
        ShellCommand::Quit => Ok(Step::Quit),
    };

    Ok(outcome.unwrap_or_else(|e| {
        output.notice(&e.to_notice());
        Step::Stay
    }))
}

/// Render the screen if it changed, then flush pending notices.
fn finish<C: CatalogApi, I: InventoryApi>(session: &mut Session<C, I>, step: Step, output: &Output) {
    if matches!(step, Step::Render) {
        output.view(&render_screen(
            session.screen(),
            session.cart(),
            session.currency(),
        ));
    }
    for notice in session.take_notices() {
        output.notice(&notice);
    }
}

fn confirm_checkout<C: CatalogApi, I: InventoryApi>(
    session: &Session<C, I>,
    options: &ShellOptions,
    output: &Output,
) -> Result<bool> {
    if options.assume_yes || !options.interactive {
        return Ok(true);
    }

    let cart = session.cart();
    output.view(&crate::views::render_cart(cart));
    Ok(Confirm::new()
        .with_prompt(format!(
            "Buy {} items for {}?",
            cart.item_count(),
            cart.total_price().display()
        ))
        .default(false)
        .interact()?)
}

async fn with_spinner<T>(output: &Output, msg: &str, fut: impl Future<Output = T>) -> T {
    let spinner = output.spinner(msg);
    let result = fut.await;
    spinner.finish_and_clear();
    result
}

fn prompt<C: CatalogApi, I: InventoryApi>(session: &Session<C, I>) -> Result<()> {
    let cart = session.cart();
    print!(
        "{} {} ",
        style(session.location()).cyan(),
        style(format!("[cart: {}]>", cart.item_count())).dim()
    );
    std::io::stdout().flush().context("Failed to write prompt")
}
