//! Catalog administration commands.

use anyhow::{Context as _, Result};
use storefront_commerce::catalog::{Product, ProductDraft};
use storefront_commerce::{Money, ProductId};
use storefront_data::{CatalogApi, CatalogClient};

use super::{confirm, ProductFields, ProductsArgs, ProductsCommand};
use crate::context::Context;

/// Run the products command.
pub async fn run(args: ProductsArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog();

    match args.command {
        ProductsCommand::List { page, page_size } => {
            let page_size = page_size.unwrap_or_else(|| ctx.config.page_size());
            list_products(&catalog, page, page_size, ctx).await
        }
        ProductsCommand::Get { id } => get_product(&catalog, &ProductId::new(id), ctx).await,
        ProductsCommand::Create { fields } => create_product(&catalog, fields, ctx).await,
        ProductsCommand::Update { id, fields } => {
            update_product(&catalog, &ProductId::new(id), fields, ctx).await
        }
        ProductsCommand::Delete { id, yes } => {
            delete_product(&catalog, &ProductId::new(id), yes, ctx).await
        }
    }
}

async fn list_products(
    catalog: &CatalogClient,
    page: i64,
    page_size: i64,
    ctx: &Context,
) -> Result<()> {
    let spinner = ctx.output.spinner("Fetching products...");
    let listing = catalog.list_products(page, page_size).await;
    spinner.finish_and_clear();
    let listing = listing.context("Failed to list products")?;

    if ctx.output.is_json() {
        ctx.output.json(&listing);
        return Ok(());
    }

    let pagination = listing.pagination(page, page_size);
    match pagination.total {
        Some(total) => ctx
            .output
            .header(&format!("Products (page {page}, {total} total)")),
        None => ctx.output.header(&format!("Products (page {page})")),
    }

    if listing.is_empty() {
        ctx.output.info("No products found");
        return Ok(());
    }

    let widths = [16, 32, 12];
    ctx.output.table_row(&["ID", "NAME", "PRICE"], &widths);
    for product in &listing.items {
        let price = price_text(product.price, ctx);
        ctx.output
            .table_row(&[product.id.as_str(), &product.name, &price], &widths);
    }

    if let Some(next) = pagination.next_page() {
        ctx.output
            .debug(&format!("More products: storefront products list --page {next}"));
    }
    Ok(())
}

async fn get_product(catalog: &CatalogClient, id: &ProductId, ctx: &Context) -> Result<()> {
    let product = catalog
        .get_product(id)
        .await
        .with_context(|| format!("Failed to fetch product {id}"))?;
    print_product(&product, ctx);
    Ok(())
}

async fn create_product(catalog: &CatalogClient, fields: ProductFields, ctx: &Context) -> Result<()> {
    let draft = to_draft(fields)?;
    let product = catalog
        .create_product(&draft)
        .await
        .context("Failed to create product")?;

    ctx.output
        .success(&format!("Created product {}", product.id));
    print_product(&product, ctx);
    Ok(())
}

async fn update_product(
    catalog: &CatalogClient,
    id: &ProductId,
    fields: ProductFields,
    ctx: &Context,
) -> Result<()> {
    let draft = to_draft(fields)?;
    let updated = catalog
        .update_product(id, &draft)
        .await
        .with_context(|| format!("Failed to update product {id}"))?;

    ctx.output.success(&format!("Updated product {id}"));
    match updated {
        Some(product) => print_product(&product, ctx),
        None => print_product(
            &Product {
                id: id.clone(),
                name: draft.name,
                description: draft.description,
                price: draft.price,
            },
            ctx,
        ),
    }
    Ok(())
}

async fn delete_product(
    catalog: &CatalogClient,
    id: &ProductId,
    yes: bool,
    ctx: &Context,
) -> Result<()> {
    if !yes && !confirm(&format!("Delete product {id}?"))? {
        ctx.output.warn("Delete cancelled");
        return Ok(());
    }

    catalog
        .delete_product(id)
        .await
        .with_context(|| format!("Failed to delete product {id}"))?;
    ctx.output.success(&format!("Deleted product {id}"));
    Ok(())
}

fn to_draft(fields: ProductFields) -> Result<ProductDraft> {
    let draft = ProductDraft::new(fields.name, fields.description, fields.price);
    draft.validate()?;
    Ok(draft)
}

fn print_product(product: &Product, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(product);
        return;
    }

    ctx.output.header(&product.name);
    ctx.output.kv("id", product.id.as_str());
    ctx.output.kv("price", &price_text(product.price, ctx));
    if !product.description.is_empty() {
        ctx.output.kv("description", &product.description);
    }
}

fn price_text(price: f64, ctx: &Context) -> String {
    Money::from_decimal(price, ctx.config.shop.currency).display()
}
