//! Inventory administration commands.

use anyhow::{Context as _, Result};
use storefront_commerce::catalog::InventoryRecord;
use storefront_commerce::ProductId;
use storefront_data::{InventoryApi, InventoryClient};

use super::{confirm, InventoryArgs, InventoryCommand};
use crate::context::Context;
use crate::output::stock_badge;

/// Run the inventory command.
pub async fn run(args: InventoryArgs, ctx: &Context) -> Result<()> {
    let inventory = ctx.inventory();

    match args.command {
        InventoryCommand::Get { product_id } => {
            get_inventory(&inventory, &ProductId::new(product_id), ctx).await
        }
        InventoryCommand::Set { product_id, stock } => {
            set_stock(&inventory, &ProductId::new(product_id), stock, ctx).await
        }
        InventoryCommand::Create { product_id, stock } => {
            create_inventory(&inventory, InventoryRecord::new(product_id, stock), ctx).await
        }
        InventoryCommand::Delete { product_id, yes } => {
            delete_inventory(&inventory, &ProductId::new(product_id), yes, ctx).await
        }
    }
}

async fn get_inventory(inventory: &InventoryClient, id: &ProductId, ctx: &Context) -> Result<()> {
    let record = inventory
        .get_inventory(id)
        .await
        .with_context(|| format!("Failed to fetch inventory for {id}"))?;
    print_record(&record, ctx);
    Ok(())
}

async fn set_stock(
    inventory: &InventoryClient,
    id: &ProductId,
    stock: i64,
    ctx: &Context,
) -> Result<()> {
    inventory
        .update_stock(id, stock)
        .await
        .with_context(|| format!("Failed to update stock for {id}"))?;

    if ctx.output.is_json() {
        ctx.output.json(&InventoryRecord::new(id.clone(), stock));
        return Ok(());
    }
    ctx.output.success(&format!("Stock for {id} set to {stock}"));
    Ok(())
}

async fn create_inventory(
    inventory: &InventoryClient,
    record: InventoryRecord,
    ctx: &Context,
) -> Result<()> {
    let created = inventory
        .create_inventory(&record)
        .await
        .with_context(|| format!("Failed to create inventory for {}", record.product_id))?;

    ctx.output
        .success(&format!("Created inventory for {}", created.product_id));
    print_record(&created, ctx);
    Ok(())
}

async fn delete_inventory(
    inventory: &InventoryClient,
    id: &ProductId,
    yes: bool,
    ctx: &Context,
) -> Result<()> {
    if !yes && !confirm(&format!("Delete inventory for {id}?"))? {
        ctx.output.warn("Delete cancelled");
        return Ok(());
    }

    inventory
        .delete_inventory(id)
        .await
        .with_context(|| format!("Failed to delete inventory for {id}"))?;
    ctx.output.success(&format!("Deleted inventory for {id}"));
    Ok(())
}

fn print_record(record: &InventoryRecord, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(record);
        return;
    }

    ctx.output.header(&format!("Inventory for {}", record.product_id));
    ctx.output.kv("stock", &record.stock.to_string());
    ctx.output.kv("status", &stock_badge(record.stock));
}
