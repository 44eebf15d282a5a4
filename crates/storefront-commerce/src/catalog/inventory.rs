//! Inventory records as exchanged with the inventory service.

use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// Stock count for one product, owned by the inventory service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InventoryRecord {
    /// Product this record counts.
    pub product_id: ProductId,
    /// Units on hand.
    pub stock: i64,
}

impl InventoryRecord {
    /// Create a new record.
    pub fn new(product_id: impl Into<ProductId>, stock: i64) -> Self {
        Self {
            product_id: product_id.into(),
            stock,
        }
    }

    /// Check if out of stock.
    pub fn is_out_of_stock(&self) -> bool {
        self.stock <= 0
    }

    /// Stock left after selling `quantity` units, never below zero.
    pub fn remaining_after(&self, quantity: i64) -> i64 {
        self.stock.saturating_sub(quantity).max(0)
    }
}
