//! Catalog module.
//!
//! Snapshots of entities owned by the remote catalog and inventory services.

mod inventory;
mod page;
mod product;

pub use inventory::InventoryRecord;
pub use page::{Pagination, ProductPage, DEFAULT_PAGE_SIZE};
pub use product::{Product, ProductDraft};
