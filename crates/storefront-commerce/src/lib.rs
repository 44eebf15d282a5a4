//! Domain types for the storefront.
//!
//! - **Catalog**: products and inventory records as served by the remote
//!   catalog and inventory services, plus paginated listings
//! - **Cart**: the session cart store with its line items and derived total
//! - **Money**: integer minor-unit amounts so cart totals never drift
//!
//! # Example
//!
//! ```
//! use storefront_commerce::prelude::*;
//!
//! let mut cart = CartStore::new(Currency::USD);
//! cart.add_to_cart(CartProduct {
//!     id: ProductId::new("A"),
//!     name: "Widget".to_string(),
//!     price: Money::from_decimal(10.0, Currency::USD),
//!     stock: 1,
//! })
//! .unwrap();
//!
//! assert_eq!(cart.total_price().display(), "$10.00");
//! assert!(cart
//!     .add_to_cart(CartProduct {
//!         id: ProductId::new("A"),
//!         name: "Widget".to_string(),
//!         price: Money::from_decimal(10.0, Currency::USD),
//!         stock: 1,
//!     })
//!     .is_err());
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;

pub use error::CommerceError;
pub use ids::ProductId;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::ProductId;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{InventoryRecord, Pagination, Product, ProductDraft, ProductPage};

    // Cart
    pub use crate::cart::{CartLineItem, CartProduct, CartStore};
}
