//! Commerce error types.

use thiserror::Error;

/// Errors raised by domain validation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommerceError {
    /// Adding one more unit would exceed the stock captured for the product.
    #[error("Not enough stock for {product_id}: {in_cart} in cart, {available} available")]
    InsufficientStock {
        product_id: String,
        in_cart: i64,
        available: i64,
    },

    /// A price that cannot be represented as money.
    #[error("Invalid price: {0}")]
    InvalidPrice(f64),

    /// Unknown currency code.
    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),
}

impl CommerceError {
    /// Whether this error comes from the stock check in the cart store.
    pub fn is_insufficient_stock(&self) -> bool {
        matches!(self, CommerceError::InsufficientStock { .. })
    }
}
