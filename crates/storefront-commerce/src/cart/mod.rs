//! Shopping cart module.
//!
//! The cart store is the single source of truth for the session cart.

mod store;

pub use store::{CartLineItem, CartProduct, CartStore};
