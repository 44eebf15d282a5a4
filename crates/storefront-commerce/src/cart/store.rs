//! Cart store and line item types.

use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::Serialize;
use tracing::{debug, warn};

/// What the caller knows about a product when adding it to the cart.
#[derive(Debug, Clone, PartialEq)]
pub struct CartProduct {
    pub id: ProductId,
    pub name: String,
    pub price: Money,
    /// Stock reported by the inventory service at the time of the add.
    pub stock: i64,
}

/// A line item in the cart.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CartLineItem {
    /// Product identifier, unique within the cart.
    pub id: ProductId,
    /// Product name (denormalized for display).
    pub name: String,
    /// Unit price captured when the product was added.
    pub price: Money,
    /// Units in the cart; never above the stock passed to the add that
    /// raised it.
    pub quantity: i64,
    /// Stock captured at the first add, never refreshed.
    pub stock: i64,
}

impl CartLineItem {
    /// Price of the whole line (unit price times quantity).
    pub fn subtotal(&self) -> Money {
        self.price.saturating_mul(self.quantity)
    }
}

/// The session cart.
///
/// Line items keep insertion order. All mutation goes through
/// [`add_to_cart`](Self::add_to_cart), [`remove_from_cart`](Self::remove_from_cart)
/// and [`clear_cart`](Self::clear_cart); derived values are recomputed on
/// every read.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct CartStore {
    items: Vec<CartLineItem>,
    currency: Currency,
}

impl CartStore {
    /// Create an empty cart totalled in `currency`.
    pub fn new(currency: Currency) -> Self {
        Self {
            items: Vec::new(),
            currency,
        }
    }

    /// Add one unit of `product`.
    ///
    /// A product not yet in the cart becomes a new line with quantity 1. A
    /// product already in the cart gains one unit only while its quantity is
    /// below `product.stock`; otherwise nothing changes and
    /// [`CommerceError::InsufficientStock`] is returned.
    pub fn add_to_cart(&mut self, product: CartProduct) -> Result<&CartLineItem, CommerceError> {
        let position = self.items.iter().position(|item| item.id == product.id);

        let index = match position {
            Some(index) => {
                let existing = &mut self.items[index];
                if existing.quantity >= product.stock {
                    warn!(
                        product_id = %product.id,
                        in_cart = existing.quantity,
                        stock = product.stock,
                        "add to cart rejected"
                    );
                    return Err(CommerceError::InsufficientStock {
                        product_id: product.id.into_inner(),
                        in_cart: existing.quantity,
                        available: product.stock,
                    });
                }
                existing.quantity += 1;
                index
            }
            None => {
                if product.stock < 1 {
                    warn!(product_id = %product.id, stock = product.stock, "add to cart rejected");
                    return Err(CommerceError::InsufficientStock {
                        product_id: product.id.into_inner(),
                        in_cart: 0,
                        available: product.stock,
                    });
                }
                self.items.push(CartLineItem {
                    id: product.id,
                    name: product.name,
                    price: product.price,
                    quantity: 1,
                    stock: product.stock,
                });
                self.items.len() - 1
            }
        };

        let item = &self.items[index];
        debug!(product_id = %item.id, quantity = item.quantity, "added to cart");
        Ok(item)
    }

    /// Remove the line for `product_id`. Returns whether a line was removed;
    /// an absent id is not an error.
    pub fn remove_from_cart(&mut self, product_id: &ProductId) -> bool {
        let len_before = self.items.len();
        self.items.retain(|item| &item.id != product_id);
        let removed = self.items.len() < len_before;
        if removed {
            debug!(product_id = %product_id, "removed from cart");
        }
        removed
    }

    /// Empty the cart.
    pub fn clear_cart(&mut self) {
        self.items.clear();
        debug!("cart cleared");
    }

    /// Sum of `price * quantity` over all lines; zero for an empty cart.
    pub fn total_price(&self) -> Money {
        self.items
            .iter()
            .fold(Money::zero(self.currency), |acc, item| {
                acc.saturating_add(&item.subtotal())
            })
    }

    /// Line items in insertion order.
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Get the line for a product.
    pub fn get(&self, product_id: &ProductId) -> Option<&CartLineItem> {
        self.items.iter().find(|item| &item.id == product_id)
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total units across all lines.
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Currency the cart is totalled in.
    pub fn currency(&self) -> Currency {
        self.currency
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, price: f64, stock: i64) -> CartProduct {
        CartProduct {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            price: Money::from_decimal(price, Currency::USD),
            stock,
        }
    }

    #[test]
    fn test_add_new_product() {
        let mut cart = CartStore::new(Currency::USD);
        cart.add_to_cart(product("A", 10.0, 5)).unwrap();

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].quantity, 1);
        assert_eq!(cart.total_price(), Money::from_decimal(10.0, Currency::USD));
    }

    #[test]
    fn test_add_same_product_increments() {
        let mut cart = CartStore::new(Currency::USD);
        cart.add_to_cart(product("A", 10.0, 2)).unwrap();
        let line = cart.add_to_cart(product("A", 10.0, 2)).unwrap();
        assert_eq!(line.quantity, 2);

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total_price().amount_cents, 2000);
    }

    #[test]
    fn test_add_beyond_stock_fails_without_mutation() {
        let mut cart = CartStore::new(Currency::USD);
        cart.add_to_cart(product("A", 10.0, 1)).unwrap();
        let before = cart.clone();

        let err = cart.add_to_cart(product("A", 10.0, 1)).unwrap_err();
        assert!(err.is_insufficient_stock());
        assert_eq!(cart, before);
        assert_eq!(cart.get(&ProductId::new("A")).unwrap().quantity, 1);
    }

    #[test]
    fn test_add_out_of_stock_product_fails() {
        let mut cart = CartStore::new(Currency::USD);
        let err = cart.add_to_cart(product("A", 10.0, 0)).unwrap_err();

        assert_eq!(
            err,
            CommerceError::InsufficientStock {
                product_id: "A".to_string(),
                in_cart: 0,
                available: 0,
            }
        );
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut cart = CartStore::new(Currency::USD);
        cart.add_to_cart(product("A", 10.0, 3)).unwrap();
        let before = cart.clone();

        assert!(!cart.remove_from_cart(&ProductId::new("missing")));
        assert_eq!(cart, before);
    }

    #[test]
    fn test_remove_keeps_order_of_others() {
        let mut cart = CartStore::new(Currency::USD);
        for id in ["A", "B", "C"] {
            cart.add_to_cart(product(id, 1.0, 3)).unwrap();
        }

        assert!(cart.remove_from_cart(&ProductId::new("B")));
        let ids: Vec<&str> = cart.items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["A", "C"]);
    }

    #[test]
    fn test_clear_cart() {
        let mut cart = CartStore::new(Currency::USD);
        cart.add_to_cart(product("A", 10.0, 3)).unwrap();
        cart.add_to_cart(product("B", 5.0, 3)).unwrap();

        cart.clear_cart();
        assert!(cart.is_empty());
        assert!(cart.total_price().is_zero());
    }

    #[test]
    fn test_total_price_mixed_lines() {
        let mut cart = CartStore::new(Currency::USD);
        cart.add_to_cart(product("A", 10.0, 5)).unwrap();
        cart.add_to_cart(product("A", 10.0, 5)).unwrap();
        cart.add_to_cart(product("B", 5.0, 5)).unwrap();

        assert_eq!(cart.total_price().amount_cents, 2500);
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_total_price_has_no_float_drift() {
        let mut cart = CartStore::new(Currency::USD);
        cart.add_to_cart(product("A", 0.1, 5)).unwrap();
        cart.add_to_cart(product("B", 0.2, 5)).unwrap();

        assert_eq!(cart.total_price().display(), "$0.30");
    }

    #[test]
    fn test_price_captured_at_first_add() {
        let mut cart = CartStore::new(Currency::USD);
        cart.add_to_cart(product("A", 10.0, 5)).unwrap();
        cart.add_to_cart(product("A", 12.0, 5)).unwrap();

        assert_eq!(cart.total_price().amount_cents, 2000);
    }

    #[test]
    fn test_stock_snapshot_kept_from_first_add() {
        let mut cart = CartStore::new(Currency::USD);
        cart.add_to_cart(product("A", 10.0, 5)).unwrap();
        cart.add_to_cart(product("A", 10.0, 9)).unwrap();

        let line = cart.get(&ProductId::new("A")).unwrap();
        assert_eq!(line.quantity, 2);
        assert_eq!(line.stock, 5);
    }
}
