//! View renderers. Each view is a pure function from state to styled text.

mod cart;
mod product_detail;
mod product_list;
mod success;

pub use cart::*;
pub use product_detail::*;
pub use product_list::*;
pub use success::*;

use storefront_commerce::cart::CartStore;
use storefront_commerce::Currency;

use crate::session::Screen;

/// Render whichever view `screen` is.
pub fn render_screen(screen: &Screen, cart: &CartStore, currency: Currency) -> String {
    match screen {
        Screen::ProductList {
            products,
            pagination,
        } => render_product_list(products, pagination, currency),
        Screen::ProductDetail { props, stock } => render_product_detail(props, *stock, cart, currency),
        Screen::Cart => render_cart(cart),
        Screen::Success { summary } => render_success(summary.as_ref()),
    }
}
