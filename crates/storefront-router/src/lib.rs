//! Static routing for the storefront views.
//!
//! The table maps a path pattern to a view:
//!
//! ```text
//! /                   -> ProductList
//! /products/:id       -> ProductDetail   (name, description, price from the query)
//! /cart               -> Cart
//! /success            -> PurchaseSuccess
//! ```
//!
//! # Usage
//!
//! ```
//! use storefront_router::{ProductDetailProps, RouteName, RouteTable};
//!
//! let routes = RouteTable::storefront().unwrap();
//! let matched = routes.resolve("/products/42?name=Lamp&price=9.5").unwrap();
//! assert_eq!(matched.name, RouteName::ProductDetail);
//!
//! let props = ProductDetailProps::from_match(&matched).unwrap();
//! assert_eq!(props.id.as_str(), "42");
//! assert_eq!(props.price, Some(9.5));
//! ```

mod error;
mod props;
mod route;

pub use error::RouterError;
pub use props::{product_detail_href, ProductDetailProps};
pub use route::*;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        product_detail_href, ProductDetailProps, RouteMatch, RouteName, RouteTable, RouterError,
    };
}
