//! Props handed to the product detail view.

use storefront_commerce::ProductId;

use crate::{RouteMatch, RouteName, RouteTable, RouterError};

/// Detail view input: the id comes from the path, the display fields from
/// the query string as supplied by whoever built the link.
///
/// The detail view does not re-fetch the product, so these fields are only as
/// fresh as the listing that produced the link.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDetailProps {
    pub id: ProductId,
    pub name: Option<String>,
    pub description: Option<String>,
    /// `None` when absent or not a finite number.
    pub price: Option<f64>,
}

impl ProductDetailProps {
    /// Extract props from a resolved product detail location.
    pub fn from_match(matched: &RouteMatch) -> Result<Self, RouterError> {
        if matched.name != RouteName::ProductDetail {
            return Err(RouterError::NotFound(matched.path.clone()));
        }
        let id = matched
            .param("id")
            .ok_or_else(|| RouterError::MissingParam {
                route: matched.name.to_string(),
                param: "id".to_string(),
            })?;

        Ok(Self {
            id: ProductId::new(id),
            name: matched.query_param("name").map(str::to_string),
            description: matched.query_param("description").map(str::to_string),
            price: matched
                .query_param("price")
                .and_then(|p| p.trim().parse::<f64>().ok())
                .filter(|p| p.is_finite()),
        })
    }
}

/// Location of the detail view for a product, carrying its display fields.
pub fn product_detail_href(
    id: &ProductId,
    name: &str,
    description: &str,
    price: f64,
) -> Result<String, RouterError> {
    RouteTable::storefront()?.href(
        RouteName::ProductDetail,
        &[("id", id.as_str())],
        &[
            ("name", Some(name.to_string())),
            ("description", Some(description.to_string())),
            ("price", Some(price.to_string())),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_props_from_query() {
        let routes = RouteTable::storefront().unwrap();
        let matched = routes.resolve("/products/42?name=Lamp&price=9.5").unwrap();
        let props = ProductDetailProps::from_match(&matched).unwrap();

        assert_eq!(
            props,
            ProductDetailProps {
                id: ProductId::new("42"),
                name: Some("Lamp".to_string()),
                description: None,
                price: Some(9.5),
            }
        );
    }

    #[test]
    fn test_props_bad_price() {
        let routes = RouteTable::storefront().unwrap();
        for location in ["/products/1?price=abc", "/products/1?price=NaN", "/products/1"] {
            let matched = routes.resolve(location).unwrap();
            assert_eq!(ProductDetailProps::from_match(&matched).unwrap().price, None);
        }
    }

    #[test]
    fn test_props_wrong_route() {
        let matched = RouteTable::storefront().unwrap().resolve("/cart").unwrap();
        assert!(ProductDetailProps::from_match(&matched).is_err());
    }

    #[test]
    fn test_detail_href_round_trip() {
        let href = product_detail_href(&ProductId::new("p-1"), "Desk Lamp", "LED, 40cm", 19.9)
            .unwrap();
        let matched = RouteTable::storefront().unwrap().resolve(&href).unwrap();
        let props = ProductDetailProps::from_match(&matched).unwrap();

        assert_eq!(props.id.as_str(), "p-1");
        assert_eq!(props.name.as_deref(), Some("Desk Lamp"));
        assert_eq!(props.description.as_deref(), Some("LED, 40cm"));
        assert_eq!(props.price, Some(19.9));
    }
}
