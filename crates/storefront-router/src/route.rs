//! Route patterns, the route table and matching.

use std::collections::BTreeMap;
use std::fmt;

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Serialize;
use url::form_urlencoded;

use crate::RouterError;

/// Bytes escaped in a path segment: everything but the RFC 3986 unreserved set.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Extracted route parameters (e.g., `:id` from `/products/:id`).
pub type RouteParams = BTreeMap<String, String>;

/// Query string parameters.
pub type QueryParams = BTreeMap<String, String>;

/// The views a location can lead to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RouteName {
    ProductList,
    ProductDetail,
    Cart,
    PurchaseSuccess,
}

impl RouteName {
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteName::ProductList => "ProductList",
            RouteName::ProductDetail => "ProductDetail",
            RouteName::Cart => "Cart",
            RouteName::PurchaseSuccess => "PurchaseSuccess",
        }
    }
}

impl fmt::Display for RouteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Static(String),
    Param(String),
}

/// A parsed path pattern such as `/products/:id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    raw: String,
    segments: Vec<Segment>,
}

impl RoutePattern {
    /// Parse a pattern. It must start with `/`; `:name` marks a dynamic segment.
    pub fn parse(pattern: &str) -> Result<Self, RouterError> {
        if !pattern.starts_with('/') {
            return Err(RouterError::InvalidPattern(pattern.to_string()));
        }

        let mut segments = Vec::new();
        for part in split_path(pattern) {
            let segment = match part.strip_prefix(':') {
                Some("") => return Err(RouterError::InvalidPattern(pattern.to_string())),
                Some(name) => Segment::Param(name.to_string()),
                None => Segment::Static(part.to_string()),
            };
            segments.push(segment);
        }

        Ok(Self {
            raw: pattern.to_string(),
            segments,
        })
    }

    /// The pattern as written.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Names of the dynamic segments, in order.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Param(name) => Some(name.as_str()),
            Segment::Static(_) => None,
        })
    }

    /// Match raw (still encoded) path parts, returning decoded parameters.
    fn matches(&self, parts: &[&str]) -> Option<RouteParams> {
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut params = RouteParams::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Static(expected) => {
                    if expected.as_str() != *part {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    if part.is_empty() {
                        return None;
                    }
                    params.insert(name.clone(), decode_segment(part));
                }
            }
        }
        Some(params)
    }

    /// Build a path by filling in the dynamic segments.
    fn fill(&self, route: RouteName, params: &[(&str, &str)]) -> Result<String, RouterError> {
        if self.segments.is_empty() {
            return Ok("/".to_string());
        }

        let mut path = String::new();
        for segment in &self.segments {
            path.push('/');
            match segment {
                Segment::Static(s) => path.push_str(s),
                Segment::Param(name) => {
                    let value = params
                        .iter()
                        .find(|(k, _)| *k == name.as_str())
                        .map(|(_, v)| *v)
                        .ok_or_else(|| RouterError::MissingParam {
                            route: route.to_string(),
                            param: name.clone(),
                        })?;
                    path.push_str(&encode_segment(value));
                }
            }
        }
        Ok(path)
    }
}

/// One row of the route table.
#[derive(Debug, Clone)]
struct RouteEntry {
    name: RouteName,
    pattern: RoutePattern,
}

/// A resolved location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    /// Which view the location leads to.
    pub name: RouteName,
    /// Path part of the location, as given.
    pub path: String,
    /// Decoded dynamic segments.
    pub params: RouteParams,
    /// Decoded query parameters; the last occurrence of a key wins.
    pub query: QueryParams,
}

impl RouteMatch {
    /// Get a route parameter by name.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(|s| s.as_str())
    }

    /// Get a query parameter by name.
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query.get(name).map(|s| s.as_str())
    }
}

/// Routes of the storefront, in match order.
pub const STOREFRONT_ROUTES: [(RouteName, &str); 4] = [
    (RouteName::ProductList, "/"),
    (RouteName::ProductDetail, "/products/:id"),
    (RouteName::Cart, "/cart"),
    (RouteName::PurchaseSuccess, "/success"),
];

/// Path-to-view mapping. First matching entry wins.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<RouteEntry>,
}

impl RouteTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a route.
    pub fn with_route(mut self, name: RouteName, pattern: &str) -> Result<Self, RouterError> {
        self.routes.push(RouteEntry {
            name,
            pattern: RoutePattern::parse(pattern)?,
        });
        Ok(self)
    }

    /// The storefront's route table, built from [`STOREFRONT_ROUTES`].
    pub fn storefront() -> Result<Self, RouterError> {
        Self::from_entries(&STOREFRONT_ROUTES)
    }

    /// Build a table from `(name, pattern)` pairs, failing on the first bad
    /// pattern.
    pub fn from_entries(entries: &[(RouteName, &str)]) -> Result<Self, RouterError> {
        entries
            .iter()
            .try_fold(Self::new(), |table, (name, pattern)| table.with_route(*name, pattern))
    }

    /// Resolve a location (`/path?query#fragment`) to a route.
    pub fn resolve(&self, location: &str) -> Result<RouteMatch, RouterError> {
        let location = location.trim();
        let without_fragment = location.split('#').next().unwrap_or_default();
        let (path, query) = match without_fragment.split_once('?') {
            Some((path, query)) => (path, query),
            None => (without_fragment, ""),
        };

        let path = if path.is_empty() { "/" } else { path };
        if !path.starts_with('/') {
            return Err(RouterError::NotFound(location.to_string()));
        }

        let parts: Vec<&str> = split_path(path).collect();
        self.routes
            .iter()
            .find_map(|route| {
                route.pattern.matches(&parts).map(|params| RouteMatch {
                    name: route.name,
                    path: path.to_string(),
                    params,
                    query: parse_query(query),
                })
            })
            .ok_or_else(|| RouterError::NotFound(location.to_string()))
    }

    /// Build a location for `name` from path parameters and query pairs.
    /// Query pairs with a `None` value are left out.
    pub fn href(
        &self,
        name: RouteName,
        params: &[(&str, &str)],
        query: &[(&str, Option<String>)],
    ) -> Result<String, RouterError> {
        let route = self
            .routes
            .iter()
            .find(|r| r.name == name)
            .ok_or_else(|| RouterError::NotFound(name.to_string()))?;
        let mut location = route.pattern.fill(name, params)?;

        let mut serializer = form_urlencoded::Serializer::new(String::new());
        let mut any = false;
        for (key, value) in query {
            if let Some(value) = value {
                serializer.append_pair(key, value);
                any = true;
            }
        }
        if any {
            location.push('?');
            location.push_str(&serializer.finish());
        }
        Ok(location)
    }
}

/// Non-empty path parts; a trailing slash is ignored.
fn split_path(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|part| !part.is_empty())
}

fn parse_query(query: &str) -> QueryParams {
    form_urlencoded::parse(query.as_bytes())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

/// Percent-decode a path segment. Unlike a query, `+` is literal here.
fn decode_segment(raw: &str) -> String {
    percent_decode_str(raw).decode_utf8_lossy().into_owned()
}

/// Percent-encode a path segment.
fn encode_segment(value: &str) -> String {
    utf8_percent_encode(value, SEGMENT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_static_routes() {
        let routes = RouteTable::storefront().unwrap();

        assert_eq!(routes.resolve("/").unwrap().name, RouteName::ProductList);
        assert_eq!(routes.resolve("").unwrap().name, RouteName::ProductList);
        assert_eq!(routes.resolve("/cart").unwrap().name, RouteName::Cart);
        assert_eq!(routes.resolve("/cart/").unwrap().name, RouteName::Cart);
        assert_eq!(
            routes.resolve("/success#top").unwrap().name,
            RouteName::PurchaseSuccess
        );
    }

    #[test]
    fn test_resolve_product_detail() {
        let routes = RouteTable::storefront().unwrap();
        let matched = routes
            .resolve("/products/42?name=Desk+Lamp&description=LED%20lamp&price=9.5")
            .unwrap();

        assert_eq!(matched.name, RouteName::ProductDetail);
        assert_eq!(matched.param("id"), Some("42"));
        assert_eq!(matched.query_param("name"), Some("Desk Lamp"));
        assert_eq!(matched.query_param("description"), Some("LED lamp"));
        assert_eq!(matched.query_param("price"), Some("9.5"));
    }

    #[test]
    fn test_resolve_decodes_path_param() {
        let routes = RouteTable::storefront().unwrap();
        let matched = routes.resolve("/products/a%20b+c").unwrap();
        assert_eq!(matched.param("id"), Some("a b+c"));
    }

    #[test]
    fn test_resolve_unknown() {
        let routes = RouteTable::storefront().unwrap();

        assert_eq!(
            routes.resolve("/nope"),
            Err(RouterError::NotFound("/nope".to_string()))
        );
        assert!(routes.resolve("/products").is_err());
        assert!(routes.resolve("/products/1/extra").is_err());
        assert!(routes.resolve("cart").is_err());
    }

    #[test]
    fn test_pattern_parsing() {
        let pattern = RoutePattern::parse("/products/:id").unwrap();
        assert_eq!(pattern.param_names().collect::<Vec<_>>(), ["id"]);
        assert_eq!(pattern.as_str(), "/products/:id");

        assert!(RoutePattern::parse("products").is_err());
        assert!(RoutePattern::parse("/products/:").is_err());
    }

    #[test]
    fn test_href_round_trip() {
        let routes = RouteTable::storefront().unwrap();
        let href = routes
            .href(
                RouteName::ProductDetail,
                &[("id", "a b")],
                &[
                    ("name", Some("Lamp & Co".to_string())),
                    ("description", None),
                    ("price", Some("9.5".to_string())),
                ],
            )
            .unwrap();

        assert_eq!(href, "/products/a%20b?name=Lamp+%26+Co&price=9.5");

        let matched = routes.resolve(&href).unwrap();
        assert_eq!(matched.param("id"), Some("a b"));
        assert_eq!(matched.query_param("name"), Some("Lamp & Co"));
        assert_eq!(matched.query_param("description"), None);
    }

    #[test]
    fn test_href_missing_param() {
        let routes = RouteTable::storefront().unwrap();
        let err = routes.href(RouteName::ProductDetail, &[], &[]).unwrap_err();
        assert!(matches!(err, RouterError::MissingParam { .. }));

        assert_eq!(routes.href(RouteName::ProductList, &[], &[]).unwrap(), "/");
        assert_eq!(routes.href(RouteName::Cart, &[], &[]).unwrap(), "/cart");
    }

    #[test]
    fn test_storefront_table_is_complete() {
        let table = RouteTable::storefront().unwrap();
        let names: Vec<RouteName> = table.routes.iter().map(|r| r.name).collect();
        assert_eq!(
            names,
            [
                RouteName::ProductList,
                RouteName::ProductDetail,
                RouteName::Cart,
                RouteName::PurchaseSuccess
            ]
        );
    }

    #[test]
    fn test_bad_pattern_fails_table() {
        let err = RouteTable::from_entries(&[
            (RouteName::ProductList, "/"),
            (RouteName::Cart, "cart"),
        ])
        .unwrap_err();
        assert_eq!(err, RouterError::InvalidPattern("cart".to_string()));
    }

    #[test]
    fn test_segment_encoding() {
        assert_eq!(encode_segment("a b+c/d~e"), "a%20b%2Bc%2Fd~e");
        assert_eq!(decode_segment("a%20b+c%2Fd"), "a b+c/d");
        assert_eq!(decode_segment("%E2%82%AC"), "€");
    }
}
