//! Paginated product listings.

use crate::catalog::Product;
use serde::{Deserialize, Deserializer, Serialize};

/// Page size used when the caller does not ask for one.
pub const DEFAULT_PAGE_SIZE: i64 = 6;

/// Pagination info.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    /// Current page (1-indexed).
    pub page: i64,
    /// Items per page.
    pub per_page: i64,
    /// Total number of items, when the service reports it.
    pub total: Option<i64>,
    /// Total number of pages, when known.
    pub total_pages: Option<i64>,
    /// Whether there's a next page.
    pub has_next: bool,
    /// Whether there's a previous page.
    pub has_prev: bool,
}

impl Pagination {
    /// Pagination for a listing whose total is known.
    pub fn new(page: i64, per_page: i64, total: i64) -> Self {
        let per_page = per_page.max(1);
        let total_pages = if total <= 0 {
            1
        } else {
            (total - 1) / per_page + 1
        };

        Self {
            page,
            per_page,
            total: Some(total),
            total_pages: Some(total_pages),
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }

    /// Pagination for a listing without a total: a full page implies more.
    pub fn open_ended(page: i64, per_page: i64, items_on_page: usize) -> Self {
        let per_page = per_page.max(1);
        Self {
            page,
            per_page,
            total: None,
            total_pages: None,
            has_next: items_on_page as i64 >= per_page,
            has_prev: page > 1,
        }
    }

    /// Next page number, if any.
    pub fn next_page(&self) -> Option<i64> {
        self.page.checked_add(1).filter(|_| self.has_next)
    }

    /// Previous page number, if any.
    pub fn prev_page(&self) -> Option<i64> {
        self.page.checked_sub(1).filter(|_| self.has_prev)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(1, DEFAULT_PAGE_SIZE, 0)
    }
}

/// One page of the product listing as returned by the catalog service.
///
/// Accepts either an envelope (`items`/`data`/`products` plus optional
/// `page`, `pageSize`, `totalCount`/`totalItems`/`total`) or a bare array.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    pub items: Vec<Product>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    pub total_count: Option<i64>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageEnvelope {
    #[serde(alias = "data", alias = "products")]
    items: Vec<Product>,
    #[serde(default, alias = "pageNumber")]
    page: Option<i64>,
    #[serde(default)]
    page_size: Option<i64>,
    #[serde(default, alias = "totalItems", alias = "total")]
    total_count: Option<i64>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PageWire {
    Envelope(PageEnvelope),
    Bare(Vec<Product>),
}

impl<'de> Deserialize<'de> for ProductPage {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match PageWire::deserialize(deserializer)? {
            PageWire::Envelope(env) => ProductPage {
                items: env.items,
                page: env.page,
                page_size: env.page_size,
                total_count: env.total_count,
            },
            PageWire::Bare(items) => ProductPage {
                items,
                page: None,
                page_size: None,
                total_count: None,
            },
        })
    }
}

impl ProductPage {
    /// Pagination for this page; the requested values fill in what the
    /// service left out.
    pub fn pagination(&self, requested_page: i64, requested_size: i64) -> Pagination {
        let page = self.page.unwrap_or(requested_page).max(1);
        let per_page = self.page_size.unwrap_or(requested_size);
        match self.total_count {
            Some(total) => Pagination::new(page, per_page, total),
            None => Pagination::open_ended(page, per_page, self.items.len()),
        }
    }

    /// Check if the page holds no products.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
