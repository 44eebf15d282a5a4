//! Catalog service client.

use async_trait::async_trait;
use storefront_commerce::catalog::{Product, ProductDraft, ProductPage};
use storefront_commerce::ProductId;

use crate::{FetchClient, FetchError, API_KEY_HEADER};

/// Operations offered by the catalog service.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// `GET /products?page=&pageSize=`
    async fn list_products(&self, page: i64, page_size: i64) -> Result<ProductPage, FetchError>;

    /// `GET /products/{id}`
    async fn get_product(&self, id: &ProductId) -> Result<Product, FetchError>;

    /// `POST /products`
    async fn create_product(&self, draft: &ProductDraft) -> Result<Product, FetchError>;

    /// `PUT /products/{id}`; `None` when the service answers without a body.
    async fn update_product(
        &self,
        id: &ProductId,
        draft: &ProductDraft,
    ) -> Result<Option<Product>, FetchError>;

    /// `DELETE /products/{id}`
    async fn delete_product(&self, id: &ProductId) -> Result<(), FetchError>;
}

/// REST client for the catalog service.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    fetch: FetchClient,
}

impl CatalogClient {
    /// Create a client for the service at `base_url` authenticating with `api_key`.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            fetch: FetchClient::new()
                .with_base_url(base_url)
                .with_default_header(API_KEY_HEADER, api_key)
                .with_default_header("Content-Type", "application/json"),
        }
    }

    fn product_url(&self, id: &ProductId) -> Result<String, FetchError> {
        self.fetch.endpoint(["products", id.as_str()])
    }
}

#[async_trait]
impl CatalogApi for CatalogClient {
    async fn list_products(&self, page: i64, page_size: i64) -> Result<ProductPage, FetchError> {
        let url = self.fetch.endpoint(["products"])?;
        self.fetch
            .get(url)
            .query("page", page)
            .query("pageSize", page_size)
            .send()
            .await?
            .error_for_status()?
            .json()
    }

    async fn get_product(&self, id: &ProductId) -> Result<Product, FetchError> {
        self.fetch
            .get(self.product_url(id)?)
            .send()
            .await?
            .error_for_status()?
            .json()
    }

    async fn create_product(&self, draft: &ProductDraft) -> Result<Product, FetchError> {
        let url = self.fetch.endpoint(["products"])?;
        self.fetch
            .post(url)
            .json(draft)?
            .send()
            .await?
            .error_for_status()?
            .json()
    }

    async fn update_product(
        &self,
        id: &ProductId,
        draft: &ProductDraft,
    ) -> Result<Option<Product>, FetchError> {
        self.fetch
            .put(self.product_url(id)?)
            .json(draft)?
            .send()
            .await?
            .error_for_status()?
            .json_opt()
    }

    async fn delete_product(&self, id: &ProductId) -> Result<(), FetchError> {
        self.fetch
            .delete(self.product_url(id)?)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}
