//! Inventory service client.

use async_trait::async_trait;
use storefront_commerce::catalog::InventoryRecord;
use storefront_commerce::ProductId;

use crate::{FetchClient, FetchError, API_KEY_HEADER};

/// Operations offered by the inventory service.
#[async_trait]
pub trait InventoryApi: Send + Sync {
    /// `GET /inventory/{productId}`
    async fn get_inventory(&self, product_id: &ProductId) -> Result<InventoryRecord, FetchError>;

    /// `PUT /inventory/{productId}` with the new stock as a bare JSON number.
    async fn update_stock(&self, product_id: &ProductId, new_stock: i64) -> Result<(), FetchError>;

    /// `POST /inventory`
    async fn create_inventory(
        &self,
        record: &InventoryRecord,
    ) -> Result<InventoryRecord, FetchError>;

    /// `DELETE /inventory/{productId}`
    async fn delete_inventory(&self, product_id: &ProductId) -> Result<(), FetchError>;
}

/// REST client for the inventory service.
#[derive(Debug, Clone)]
pub struct InventoryClient {
    fetch: FetchClient,
}

impl InventoryClient {
    /// Create a client for the service at `base_url` authenticating with `api_key`.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            fetch: FetchClient::new()
                .with_base_url(base_url)
                .with_default_header(API_KEY_HEADER, api_key)
                .with_default_header("Content-Type", "application/json"),
        }
    }

    fn record_url(&self, product_id: &ProductId) -> Result<String, FetchError> {
        self.fetch.endpoint(["inventory", product_id.as_str()])
    }
}

#[async_trait]
impl InventoryApi for InventoryClient {
    async fn get_inventory(&self, product_id: &ProductId) -> Result<InventoryRecord, FetchError> {
        let response = self
            .fetch
            .get(self.record_url(product_id)?)
            .send()
            .await?
            .error_for_status()?;
        tracing::debug!(product_id = %product_id, body = ?response.text().ok(), "inventory response");
        response.json()
    }

    async fn update_stock(&self, product_id: &ProductId, new_stock: i64) -> Result<(), FetchError> {
        self.fetch
            .put(self.record_url(product_id)?)
            .json(&new_stock)?
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    async fn create_inventory(
        &self,
        record: &InventoryRecord,
    ) -> Result<InventoryRecord, FetchError> {
        let url = self.fetch.endpoint(["inventory"])?;
        let response = self
            .fetch
            .post(url)
            .json(record)?
            .send()
            .await?
            .error_for_status()?;
        // Some deployments answer 201 with an empty body.
        Ok(response.json_opt()?.unwrap_or_else(|| record.clone()))
    }

    async fn delete_inventory(&self, product_id: &ProductId) -> Result<(), FetchError> {
        self.fetch
            .delete(self.record_url(product_id)?)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}
