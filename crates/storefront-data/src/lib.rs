//! HTTP clients for the storefront's remote services.
//!
//! [`FetchClient`] is a small builder API over `reqwest` with a base URL,
//! default headers and JSON handling. [`CatalogClient`] and
//! [`InventoryClient`] wrap it with one method per REST operation; they do not
//! retry, cache or batch, and hand transport failures back unchanged.
//!
//! # Example
//!
//! ```rust,no_run
//! use storefront_data::{CatalogApi, CatalogClient};
//!
//! # async fn run() -> Result<(), storefront_data::FetchError> {
//! let catalog = CatalogClient::new("http://localhost:5154/api", "my-api-key");
//! let page = catalog.list_products(1, 6).await?;
//! for product in &page.items {
//!     println!("{} {}", product.name, product.price);
//! }
//! # Ok(())
//! # }
//! ```

mod catalog;
mod error;
mod inventory;
mod request;
mod response;

pub use catalog::{CatalogApi, CatalogClient};
pub use error::FetchError;
pub use inventory::{InventoryApi, InventoryClient};
pub use request::{Method, RequestBuilder};
pub use response::Response;

use std::collections::BTreeMap;
use tracing::debug;
use url::Url;

/// Header carrying the shared API key on every service call.
pub const API_KEY_HEADER: &str = "X-API-KEY";

/// HTTP client for making outbound requests.
#[derive(Debug, Clone)]
pub struct FetchClient {
    http: reqwest::Client,
    base_url: Option<String>,
    default_headers: BTreeMap<String, String>,
}

impl Default for FetchClient {
    fn default() -> Self {
        Self::new()
    }
}

impl FetchClient {
    /// Create a new HTTP client.
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: None,
            default_headers: BTreeMap::new(),
        }
    }

    /// Create a client with a base URL that will be prepended to all requests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Add a default header that will be included in all requests.
    pub fn with_default_header(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }

    /// Absolute URL for `segments` under the base URL, each segment
    /// percent-encoded.
    pub fn endpoint<'a>(
        &self,
        segments: impl IntoIterator<Item = &'a str>,
    ) -> Result<String, FetchError> {
        let base = self
            .base_url
            .as_deref()
            .ok_or_else(|| FetchError::InvalidUrl("no base URL configured".to_string()))?;
        let mut url = Url::parse(base).map_err(|e| FetchError::InvalidUrl(format!("{base}: {e}")))?;
        url.path_segments_mut()
            .map_err(|_| FetchError::InvalidUrl(format!("{base}: cannot be a base")))?
            .pop_if_empty()
            .extend(segments);
        Ok(url.into())
    }

    /// Create a GET request.
    pub fn get(&self, url: impl Into<String>) -> ClientRequestBuilder<'_> {
        self.request(Method::Get, url)
    }

    /// Create a POST request.
    pub fn post(&self, url: impl Into<String>) -> ClientRequestBuilder<'_> {
        self.request(Method::Post, url)
    }

    /// Create a PUT request.
    pub fn put(&self, url: impl Into<String>) -> ClientRequestBuilder<'_> {
        self.request(Method::Put, url)
    }

    /// Create a DELETE request.
    pub fn delete(&self, url: impl Into<String>) -> ClientRequestBuilder<'_> {
        self.request(Method::Delete, url)
    }

    /// Create a request with a custom method.
    ///
    /// Relative URLs are joined onto the base URL; absolute ones are used as is.
    pub fn request(&self, method: Method, url: impl Into<String>) -> ClientRequestBuilder<'_> {
        let url = url.into();
        let full_url = match &self.base_url {
            Some(base) if !(url.starts_with("http://") || url.starts_with("https://")) => {
                format!("{}{}", base.trim_end_matches('/'), url)
            }
            _ => url,
        };

        let mut builder = RequestBuilder::new(method, full_url);
        for (key, value) in &self.default_headers {
            builder = builder.header(key.clone(), value.clone());
        }

        ClientRequestBuilder {
            http: &self.http,
            builder,
        }
    }
}

/// A request builder bound to a client.
pub struct ClientRequestBuilder<'a> {
    http: &'a reqwest::Client,
    builder: RequestBuilder,
}

impl ClientRequestBuilder<'_> {
    /// Add a header to the request.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.builder = self.builder.header(key, value);
        self
    }

    /// Append a query parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.builder = self.builder.query(key, value);
        self
    }

    /// Set the request body as JSON.
    pub fn json<T: serde::Serialize + ?Sized>(mut self, value: &T) -> Result<Self, FetchError> {
        self.builder = self.builder.json(value)?;
        Ok(self)
    }

    /// The request as built so far.
    pub fn request(&self) -> &RequestBuilder {
        &self.builder
    }

    /// Send the request and read the whole response.
    ///
    /// Non-2xx statuses are returned as a [`Response`]; use
    /// [`Response::error_for_status`] to turn them into errors.
    pub async fn send(self) -> Result<Response, FetchError> {
        let url = self.builder.build_url()?;
        let method = self.builder.method;
        debug!(method = method.as_str(), url = %url, "sending request");

        let mut request = self.http.request(method.into(), url.clone());
        for (key, value) in &self.builder.headers {
            request = request.header(key.as_str(), value.as_str());
        }
        if let Some(body) = self.builder.body {
            request = request.body(body);
        }

        let response = Response::read(request.send().await?).await?;
        debug!(
            method = method.as_str(),
            url = %url,
            status = response.status,
            "received response"
        );
        Ok(response)
    }
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        CatalogApi, CatalogClient, FetchClient, FetchError, InventoryApi, InventoryClient,
        Method, Response,
    };
}
