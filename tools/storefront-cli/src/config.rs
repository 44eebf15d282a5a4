//! Storefront configuration.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use storefront_commerce::catalog::DEFAULT_PAGE_SIZE;
use storefront_commerce::Currency;

/// Environment variable overriding `api_key`.
pub const ENV_API_KEY: &str = "STOREFRONT_API_KEY";
/// Environment variable overriding `catalog.base_url`.
pub const ENV_CATALOG_URL: &str = "STOREFRONT_CATALOG_URL";
/// Environment variable overriding `inventory.base_url`.
pub const ENV_INVENTORY_URL: &str = "STOREFRONT_INVENTORY_URL";

/// Storefront configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    /// Value of the `X-API-KEY` header sent to both services.
    #[serde(default)]
    pub api_key: String,

    /// Catalog (products) service.
    #[serde(default = "default_catalog")]
    pub catalog: ServiceConfig,

    /// Inventory service.
    #[serde(default = "default_inventory")]
    pub inventory: ServiceConfig,

    /// Shop session settings.
    #[serde(default)]
    pub shop: ShopConfig,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            catalog: default_catalog(),
            inventory: default_inventory(),
            shop: ShopConfig::default(),
        }
    }
}

impl StorefrontConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Apply overrides from the process environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup`; empty values are ignored.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(key) = get(ENV_API_KEY) {
            self.api_key = key;
        }
        if let Some(url) = get(ENV_CATALOG_URL) {
            self.catalog.base_url = url;
        }
        if let Some(url) = get(ENV_INVENTORY_URL) {
            self.inventory.base_url = url;
        }
        self
    }

    /// Page size to request, never below one.
    pub fn page_size(&self) -> i64 {
        self.shop.page_size.max(1)
    }

    /// Copy safe to print: the API key keeps only its first characters.
    pub fn redacted(&self) -> Self {
        let mut config = self.clone();
        config.api_key = mask_secret(&self.api_key);
        config
    }
}

/// One remote service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Base URL; request paths are appended to it.
    pub base_url: String,
}

fn default_catalog() -> ServiceConfig {
    ServiceConfig {
        base_url: "http://localhost:5154/api".to_string(),
    }
}

fn default_inventory() -> ServiceConfig {
    ServiceConfig {
        base_url: "http://localhost:5208/api".to_string(),
    }
}

/// Shop session settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShopConfig {
    /// Products per list page.
    #[serde(default = "default_page_size")]
    pub page_size: i64,

    /// Currency prices are shown and totalled in.
    #[serde(default)]
    pub currency: Currency,
}

fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            currency: Currency::default(),
        }
    }
}

fn mask_secret(secret: &str) -> String {
    if secret.is_empty() {
        return String::new();
    }
    let visible: String = secret.chars().take(4).collect();
    format!("{visible}****")
}

/// Generate a default storefront.toml config file.
pub fn generate_default_config() -> String {
    r#"# Storefront configuration

# Sent as the X-API-KEY header to both services.
# Can be overridden with STOREFRONT_API_KEY.
api_key = ""

[catalog]
# STOREFRONT_CATALOG_URL
base_url = "http://localhost:5154/api"

[inventory]
# STOREFRONT_INVENTORY_URL
base_url = "http://localhost:5208/api"

[shop]
page_size = 6
currency = "USD"
"#
    .to_string()
}
