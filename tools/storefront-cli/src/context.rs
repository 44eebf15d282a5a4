//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use storefront_data::{CatalogClient, InventoryClient};
use tracing::debug;

use crate::config::StorefrontConfig;
use crate::output::Output;

/// Config file names looked up in each directory, in order.
pub const CONFIG_NAMES: [&str; 3] = ["storefront.toml", ".storefront.toml", "storefront.json"];

/// Execution context for CLI commands.
pub struct Context {
    /// Effective configuration (file + environment).
    pub config: StorefrontConfig,
    /// Where the configuration came from, if a file was found.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = match config_path {
            Some(path) => {
                let path = PathBuf::from(path);
                (StorefrontConfig::load(&path)?, Some(path))
            }
            None => match find_config(&cwd) {
                Some(path) => (StorefrontConfig::load(&path)?, Some(path)),
                None => (StorefrontConfig::default(), None),
            },
        };
        debug!(path = ?config_path, "configuration loaded");

        Ok(Self {
            config: config.with_env_overrides(),
            config_path,
            output,
            cwd,
        })
    }

    /// Context on built-in defaults plus environment overrides. No config
    /// file is read, so a broken one cannot get in the way.
    pub fn without_config(cwd: PathBuf, output: Output) -> Self {
        Self {
            config: StorefrontConfig::default().with_env_overrides(),
            config_path: None,
            output,
            cwd,
        }
    }

    /// [`without_config`](Self::without_config) in the current directory.
    pub fn current_dir_only(output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;
        Ok(Self::without_config(cwd, output))
    }

    /// Client for the catalog service.
    pub fn catalog(&self) -> CatalogClient {
        CatalogClient::new(&self.config.catalog.base_url, &self.config.api_key)
    }

    /// Client for the inventory service.
    pub fn inventory(&self) -> InventoryClient {
        InventoryClient::new(&self.config.inventory.base_url, &self.config.api_key)
    }
}

/// Find a config file in `start` or one of its parents.
pub fn find_config(start: &Path) -> Option<PathBuf> {
    start.ancestors().find_map(|dir| {
        CONFIG_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    })
}
