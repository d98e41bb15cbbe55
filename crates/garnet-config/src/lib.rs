//! Configuration management for Garnet
//!
//! Provides hierarchical configuration loading from multiple sources:
//! 1. Environment variables (GNT_* prefix, highest precedence)
//! 2. garnet.local.toml (gitignored, local overrides)
//! 3. garnet.toml (git-tracked, project config)
//! 4. ~/.config/garnet/config.toml (user defaults)
//! 5. Built-in defaults (lowest precedence)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

mod error;
mod loader;
mod paths;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use paths::Paths;

/// Main Garnet configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GarnetConfig {
    pub project: ProjectConfig,
    pub store: StoreConfig,
    pub query: QueryConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    pub name: String,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: "garnet-project".to_string(),
        }
    }
}

/// Where the permissions and event collections live.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Directory holding the collection files.
    pub data_dir: PathBuf,

    /// Permissions collection file, relative to `data_dir`.
    pub permissions_collection: String,

    /// Event collection file, relative to `data_dir`.
    pub events_collection: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(".garnet/data"),
            permissions_collection: "user_perms.json".to_string(),
            events_collection: "events.json".to_string(),
        }
    }
}

impl StoreConfig {
    /// Full path of the permissions collection file.
    pub fn permissions_path(&self) -> PathBuf {
        self.data_dir.join(&self.permissions_collection)
    }

    /// Full path of the event collection file.
    pub fn events_path(&self) -> PathBuf {
        self.data_dir.join(&self.events_collection)
    }
}

/// Query execution defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Result limit applied when the caller does not supply one.
    pub default_limit: usize,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self { default_limit: 3 }
    }
}

impl GarnetConfig {
    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        ConfigLoader::new().load()
    }

    /// Load configuration from specific project directory
    pub fn load_from_dir(project_dir: impl AsRef<Path>) -> Result<Self> {
        ConfigLoader::new().with_project_dir(project_dir).load()
    }

    /// Resolve relative paths to absolute
    pub fn resolve_paths(&mut self, base_dir: impl AsRef<Path>) {
        let base = base_dir.as_ref();

        if self.store.data_dir.is_relative() {
            self.store.data_dir = base.join(&self.store.data_dir);
        }
    }

    /// Check invariants the loader cannot express
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store.permissions_collection.is_empty() {
            return Err(ConfigError::ValidationError(
                "store.permissions_collection must not be empty".to_string(),
            ));
        }
        if self.store.events_collection.is_empty() {
            return Err(ConfigError::ValidationError(
                "store.events_collection must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
