//! Service container for dependency injection
//!
//! Wires the admin service to its storage and settings.

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::services::{MenuAdminService, MenuItemStore};
use crate::config::Settings;
use crate::infrastructure::error::{InfraError, InfraResult};
use crate::infrastructure::storage::JsonFileTreeStorage;
use crate::infrastructure::traits::{FileSystem, RealFileSystem};

/// Container holding settings and shared infrastructure.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        Self::with_deps(settings, Arc::new(RealFileSystem))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(settings: Settings, fs: Arc<dyn FileSystem>) -> Self {
        Self {
            settings: Arc::new(settings),
            fs,
        }
    }

    /// Admin service backed by the configured data file.
    #[instrument(level = "debug", skip(self))]
    pub fn admin_service(&self) -> InfraResult<MenuAdminService> {
        let path = &self.settings.data_file;
        debug!("opening menu data at {}", path.display());
        let storage = JsonFileTreeStorage::open(Arc::clone(&self.fs), path).map_err(|source| {
            InfraError::OpenStorage {
                path: path.display().to_string(),
                source,
            }
        })?;
        let store = MenuItemStore::new(Box::new(storage))
            .with_placeholder_title(self.settings.placeholder_title.clone());
        Ok(MenuAdminService::new(store).with_dom_node_prefix(self.settings.dom_node_prefix.clone()))
    }
}
