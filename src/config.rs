//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/rsmenu/rsmenu.toml`
//! 3. Explicit config file (`--config`)
//! 4. Environment variables: `RSMENU_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::services::{DEFAULT_DOM_NODE_PREFIX, DEFAULT_PLACEHOLDER_TITLE};
use crate::application::ApplicationError;

/// Unified configuration for rsmenu.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// JSON document holding the menu forest
    pub data_file: PathBuf,
    /// DOM id prefix of items in the rendered tree view
    pub dom_node_prefix: String,
    /// Title of the child created below every new menu item
    pub placeholder_title: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            dom_node_prefix: DEFAULT_DOM_NODE_PREFIX.to_string(),
            placeholder_title: DEFAULT_PLACEHOLDER_TITLE.to_string(),
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "rsmenu")
}

/// Default data file (`<XDG data dir>/rsmenu/menu.json`).
fn default_data_file() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.data_dir().join("menu.json"))
        .unwrap_or_else(|| PathBuf::from("~/.rsmenu/menu.json"))
}

/// Get the XDG config directory for rsmenu.
pub fn global_config_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("rsmenu.toml"))
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

/// Expand `~`, `$VAR` and `${VAR}`; unresolvable input is kept as is.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}

impl Settings {
    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_file` - Optional explicit config file; it must exist
    pub fn load(config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        let defaults = Settings::default();
        let mut builder = Config::builder()
            .set_default(
                "data_file",
                defaults.data_file.to_string_lossy().to_string(),
            )
            .map_err(config_err)?
            .set_default("dom_node_prefix", defaults.dom_node_prefix)
            .map_err(config_err)?
            .set_default("placeholder_title", defaults.placeholder_title)
            .map_err(config_err)?;

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                builder = builder.add_source(File::from(global_path).required(false));
            }
        }

        if let Some(path) = config_file {
            if !path.exists() {
                return Err(ApplicationError::Config {
                    message: format!("config file not found: {}", path.display()),
                });
            }
            builder = builder.add_source(File::from(path).required(true));
        }

        builder = builder.add_source(Environment::with_prefix("RSMENU").prefix_separator("_"));

        let config = builder.build().map_err(config_err)?;
        let mut settings: Self = config.try_deserialize().map_err(config_err)?;
        settings.expand_paths();
        settings.validate()?;

        Ok(settings)
    }

    /// Expand shell variables and tilde in path-like fields.
    fn expand_paths(&mut self) {
        let expanded = expand_env_vars(self.data_file.to_string_lossy().as_ref());
        self.data_file = PathBuf::from(expanded);
    }

    fn validate(&self) -> Result<(), ApplicationError> {
        if self.placeholder_title.trim().is_empty() {
            return Err(ApplicationError::Config {
                message: "placeholder_title must not be blank".to_string(),
            });
        }
        if self.data_file.as_os_str().is_empty() {
            return Err(ApplicationError::Config {
                message: "data_file must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Effective settings as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize settings: {}", e),
        })
    }
}
