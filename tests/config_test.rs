//! Integration tests for Settings layered loading.
//!
//! These tests only use explicit config files in temp directories; the
//! global config and `RSMENU_*` variables are expected to be absent.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use rsmenu::application::ApplicationError;
use rsmenu::config::{expand_env_vars, Settings};

#[test]
fn given_no_config_file_when_load_then_defaults() {
    let settings = Settings::load(None).expect("load settings");

    assert_eq!(settings.dom_node_prefix, "node_");
    assert_eq!(settings.placeholder_title, "dummy child");
    assert!(settings.data_file.ends_with("menu.json"));
}

#[test]
fn given_explicit_config_when_load_then_overrides_defaults() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let config_path = temp.path().join("rsmenu.toml");
    let data_file = temp.path().join("data").join("menus.json");
    fs::write(
        &config_path,
        format!(
            "data_file = \"{}\"\ndom_node_prefix = \"item-\"\n",
            data_file.display()
        ),
    )
    .unwrap();

    // Act
    let settings = Settings::load(Some(&config_path)).expect("load settings");

    // Assert
    assert_eq!(settings.data_file, data_file);
    assert_eq!(settings.dom_node_prefix, "item-");
    assert_eq!(settings.placeholder_title, "dummy child");
}

#[test]
fn given_missing_explicit_config_when_load_then_config_error() {
    let temp = TempDir::new().unwrap();

    let result = Settings::load(Some(&temp.path().join("absent.toml")));

    assert!(matches!(result, Err(ApplicationError::Config { .. })));
}

#[test]
fn given_blank_placeholder_when_load_then_config_error() {
    let temp = TempDir::new().unwrap();
    let config_path = temp.path().join("rsmenu.toml");
    fs::write(&config_path, "placeholder_title = \"  \"\n").unwrap();

    let result = Settings::load(Some(&config_path));

    assert!(matches!(result, Err(ApplicationError::Config { .. })));
}

#[test]
fn given_malformed_toml_when_load_then_config_error() {
    let temp = TempDir::new().unwrap();
    let config_path = temp.path().join("rsmenu.toml");
    fs::write(&config_path, "data_file = [unterminated\n").unwrap();

    let result = Settings::load(Some(&config_path));

    assert!(matches!(result, Err(ApplicationError::Config { .. })));
}

#[test]
fn given_tilde_data_file_when_load_then_expanded() {
    let temp = TempDir::new().unwrap();
    let config_path = temp.path().join("rsmenu.toml");
    fs::write(&config_path, "data_file = \"~/menus/menu.json\"\n").unwrap();

    let settings = Settings::load(Some(&config_path)).expect("load settings");

    assert!(!settings.data_file.starts_with("~"));
    assert!(settings.data_file.ends_with(PathBuf::from("menus/menu.json")));
}

#[test]
fn given_unknown_variable_when_expanding_then_kept_verbatim() {
    assert_eq!(
        expand_env_vars("$RSMENU_SURELY_UNSET_VAR/menu.json"),
        "$RSMENU_SURELY_UNSET_VAR/menu.json"
    );
}
