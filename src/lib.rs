//! rsmenu: administration of hierarchical navigation menus
//!
//! Layers, innermost first:
//! - `domain`: menu entities, option keys, nested-set forest
//! - `application`: item store, options editor, admin use cases
//! - `infrastructure`: storage backends, filesystem, wiring
//! - `cli`: argument parsing and command dispatch

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
