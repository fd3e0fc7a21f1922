//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum, ValueHint};

use crate::domain::NodeId;

/// Administer hierarchical navigation menus stored as a nested-set forest
#[derive(Parser, Debug)]
#[command(name = "rsmenu")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug output, repeat for more (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    /// Explicit config file (layered over the global config)
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Menu data file (overrides config)
    #[arg(long, global = true, env = "RSMENU_DATA_FILE", value_hint = ValueHint::FilePath)]
    pub data_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List root menus
    List,

    /// Show the item tree of a root menu
    View {
        /// Root menu id
        id: NodeId,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = ViewFormat::Tree)]
        format: ViewFormat,
    },

    /// Create a menu item, or edit an existing one
    Edit(EditArgs),

    /// Delete a menu item and its whole subtree
    Delete {
        /// Menu item id
        id: NodeId,
        /// Cancel the delete (nothing is removed)
        #[arg(long, conflicts_with = "yes")]
        cancel: bool,
        /// Confirm the delete; without it only the confirmation is shown
        #[arg(short, long)]
        yes: bool,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Arguments of the edit form.
#[derive(clap::Args, Debug, Default)]
pub struct EditArgs {
    /// Item to edit; omit to create a new item
    pub id: Option<NodeId>,

    /// Item title
    #[arg(short, long)]
    pub title: Option<String>,

    /// Set an option row: KEY=VALUE (KEY may carry its `*`/`+` suffix)
    #[arg(short, long = "option", value_name = "KEY=VALUE")]
    pub options: Vec<String>,

    /// Remove an option row
    #[arg(long, value_name = "KEY")]
    pub unset: Vec<String>,

    /// Parent item
    #[arg(short, long, conflicts_with = "no_parent")]
    pub parent: Option<NodeId>,

    /// Detach from the current parent (make it a root)
    #[arg(long)]
    pub no_parent: bool,

    /// Root item of the tree the item belongs to
    #[arg(short, long)]
    pub root: Option<NodeId>,

    /// Cancel the edit (nothing is saved)
    #[arg(long)]
    pub cancel: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewFormat {
    /// Indented tree
    Tree,
    /// Nested list markup
    Html,
    /// Menu and hierarchy as JSON
    Json,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective settings
    Show,
    /// Show config file locations
    Path,
}
