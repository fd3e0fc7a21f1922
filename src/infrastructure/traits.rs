//! I/O boundary traits for testability
//!
//! These traits abstract the filesystem and the persistent tree storage,
//! allowing services to be tested with in-memory or failing implementations.

use std::io;
use std::path::Path;

use thiserror::Error;

use crate::domain::{DomainError, HierarchyNode, MenuNode, NodeId};

/// Filesystem abstraction for testability.
pub trait FileSystem: Send + Sync {
    /// Read file contents to string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Write string content to file.
    fn write(&self, path: &Path, content: &str) -> io::Result<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Create directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Rename/move a file.
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;

    /// Create parent directories if needed.
    fn ensure_parent(&self, path: &Path) -> io::Result<()>;
}

/// Errors raised by a tree storage provider.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("{0}")]
    Tree(#[from] DomainError),

    #[error("I/O error: {context}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },

    #[error("invalid menu data: {context}")]
    Format {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

impl StorageError {
    /// Create an I/O error with context.
    pub fn io(context: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Persistent tree storage provider.
///
/// Mutations are staged until `flush` commits them; `rollback` discards
/// everything staged since the last successful flush.
pub trait TreeStorage: Send {
    /// Load one item.
    fn find(&self, id: NodeId) -> Option<MenuNode>;

    /// Items without a parent, in creation order.
    fn root_nodes(&self) -> Vec<MenuNode>;

    /// Complete descendant hierarchy of an item, the item itself excluded.
    fn children_hierarchy(&self, id: NodeId) -> StorageResult<Vec<HierarchyNode>>;

    /// Insert an unsaved item as first child of its declared parent,
    /// or as a new root when it has none.
    fn persist_as_first_child(&mut self, node: MenuNode) -> StorageResult<MenuNode>;

    /// Insert an unsaved item as first child of `parent`.
    fn persist_as_first_child_of(&mut self, node: MenuNode, parent: NodeId)
        -> StorageResult<MenuNode>;

    /// Write title/options of a saved item; a changed parent moves the item
    /// (with its subtree) to be the first child of the new parent.
    fn update(&mut self, node: &MenuNode) -> StorageResult<MenuNode>;

    /// Remove an item and its whole subtree.
    fn remove(&mut self, id: NodeId) -> StorageResult<Vec<NodeId>>;

    /// Commit staged changes.
    fn flush(&mut self) -> StorageResult<()>;

    /// Discard staged changes.
    fn rollback(&mut self);
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Real filesystem implementation.
#[derive(Debug, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn write(&self, path: &Path, content: &str) -> io::Result<()> {
        std::fs::write(path, content)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        std::fs::rename(from, to)
    }

    fn ensure_parent(&self, path: &Path) -> io::Result<()> {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => self.create_dir_all(parent),
            _ => Ok(()),
        }
    }
}
