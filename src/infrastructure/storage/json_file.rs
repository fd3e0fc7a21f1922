//! Tree storage persisted as a single JSON document
//!
//! The whole forest is rewritten on every flush: the document is written to
//! a sibling `.tmp` file first and then renamed over the data file.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::domain::{DomainError, HierarchyNode, MenuForest, MenuNode, MenuOptions, NodeId};
use crate::infrastructure::storage::MemoryTreeStorage;
use crate::infrastructure::traits::{FileSystem, StorageError, StorageResult, TreeStorage};

/// Version of the on-disk document layout.
pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct StoredForest {
    version: u32,
    next_id: u64,
    /// Items tree by tree, pre-order, siblings in display order
    items: Vec<StoredItem>,
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredItem {
    id: NodeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    parent: Option<NodeId>,
    title: String,
    #[serde(default, skip_serializing_if = "MenuOptions::is_empty")]
    options: MenuOptions,
}

/// JSON-file backed tree storage.
pub struct JsonFileTreeStorage {
    fs: Arc<dyn FileSystem>,
    path: PathBuf,
    inner: MemoryTreeStorage,
}

impl JsonFileTreeStorage {
    /// Open the data file, starting with an empty forest if it does not exist yet.
    #[instrument(level = "debug", skip(fs))]
    pub fn open(fs: Arc<dyn FileSystem>, path: &Path) -> StorageResult<Self> {
        let forest = if fs.exists(path) {
            let content = fs
                .read_to_string(path)
                .map_err(|e| StorageError::io(format!("read {}", path.display()), e))?;
            decode(&content, path)?
        } else {
            debug!("no menu data at {}, starting empty", path.display());
            MenuForest::new()
        };

        Ok(Self {
            fs,
            path: path.to_path_buf(),
            inner: MemoryTreeStorage::from_forest(forest),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".tmp");
        PathBuf::from(name)
    }
}

fn decode(content: &str, path: &Path) -> StorageResult<MenuForest> {
    let stored: StoredForest =
        serde_json::from_str(content).map_err(|e| StorageError::Format {
            context: format!("parse {}", path.display()),
            source: e,
        })?;
    if stored.version != FORMAT_VERSION {
        return Err(DomainError::CorruptForest(format!(
            "unsupported format version {} in {}",
            stored.version,
            path.display()
        ))
        .into());
    }

    let nodes = stored.items.into_iter().map(|item| MenuNode {
        id: Some(item.id),
        title: item.title,
        parent: item.parent,
        options: item.options,
        ..MenuNode::default()
    });
    Ok(MenuForest::restore(stored.next_id, nodes)?)
}

fn encode(forest: &MenuForest) -> StorageResult<String> {
    let stored = StoredForest {
        version: FORMAT_VERSION,
        next_id: forest.next_id().0,
        items: forest
            .iter()
            .map(|(_, node)| StoredItem {
                id: node.id,
                parent: node.parent.and_then(|p| forest.get_node(p)).map(|p| p.id),
                title: node.title.clone(),
                options: node.options.clone(),
            })
            .collect(),
    };
    serde_json::to_string_pretty(&stored).map_err(|e| StorageError::Format {
        context: "serialize menu forest".to_string(),
        source: e,
    })
}

impl TreeStorage for JsonFileTreeStorage {
    fn find(&self, id: NodeId) -> Option<MenuNode> {
        self.inner.find(id)
    }

    fn root_nodes(&self) -> Vec<MenuNode> {
        self.inner.root_nodes()
    }

    fn children_hierarchy(&self, id: NodeId) -> StorageResult<Vec<HierarchyNode>> {
        self.inner.children_hierarchy(id)
    }

    fn persist_as_first_child(&mut self, node: MenuNode) -> StorageResult<MenuNode> {
        self.inner.persist_as_first_child(node)
    }

    fn persist_as_first_child_of(
        &mut self,
        node: MenuNode,
        parent: NodeId,
    ) -> StorageResult<MenuNode> {
        self.inner.persist_as_first_child_of(node, parent)
    }

    fn update(&mut self, node: &MenuNode) -> StorageResult<MenuNode> {
        self.inner.update(node)
    }

    fn remove(&mut self, id: NodeId) -> StorageResult<Vec<NodeId>> {
        self.inner.remove(id)
    }

    #[instrument(level = "debug", skip(self))]
    fn flush(&mut self) -> StorageResult<()> {
        let content = encode(self.inner.working())?;
        let tmp = self.temp_path();

        self.fs
            .ensure_parent(&self.path)
            .map_err(|e| StorageError::io(format!("create parent of {}", self.path.display()), e))?;
        self.fs
            .write(&tmp, &content)
            .map_err(|e| StorageError::io(format!("write {}", tmp.display()), e))?;
        self.fs
            .rename(&tmp, &self.path)
            .map_err(|e| StorageError::io(format!("replace {}", self.path.display()), e))?;

        self.inner.flush()?;
        info!(
            "saved {} menu items to {}",
            self.inner.committed().len(),
            self.path.display()
        );
        Ok(())
    }

    fn rollback(&mut self) {
        self.inner.rollback();
    }
}
