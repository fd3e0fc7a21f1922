//! In-memory tree storage with staged changes

use tracing::{debug, instrument};

use crate::domain::{DomainError, HierarchyNode, MenuForest, MenuNode, NodeId};
use crate::infrastructure::traits::{StorageResult, TreeStorage};

/// Keeps a committed forest and a working copy.
///
/// Reads and writes go to the working copy; `flush` promotes it,
/// `rollback` resets it to the committed state.
#[derive(Debug, Default, Clone)]
pub struct MemoryTreeStorage {
    committed: MenuForest,
    working: MenuForest,
}

impl MemoryTreeStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_forest(forest: MenuForest) -> Self {
        Self {
            committed: forest.clone(),
            working: forest,
        }
    }

    /// State as of the last flush.
    pub fn committed(&self) -> &MenuForest {
        &self.committed
    }

    /// State including staged changes.
    pub fn working(&self) -> &MenuForest {
        &self.working
    }

    fn load(&self, id: NodeId) -> StorageResult<MenuNode> {
        Ok(self.working.get(id).ok_or(DomainError::NodeNotFound(id))?)
    }
}

impl TreeStorage for MemoryTreeStorage {
    fn find(&self, id: NodeId) -> Option<MenuNode> {
        self.working.get(id)
    }

    fn root_nodes(&self) -> Vec<MenuNode> {
        self.working.root_nodes()
    }

    fn children_hierarchy(&self, id: NodeId) -> StorageResult<Vec<HierarchyNode>> {
        Ok(self.working.hierarchy(id)?)
    }

    #[instrument(level = "debug", skip(self, node))]
    fn persist_as_first_child(&mut self, node: MenuNode) -> StorageResult<MenuNode> {
        if node.id.is_some() {
            return self.update(&node);
        }
        let id = self
            .working
            .insert_first_child(node.title, node.options, node.parent)?;
        self.load(id)
    }

    fn persist_as_first_child_of(
        &mut self,
        mut node: MenuNode,
        parent: NodeId,
    ) -> StorageResult<MenuNode> {
        node.parent = Some(parent);
        self.persist_as_first_child(node)
    }

    #[instrument(level = "debug", skip(self, node))]
    fn update(&mut self, node: &MenuNode) -> StorageResult<MenuNode> {
        let id = node.id.ok_or(DomainError::Unsaved)?;
        self.working.move_first_child(id, node.parent)?;
        self.working
            .update(id, node.title.clone(), node.options.clone())?;
        self.load(id)
    }

    fn remove(&mut self, id: NodeId) -> StorageResult<Vec<NodeId>> {
        Ok(self.working.remove_subtree(id)?)
    }

    fn flush(&mut self) -> StorageResult<()> {
        self.committed = self.working.clone();
        debug!("committed {} menu items", self.committed.len());
        Ok(())
    }

    fn rollback(&mut self) {
        debug!("discarding staged menu changes");
        self.working = self.committed.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_staged_insert_when_rolling_back_then_item_disappears() {
        let mut storage = MemoryTreeStorage::new();
        let node = storage.persist_as_first_child(MenuNode::new("main")).unwrap();
        let id = node.id.unwrap();
        assert!(storage.find(id).is_some());

        storage.rollback();

        assert!(storage.find(id).is_none());
        assert!(storage.root_nodes().is_empty());
    }

    #[test]
    fn given_flushed_insert_when_rolling_back_then_item_stays() {
        let mut storage = MemoryTreeStorage::new();
        let id = storage
            .persist_as_first_child(MenuNode::new("main"))
            .unwrap()
            .id
            .unwrap();
        storage.flush().unwrap();

        storage.rollback();

        assert!(storage.find(id).is_some());
        assert_eq!(storage.committed().len(), 1);
    }
}
