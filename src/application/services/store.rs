//! Menu item store
//!
//! CRUD and tree queries over menu items on top of a `TreeStorage`.
//! Every mutating call ends in a single flush; on failure the staged
//! changes are rolled back.

use tracing::{debug, info, instrument, warn};

use crate::application::tree_html::{render_html, HtmlTreeOptions};
use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{DomainError, HierarchyNode, MenuNode, NodeId};
use crate::infrastructure::traits::TreeStorage;

/// Title of the child created below every new menu item.
pub const DEFAULT_PLACEHOLDER_TITLE: &str = "dummy child";

/// Service for persisting and querying menu items.
pub struct MenuItemStore {
    storage: Box<dyn TreeStorage>,
    placeholder_title: String,
}

impl MenuItemStore {
    pub fn new(storage: Box<dyn TreeStorage>) -> Self {
        Self {
            storage,
            placeholder_title: DEFAULT_PLACEHOLDER_TITLE.to_string(),
        }
    }

    pub fn with_placeholder_title(mut self, title: impl Into<String>) -> Self {
        self.placeholder_title = title.into();
        self
    }

    /// Items without a parent, in stable (creation) order.
    pub fn root_nodes(&self) -> Vec<MenuNode> {
        self.storage.root_nodes()
    }

    pub fn find(&self, id: NodeId) -> ApplicationResult<MenuNode> {
        self.storage.find(id).ok_or(ApplicationError::NotFound(id))
    }

    /// Complete descendant hierarchy of a root item.
    ///
    /// Only root items can be expanded; any other item is rejected with
    /// `DomainError::NotARoot`.
    #[instrument(level = "debug", skip(self, node))]
    pub fn get_tree(&self, node: &MenuNode) -> ApplicationResult<Vec<HierarchyNode>> {
        let id = node.id.ok_or(DomainError::Unsaved)?;
        let current = self.find(id)?;
        if !current.is_root() {
            return Err(DomainError::NotARoot(id).into());
        }
        Ok(self.storage.children_hierarchy(id)?)
    }

    /// Render the hierarchy of a root item as nested lists.
    pub fn render_html(
        &self,
        node: &MenuNode,
        options: &HtmlTreeOptions<'_>,
    ) -> ApplicationResult<String> {
        let tree = self.get_tree(node)?;
        Ok(render_html(&tree, options))
    }

    /// Insert an unsaved item or update a saved one.
    ///
    /// New items go first below their parent (or become the last root) and
    /// receive a placeholder child.
    #[instrument(level = "debug", skip(self, node))]
    pub fn create_or_update(&mut self, node: MenuNode) -> ApplicationResult<MenuNode> {
        let result = self.stage_create_or_update(node);
        self.commit(result)
    }

    fn stage_create_or_update(&mut self, node: MenuNode) -> ApplicationResult<NodeId> {
        match node.id {
            None => {
                let created = self.storage.persist_as_first_child(node)?;
                let id = created.id.ok_or(DomainError::Unsaved)?;
                if self.storage.children_hierarchy(id)?.is_empty() {
                    let placeholder = MenuNode::new(self.placeholder_title.clone());
                    self.storage.persist_as_first_child_of(placeholder, id)?;
                    debug!("added placeholder child below {}", id);
                }
                info!("created menu item {}", id);
                Ok(id)
            }
            Some(id) => {
                if self.storage.find(id).is_none() {
                    return Err(ApplicationError::NotFound(id));
                }
                self.storage.update(&node)?;
                info!("updated menu item {}", id);
                Ok(id)
            }
        }
    }

    fn commit(&mut self, staged: ApplicationResult<NodeId>) -> ApplicationResult<MenuNode> {
        let id = match staged {
            Ok(id) => id,
            Err(e) => {
                self.storage.rollback();
                return Err(e);
            }
        };
        if let Err(e) = self.storage.flush() {
            warn!("flush failed, rolling back: {}", e);
            self.storage.rollback();
            return Err(e.into());
        }
        self.find(id)
    }

    /// Remove an item and its whole subtree. Irreversible.
    #[instrument(level = "debug", skip(self, node))]
    pub fn delete(&mut self, node: &MenuNode) -> ApplicationResult<Vec<NodeId>> {
        let id = node.id.ok_or(DomainError::Unsaved)?;
        let removed = match self.storage.remove(id) {
            Ok(removed) => removed,
            Err(e) => {
                self.storage.rollback();
                return Err(e.into());
            }
        };
        if let Err(e) = self.storage.flush() {
            warn!("flush failed, rolling back: {}", e);
            self.storage.rollback();
            return Err(e.into());
        }
        info!("removed menu item {} and {} descendants", id, removed.len().saturating_sub(1));
        Ok(removed)
    }
}
