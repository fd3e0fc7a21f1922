use std::collections::HashMap;

use generational_arena::{Arena, Index};
use tracing::{debug, instrument};

use crate::domain::entities::{HierarchyNode, MenuNode, MenuOptions, NestedBounds, NodeId};
use crate::domain::error::{DomainError, DomainResult};

/// Menu item as held inside the forest arena.
#[derive(Debug, Clone)]
pub struct ForestNode {
    pub id: NodeId,
    pub title: String,
    pub options: MenuOptions,
    /// Index of parent node in the arena, None for root nodes
    pub parent: Option<Index>,
    /// Indices of child nodes in the arena, first child first
    pub children: Vec<Index>,
    pub root: NodeId,
    pub bounds: NestedBounds,
}

/// Arena-based forest of menu trees with nested-set numbering.
///
/// Uses generational arena for memory-safe node references and O(1) lookups.
/// Bounds, levels and root references are recomputed after every mutation,
/// so snapshots handed out always satisfy the nested-set invariant.
#[derive(Debug, Clone)]
pub struct MenuForest {
    arena: Arena<ForestNode>,
    ids: HashMap<NodeId, Index>,
    /// Root nodes in creation order
    roots: Vec<Index>,
    next_id: u64,
}

impl Default for MenuForest {
    fn default() -> Self {
        Self::new()
    }
}

impl MenuForest {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            ids: HashMap::new(),
            roots: Vec::new(),
            next_id: 1,
        }
    }

    /// Rebuild a forest from pre-ordered snapshots.
    ///
    /// Parents must precede their children; siblings keep their input order.
    /// `next_id` is raised above the highest restored id if needed.
    #[instrument(level = "debug", skip(nodes))]
    pub fn restore(
        next_id: u64,
        nodes: impl IntoIterator<Item = MenuNode>,
    ) -> DomainResult<Self> {
        let mut forest = Self::new();
        forest.next_id = next_id.max(1);

        for node in nodes {
            let id = node
                .id
                .ok_or_else(|| DomainError::CorruptForest(format!("item '{}' has no id", node.title)))?;
            if forest.ids.contains_key(&id) {
                return Err(DomainError::DuplicateId(id));
            }
            let parent_idx = node
                .parent
                .map(|p| {
                    forest.ids.get(&p).copied().ok_or_else(|| {
                        DomainError::CorruptForest(format!(
                            "item {} references unknown parent {}",
                            id, p
                        ))
                    })
                })
                .transpose()?;

            let idx = forest.arena.insert(ForestNode {
                id,
                title: node.title,
                options: node.options,
                parent: parent_idx,
                children: Vec::new(),
                root: id,
                bounds: NestedBounds::default(),
            });
            forest.ids.insert(id, idx);
            match parent_idx {
                Some(p) => {
                    if let Some(parent) = forest.arena.get_mut(p) {
                        parent.children.push(idx);
                    }
                }
                None => forest.roots.push(idx),
            }
            let after = id.0.checked_add(1).ok_or_else(|| {
                DomainError::CorruptForest(format!("item id {} is out of range", id))
            })?;
            forest.next_id = forest.next_id.max(after);
        }

        forest.renumber();
        forest.verify()?;
        debug!("restored {} menu items", forest.len());
        Ok(forest)
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Id the next inserted item will receive.
    pub fn next_id(&self) -> NodeId {
        NodeId(self.next_id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.ids.contains_key(&id)
    }

    fn index_of(&self, id: NodeId) -> DomainResult<Index> {
        self.ids
            .get(&id)
            .copied()
            .ok_or(DomainError::NodeNotFound(id))
    }

    pub fn get_node(&self, idx: Index) -> Option<&ForestNode> {
        self.arena.get(idx)
    }

    fn snapshot(&self, idx: Index) -> Option<MenuNode> {
        let node = self.arena.get(idx)?;
        Some(MenuNode {
            id: Some(node.id),
            title: node.title.clone(),
            parent: node.parent.and_then(|p| self.arena.get(p)).map(|p| p.id),
            root: Some(node.root),
            options: node.options.clone(),
            bounds: Some(node.bounds),
        })
    }

    #[instrument(level = "trace", skip(self))]
    pub fn get(&self, id: NodeId) -> Option<MenuNode> {
        let idx = self.ids.get(&id)?;
        self.snapshot(*idx)
    }

    /// Root items in creation order.
    #[instrument(level = "trace", skip(self))]
    pub fn root_nodes(&self) -> Vec<MenuNode> {
        self.roots
            .iter()
            .filter_map(|&idx| self.snapshot(idx))
            .collect()
    }

    /// Direct children of an item, first child first.
    pub fn children(&self, id: NodeId) -> DomainResult<Vec<MenuNode>> {
        let idx = self.index_of(id)?;
        Ok(self
            .arena
            .get(idx)
            .map(|node| {
                node.children
                    .iter()
                    .filter_map(|&c| self.snapshot(c))
                    .collect()
            })
            .unwrap_or_default())
    }

    /// Complete descendant hierarchy of an item (the item itself excluded).
    #[instrument(level = "debug", skip(self))]
    pub fn hierarchy(&self, id: NodeId) -> DomainResult<Vec<HierarchyNode>> {
        let idx = self.index_of(id)?;
        Ok(self.build_hierarchy(idx))
    }

    fn build_hierarchy(&self, idx: Index) -> Vec<HierarchyNode> {
        let Some(node) = self.arena.get(idx) else {
            return Vec::new();
        };
        node.children
            .iter()
            .filter_map(|&child_idx| {
                let child = self.arena.get(child_idx)?;
                Some(HierarchyNode {
                    id: child.id,
                    title: child.title.clone(),
                    level: child.bounds.level,
                    children: self.build_hierarchy(child_idx),
                })
            })
            .collect()
    }

    /// True if `candidate` lies below `ancestor`.
    pub fn is_descendant(&self, ancestor: NodeId, candidate: NodeId) -> DomainResult<bool> {
        let idx = self.index_of(ancestor)?;
        Ok(self
            .subtree(idx)
            .skip(1)
            .any(|(_, node)| node.id == candidate))
    }

    /// Insert a new item as first child of `parent`, or as last root.
    #[instrument(level = "debug", skip(self, options))]
    pub fn insert_first_child(
        &mut self,
        title: String,
        options: MenuOptions,
        parent: Option<NodeId>,
    ) -> DomainResult<NodeId> {
        let parent_idx = parent.map(|p| self.index_of(p)).transpose()?;

        let id = NodeId(self.next_id);
        self.next_id = self.next_id.checked_add(1).ok_or(DomainError::IdsExhausted)?;

        let idx = self.arena.insert(ForestNode {
            id,
            title,
            options,
            parent: parent_idx,
            children: Vec::new(),
            root: id,
            bounds: NestedBounds::default(),
        });
        self.ids.insert(id, idx);

        match parent_idx {
            Some(p) => {
                if let Some(parent) = self.arena.get_mut(p) {
                    parent.children.insert(0, idx);
                }
            }
            None => self.roots.push(idx),
        }

        self.renumber();
        debug!("inserted menu item {} under {:?}", id, parent);
        Ok(id)
    }

    #[instrument(level = "debug", skip(self, options))]
    pub fn update(&mut self, id: NodeId, title: String, options: MenuOptions) -> DomainResult<()> {
        let idx = self.index_of(id)?;
        let node = self
            .arena
            .get_mut(idx)
            .ok_or(DomainError::NodeNotFound(id))?;
        node.title = title;
        node.options = options;
        Ok(())
    }

    /// Re-attach an item (with its subtree) as first child of `new_parent`,
    /// or as last root when `new_parent` is None.
    ///
    /// Keeping the current parent is a no-op and preserves the position.
    #[instrument(level = "debug", skip(self))]
    pub fn move_first_child(&mut self, id: NodeId, new_parent: Option<NodeId>) -> DomainResult<()> {
        let idx = self.index_of(id)?;
        let target = new_parent.map(|p| self.index_of(p)).transpose()?;
        let current = self.arena.get(idx).and_then(|n| n.parent);
        if current == target {
            return Ok(());
        }

        if let Some(parent) = new_parent {
            if self.subtree(idx).any(|(_, node)| node.id == parent) {
                return Err(DomainError::InvalidParent { node: id, parent });
            }
        }

        self.detach(idx);
        match target {
            Some(p) => {
                if let Some(parent) = self.arena.get_mut(p) {
                    parent.children.insert(0, idx);
                }
            }
            None => self.roots.push(idx),
        }
        if let Some(node) = self.arena.get_mut(idx) {
            node.parent = target;
        }

        self.renumber();
        debug!("moved menu item {} under {:?}", id, new_parent);
        Ok(())
    }

    /// Remove an item and its whole subtree. Returns removed ids, deepest first.
    #[instrument(level = "debug", skip(self))]
    pub fn remove_subtree(&mut self, id: NodeId) -> DomainResult<Vec<NodeId>> {
        let idx = self.index_of(id)?;
        let doomed: Vec<Index> = self.subtree_postorder(idx).map(|(i, _)| i).collect();

        self.detach(idx);
        let mut removed = Vec::with_capacity(doomed.len());
        for i in doomed {
            if let Some(node) = self.arena.remove(i) {
                self.ids.remove(&node.id);
                removed.push(node.id);
            }
        }

        self.renumber();
        debug!("removed {} menu items below and including {}", removed.len(), id);
        Ok(removed)
    }

    fn detach(&mut self, idx: Index) {
        match self.arena.get(idx).and_then(|n| n.parent) {
            Some(p) => {
                if let Some(parent) = self.arena.get_mut(p) {
                    parent.children.retain(|&c| c != idx);
                }
            }
            None => self.roots.retain(|&r| r != idx),
        }
    }

    /// Recompute left/right/level and root references for every tree.
    #[instrument(level = "trace", skip(self))]
    fn renumber(&mut self) {
        for root_idx in self.roots.clone() {
            let Some(root_id) = self.arena.get(root_idx).map(|n| n.id) else {
                continue;
            };
            let mut counter = 1u32;
            let mut stack = vec![(root_idx, 0u32, false)];

            while let Some((idx, level, closing)) = stack.pop() {
                let Some(node) = self.arena.get_mut(idx) else {
                    continue;
                };
                if closing {
                    node.bounds.right = counter;
                    counter += 1;
                    continue;
                }
                node.bounds.left = counter;
                node.bounds.level = level;
                node.root = root_id;
                counter += 1;

                stack.push((idx, level, true));
                // Push children in reverse order for left-to-right numbering
                for &child in node.children.iter().rev() {
                    stack.push((child, level + 1, false));
                }
            }
        }
    }

    /// Check the structural and nested-set invariants of the whole forest.
    pub fn verify(&self) -> DomainResult<()> {
        if self.ids.len() != self.arena.len() {
            return Err(DomainError::CorruptForest(format!(
                "{} ids indexed for {} items",
                self.ids.len(),
                self.arena.len()
            )));
        }

        for (idx, node) in self.arena.iter() {
            if node.bounds.left >= node.bounds.right {
                return Err(DomainError::CorruptForest(format!(
                    "item {} has empty bounds",
                    node.id
                )));
            }
            match node.parent {
                None if node.root != node.id || !self.roots.contains(&idx) => {
                    return Err(DomainError::CorruptForest(format!(
                        "root item {} is not registered as root",
                        node.id
                    )));
                }
                _ => {}
            }
            for &child_idx in &node.children {
                let child = self.arena.get(child_idx).ok_or_else(|| {
                    DomainError::CorruptForest(format!("item {} has a dangling child", node.id))
                })?;
                if child.parent != Some(idx)
                    || child.root != node.root
                    || child.bounds.level != node.bounds.level + 1
                    || !node.bounds.encloses(&child.bounds)
                {
                    return Err(DomainError::CorruptForest(format!(
                        "item {} is misplaced below {}",
                        child.id, node.id
                    )));
                }
            }
        }
        Ok(())
    }

    /// Pre-order traversal over all trees, roots in creation order.
    pub fn iter(&self) -> TreeIterator {
        TreeIterator::new(self, self.roots.iter().rev().copied().collect())
    }

    /// Pre-order traversal of one subtree, starting with its top item.
    pub fn subtree(&self, idx: Index) -> TreeIterator {
        TreeIterator::new(self, vec![idx])
    }

    pub fn subtree_postorder(&self, idx: Index) -> PostOrderIterator {
        PostOrderIterator::new(self, idx)
    }
}

pub struct TreeIterator<'a> {
    forest: &'a MenuForest,
    stack: Vec<Index>,
}

impl<'a> TreeIterator<'a> {
    fn new(forest: &'a MenuForest, stack: Vec<Index>) -> Self {
        Self { forest, stack }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (Index, &'a ForestNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.forest.get_node(current_idx) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children.iter().rev() {
                    self.stack.push(child);
                }
                return Some((current_idx, node));
            }
        }
        None
    }
}

pub struct PostOrderIterator<'a> {
    forest: &'a MenuForest,
    stack: Vec<(Index, bool)>,
}

impl<'a> PostOrderIterator<'a> {
    fn new(forest: &'a MenuForest, start: Index) -> Self {
        Self {
            forest,
            stack: vec![(start, false)],
        }
    }
}

impl<'a> Iterator for PostOrderIterator<'a> {
    type Item = (Index, &'a ForestNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current_idx, visited)) = self.stack.pop() {
            if let Some(node) = self.forest.get_node(current_idx) {
                if !visited {
                    self.stack.push((current_idx, true));
                    for &child in node.children.iter().rev() {
                        self.stack.push((child, false));
                    }
                } else {
                    return Some((current_idx, node));
                }
            }
        }
        None
    }
}
