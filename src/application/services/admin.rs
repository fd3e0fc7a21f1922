//! Menu administration use cases
//!
//! List, view, edit and delete, each a single request/response cycle.
//! Mutating use cases end in a redirect to the menu list carrying a
//! status flash; invalid edit submissions are handed back with
//! field-level errors and nothing persisted.

use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::application::options::{OptionRow, OptionsEditor};
use crate::application::services::store::MenuItemStore;
use crate::application::tree_html::{render_html, HtmlTreeOptions};
use crate::application::validation::{ValidationErrors, ValidationKind};
use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{DomainError, HierarchyNode, MenuNode, NodeId, OptionKey};

pub const STATUS_CANCELLED: &str = "Operation cancelled.";
pub const STATUS_SAVED: &str = "Done! Menu saved.";
pub const STATUS_REMOVED: &str = "Done! Menu removed.";

/// Default DOM id prefix of tree items in the rendered view.
pub const DEFAULT_DOM_NODE_PREFIX: &str = "node_";

/// Where the presentation layer goes after a finished use case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    ListMenus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashKind {
    Status,
}

/// One-shot notification shown after a redirect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flash {
    pub kind: FlashKind,
    pub message: String,
}

impl Flash {
    pub fn status(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Status,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub route: Route,
    pub flash: Option<Flash>,
}

impl Redirect {
    fn to_list(message: &str) -> Self {
        Self {
            route: Route::ListMenus,
            flash: Some(Flash::status(message)),
        }
    }
}

/// Result of the list use case.
#[derive(Debug, Clone, Serialize)]
pub struct ListView {
    pub root_nodes: Vec<MenuNode>,
}

/// Result of the view use case.
#[derive(Debug, Clone, Serialize)]
pub struct MenuView {
    pub menu: MenuNode,
    pub tree: Vec<HierarchyNode>,
    pub html: String,
}

/// Edit form of a menu item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuItemForm {
    pub title: String,
    pub options: Vec<OptionRow>,
    pub parent: Option<NodeId>,
    pub root: Option<NodeId>,
}

impl MenuItemForm {
    /// Replace the row for `key` (bare name or label), or append one.
    pub fn set_option(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self.options.iter_mut().find(|row| same_key(&row.key, key)) {
            Some(row) => row.value = value,
            None => self.options.push(OptionRow::new(key, value)),
        }
    }

    /// Drop every row for `key` (bare name or label).
    pub fn unset_option(&mut self, key: &str) {
        self.options.retain(|row| !same_key(&row.key, key));
    }
}

/// Recognized keys match by name or label; anything else only verbatim.
fn same_key(a: &str, b: &str) -> bool {
    match (a.parse::<OptionKey>(), b.parse::<OptionKey>()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a.trim() == b.trim(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditAction {
    Save,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteAction {
    Delete,
    Cancel,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EditOutcome {
    Saved { node: MenuNode, redirect: Redirect },
    Cancelled(Redirect),
    /// Re-present the form with field errors; nothing was persisted.
    Invalid {
        form: MenuItemForm,
        errors: ValidationErrors,
    },
}

/// What a delete would remove.
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteConfirmation {
    pub node: MenuNode,
    pub descendants: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DeleteOutcome {
    Deleted {
        removed: Vec<NodeId>,
        redirect: Redirect,
    },
    Cancelled(Redirect),
}

/// Orchestrates the menu administration use cases.
pub struct MenuAdminService {
    store: MenuItemStore,
    options_editor: OptionsEditor,
    dom_node_prefix: String,
}

impl MenuAdminService {
    pub fn new(store: MenuItemStore) -> Self {
        Self {
            store,
            options_editor: OptionsEditor::new(),
            dom_node_prefix: DEFAULT_DOM_NODE_PREFIX.to_string(),
        }
    }

    pub fn with_dom_node_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.dom_node_prefix = prefix.into();
        self
    }

    pub fn store(&self) -> &MenuItemStore {
        &self.store
    }

    #[instrument(level = "debug", skip(self))]
    pub fn list(&self) -> ListView {
        ListView {
            root_nodes: self.store.root_nodes(),
        }
    }

    /// Tree of a root item. Non-root items are denied.
    #[instrument(level = "debug", skip(self))]
    pub fn view(&self, id: NodeId) -> ApplicationResult<MenuView> {
        let menu = self.store.find(id)?;
        if !menu.is_root() {
            debug!("refusing tree view of non-root item {}", id);
            return Err(ApplicationError::AccessDenied(id));
        }
        let tree = self.store.get_tree(&menu)?;
        let html = render_html(&tree, &HtmlTreeOptions::admin_tree(&self.dom_node_prefix));
        Ok(MenuView { menu, tree, html })
    }

    /// Form for a new item (`None`) or pre-filled from a saved one.
    #[instrument(level = "debug", skip(self))]
    pub fn edit_form(&self, id: Option<NodeId>) -> ApplicationResult<MenuItemForm> {
        let Some(id) = id else {
            return Ok(MenuItemForm::default());
        };
        let node = self.store.find(id)?;
        Ok(MenuItemForm {
            title: node.title.clone(),
            options: self.options_editor.explode(&node.options),
            parent: node.parent,
            root: node.root,
        })
    }

    #[instrument(level = "debug", skip(self, form))]
    pub fn submit_edit(
        &mut self,
        id: Option<NodeId>,
        form: MenuItemForm,
        action: EditAction,
    ) -> ApplicationResult<EditOutcome> {
        if action == EditAction::Cancel {
            info!("edit cancelled");
            return Ok(EditOutcome::Cancelled(Redirect::to_list(STATUS_CANCELLED)));
        }

        let mut node = match id {
            Some(id) => self.store.find(id)?,
            None => MenuNode::default(),
        };

        let mut errors = ValidationErrors::new();
        if form.title.trim().is_empty() {
            errors.push("title", ValidationKind::Blank);
        }
        let options = match self.options_editor.collapse(&form.options) {
            Ok(options) => Some(options),
            Err(option_errors) => {
                errors.extend(option_errors);
                None
            }
        };
        if let Some(parent) = form.parent {
            if self.store.find(parent).is_err() {
                errors.push("parent", ValidationKind::UnknownItem(parent));
            }
        }
        if let Some(root) = form.root {
            match self.store.find(root) {
                Ok(root_node) if !root_node.is_root() => {
                    errors.push("root", ValidationKind::NotARoot(root))
                }
                Ok(_) => {}
                Err(_) => errors.push("root", ValidationKind::UnknownItem(root)),
            }
        }

        let options = match options {
            Some(options) if errors.is_empty() => options,
            _ => {
                debug!("edit form rejected: {}", errors);
                return Ok(EditOutcome::Invalid { form, errors });
            }
        };

        node.title = form.title.trim().to_string();
        node.options = options;
        node.parent = form.parent;
        node.root = form.root;

        match self.store.create_or_update(node) {
            Ok(saved) => {
                if form.root.is_some() && form.root != saved.root {
                    debug!(
                        "submitted root {:?} replaced by {:?} from the parent chain",
                        form.root, saved.root
                    );
                }
                Ok(EditOutcome::Saved {
                    node: saved,
                    redirect: Redirect::to_list(STATUS_SAVED),
                })
            }
            Err(ApplicationError::Domain(DomainError::InvalidParent { parent, .. })) => {
                let mut errors = ValidationErrors::new();
                errors.push("parent", ValidationKind::InvalidParent(parent));
                Ok(EditOutcome::Invalid { form, errors })
            }
            Err(e) => Err(e),
        }
    }

    /// Confirmation data for deleting an item.
    #[instrument(level = "debug", skip(self))]
    pub fn delete_form(&self, id: NodeId) -> ApplicationResult<DeleteConfirmation> {
        let node = self.store.find(id)?;
        let descendants = node.bounds.map(|b| b.descendant_count()).unwrap_or(0);
        Ok(DeleteConfirmation { node, descendants })
    }

    #[instrument(level = "debug", skip(self))]
    pub fn submit_delete(
        &mut self,
        id: NodeId,
        action: DeleteAction,
    ) -> ApplicationResult<DeleteOutcome> {
        let node = self.store.find(id)?;
        match action {
            DeleteAction::Cancel => {
                info!("delete of {} cancelled", id);
                Ok(DeleteOutcome::Cancelled(Redirect::to_list(STATUS_CANCELLED)))
            }
            DeleteAction::Delete => {
                let removed = self.store.delete(&node)?;
                Ok(DeleteOutcome::Deleted {
                    removed,
                    redirect: Redirect::to_list(STATUS_REMOVED),
                })
            }
        }
    }
}
