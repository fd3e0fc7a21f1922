//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::entities::NodeId;

/// Domain errors represent violations of the menu forest's invariants.
/// These are independent of storage and presentation concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("menu item not found: {0}")]
    NodeNotFound(NodeId),

    #[error("menu item {0} is not a root item")]
    NotARoot(NodeId),

    #[error("menu item {parent} cannot become the parent of {node}")]
    InvalidParent { node: NodeId, parent: NodeId },

    #[error("menu item has not been saved yet")]
    Unsaved,

    #[error("duplicate menu item id: {0}")]
    DuplicateId(NodeId),

    #[error("no menu item ids left")]
    IdsExhausted,

    #[error("corrupt menu forest: {0}")]
    CorruptForest(String),
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
