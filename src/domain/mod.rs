//! Domain layer: menu entities, option keys and the nested-set forest
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod entities;
pub mod error;
pub mod options;

pub use arena::{ForestNode, MenuForest};
pub use entities::{HierarchyNode, MenuNode, MenuOptions, NestedBounds, NodeId};
pub use error::{DomainError, DomainResult};
pub use options::{OptionKey, UnknownOptionKey, ValueShape};
