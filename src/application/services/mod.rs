//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (TreeStorage)
//! but are themselves concrete structs, not traits.

mod admin;
mod store;

pub use admin::{
    DeleteAction, DeleteConfirmation, DeleteOutcome, EditAction, EditOutcome, Flash, FlashKind,
    ListView, MenuAdminService, MenuItemForm, MenuView, Redirect, Route, DEFAULT_DOM_NODE_PREFIX,
    STATUS_CANCELLED, STATUS_REMOVED, STATUS_SAVED,
};
pub use store::{MenuItemStore, DEFAULT_PLACEHOLDER_TITLE};
