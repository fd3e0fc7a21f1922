//! Application-level errors (wraps domain errors)

use thiserror::Error;

use crate::application::validation::ValidationErrors;
use crate::domain::{DomainError, NodeId};
use crate::infrastructure::traits::StorageError;

/// Application errors wrap domain errors and add use-case level context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("access denied: menu item {0} is not a root item")]
    AccessDenied(NodeId),

    #[error("menu item not found: {0}")]
    NotFound(NodeId),

    #[error("config error: {message}")]
    Config { message: String },

    #[error("persistence failed: {context}")]
    Persistence {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl From<StorageError> for ApplicationError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::Tree(DomainError::NodeNotFound(id)) => Self::NotFound(id),
            StorageError::Tree(domain) => Self::Domain(domain),
            other => Self::Persistence {
                context: other.to_string(),
                source: Box::new(other),
            },
        }
    }
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
