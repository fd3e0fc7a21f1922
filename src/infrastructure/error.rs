//! Infrastructure-level errors (wraps application errors)

use thiserror::Error;

use crate::application::ApplicationError;
use crate::infrastructure::traits::StorageError;

/// Infrastructure errors wrap application errors and add wiring concerns.
#[derive(Error, Debug)]
pub enum InfraError {
    #[error("{0}")]
    Application(#[from] ApplicationError),

    #[error("cannot open menu data at {path}: {source}")]
    OpenStorage {
        path: String,
        #[source]
        source: StorageError,
    },
}

impl From<StorageError> for InfraError {
    fn from(e: StorageError) -> Self {
        Self::Application(e.into())
    }
}

/// Result type for infrastructure layer operations.
pub type InfraResult<T> = Result<T, InfraError>;
