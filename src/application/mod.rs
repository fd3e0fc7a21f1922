//! Application layer: services and use cases
//!
//! This layer orchestrates domain logic and depends on I/O boundary traits.

pub mod error;
pub mod options;
pub mod services;
pub mod tree_html;
pub mod validation;

pub use error::{ApplicationError, ApplicationResult};
pub use options::{coerce_flag, OptionRow, OptionsEditor};
pub use validation::{FieldError, ValidationErrors, ValidationKind};
