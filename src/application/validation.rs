//! Field-level validation errors for menu item forms

use std::fmt;

use itertools::Itertools;
use thiserror::Error;

use crate::domain::NodeId;

/// What is wrong with a single form field.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationKind {
    #[error("must not be blank")]
    Blank,

    #[error("unrecognized key: {0}")]
    UnrecognizedKey(String),

    #[error("malformed structured value for {key}: {reason}")]
    MalformedStructuredValue { key: String, reason: String },

    #[error("duplicate key: {0}")]
    DuplicateKey(String),

    #[error("menu item {0} does not exist")]
    UnknownItem(NodeId),

    #[error("menu item {0} is not a root item")]
    NotARoot(NodeId),

    #[error("menu item {0} cannot be the parent of this item")]
    InvalidParent(NodeId),
}

/// A validation failure annotated with the field it belongs to.
///
/// Option rows are addressed as `options[<row>].key` / `options[<row>].value`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{field}: {kind}")]
pub struct FieldError {
    pub field: String,
    pub kind: ValidationKind,
}

impl FieldError {
    pub fn new(field: impl Into<String>, kind: ValidationKind) -> Self {
        Self {
            field: field.into(),
            kind,
        }
    }

    /// Field name of a column in an option row.
    pub fn option_field(row: usize, column: &str) -> String {
        format!("options[{}].{}", row, column)
    }
}

/// Collected validation failures of one form submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: impl Into<String>, kind: ValidationKind) {
        self.0.push(FieldError::new(field, kind));
    }

    pub fn extend(&mut self, other: ValidationErrors) {
        self.0.extend(other.0);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// Errors attached to one field.
    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a ValidationKind> {
        self.0
            .iter()
            .filter(move |e| e.field == field)
            .map(|e| &e.kind)
    }

    /// `Ok(value)` when nothing was collected.
    pub fn into_result<T>(self, value: T) -> Result<T, ValidationErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.iter().join("; "))
    }
}

impl std::error::Error for ValidationErrors {}
