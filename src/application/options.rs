//! Option editing: key/value rows <-> option mapping
//!
//! Editing works on an ordered list of rows; the stored form is the
//! `MenuOptions` mapping. `explode` turns a mapping into rows, `collapse`
//! validates rows and builds the mapping back.
//!
//! Flag coercion table (value trimmed, ASCII case-insensitive):
//!
//! | input                          | result  |
//! |--------------------------------|---------|
//! | `1`, `true`, `yes`, `on`       | `true`  |
//! | anything else, including `""`  | `false` |

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, instrument};

use crate::application::validation::{FieldError, ValidationErrors, ValidationKind};
use crate::domain::{MenuOptions, OptionKey, ValueShape};

const TRUTHY: [&str; 4] = ["1", "true", "yes", "on"];

/// One editable key/value pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionRow {
    pub key: String,
    pub value: String,
}

impl OptionRow {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    fn is_blank(&self) -> bool {
        self.key.trim().is_empty() && self.value.trim().is_empty()
    }
}

/// Coerce a truthy string to a boolean.
pub fn coerce_flag(value: &str) -> bool {
    let value = value.trim();
    TRUTHY.iter().any(|t| t.eq_ignore_ascii_case(value))
}

/// Validates and transforms the option rows of a menu item form.
#[derive(Debug, Clone, Copy, Default)]
pub struct OptionsEditor;

impl OptionsEditor {
    pub fn new() -> Self {
        Self
    }

    /// One row per mapping entry, in mapping order.
    #[instrument(level = "trace", skip(self))]
    pub fn explode(&self, options: &MenuOptions) -> Vec<OptionRow> {
        options
            .iter()
            .map(|(key, value)| {
                let shape = key
                    .parse::<OptionKey>()
                    .map(OptionKey::shape)
                    .unwrap_or(ValueShape::Scalar);
                OptionRow::new(key.clone(), render_value(shape, value))
            })
            .collect()
    }

    /// Validate rows and build the mapping.
    ///
    /// Rows with blank key and blank value are dropped. All failures are
    /// collected, each annotated with its row.
    #[instrument(level = "debug", skip(self, rows))]
    pub fn collapse(&self, rows: &[OptionRow]) -> Result<MenuOptions, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let mut seen = HashSet::new();
        let mut options = MenuOptions::new();

        for (row_idx, row) in rows.iter().enumerate() {
            if row.is_blank() {
                continue;
            }

            let key = match row.key.parse::<OptionKey>() {
                Ok(key) => key,
                Err(e) => {
                    errors.push(
                        FieldError::option_field(row_idx, "key"),
                        ValidationKind::UnrecognizedKey(e.0),
                    );
                    continue;
                }
            };
            if !seen.insert(key) {
                errors.push(
                    FieldError::option_field(row_idx, "key"),
                    ValidationKind::DuplicateKey(key.name().to_string()),
                );
                continue;
            }

            let value = match key.shape() {
                ValueShape::Scalar => Value::String(row.value.clone()),
                ValueShape::Flag => Value::Bool(coerce_flag(&row.value)),
                ValueShape::Structured => match serde_json::from_str::<Value>(&row.value) {
                    Ok(value) => value,
                    Err(e) => {
                        errors.push(
                            FieldError::option_field(row_idx, "value"),
                            ValidationKind::MalformedStructuredValue {
                                key: key.name().to_string(),
                                reason: e.to_string(),
                            },
                        );
                        continue;
                    }
                },
            };
            options.insert(key.name(), value);
        }

        debug!(
            "collapsed {} rows into {} options, {} errors",
            rows.len(),
            options.len(),
            errors.len()
        );
        errors.into_result(options)
    }
}

fn render_value(shape: ValueShape, value: &Value) -> String {
    match (shape, value) {
        (ValueShape::Structured, _) => value.to_string(),
        (_, Value::String(s)) => s.clone(),
        (_, Value::Bool(b)) => b.to_string(),
        (_, other) => other.to_string(),
    }
}
