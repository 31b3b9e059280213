// File: src/error.rs
// Purpose: Field-level errors, distinct from a rule rejecting a value

use rusty_forms_validation::RuleError;
use serde::Serialize;
use thiserror::Error;

/// Why a field could not be validated at all
///
/// These abort one field's chain; sibling fields are still validated.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum FieldError {
    #[error("<{tag} name=\"{field}\">: attribute `{attribute}` = {value:?} is not {expected}")]
    MalformedAttribute {
        field: String,
        tag: String,
        attribute: String,
        value: String,
        expected: &'static str,
    },

    #[error("field `{field}`: unknown validator `{name}`")]
    UnknownValidator { field: String, name: String },

    #[error("field `{field}`: unknown filter `{name}`")]
    UnknownFilter { field: String, name: String },

    #[error("field `{field}`: validator `{validator}` option `{option}` must be {expected}")]
    InvalidOption {
        field: String,
        validator: String,
        option: String,
        expected: &'static str,
    },
}

impl FieldError {
    /// Attach a field name to an error raised by the rule library
    pub fn from_rule(field: &str, err: RuleError) -> Self {
        match err {
            RuleError::UnknownRule(name) => FieldError::UnknownValidator {
                field: field.to_string(),
                name,
            },
            RuleError::InvalidOption {
                rule,
                option,
                expected,
            } => FieldError::InvalidOption {
                field: field.to_string(),
                validator: rule,
                option,
                expected,
            },
        }
    }

    /// The field this error belongs to
    pub fn field(&self) -> &str {
        match self {
            FieldError::MalformedAttribute { field, .. }
            | FieldError::UnknownValidator { field, .. }
            | FieldError::UnknownFilter { field, .. }
            | FieldError::InvalidOption { field, .. } => field,
        }
    }
}
