// File: src/result.rs
// Purpose: Per-field and per-form validation outcomes

use crate::error::FieldError;
use serde::Serialize;
use std::collections::BTreeMap;

/// One rejected constraint: which validator, and its failure code
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    pub validator: String,
    pub code: String,
    pub message: String,
}

/// Outcome of running one field's chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldResult {
    pub field: String,
    pub valid: bool,
    pub failures: Vec<Failure>,
    /// The value after filters, as the validators saw it
    pub value: String,
}

impl FieldResult {
    pub fn new(field: impl Into<String>, value: impl Into<String>, failures: Vec<Failure>) -> Self {
        Self {
            field: field.into(),
            valid: failures.is_empty(),
            failures,
            value: value.into(),
        }
    }

    pub fn first_failure(&self) -> Option<&Failure> {
        self.failures.first()
    }

    /// Failure codes in the order they were reported
    pub fn codes(&self) -> Vec<&str> {
        self.failures.iter().map(|f| f.code.as_str()).collect()
    }
}

/// Results for every field of a form
///
/// Fields whose chain could not be built or run appear in `errors` instead
/// of `fields`; either way they make the form invalid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormResult {
    fields: BTreeMap<String, FieldResult>,
    errors: BTreeMap<String, FieldError>,
    valid: bool,
}

impl FormResult {
    pub fn new() -> Self {
        Self {
            fields: BTreeMap::new(),
            errors: BTreeMap::new(),
            valid: true,
        }
    }

    pub fn insert(&mut self, result: FieldResult) {
        self.fields.insert(result.field.clone(), result);
        self.refresh_validity();
    }

    pub fn insert_error(&mut self, error: FieldError) {
        self.errors.insert(error.field().to_string(), error);
        self.refresh_validity();
    }

    fn refresh_validity(&mut self) {
        self.valid = self.errors.is_empty() && self.fields.values().all(|f| f.valid);
    }

    /// True iff every field validated and none failed to build
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn field(&self, name: &str) -> Option<&FieldResult> {
        self.fields.get(name)
    }

    pub fn fields(&self) -> &BTreeMap<String, FieldResult> {
        &self.fields
    }

    pub fn error(&self, name: &str) -> Option<&FieldError> {
        self.errors.get(name)
    }

    /// Field-level errors (malformed markup, unknown validators, ...)
    pub fn errors(&self) -> &BTreeMap<String, FieldError> {
        &self.errors
    }

    pub fn failures(&self, name: &str) -> &[Failure] {
        self.fields
            .get(name)
            .map(|f| f.failures.as_slice())
            .unwrap_or_default()
    }

    /// Filtered values of the fields that passed
    pub fn values(&self) -> BTreeMap<&str, &str> {
        self.fields
            .values()
            .filter(|f| f.valid)
            .map(|f| (f.field.as_str(), f.value.as_str()))
            .collect()
    }
}

impl Default for FormResult {
    fn default() -> Self {
        Self::new()
    }
}
