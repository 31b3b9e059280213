// File: src/attributes.rs
// Purpose: Typed access to an element's raw attribute strings

use crate::element::ElementDescriptor;
use crate::error::FieldError;
use std::str::FromStr;

const TRUTHY: &[&str] = &["1", "true", "yes", "on"];

/// Reads attributes of one element as strings, booleans or numbers
#[derive(Debug, Clone, Copy)]
pub struct AttributeReader<'a> {
    element: &'a ElementDescriptor,
}

impl<'a> AttributeReader<'a> {
    pub fn new(element: &'a ElementDescriptor) -> Self {
        Self { element }
    }

    pub fn element(&self) -> &'a ElementDescriptor {
        self.element
    }

    /// True if the attribute is present, whatever its value
    pub fn has(&self, name: &str) -> bool {
        self.element.attr(name).is_some()
    }

    pub fn string(&self, name: &str) -> Option<&'a str> {
        self.element.attr(name)
    }

    /// Permissive flag coercion for data-* hints
    ///
    /// `1`, `true`, `yes` and `on` (any case, surrounding whitespace ignored)
    /// are true. Everything else, including absence and the empty string,
    /// is false.
    pub fn boolean(&self, name: &str) -> bool {
        self.string(name)
            .map(str::trim)
            .is_some_and(|value| TRUTHY.iter().any(|t| t.eq_ignore_ascii_case(value)))
    }

    /// Parse a present attribute as `T`
    ///
    /// Absent is `Ok(None)`; present but unparseable is
    /// [`FieldError::MalformedAttribute`].
    pub fn number<T: FromStr>(&self, name: &str, expected: &'static str) -> Result<Option<T>, FieldError> {
        let Some(raw) = self.string(name) else {
            return Ok(None);
        };

        raw.trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| self.malformed(name, raw, expected))
    }

    /// Build a `MalformedAttribute` error for this element
    pub fn malformed(&self, attribute: &str, raw: &str, expected: &'static str) -> FieldError {
        FieldError::MalformedAttribute {
            field: self.element.name().to_string(),
            tag: self.element.tag().to_string(),
            attribute: attribute.to_string(),
            value: raw.to_string(),
            expected,
        }
    }
}
