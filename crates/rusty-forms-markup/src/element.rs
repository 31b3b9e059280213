// File: src/element.rs
// Purpose: Read-only description of one form element as produced by the DOM layer

use std::collections::BTreeMap;

/// One form element: tag, field name and raw attributes
///
/// Attribute names are stored lowercased, matching HTML's case-insensitive
/// attribute names. Values are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementDescriptor {
    tag: String,
    name: String,
    attributes: BTreeMap<String, String>,
}

impl ElementDescriptor {
    /// Create a descriptor for `tag` submitting under field `name`
    pub fn new(tag: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            name: name.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// `<input type="..." name="...">`
    pub fn input(input_type: &str, name: impl Into<String>) -> Self {
        Self::new("input", name).with_attr("type", input_type)
    }

    /// Add an attribute (builder style)
    pub fn with_attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Add a valueless attribute such as `required`
    pub fn with_flag(self, name: &str) -> Self {
        self.with_attr(name, "")
    }

    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) {
        self.attributes
            .insert(name.to_ascii_lowercase(), value.into());
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Field name the value is submitted under
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The raw `type` attribute, if any
    pub fn input_type(&self) -> Option<&str> {
        self.attr("type")
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(|s| s.as_str())
    }

    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }
}
