// File: src/registry.rs
// Purpose: Maps (tag, type) to the builder responsible for that element

use crate::builder::{ElementRuleBuilder, EmailElement, NumberElement, TextElement, UrlElement};
use crate::element::ElementDescriptor;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

static DEFAULT_REGISTRY: Lazy<Arc<BuilderRegistry>> = Lazy::new(|| Arc::new(BuilderRegistry::with_defaults()));

/// The process-wide registry with the built-in element types
pub fn default_registry() -> Arc<BuilderRegistry> {
    Arc::clone(&DEFAULT_REGISTRY)
}

/// Lookup key: lowercased tag plus, for `<input>`, the effective type
///
/// An `<input>` without a `type` is a text input. Other tags ignore `type`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ElementKey {
    tag: String,
    input_type: Option<String>,
}

impl ElementKey {
    pub fn new(tag: &str, input_type: Option<&str>) -> Self {
        let tag = tag.trim().to_ascii_lowercase();
        let input_type = if tag == "input" {
            Some(
                input_type
                    .map(|t| t.trim().to_ascii_lowercase())
                    .filter(|t| !t.is_empty())
                    .unwrap_or_else(|| "text".to_string()),
            )
        } else {
            None
        };
        Self { tag, input_type }
    }

    pub fn of(element: &ElementDescriptor) -> Self {
        Self::new(element.tag(), element.input_type())
    }
}

/// Immutable table of element builders with a fallback
///
/// Build one with [`BuilderRegistry::builder`]; there is no way to change
/// it afterwards.
#[derive(Debug, Clone)]
pub struct BuilderRegistry {
    builders: HashMap<ElementKey, Arc<dyn ElementRuleBuilder>>,
    fallback: Arc<dyn ElementRuleBuilder>,
}

impl BuilderRegistry {
    /// Start from an empty table with [`TextElement`] as fallback
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder {
            builders: HashMap::new(),
            fallback: Arc::new(TextElement),
        }
    }

    /// The built-in element types
    pub fn with_defaults() -> Self {
        Self::defaults_builder().build()
    }

    /// The built-in element types, open for additions before freezing
    pub fn defaults_builder() -> RegistryBuilder {
        let mut builder = Self::builder();
        for input_type in ["text", "search", "tel", "password", "hidden"] {
            builder = builder.register("input", Some(input_type), TextElement);
        }
        builder
            .register("textarea", None, TextElement)
            .register("select", None, TextElement)
            .register("input", Some("email"), EmailElement)
            .register("input", Some("url"), UrlElement)
            .register("input", Some("number"), NumberElement)
            .register("input", Some("range"), NumberElement)
    }

    /// Builder for `element`, or the fallback when its type isn't registered
    pub fn resolve(&self, element: &ElementDescriptor) -> &dyn ElementRuleBuilder {
        let key = ElementKey::of(element);
        match self.builders.get(&key) {
            Some(builder) => builder.as_ref(),
            None => {
                debug!(
                    "No builder for {:?}, using {} for {}",
                    key,
                    self.fallback.name(),
                    element.name()
                );
                self.fallback.as_ref()
            }
        }
    }

    pub fn contains(&self, tag: &str, input_type: Option<&str>) -> bool {
        self.builders.contains_key(&ElementKey::new(tag, input_type))
    }

    pub fn len(&self) -> usize {
        self.builders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.builders.is_empty()
    }
}

/// Collects registrations, then freezes them into a [`BuilderRegistry`]
pub struct RegistryBuilder {
    builders: HashMap<ElementKey, Arc<dyn ElementRuleBuilder>>,
    fallback: Arc<dyn ElementRuleBuilder>,
}

impl RegistryBuilder {
    /// Register `builder` for `tag` and `type` (later registrations win)
    pub fn register(
        mut self,
        tag: &str,
        input_type: Option<&str>,
        builder: impl ElementRuleBuilder + 'static,
    ) -> Self {
        self.builders
            .insert(ElementKey::new(tag, input_type), Arc::new(builder));
        self
    }

    /// Replace the builder used for unregistered types
    pub fn fallback(mut self, builder: impl ElementRuleBuilder + 'static) -> Self {
        self.fallback = Arc::new(builder);
        self
    }

    pub fn build(self) -> BuilderRegistry {
        BuilderRegistry {
            builders: self.builders,
            fallback: self.fallback,
        }
    }
}
