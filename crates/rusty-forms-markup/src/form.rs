// File: src/form.rs
// Purpose: Validates every field of a form: resolve, build, check, run

use crate::config::ValidationConfig;
use crate::element::ElementDescriptor;
use crate::error::FieldError;
use crate::executor::FieldExecutor;
use crate::registry::{default_registry, BuilderRegistry};
use crate::result::{FieldResult, FormResult};
use futures::future::join_all;
use rusty_forms_validation::{PrimitiveLibrary, RuleLibrary};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, warn};

/// Form-level entry point
///
/// Holds only read-only state, so one validator can serve concurrent
/// requests. Chains are rebuilt on every call.
#[derive(Clone)]
pub struct FormValidator {
    registry: Arc<BuilderRegistry>,
    executor: FieldExecutor,
}

impl FormValidator {
    /// Default registry and the built-in rule library
    pub fn new(config: &ValidationConfig) -> Self {
        Self::with_library(Arc::new(PrimitiveLibrary::new(config.mx_check_timeout())), config)
    }

    /// Default registry with a caller-supplied rule library
    pub fn with_library(library: Arc<dyn RuleLibrary>, config: &ValidationConfig) -> Self {
        Self {
            registry: default_registry(),
            executor: FieldExecutor::new(library, config.execution_policy),
        }
    }

    /// Swap in a custom builder registry
    pub fn with_registry(mut self, registry: Arc<BuilderRegistry>) -> Self {
        self.registry = registry;
        self
    }

    pub fn registry(&self) -> &BuilderRegistry {
        &self.registry
    }

    /// Validate `elements` against `submitted`
    ///
    /// Fields missing from `submitted` are validated as empty strings.
    /// Elements without a name are skipped; for repeated names only the
    /// first element counts.
    pub async fn validate(
        &self,
        elements: &[ElementDescriptor],
        submitted: &HashMap<String, String>,
    ) -> FormResult {
        let mut seen = HashSet::new();
        let fields: Vec<&ElementDescriptor> = elements
            .iter()
            .filter(|element| {
                if element.name().is_empty() {
                    debug!("Skipping unnamed <{}>", element.tag());
                    return false;
                }
                seen.insert(element.name())
            })
            .collect();

        let outcomes = join_all(fields.into_iter().map(|element| {
            let value = submitted
                .get(element.name())
                .map(String::as_str)
                .unwrap_or_default();
            self.validate_field(element, value)
        }))
        .await;

        let mut result = FormResult::new();
        for outcome in outcomes {
            match outcome {
                Ok(field) => result.insert(field),
                Err(err) => {
                    warn!("Field could not be validated: {}", err);
                    result.insert_error(err);
                }
            }
        }
        result
    }

    /// Resolve, build and run the chain for a single element
    pub async fn validate_field(
        &self,
        element: &ElementDescriptor,
        value: &str,
    ) -> Result<FieldResult, FieldError> {
        let chain = self.registry.resolve(element).build(element)?;
        self.executor.check_known(element.name(), &chain)?;
        self.executor.run(element.name(), &chain, value).await
    }
}
