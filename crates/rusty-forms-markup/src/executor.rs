// File: src/executor.rs
// Purpose: Runs one field's validator chain against its submitted value

use crate::chain::ValidatorChain;
use crate::config::ExecutionPolicy;
use crate::error::FieldError;
use crate::result::{Failure, FieldResult};
use rusty_forms_validation::{names, RuleLibrary, RuleOutcome};
use std::sync::Arc;
use tracing::debug;

/// Executes chains through a rule library under one [`ExecutionPolicy`]
#[derive(Clone)]
pub struct FieldExecutor {
    library: Arc<dyn RuleLibrary>,
    policy: ExecutionPolicy,
}

impl FieldExecutor {
    pub fn new(library: Arc<dyn RuleLibrary>, policy: ExecutionPolicy) -> Self {
        Self { library, policy }
    }

    pub fn policy(&self) -> ExecutionPolicy {
        self.policy
    }

    pub fn library(&self) -> &Arc<dyn RuleLibrary> {
        &self.library
    }

    /// Fail with `UnknownValidator` if any spec names a rule the library lacks
    pub fn check_known(&self, field: &str, chain: &ValidatorChain) -> Result<(), FieldError> {
        match chain
            .validators()
            .iter()
            .find(|spec| !self.library.supports(spec.name()))
        {
            Some(spec) => Err(FieldError::UnknownValidator {
                field: field.to_string(),
                name: spec.name().to_string(),
            }),
            None => Ok(()),
        }
    }

    /// Filter `value`, then run the validators in chain order
    ///
    /// An empty value on a chain without `notempty` is valid without running
    /// anything: optional fields left blank aren't checked.
    pub async fn run(&self, field: &str, chain: &ValidatorChain, value: &str) -> Result<FieldResult, FieldError> {
        let value = chain.filter_value(value);

        if value.is_empty() && !chain.contains(names::NOT_EMPTY) {
            debug!("Skipping optional empty field {}", field);
            return Ok(FieldResult::new(field, value, Vec::new()));
        }

        let mut failures = Vec::new();
        for spec in chain.validators() {
            let outcome = self
                .library
                .execute(spec.name(), spec.options(), &value)
                .await
                .map_err(|err| FieldError::from_rule(field, err))?;

            if let RuleOutcome::Invalid(violation) = outcome {
                debug!("Field {} failed {}: {}", field, spec.name(), violation.code);
                failures.push(Failure {
                    validator: spec.name().to_string(),
                    code: violation.code,
                    message: violation.message,
                });

                if self.policy == ExecutionPolicy::FailFast {
                    break;
                }
            }
        }

        Ok(FieldResult::new(field, value, failures))
    }
}
