// File: src/chain.rs
// Purpose: Ordered validator specs (and value filters) for one field

use crate::filter::Filter;
use rusty_forms_validation::{OptionValue, RuleOptions};
use serde::Serialize;

/// A named validator plus its options, before execution
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidatorSpec {
    name: String,
    options: RuleOptions,
}

impl ValidatorSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: RuleOptions::new(),
        }
    }

    /// Add an option (builder style)
    pub fn option(mut self, key: &str, value: impl Into<OptionValue>) -> Self {
        self.options.insert(key.to_string(), value.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn options(&self) -> &RuleOptions {
        &self.options
    }

    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.options.get(key)
    }
}

/// Validators run in the order they were attached
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidatorChain {
    filters: Vec<Filter>,
    validators: Vec<ValidatorSpec>,
}

impl ValidatorChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a validator spec
    pub fn attach(&mut self, spec: ValidatorSpec) -> &mut Self {
        self.validators.push(spec);
        self
    }

    /// Append a filter; filters also apply in order
    pub fn add_filter(&mut self, filter: Filter) -> &mut Self {
        self.filters.push(filter);
        self
    }

    pub fn validators(&self) -> &[ValidatorSpec] {
        &self.validators
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    /// Validator names in execution order
    pub fn names(&self) -> Vec<&str> {
        self.validators.iter().map(ValidatorSpec::name).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.validators.iter().position(|spec| spec.name() == name)
    }

    pub fn get(&self, name: &str) -> Option<&ValidatorSpec> {
        self.validators.iter().find(|spec| spec.name() == name)
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    /// Run the submitted value through every filter
    pub fn filter_value(&self, value: &str) -> String {
        self.filters
            .iter()
            .fold(value.to_string(), |acc, filter| filter.apply(&acc))
    }
}
