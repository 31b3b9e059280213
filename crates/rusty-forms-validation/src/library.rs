//! Rule registry and dispatch by name

use crate::email::{EmailAddressRule, MxResolver, SystemResolver};
use crate::error::RuleError;
use crate::numeric::{BetweenRule, IsFloatRule, StepRule};
use crate::options::RuleOptions;
use crate::string::{NotEmptyRule, RegexRule, StringLengthRule, UriRule};
use crate::{names, RuleOutcome};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// Default bound on the network-dependent part of `emailaddress`
pub const DEFAULT_MX_TIMEOUT: Duration = Duration::from_secs(2);

/// A single named validation rule
#[async_trait]
pub trait Rule: Send + Sync {
    /// Run the rule against `value`
    ///
    /// Returns `Err` only when the rule cannot run at all (bad options);
    /// a rejected value is `Ok(RuleOutcome::Invalid(..))`.
    async fn check(&self, options: &RuleOptions, value: &str) -> Result<RuleOutcome, RuleError>;
}

/// Anything that can execute rules by name
#[async_trait]
pub trait RuleLibrary: Send + Sync {
    /// Whether a rule with this name is registered
    fn supports(&self, name: &str) -> bool;

    /// Execute the named rule
    async fn execute(
        &self,
        name: &str,
        options: &RuleOptions,
        value: &str,
    ) -> Result<RuleOutcome, RuleError>;
}

/// The built-in rule set, extendable with custom rules
pub struct PrimitiveLibrary {
    rules: HashMap<String, Arc<dyn Rule>>,
}

impl PrimitiveLibrary {
    /// Built-in rules with the system resolver behind the MX check
    pub fn new(mx_timeout: Duration) -> Self {
        Self::with_resolver(Arc::new(SystemResolver), mx_timeout)
    }

    /// Built-in rules with a caller-supplied MX resolver
    pub fn with_resolver(resolver: Arc<dyn MxResolver>, mx_timeout: Duration) -> Self {
        let mut library = Self {
            rules: HashMap::new(),
        };
        library
            .register(names::NOT_EMPTY, NotEmptyRule)
            .register(names::STRING_LENGTH, StringLengthRule)
            .register(names::REGEX, RegexRule)
            .register(names::EMAIL_ADDRESS, EmailAddressRule::new(resolver, mx_timeout))
            .register(names::URI, UriRule)
            .register(names::IS_FLOAT, IsFloatRule)
            .register(names::BETWEEN, BetweenRule)
            .register(names::STEP, StepRule);
        library
    }

    /// Register (or replace) a rule under `name`
    pub fn register(&mut self, name: impl Into<String>, rule: impl Rule + 'static) -> &mut Self {
        self.rules.insert(name.into(), Arc::new(rule));
        self
    }

    /// Names of all registered rules, sorted
    pub fn rule_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.rules.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for PrimitiveLibrary {
    fn default() -> Self {
        Self::new(DEFAULT_MX_TIMEOUT)
    }
}

#[async_trait]
impl RuleLibrary for PrimitiveLibrary {
    fn supports(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    async fn execute(
        &self,
        name: &str,
        options: &RuleOptions,
        value: &str,
    ) -> Result<RuleOutcome, RuleError> {
        let rule = self
            .rules
            .get(name)
            .ok_or_else(|| RuleError::UnknownRule(name.to_string()))?;
        rule.check(options, value).await
    }
}
