//! Rule options and typed access to them

use crate::error::RuleError;
use serde::Serialize;
use std::collections::BTreeMap;

/// A single option value handed to a rule
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

/// Option name to value, ordered so chains compare and print stably
pub type RuleOptions = BTreeMap<String, OptionValue>;

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        OptionValue::Bool(value)
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        OptionValue::Int(value)
    }
}

impl From<f64> for OptionValue {
    fn from(value: f64) -> Self {
        OptionValue::Float(value)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::Str(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        OptionValue::Str(value)
    }
}

/// Reads options for one rule, turning type mismatches into
/// [`RuleError::InvalidOption`] that names the rule and option.
pub struct OptionReader<'a> {
    rule: &'a str,
    options: &'a RuleOptions,
}

impl<'a> OptionReader<'a> {
    pub fn new(rule: &'a str, options: &'a RuleOptions) -> Self {
        Self { rule, options }
    }

    fn mismatch(&self, option: &str, expected: &'static str) -> RuleError {
        RuleError::InvalidOption {
            rule: self.rule.to_string(),
            option: option.to_string(),
            expected,
        }
    }

    pub fn bool(&self, option: &str) -> Result<Option<bool>, RuleError> {
        match self.options.get(option) {
            None => Ok(None),
            Some(OptionValue::Bool(b)) => Ok(Some(*b)),
            Some(_) => Err(self.mismatch(option, "a boolean")),
        }
    }

    /// Non-negative integer option
    pub fn count(&self, option: &str) -> Result<Option<usize>, RuleError> {
        match self.options.get(option) {
            None => Ok(None),
            Some(OptionValue::Int(i)) => usize::try_from(*i)
                .map(Some)
                .map_err(|_| self.mismatch(option, "a non-negative integer")),
            Some(_) => Err(self.mismatch(option, "a non-negative integer")),
        }
    }

    /// Integer or float option
    pub fn number(&self, option: &str) -> Result<Option<f64>, RuleError> {
        match self.options.get(option) {
            None => Ok(None),
            Some(OptionValue::Int(i)) => Ok(Some(*i as f64)),
            Some(OptionValue::Float(f)) if f.is_finite() => Ok(Some(*f)),
            Some(_) => Err(self.mismatch(option, "a finite number")),
        }
    }

    pub fn string(&self, option: &str) -> Result<Option<&'a str>, RuleError> {
        match self.options.get(option) {
            None => Ok(None),
            Some(OptionValue::Str(s)) => Ok(Some(s.as_str())),
            Some(_) => Err(self.mismatch(option, "a string")),
        }
    }

    pub fn required_string(&self, option: &str) -> Result<&'a str, RuleError> {
        self.string(option)?
            .ok_or_else(|| self.mismatch(option, "a string"))
    }

    pub fn required_number(&self, option: &str) -> Result<f64, RuleError> {
        self.number(option)?
            .ok_or_else(|| self.mismatch(option, "a finite number"))
    }
}
