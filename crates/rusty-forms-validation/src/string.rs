//! String rules: presence, length, pattern and URI

use crate::error::RuleError;
use crate::library::Rule;
use crate::options::{OptionReader, RuleOptions};
use crate::{names, RuleOutcome};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use url::{Host, Url};

/// `notempty`: rejects the empty string
pub struct NotEmptyRule;

#[async_trait]
impl Rule for NotEmptyRule {
    async fn check(&self, _options: &RuleOptions, value: &str) -> Result<RuleOutcome, RuleError> {
        if value.is_empty() {
            Ok(RuleOutcome::invalid("isEmpty", "Value is required and can't be empty"))
        } else {
            Ok(RuleOutcome::Valid)
        }
    }
}

/// `stringlength`: bounds the number of characters with optional `min`/`max`
pub struct StringLengthRule;

#[async_trait]
impl Rule for StringLengthRule {
    async fn check(&self, options: &RuleOptions, value: &str) -> Result<RuleOutcome, RuleError> {
        let reader = OptionReader::new(names::STRING_LENGTH, options);
        let min = reader.count("min")?;
        let max = reader.count("max")?;
        Ok(check_length(value, min, max))
    }
}

pub fn check_length(value: &str, min: Option<usize>, max: Option<usize>) -> RuleOutcome {
    let len = value.chars().count();

    if let Some(min) = min {
        if len < min {
            return RuleOutcome::invalid(
                "stringLengthTooShort",
                format!("Must be at least {} characters", min),
            );
        }
    }

    if let Some(max) = max {
        if len > max {
            return RuleOutcome::invalid(
                "stringLengthTooLong",
                format!("Must be at most {} characters", max),
            );
        }
    }

    RuleOutcome::Valid
}

static REGEX_CACHE: Lazy<Mutex<HashMap<String, Regex>>> = Lazy::new(|| Mutex::new(HashMap::new()));

/// Compile `pattern`, reusing an earlier compilation of the same pattern
fn cached_regex(pattern: &str) -> Result<Regex, RuleError> {
    let mut cache = REGEX_CACHE.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(regex) = cache.get(pattern) {
        return Ok(regex.clone());
    }

    let regex = Regex::new(pattern).map_err(|_| RuleError::InvalidOption {
        rule: names::REGEX.to_string(),
        option: "pattern".to_string(),
        expected: "a valid regular expression",
    })?;
    cache.insert(pattern.to_string(), regex.clone());
    Ok(regex)
}

/// `regex`: the value must match `pattern`
pub struct RegexRule;

#[async_trait]
impl Rule for RegexRule {
    async fn check(&self, options: &RuleOptions, value: &str) -> Result<RuleOutcome, RuleError> {
        let pattern = OptionReader::new(names::REGEX, options).required_string("pattern")?;

        if cached_regex(pattern)?.is_match(value) {
            Ok(RuleOutcome::Valid)
        } else {
            Ok(RuleOutcome::invalid(
                "regexNotMatch",
                format!("Value does not match pattern '{}'", pattern),
            ))
        }
    }
}

/// `uri`: absolute http(s) URL with a dotted host
pub struct UriRule;

#[async_trait]
impl Rule for UriRule {
    async fn check(&self, _options: &RuleOptions, value: &str) -> Result<RuleOutcome, RuleError> {
        if is_valid_url(value) {
            Ok(RuleOutcome::Valid)
        } else {
            Ok(RuleOutcome::invalid("notUri", "Value is not a valid URL"))
        }
    }
}

/// URL validation via `url::Url::parse`
///
/// Only absolute `http`/`https` URLs count. Domain hosts must be dotted with
/// no empty labels; IP hosts are accepted as they are.
pub fn is_valid_url(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }

    let Ok(url) = Url::parse(value) else {
        return false;
    };

    if !matches!(url.scheme(), "http" | "https") {
        return false;
    }

    match url.host() {
        Some(Host::Domain(domain)) => {
            let domain = domain.strip_suffix('.').unwrap_or(domain);
            domain.contains('.') && domain.split('.').all(|label| !label.is_empty())
        }
        Some(Host::Ipv4(_)) | Some(Host::Ipv6(_)) => true,
        None => false,
    }
}
