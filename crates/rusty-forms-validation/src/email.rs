//! Email address rule
//!
//! Syntax is checked locally with `email_address`. With `useMxCheck` the
//! domain is also looked up through an [`MxResolver`], bounded by the
//! library's MX timeout.

use crate::error::RuleError;
use crate::library::Rule;
use crate::options::{OptionReader, RuleOptions};
use crate::{names, RuleOutcome};
use async_trait::async_trait;
use email_address::EmailAddress;
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Answers whether a domain can receive mail
#[async_trait]
pub trait MxResolver: Send + Sync {
    /// `Ok(false)` when the domain has no mail host, `Err` when the lookup
    /// itself failed
    async fn has_mx(&self, domain: &str) -> io::Result<bool>;
}

/// Resolver backed by the operating system's name resolution
///
/// A domain counts as mail-capable when it resolves to any address. Names
/// the resolver doesn't know are reported as having no mail host; any other
/// failure (resolver unreachable, temporary errors) is returned as `Err`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemResolver;

#[async_trait]
impl MxResolver for SystemResolver {
    async fn has_mx(&self, domain: &str) -> io::Result<bool> {
        match tokio::net::lookup_host((domain, 25)).await {
            Ok(mut addrs) => Ok(addrs.next().is_some()),
            Err(err) if is_name_not_found(&err) => {
                debug!("No host found for {}: {}", domain, err);
                Ok(false)
            }
            Err(err) => Err(err),
        }
    }
}

/// Messages the platform resolvers use when a name simply doesn't exist
const NOT_FOUND_MESSAGES: &[&str] = &[
    "name or service not known",
    "nodename nor servname provided",
    "no address associated with hostname",
    "no such host is known",
];

/// True when `err` means the name doesn't exist, as opposed to the lookup
/// itself failing
pub fn is_name_not_found(err: &io::Error) -> bool {
    if err.kind() == io::ErrorKind::NotFound {
        return true;
    }
    let message = err.to_string().to_ascii_lowercase();
    NOT_FOUND_MESSAGES.iter().any(|m| message.contains(m))
}

/// `emailaddress`: syntax check plus optional MX lookup
pub struct EmailAddressRule {
    resolver: Arc<dyn MxResolver>,
    timeout: Duration,
}

impl EmailAddressRule {
    pub fn new(resolver: Arc<dyn MxResolver>, timeout: Duration) -> Self {
        Self { resolver, timeout }
    }

    async fn check_mx(&self, domain: &str) -> RuleOutcome {
        match tokio::time::timeout(self.timeout, self.resolver.has_mx(domain)).await {
            Ok(Ok(true)) => RuleOutcome::Valid,
            Ok(Ok(false)) => RuleOutcome::invalid(
                "emailAddressNoMxRecord",
                format!("'{}' does not appear to accept email", domain),
            ),
            Ok(Err(err)) => {
                warn!("MX lookup for {} failed: {}", domain, err);
                RuleOutcome::invalid(
                    "emailAddressMxLookupFailed",
                    format!("Could not verify the mail server for '{}'", domain),
                )
            }
            Err(_) => {
                warn!("MX lookup for {} timed out after {:?}", domain, self.timeout);
                RuleOutcome::invalid(
                    "emailAddressMxTimeout",
                    format!("Timed out verifying the mail server for '{}'", domain),
                )
            }
        }
    }
}

#[async_trait]
impl Rule for EmailAddressRule {
    async fn check(&self, options: &RuleOptions, value: &str) -> Result<RuleOutcome, RuleError> {
        let use_mx_check = OptionReader::new(names::EMAIL_ADDRESS, options)
            .bool("useMxCheck")?
            .unwrap_or(false);

        if !is_valid_email(value) {
            return Ok(RuleOutcome::invalid(
                "emailAddressInvalidFormat",
                "Value is not a valid email address",
            ));
        }

        if !use_mx_check {
            return Ok(RuleOutcome::Valid);
        }

        match value.rsplit_once('@') {
            Some((_, domain)) => Ok(self.check_mx(domain).await),
            None => Ok(RuleOutcome::Valid),
        }
    }
}

/// Validates email format
///
/// RFC 5322 syntax via `email_address`, plus a dotted domain whose top-level
/// label has at least 2 characters, so `user@localhost` is rejected.
pub fn is_valid_email(email: &str) -> bool {
    if !EmailAddress::is_valid(email) {
        return false;
    }

    let Some((_, domain)) = email.rsplit_once('@') else {
        return false;
    };
    let labels: Vec<&str> = domain.split('.').collect();

    labels.len() >= 2
        && labels.iter().all(|label| !label.is_empty())
        && labels.last().is_some_and(|tld| tld.chars().count() >= 2)
}
