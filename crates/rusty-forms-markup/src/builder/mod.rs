//! Element rule builders
//!
//! Every builder shares one protocol, implemented by
//! [`ElementRuleBuilder::build`]:
//!
//! 1. filters declared in `data-filters`
//! 2. validators common to all elements (`required`, `minlength`/`maxlength`,
//!    `pattern`), in that order
//! 3. the variant's own validators via
//!    [`ElementRuleBuilder::attach_type_validators`]
//!
//! Presence and length therefore always run before format checks, and format
//! checks before anything that may touch the network.

mod email;
mod number;
mod text;
mod url;

pub use email::{EmailElement, MX_CHECK_ATTRIBUTE};
pub use number::NumberElement;
pub use text::TextElement;
pub use url::UrlElement;

use crate::attributes::AttributeReader;
use crate::chain::{ValidatorChain, ValidatorSpec};
use crate::element::ElementDescriptor;
use crate::error::FieldError;
use crate::filter::{self, Filter};
use rusty_forms_validation::names;
use std::fmt::Debug;
use tracing::debug;

const NON_NEGATIVE_INTEGER: &str = "a non-negative integer";

/// Turns one element's markup into a validator chain
pub trait ElementRuleBuilder: Debug + Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Append validators specific to this element type
    ///
    /// Runs after the common validators are already in `chain`.
    fn attach_type_validators(
        &self,
        attrs: &AttributeReader<'_>,
        chain: &mut ValidatorChain,
    ) -> Result<(), FieldError>;

    /// Build the full chain for `element`
    fn build(&self, element: &ElementDescriptor) -> Result<ValidatorChain, FieldError> {
        let attrs = AttributeReader::new(element);
        let mut chain = ValidatorChain::new();

        attach_filters(&attrs, &mut chain)?;
        attach_common_validators(&attrs, &mut chain)?;
        self.attach_type_validators(&attrs, &mut chain)?;

        debug!(
            "Built chain for {} ({}): {:?}",
            element.name(),
            self.name(),
            chain.names()
        );
        Ok(chain)
    }
}

/// `data-filters="stringtrim|stringtolower"`
pub fn attach_filters(attrs: &AttributeReader<'_>, chain: &mut ValidatorChain) -> Result<(), FieldError> {
    let Some(raw) = attrs.string("data-filters") else {
        return Ok(());
    };

    for name in filter::split_names(raw) {
        let filter = Filter::from_name(name).ok_or_else(|| FieldError::UnknownFilter {
            field: attrs.element().name().to_string(),
            name: name.to_string(),
        })?;
        chain.add_filter(filter);
    }

    Ok(())
}

/// Rules every element gets regardless of type
pub fn attach_common_validators(
    attrs: &AttributeReader<'_>,
    chain: &mut ValidatorChain,
) -> Result<(), FieldError> {
    if attrs.has("required") {
        chain.attach(ValidatorSpec::new(names::NOT_EMPTY));
    }

    let min = attrs.number::<usize>("minlength", NON_NEGATIVE_INTEGER)?;
    let max = attrs.number::<usize>("maxlength", NON_NEGATIVE_INTEGER)?;
    if min.is_some() || max.is_some() {
        let mut spec = ValidatorSpec::new(names::STRING_LENGTH);
        if let Some(min) = min {
            spec = spec.option("min", length_option(attrs, "minlength", min)?);
        }
        if let Some(max) = max {
            spec = spec.option("max", length_option(attrs, "maxlength", max)?);
        }
        chain.attach(spec);
    }

    if let Some(pattern) = attrs.string("pattern") {
        // HTML patterns must match the whole value
        chain.attach(ValidatorSpec::new(names::REGEX).option("pattern", format!("^(?:{})$", pattern)));
    }

    Ok(())
}

fn length_option(attrs: &AttributeReader<'_>, attribute: &str, value: usize) -> Result<i64, FieldError> {
    i64::try_from(value).map_err(|_| {
        let raw = attrs.string(attribute).unwrap_or_default();
        attrs.malformed(attribute, raw, NON_NEGATIVE_INTEGER)
    })
}
