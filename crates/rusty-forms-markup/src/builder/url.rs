use super::ElementRuleBuilder;
use crate::attributes::AttributeReader;
use crate::chain::{ValidatorChain, ValidatorSpec};
use crate::error::FieldError;
use rusty_forms_validation::names;

/// `<input type="url">`
#[derive(Debug, Clone, Copy, Default)]
pub struct UrlElement;

impl ElementRuleBuilder for UrlElement {
    fn name(&self) -> &'static str {
        "url"
    }

    fn attach_type_validators(
        &self,
        _attrs: &AttributeReader<'_>,
        chain: &mut ValidatorChain,
    ) -> Result<(), FieldError> {
        chain.attach(ValidatorSpec::new(names::URI));
        Ok(())
    }
}
