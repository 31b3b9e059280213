use super::ElementRuleBuilder;
use crate::attributes::AttributeReader;
use crate::chain::{ValidatorChain, ValidatorSpec};
use crate::error::FieldError;
use rusty_forms_validation::names;

/// Opt-in hint for the network-dependent MX lookup
pub const MX_CHECK_ATTRIBUTE: &str = "data-validator-use-mx-check";

/// `<input type="email">`
///
/// Appends `emailaddress` after the common rules, so a declared length bound
/// is checked before the syntax check and the optional MX lookup.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmailElement;

impl ElementRuleBuilder for EmailElement {
    fn name(&self) -> &'static str {
        "email"
    }

    fn attach_type_validators(
        &self,
        attrs: &AttributeReader<'_>,
        chain: &mut ValidatorChain,
    ) -> Result<(), FieldError> {
        chain.attach(
            ValidatorSpec::new(names::EMAIL_ADDRESS)
                .option("useMxCheck", attrs.boolean(MX_CHECK_ATTRIBUTE)),
        );
        Ok(())
    }
}
