use super::ElementRuleBuilder;
use crate::attributes::AttributeReader;
use crate::chain::ValidatorChain;
use crate::error::FieldError;

/// Generic text input: only the common rules
///
/// Also the fallback for element types nobody registered.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextElement;

impl ElementRuleBuilder for TextElement {
    fn name(&self) -> &'static str {
        "text"
    }

    fn attach_type_validators(
        &self,
        _attrs: &AttributeReader<'_>,
        _chain: &mut ValidatorChain,
    ) -> Result<(), FieldError> {
        Ok(())
    }
}
