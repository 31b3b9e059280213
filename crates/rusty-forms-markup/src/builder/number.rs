use super::ElementRuleBuilder;
use crate::attributes::AttributeReader;
use crate::chain::{ValidatorChain, ValidatorSpec};
use crate::error::FieldError;
use rusty_forms_validation::names;

const NUMBER: &str = "a number";
const POSITIVE_STEP: &str = "a positive number or \"any\"";

/// `<input type="number">` and `<input type="range">`
///
/// Appends `isfloat`, then `between` for declared `min`/`max`, then `step`
/// unless `step` is absent or `any`. The step base is `min`, else zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberElement;

impl ElementRuleBuilder for NumberElement {
    fn name(&self) -> &'static str {
        "number"
    }

    fn attach_type_validators(
        &self,
        attrs: &AttributeReader<'_>,
        chain: &mut ValidatorChain,
    ) -> Result<(), FieldError> {
        chain.attach(ValidatorSpec::new(names::IS_FLOAT));

        let min = finite(attrs, "min")?;
        let max = finite(attrs, "max")?;
        if min.is_some() || max.is_some() {
            let mut between = ValidatorSpec::new(names::BETWEEN);
            if let Some(min) = min {
                between = between.option("min", min);
            }
            if let Some(max) = max {
                between = between.option("max", max);
            }
            chain.attach(between);
        }

        if let Some(raw) = attrs.string("step") {
            if !raw.trim().eq_ignore_ascii_case("any") {
                let step = attrs
                    .number::<f64>("step", POSITIVE_STEP)?
                    .filter(|step| step.is_finite() && *step > 0.0)
                    .ok_or_else(|| attrs.malformed("step", raw, POSITIVE_STEP))?;

                chain.attach(
                    ValidatorSpec::new(names::STEP)
                        .option("step", step)
                        .option("base", min.unwrap_or(0.0)),
                );
            }
        }

        Ok(())
    }
}

fn finite(attrs: &AttributeReader<'_>, name: &str) -> Result<Option<f64>, FieldError> {
    match attrs.number::<f64>(name, NUMBER)? {
        Some(n) if !n.is_finite() => Err(attrs.malformed(name, attrs.string(name).unwrap_or_default(), NUMBER)),
        other => Ok(other),
    }
}
