//! Numeric rules
//!
//! `between` and `step` accept values that don't parse as numbers; reporting
//! those is `isfloat`'s job, so a chain doesn't pile up three failures for
//! one typo.

use crate::error::RuleError;
use crate::library::Rule;
use crate::options::{OptionReader, RuleOptions};
use crate::{names, RuleOutcome};
use async_trait::async_trait;

/// Rounding slack for `step`, in units of f64 precision at the operands' magnitude
const STEP_TOLERANCE_ULPS: f64 = 4.0;

pub fn parse_number(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

/// `isfloat`: value parses as a finite number
pub struct IsFloatRule;

#[async_trait]
impl Rule for IsFloatRule {
    async fn check(&self, _options: &RuleOptions, value: &str) -> Result<RuleOutcome, RuleError> {
        match parse_number(value) {
            Some(_) => Ok(RuleOutcome::Valid),
            None => Ok(RuleOutcome::invalid("notFloat", "Value must be a number")),
        }
    }
}

/// `between`: inclusive bounds with optional `min`/`max`
pub struct BetweenRule;

#[async_trait]
impl Rule for BetweenRule {
    async fn check(&self, options: &RuleOptions, value: &str) -> Result<RuleOutcome, RuleError> {
        let reader = OptionReader::new(names::BETWEEN, options);
        let min = reader.number("min")?;
        let max = reader.number("max")?;

        let Some(n) = parse_number(value) else {
            return Ok(RuleOutcome::Valid);
        };

        if let Some(min) = min {
            if n < min {
                return Ok(RuleOutcome::invalid(
                    "notGreaterThanOrEqual",
                    format!("Must be at least {}", min),
                ));
            }
        }

        if let Some(max) = max {
            if n > max {
                return Ok(RuleOutcome::invalid(
                    "notLessThanOrEqual",
                    format!("Must be at most {}", max),
                ));
            }
        }

        Ok(RuleOutcome::Valid)
    }
}

/// `step`: value must be `base + k * step` for some integer `k`
pub struct StepRule;

#[async_trait]
impl Rule for StepRule {
    async fn check(&self, options: &RuleOptions, value: &str) -> Result<RuleOutcome, RuleError> {
        let reader = OptionReader::new(names::STEP, options);
        let step = reader.required_number("step")?;
        let base = reader.number("base")?.unwrap_or(0.0);

        if step <= 0.0 {
            return Err(RuleError::InvalidOption {
                rule: names::STEP.to_string(),
                option: "step".to_string(),
                expected: "a positive number",
            });
        }

        let Some(n) = parse_number(value) else {
            return Ok(RuleOutcome::Valid);
        };

        if is_step_aligned(n, base, step) {
            Ok(RuleOutcome::Valid)
        } else {
            Ok(RuleOutcome::invalid(
                "stepMismatch",
                format!("Must be a multiple of {} starting from {}", step, base),
            ))
        }
    }
}

/// True when `value` lies on `base + k * step` for some integer `k`
///
/// The remainder is compared in value space against an absolute tolerance,
/// so a half step stays a mismatch however far `value` is from `base`.
pub fn is_step_aligned(value: f64, base: f64, step: f64) -> bool {
    let k = ((value - base) / step).round();
    let remainder = (value - base - k * step).abs();
    let magnitude = value.abs().max(base.abs()).max(step);
    remainder <= f64::EPSILON * magnitude * STEP_TOLERANCE_ULPS
}
