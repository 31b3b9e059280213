use thiserror::Error;

/// Errors raised while executing a rule, as opposed to a rule rejecting a value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    #[error("unknown validator `{0}`")]
    UnknownRule(String),

    #[error("validator `{rule}`: option `{option}` must be {expected}")]
    InvalidOption {
        rule: String,
        option: String,
        expected: &'static str,
    },
}
