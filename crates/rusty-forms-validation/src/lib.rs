//! Rusty Forms Validation
//!
//! The library of named rule primitives that validator chains execute.
//! Each rule is looked up by name (`"notempty"`, `"stringlength"`,
//! `"emailaddress"`, ...), receives its options and a submitted value, and
//! answers with a [`RuleOutcome`].
//!
//! ```rust
//! use rusty_forms_validation::{names, OptionValue, PrimitiveLibrary, RuleLibrary, RuleOptions};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let library = PrimitiveLibrary::default();
//! let mut options = RuleOptions::new();
//! options.insert("max".to_string(), OptionValue::Int(5));
//!
//! let outcome = library
//!     .execute(names::STRING_LENGTH, &options, "too long")
//!     .await
//!     .unwrap();
//! assert!(!outcome.is_valid());
//! # }
//! ```

pub mod email;
pub mod error;
pub mod library;
pub mod numeric;
pub mod options;
pub mod string;

pub use email::{EmailAddressRule, MxResolver, SystemResolver};
pub use error::RuleError;
pub use library::{PrimitiveLibrary, Rule, RuleLibrary};
pub use options::{OptionReader, OptionValue, RuleOptions};

use serde::Serialize;

/// Names under which the built-in rules are registered
pub mod names {
    pub const NOT_EMPTY: &str = "notempty";
    pub const STRING_LENGTH: &str = "stringlength";
    pub const REGEX: &str = "regex";
    pub const EMAIL_ADDRESS: &str = "emailaddress";
    pub const URI: &str = "uri";
    pub const IS_FLOAT: &str = "isfloat";
    pub const BETWEEN: &str = "between";
    pub const STEP: &str = "step";
}

/// A rejected value: machine-readable code plus an English message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub code: String,
    pub message: String,
}

impl Violation {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Result of running one rule against one value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleOutcome {
    Valid,
    Invalid(Violation),
}

impl RuleOutcome {
    pub fn invalid(code: impl Into<String>, message: impl Into<String>) -> Self {
        RuleOutcome::Invalid(Violation::new(code, message))
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, RuleOutcome::Valid)
    }

    /// Failure code, if the rule rejected the value
    pub fn code(&self) -> Option<&str> {
        match self {
            RuleOutcome::Valid => None,
            RuleOutcome::Invalid(violation) => Some(&violation.code),
        }
    }
}
