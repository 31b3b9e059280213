//! # Rusty Forms Markup
//!
//! Server-side validation derived from the form markup itself. The
//! constraints a form already declares (`required`, `minlength`,
//! `maxlength`, `pattern`, the input `type`, `data-*` hints) become an
//! ordered chain of validators per field, so they don't have to be repeated
//! in handler code.
//!
//! ## Pipeline
//!
//! - [`BuilderRegistry`] picks an [`ElementRuleBuilder`] for each element
//!   from its tag and `type`, falling back to plain text rules
//! - the builder reads attributes through an [`AttributeReader`] and emits a
//!   [`ValidatorChain`]: common rules first, type rules after
//! - [`FieldExecutor`] runs the chain against the submitted value, either
//!   accumulating failures or stopping at the first
//! - [`FormValidator`] does this for every field and collects a [`FormResult`]
//!
//! ## Example
//!
//! ```rust
//! use rusty_forms_markup::{ElementDescriptor, FormValidator, ValidationConfig};
//! use std::collections::HashMap;
//!
//! #[tokio::main]
//! async fn main() {
//!     let elements = vec![
//!         ElementDescriptor::input("email", "email")
//!             .with_flag("required")
//!             .with_attr("maxlength", "64"),
//!     ];
//!     let mut submitted = HashMap::new();
//!     submitted.insert("email".to_string(), "not-an-email".to_string());
//!
//!     let validator = FormValidator::new(&ValidationConfig::default());
//!     let result = validator.validate(&elements, &submitted).await;
//!
//!     assert!(!result.is_valid());
//!     assert_eq!(result.failures("email")[0].code, "emailAddressInvalidFormat");
//! }
//! ```

pub mod attributes;
pub mod builder;
pub mod chain;
pub mod config;
pub mod element;
pub mod error;
pub mod executor;
pub mod filter;
pub mod form;
pub mod registry;
pub mod result;

pub use attributes::AttributeReader;
pub use builder::{ElementRuleBuilder, EmailElement, NumberElement, TextElement, UrlElement};
pub use chain::{ValidatorChain, ValidatorSpec};
pub use config::{ExecutionPolicy, ValidationConfig};
pub use element::ElementDescriptor;
pub use error::FieldError;
pub use executor::FieldExecutor;
pub use filter::Filter;
pub use form::FormValidator;
pub use registry::{default_registry, BuilderRegistry, ElementKey, RegistryBuilder};
pub use result::{Failure, FieldResult, FormResult};

pub use rusty_forms_validation as validation;
