//! End-to-end tests: markup in, FormResult out
//!
//! MX lookups go through stub resolvers so nothing here touches the network.

use async_trait::async_trait;
use pretty_assertions::assert_eq;
use rstest::rstest;
use rusty_forms_markup::validation::{MxResolver, PrimitiveLibrary};
use rusty_forms_markup::{
    default_registry, ElementDescriptor, ElementRuleBuilder, ExecutionPolicy, FieldError,
    FormValidator, ValidationConfig,
};
use std::collections::HashMap;
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

const MX_HINT: &str = "data-validator-use-mx-check";

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn submitted(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Knows a fixed set of mail domains and counts lookups
#[derive(Default)]
struct CountingResolver {
    lookups: AtomicUsize,
}

#[async_trait]
impl MxResolver for CountingResolver {
    async fn has_mx(&self, domain: &str) -> io::Result<bool> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Ok(domain == "example.com")
    }
}

struct SlowResolver;

#[async_trait]
impl MxResolver for SlowResolver {
    async fn has_mx(&self, _domain: &str) -> io::Result<bool> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(true)
    }
}

struct UnreachableResolver;

#[async_trait]
impl MxResolver for UnreachableResolver {
    async fn has_mx(&self, _domain: &str) -> io::Result<bool> {
        Err(io::Error::new(
            io::ErrorKind::Other,
            "failed to lookup address information: Temporary failure in name resolution",
        ))
    }
}

fn validator_with(resolver: Arc<dyn MxResolver>, config: &ValidationConfig) -> FormValidator {
    let library = PrimitiveLibrary::with_resolver(resolver, config.mx_check_timeout());
    FormValidator::with_library(Arc::new(library), config)
}

#[rstest]
#[case(ElementDescriptor::input("text", "f"))]
#[case(ElementDescriptor::input("email", "f"))]
#[case(ElementDescriptor::input("number", "f"))]
#[case(ElementDescriptor::input("url", "f"))]
#[case(ElementDescriptor::new("textarea", "f"))]
#[case(ElementDescriptor::input("future-type", "f"))]
#[tokio::test]
async fn required_and_empty_fails_on_notempty_first(#[case] element: ElementDescriptor) {
    let element = element.with_flag("required").with_attr("maxlength", "10");
    let validator = FormValidator::new(&ValidationConfig::default());

    let result = validator.validate(&[element], &submitted(&[("f", "")])).await;

    let field = result.field("f").unwrap();
    assert!(!field.valid);
    assert_eq!(field.failures[0].validator, "notempty");
    assert_eq!(field.failures[0].code, "isEmpty");
}

#[rstest]
#[case("email")]
#[case("number")]
#[case("url")]
fn length_bound_precedes_type_validators(#[case] input_type: &str) {
    let element = ElementDescriptor::input(input_type, "f").with_attr("maxlength", "4");
    let chain = default_registry().resolve(&element).build(&element).unwrap();

    assert_eq!(chain.position("stringlength"), Some(0));
    assert!(chain.len() > 1, "{input_type} should add type validators");
}

#[test]
fn unrecognized_type_gets_only_base_rules() {
    let element = ElementDescriptor::input("holo-picker", "f")
        .with_flag("required")
        .with_attr("maxlength", "8")
        .with_attr("pattern", "[a-z]+");

    let registry = default_registry();
    let builder = registry.resolve(&element);
    let chain = builder.build(&element).unwrap();

    assert_eq!(builder.name(), "text");
    assert_eq!(chain.names(), vec!["notempty", "stringlength", "regex"]);
}

#[test]
fn build_twice_yields_identical_chains() {
    let element = ElementDescriptor::input("number", "qty")
        .with_flag("required")
        .with_attr("min", "1")
        .with_attr("step", "2")
        .with_attr("data-filters", "stringtrim");

    let registry = default_registry();
    let builder = registry.resolve(&element);
    assert_eq!(builder.build(&element).unwrap(), builder.build(&element).unwrap());
}

#[tokio::test]
async fn email_too_long_reports_length_first() {
    init_tracing();
    let element = ElementDescriptor::input("email", "email")
        .with_attr("maxlength", "5")
        .with_flag("required");
    let validator = FormValidator::new(&ValidationConfig::default());

    let result = validator
        .validate(&[element], &submitted(&[("email", "a@b.com")]))
        .await;

    assert!(!result.is_valid());
    let field = result.field("email").unwrap();
    assert_eq!(field.failures[0].validator, "stringlength");
    // a@b.com is well-formed, so accumulate adds nothing more
    assert_eq!(field.codes(), vec!["stringLengthTooLong"]);
}

#[tokio::test]
async fn email_too_long_and_malformed_accumulates_both() {
    let element = ElementDescriptor::input("email", "email")
        .with_attr("maxlength", "5")
        .with_flag("required");
    let validator = FormValidator::new(&ValidationConfig::default());

    let result = validator
        .validate(&[element], &submitted(&[("email", "a@bcom")]))
        .await;

    assert_eq!(
        result.field("email").unwrap().codes(),
        vec!["stringLengthTooLong", "emailAddressInvalidFormat"]
    );
}

#[tokio::test]
async fn malformed_email_skips_mx_lookup() {
    let resolver = Arc::new(CountingResolver::default());
    let validator = validator_with(resolver.clone(), &ValidationConfig::default());
    let element = ElementDescriptor::input("email", "email");

    let result = validator
        .validate(&[element], &submitted(&[("email", "not-an-email")]))
        .await;

    let field = result.field("email").unwrap();
    assert!(!field.valid);
    assert_eq!(field.failures.len(), 1);
    assert_eq!(field.failures[0].validator, "emailaddress");
    assert_eq!(field.failures[0].code, "emailAddressInvalidFormat");
    assert_eq!(resolver.lookups.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn absent_optional_email_is_valid() {
    let resolver = Arc::new(CountingResolver::default());
    let validator = validator_with(resolver.clone(), &ValidationConfig::default());
    let element = ElementDescriptor::input("email", "email").with_attr(MX_HINT, "yes");

    let result = validator.validate(&[element], &HashMap::new()).await;

    assert!(result.is_valid());
    assert_eq!(result.field("email").unwrap().value, "");
    assert_eq!(resolver.lookups.load(Ordering::SeqCst), 0);
}

#[rstest]
#[case("true", 1)]
#[case("1", 1)]
#[case("TRUE", 1)]
#[case("on", 1)]
#[case("Yes", 1)]
#[case("", 0)]
#[case("0", 0)]
#[case("false", 0)]
#[tokio::test]
async fn mx_hint_controls_lookup(#[case] hint: &str, #[case] expected_lookups: usize) {
    let resolver = Arc::new(CountingResolver::default());
    let validator = validator_with(resolver.clone(), &ValidationConfig::default());
    let element = ElementDescriptor::input("email", "email").with_attr(MX_HINT, hint);

    let result = validator
        .validate(&[element], &submitted(&[("email", "user@example.com")]))
        .await;

    assert!(result.is_valid());
    assert_eq!(resolver.lookups.load(Ordering::SeqCst), expected_lookups);
}

#[tokio::test]
async fn mx_hint_absent_skips_lookup() {
    let resolver = Arc::new(CountingResolver::default());
    let validator = validator_with(resolver.clone(), &ValidationConfig::default());

    let result = validator
        .validate(
            &[ElementDescriptor::input("email", "email")],
            &submitted(&[("email", "user@nomail.test")]),
        )
        .await;

    assert!(result.is_valid());
    assert_eq!(resolver.lookups.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn mx_missing_record_fails_field() {
    let validator = validator_with(Arc::new(CountingResolver::default()), &ValidationConfig::default());
    let element = ElementDescriptor::input("email", "email").with_attr(MX_HINT, "on");

    let result = validator
        .validate(&[element], &submitted(&[("email", "user@nomail.test")]))
        .await;

    assert_eq!(result.field("email").unwrap().codes(), vec!["emailAddressNoMxRecord"]);
}

#[tokio::test(start_paused = true)]
async fn mx_timeout_fails_only_that_field() {
    let config = ValidationConfig {
        mx_check_timeout_ms: 100,
        ..ValidationConfig::default()
    };
    let validator = validator_with(Arc::new(SlowResolver), &config);
    let elements = vec![
        ElementDescriptor::input("email", "email").with_attr(MX_HINT, "1"),
        ElementDescriptor::input("text", "name").with_flag("required"),
    ];

    let result = validator
        .validate(&elements, &submitted(&[("email", "user@example.com"), ("name", "Ann")]))
        .await;

    assert!(!result.is_valid());
    assert!(result.errors().is_empty());
    assert_eq!(result.field("email").unwrap().codes(), vec!["emailAddressMxTimeout"]);
    assert!(result.field("name").unwrap().valid);
}

#[tokio::test]
async fn build_errors_are_reported_per_field() {
    let validator = FormValidator::new(&ValidationConfig::default());
    let elements = vec![
        ElementDescriptor::input("email", "email").with_attr("maxlength", "five"),
        ElementDescriptor::input("text", "nick").with_attr("data-filters", "rot13"),
        ElementDescriptor::input("text", "name").with_attr("maxlength", "3"),
    ];

    let result = validator
        .validate(&elements, &submitted(&[("email", "a@b.com"), ("nick", "x"), ("name", "Annabel")]))
        .await;

    assert!(!result.is_valid());
    assert_eq!(
        result.error("email"),
        Some(&FieldError::MalformedAttribute {
            field: "email".into(),
            tag: "input".into(),
            attribute: "maxlength".into(),
            value: "five".into(),
            expected: "a non-negative integer",
        })
    );
    assert!(matches!(result.error("nick"), Some(FieldError::UnknownFilter { .. })));
    assert_eq!(result.field("name").unwrap().codes(), vec!["stringLengthTooLong"]);
}

#[derive(Debug)]
struct IbanElement;

impl ElementRuleBuilder for IbanElement {
    fn name(&self) -> &'static str {
        "iban"
    }

    fn attach_type_validators(
        &self,
        _attrs: &rusty_forms_markup::AttributeReader<'_>,
        chain: &mut rusty_forms_markup::ValidatorChain,
    ) -> Result<(), FieldError> {
        chain.attach(rusty_forms_markup::ValidatorSpec::new("iban"));
        Ok(())
    }
}

#[tokio::test]
async fn unknown_validator_surfaces_before_execution() {
    let registry = rusty_forms_markup::BuilderRegistry::defaults_builder()
        .register("input", Some("iban"), IbanElement)
        .build();
    let validator = FormValidator::new(&ValidationConfig::default()).with_registry(Arc::new(registry));

    let result = validator
        .validate(
            &[ElementDescriptor::input("iban", "account")],
            &submitted(&[("account", "DE89")]),
        )
        .await;

    assert_eq!(
        result.error("account"),
        Some(&FieldError::UnknownValidator {
            field: "account".into(),
            name: "iban".into(),
        })
    );
}

#[tokio::test]
async fn filtered_values_are_returned_for_valid_fields() {
    let validator = FormValidator::new(&ValidationConfig::default());
    let elements = vec![
        ElementDescriptor::input("email", "email").with_attr("data-filters", "stringtrim|stringtolower"),
        ElementDescriptor::input("tel", "phone").with_attr("data-filters", "digits").with_attr("minlength", "7"),
        ElementDescriptor::input("number", "qty").with_attr("min", "1").with_attr("max", "5"),
    ];

    let result = validator
        .validate(
            &elements,
            &submitted(&[("email", "  Ann@Example.COM "), ("phone", "(555) 010-9999"), ("qty", "9")]),
        )
        .await;

    let values = result.values();
    assert_eq!(values.get("email"), Some(&"ann@example.com"));
    assert_eq!(values.get("phone"), Some(&"5550109999"));
    assert_eq!(values.get("qty"), None);
    assert_eq!(result.field("qty").unwrap().codes(), vec!["notLessThanOrEqual"]);
}

#[rstest]
#[case("1000000000", true)]
#[case("1000000000.5", false)]
#[case("500000000.5", false)]
#[tokio::test]
async fn integer_step_rejects_fractions_at_any_magnitude(#[case] value: &str, #[case] valid: bool) {
    let validator = FormValidator::new(&ValidationConfig::default());
    let element = ElementDescriptor::input("number", "amount").with_attr("step", "1");

    let result = validator.validate(&[element], &submitted(&[("amount", value)])).await;

    let field = result.field("amount").unwrap();
    assert_eq!(field.valid, valid, "{value}");
    if !valid {
        assert_eq!(field.codes(), vec!["stepMismatch"]);
    }
}

#[tokio::test]
async fn mx_lookup_failure_is_not_blamed_on_the_address() {
    let validator = validator_with(Arc::new(UnreachableResolver), &ValidationConfig::default());
    let element = ElementDescriptor::input("email", "email").with_attr(MX_HINT, "true");

    let result = validator
        .validate(&[element], &submitted(&[("email", "user@example.com")]))
        .await;

    assert_eq!(result.field("email").unwrap().codes(), vec!["emailAddressMxLookupFailed"]);
}

#[tokio::test]
async fn fail_fast_and_accumulate_share_first_failure() {
    let elements = vec![ElementDescriptor::input("number", "qty")
        .with_attr("maxlength", "2")
        .with_attr("max", "10")];
    let values = submitted(&[("qty", "abc")]);

    let accumulate = FormValidator::new(&ValidationConfig::default())
        .validate(&elements, &values)
        .await;
    let fail_fast = FormValidator::new(&ValidationConfig {
        execution_policy: ExecutionPolicy::FailFast,
        ..ValidationConfig::default()
    })
    .validate(&elements, &values)
    .await;

    let all = accumulate.field("qty").unwrap();
    let first = fail_fast.field("qty").unwrap();
    assert_eq!(all.codes(), vec!["stringLengthTooLong", "notFloat"]);
    assert_eq!(first.codes(), vec!["stringLengthTooLong"]);
}

#[tokio::test]
async fn concurrent_validations_are_independent() {
    let validator = FormValidator::new(&ValidationConfig::default());
    let elements = Arc::new(vec![
        ElementDescriptor::input("email", "email").with_flag("required"),
        ElementDescriptor::input("number", "age").with_attr("min", "18"),
    ]);

    let mut handles = Vec::new();
    for i in 0..8 {
        let validator = validator.clone();
        let elements = Arc::clone(&elements);
        handles.push(tokio::spawn(async move {
            let age = if i % 2 == 0 { "30" } else { "12" };
            let values = submitted(&[("email", "user@example.com"), ("age", age)]);
            (i, validator.validate(&elements, &values).await)
        }));
    }

    for handle in handles {
        let (i, result) = handle.await.unwrap();
        assert_eq!(result.is_valid(), i % 2 == 0, "request {i}");
    }
}

#[tokio::test]
async fn form_result_serializes_to_json() {
    let validator = FormValidator::new(&ValidationConfig::default());
    let result = validator
        .validate(
            &[ElementDescriptor::input("email", "email").with_flag("required")],
            &HashMap::new(),
        )
        .await;

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["valid"], false);
    assert_eq!(json["fields"]["email"]["failures"][0]["validator"], "notempty");
    assert_eq!(json["fields"]["email"]["failures"][0]["code"], "isEmpty");
}
