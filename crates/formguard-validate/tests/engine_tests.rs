//! End-to-end tests for the form validator through the public API.

use formguard_validate::prelude::*;
use formguard_validate::{validators, PresenterEvent};
use std::collections::HashMap;
use std::io::Write;
use std::sync::Mutex;

fn signup_form(values: FormValues) -> FormValidator<FormValues, RecordingPresenter> {
    let mut form = FormValidator::new(values, RecordingPresenter::new());
    form.add_rule("user", RuleSet::new().rule(username_rule()));
    form.add_rule(
        "email",
        RuleSet::new()
            .rule(RequiredRule::new().with_label("Email"))
            .rule(EmailRule),
    );
    form.add_rule(
        "age",
        RuleSet::new()
            .rule(NumberRule::new().with_label("Age"))
            .rule(RangeRule::new(0.0, 100.0)),
    );
    form.add_rule("password", RuleSet::new().rule(password_rule()));
    form.add_rule(
        "confirm",
        RuleSet::new().rule(MatchRule::field("password").with_label("Passwords")),
    );
    form
}

fn valid_values() -> FormValues {
    FormValues::new()
        .with("user", "valid_user1")
        .with("email", "someone@example.com")
        .with("age", "42")
        .with("password", "hunter2")
        .with("confirm", "hunter2")
}

#[test]
fn documented_validator_examples() {
    assert_eq!(
        validators::required("", "Field").unwrap_err().message,
        "Field is required"
    );
    assert_eq!(
        validators::min_length("ab", 3, "Field").unwrap_err().message,
        "Field must be at least 3 characters"
    );
    assert_eq!(
        validators::email("a@b").unwrap_err().message,
        "Invalid email format"
    );
    assert_eq!(
        validators::range("150", 0.0, 100.0).unwrap_err().message,
        "Must be between 0 and 100"
    );
    assert_eq!(
        validators::matches("a", "b", "Fields").unwrap_err().message,
        "Fields do not match"
    );
    assert_eq!(
        username_rule().validate("ab").unwrap_err().message,
        "Username must be at least 3 characters"
    );
    assert!(username_rule().validate("valid_user1").is_ok());
}

#[test]
fn valid_form_passes_and_clears_every_field() {
    let mut form = signup_form(valid_values());

    assert!(form.validate());
    assert!(form.errors().is_empty());

    let cleared: Vec<_> = form
        .presenter()
        .events()
        .iter()
        .filter(|event| matches!(event, PresenterEvent::Clear { .. }))
        .collect();
    assert_eq!(cleared.len(), 5);
}

#[test]
fn failing_fields_are_all_reported_in_order() {
    let values = valid_values()
        .with("user", "a!")
        .with("age", "150")
        .with("confirm", "hunter3");
    let mut form = signup_form(values);

    assert!(!form.validate());
    assert_eq!(form.errors().field_names(), vec!["user", "age", "confirm"]);
    assert_eq!(
        form.presenter().message("user"),
        Some(
            "Username must be at least 3 characters; \
             Username may only contain letters, numbers, hyphens and underscores"
        )
    );
    assert_eq!(
        form.presenter().message("age"),
        Some("Must be between 0 and 100")
    );
    assert_eq!(
        form.presenter().message("confirm"),
        Some("Passwords do not match")
    );
    assert!(!form.presenter().is_invalid("email"));
}

#[test]
fn error_map_holds_every_message() {
    let mut form = FormValidator::new(
        FormValues::new().with("age", "abc"),
        RecordingPresenter::new(),
    );
    form.add_rule(
        "age",
        RuleSet::new()
            .rule(NumberRule::new().with_label("Age"))
            .rule(RangeRule::new(18.0, 65.0)),
    );

    assert!(!form.validate());
    let map = form.error_messages();
    assert_eq!(
        map["age"],
        vec![
            "Age must be a number".to_string(),
            "Must be between 18 and 65".to_string()
        ]
    );
    assert_eq!(form.presenter().message("age"), Some("Age must be a number"));
}

#[test]
fn fixing_a_field_clears_its_error() {
    let mut form = signup_form(valid_values().with("email", "nope"));
    assert!(!form.validate());
    assert!(form.errors().contains("email"));

    form.fields_mut().set("email", "fixed@example.com");
    assert!(form.validate_field("email"));
    assert!(form.errors().is_empty());
    assert!(form.presenter().visible().is_empty());
}

#[test]
fn missing_field_does_not_enter_error_state() {
    let mut values = valid_values();
    values.remove("age");
    let mut form = signup_form(values);

    assert!(!form.validate());
    assert!(form.errors().is_empty());
    assert_eq!(form.missing_fields().collect::<Vec<_>>(), vec!["age"]);
    assert!(!form
        .presenter()
        .events()
        .iter()
        .any(|event| matches!(event, PresenterEvent::Show { field, .. } | PresenterEvent::Clear { field } if field == "age")));
}

#[test]
fn clear_errors_then_revalidate() {
    let mut form = signup_form(valid_values().with("user", ""));
    assert!(!form.validate());

    form.clear_errors();
    assert!(form.errors().is_empty());
    assert!(form.presenter().visible().is_empty());
    assert_eq!(form.rules().len(), 5);

    assert!(!form.validate());
    assert_eq!(form.errors().field_names(), vec!["user"]);
}

#[test]
fn works_with_plain_hash_maps() {
    let mut values = HashMap::new();
    values.insert("site".to_string(), "not a url".to_string());

    let mut form = FormValidator::new(values, NoopPresenter);
    form.add_rule("site", RuleSet::new().rule(UrlRule));

    assert_eq!(form.check_field("site"), FieldOutcome::Invalid);
    let error = &form.errors().get("site").unwrap()[0];
    assert_eq!(error.code, "url");
    assert!(error.params.contains_key("reason"));
}

#[test]
fn custom_rules_plug_into_the_engine() {
    let mut form = FormValidator::new(
        FormValues::new().with("coupon", "SPRING"),
        RecordingPresenter::new(),
    );
    form.add_rule(
        "coupon",
        RuleSet::new().rule(CustomRule::new(|value: &str| {
            if value.ends_with("24") {
                None
            } else {
                Some("Coupon has expired".to_string())
            }
        })),
    );

    assert!(!form.validate());
    assert_eq!(form.presenter().message("coupon"), Some("Coupon has expired"));

    form.fields_mut().set("coupon", "SPRING24");
    assert!(form.validate());
}

#[test]
fn schema_file_drives_validation() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(
        file,
        r#"
name = "contact"

[fields]
name = [{{ type = "required", label = "Name" }}, {{ type = "max_length", max = 10, label = "Name" }}]
phone = [{{ type = "phone" }}]
"#
    )
    .unwrap();

    let schema = FormSchema::load(file.path()).unwrap();
    let values = FormValues::new()
        .with("name", "A very long name indeed")
        .with("phone", "12-34");
    let mut form = FormValidator::from_schema(values, RecordingPresenter::new(), &schema).unwrap();

    assert!(!form.validate());
    assert_eq!(
        form.presenter().message("name"),
        Some("Name must not exceed 10 characters")
    );
    assert_eq!(form.errors().get("phone").unwrap()[0].code, "phone");
}

#[test]
fn missing_schema_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = FormSchema::load(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, SchemaError::Io { .. }));
}

/// Accessor whose values live behind a lock, read asynchronously.
struct SharedForm {
    values: Mutex<HashMap<String, String>>,
}

#[async_trait]
impl AsyncFieldAccessor for SharedForm {
    async fn read_async(&self, field: &str) -> Option<String> {
        tokio::task::yield_now().await;
        self.values.lock().unwrap().get(field).cloned()
    }
}

#[tokio::test]
async fn async_accessor_resolves_compared_fields() {
    let values: HashMap<String, String> = [("password", "s3cret"), ("confirm", "s3cret")]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    let accessor = SharedForm {
        values: Mutex::new(values),
    };

    let mut form = FormValidator::new(accessor, RecordingPresenter::new());
    form.add_rule("password", RuleSet::new().rule(password_rule()));
    form.add_rule(
        "confirm",
        RuleSet::new().rule(MatchRule::field("password").with_label("Passwords")),
    );

    assert!(form.validate_async().await);

    form.fields()
        .values
        .lock()
        .unwrap()
        .insert("confirm".to_string(), "secret".to_string());
    assert!(!form.validate_field_async("confirm").await);
    assert_eq!(
        form.presenter().message("confirm"),
        Some("Passwords do not match")
    );

    form.fields().values.lock().unwrap().remove("password");
    assert_eq!(
        form.check_field_async("password").await,
        FieldOutcome::Missing
    );
}
