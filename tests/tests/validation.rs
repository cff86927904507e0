use modelschema::{FieldErrorKind, FieldSpec, SchemaDef, ValueType};
use pretty_assertions::assert_eq;
use serde_json::{json, Map, Value};
use std::sync::atomic::{AtomicI64, Ordering};
use tests::testapp;

fn data(value: Value) -> Map<String, Value> {
    value.as_object().cloned().expect("object literal")
}

#[test]
fn missing_required_fields() {
    let registry = testapp();
    let schema = SchemaDef::new("UserSchema")
        .model(registry.model_by_name("User").unwrap())
        .build(&registry)
        .unwrap();

    let err = schema.instantiate(Map::new()).unwrap_err();
    assert!(err.is_validation());

    let errors = err.field_errors().unwrap();
    assert_eq!(errors.len(), 4);
    assert!(errors.iter().all(|e| e.kind == FieldErrorKind::Missing));
    let locs: Vec<_> = errors.iter().map(|e| e.loc.join(".")).collect();
    assert_eq!(locs, ["first_name", "email", "created_at", "updated_at"]);
    assert!(err.to_string().starts_with("4 validation errors for UserSchema"));
}

#[test]
fn field_errors_serialize() {
    let registry = testapp();
    let schema = SchemaDef::new("PreferenceSchema")
        .model(registry.model_by_name("Preference").unwrap())
        .build(&registry)
        .unwrap();

    let err = schema.instantiate(Map::new()).unwrap_err();
    assert_eq!(
        serde_json::to_value(err.field_errors().unwrap()).unwrap(),
        json!([
            {"loc": ["name"], "msg": "field required", "type": "missing"}
        ])
    );
}

#[test]
fn type_mismatch() {
    let registry = testapp();
    let schema = SchemaDef::new("UserSchema")
        .model(registry.model_by_name("User").unwrap())
        .build(&registry)
        .unwrap();

    let err = schema
        .instantiate(data(json!({
            "first_name": 42,
            "email": "jack@example.com",
            "created_at": "2026-08-30T12:00:00",
            "updated_at": "2026-08-30T12:30:00"
        })))
        .unwrap_err();

    let errors = err.field_errors().unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].loc, ["first_name"]);
    assert_eq!(errors[0].message, "value is not a valid string");
    assert_eq!(errors[0].kind, FieldErrorKind::Type);
}

#[test]
fn max_length_enforced() {
    let registry = testapp();
    let schema = SchemaDef::new("UserSchema")
        .model(registry.model_by_name("User").unwrap())
        .build(&registry)
        .unwrap();

    let err = schema
        .instantiate(data(json!({
            "first_name": "x".repeat(51),
            "email": "jack@example.com",
            "created_at": "2026-08-30T12:00:00",
            "updated_at": "2026-08-30T12:30:00"
        })))
        .unwrap_err();

    let errors = err.field_errors().unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind, FieldErrorKind::MaxLength);
    assert_eq!(
        errors[0].message,
        "ensure this value has at most 50 characters"
    );
}

#[test]
fn enum_membership() {
    let registry = testapp();
    let schema = SchemaDef::new("PreferenceSchema")
        .model(registry.model_by_name("Preference").unwrap())
        .build(&registry)
        .unwrap();

    let err = schema
        .instantiate(data(json!({"name": "dietary", "preferred_food": "xx"})))
        .unwrap_err();

    let errors = err.field_errors().unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].loc, ["preferred_food"]);
    assert_eq!(errors[0].kind, FieldErrorKind::EnumMember);
    assert!(errors[0].message.contains("permitted: ba, ap"));
}

#[test]
fn nested_error_locations() {
    let registry = testapp();
    let user_schema = SchemaDef::new("UserSchema")
        .model(registry.model_by_name("User").unwrap())
        .include(["id", "first_name", "email"])
        .build(&registry)
        .unwrap();

    let wrapper = SchemaDef::new("ProfileWithUserSchema")
        .model(registry.model_by_name("Profile").unwrap())
        .include(["id", "user"])
        .field_with(
            "user",
            ValueType::Nested(user_schema.clone()),
            FieldSpec::required(),
        )
        .build(&registry)
        .unwrap();

    let err = wrapper
        .instantiate(data(json!({"id": 1, "user": {"first_name": "Jack"}})))
        .unwrap_err();

    let errors = err.field_errors().unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].loc, ["user", "email"]);
    assert_eq!(errors[0].kind, FieldErrorKind::Missing);
    assert_eq!(
        err.to_string(),
        "1 validation error for ProfileWithUserSchema: user.email: field required"
    );
}

#[test]
fn factory_defaults_resolved_per_instantiation() {
    static COUNTER: AtomicI64 = AtomicI64::new(0);

    let registry = testapp();
    let schema = SchemaDef::new("SequencedSchema")
        .model(registry.model_by_name("User").unwrap())
        .annotations_only()
        .field_with(
            "seq",
            ValueType::Int,
            FieldSpec::required()
                .default_factory(|| json!(COUNTER.fetch_add(1, Ordering::Relaxed))),
        )
        .build(&registry)
        .unwrap();

    let first = schema.instantiate(Map::new()).unwrap();
    let second = schema.instantiate(Map::new()).unwrap();
    assert!(first.get("seq") != second.get("seq"));
}

#[test]
fn uuid_and_json_checks() {
    let registry = testapp();
    let schema = SchemaDef::new("ConfigurationSchema")
        .model(registry.model_by_name("Configuration").unwrap())
        .build(&registry)
        .unwrap();

    let err = schema
        .instantiate(data(json!({"name": "app", "config_id": "not-a-uuid"})))
        .unwrap_err();
    let errors = err.field_errors().unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].loc, ["config_id"]);
    assert_eq!(errors[0].message, "value is not a valid uuid");

    let instance = schema
        .instantiate(data(json!({"name": "app", "permissions": {"admin": true}})))
        .unwrap();
    assert_eq!(instance.get("permissions"), Some(&json!({"admin": true})));
    assert_eq!(instance.get("version"), Some(&json!("0.0.1")));
    assert_eq!(instance.get("config_id"), Some(&json!(tests::CONFIG_ID)));
    assert_eq!(instance.get("metadata"), Some(&Value::Null));
}

#[test]
fn list_items_report_positions() {
    let registry = testapp();
    let schema = SchemaDef::new("ScoresSchema")
        .model(registry.model_by_name("User").unwrap())
        .annotations_only()
        .field("scores", ValueType::List(Box::new(ValueType::Int)))
        .build(&registry)
        .unwrap();

    let err = schema
        .instantiate(data(json!({"scores": [1, "two", 3]})))
        .unwrap_err();

    let errors = err.field_errors().unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].loc, ["scores.1"]);
    assert_eq!(errors[0].message, "value is not a valid integer");
}
