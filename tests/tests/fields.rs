use modelschema::{SchemaDef, ValueType};
use pretty_assertions::{assert_eq, assert_ne};
use serde_json::json;
use tests::{testapp, CONFIG_ID};

#[test]
fn configuration_schema() {
    let registry = testapp();
    let configuration = registry.model_by_name("Configuration").unwrap();

    let schema = SchemaDef::new("ConfigurationSchema")
        .model(configuration)
        .build(&registry)
        .unwrap();

    let json_value = json!([
        {"type": "string", "format": "json-string"},
        {"type": "object"},
        {"type": "array", "items": {}},
    ]);

    assert_eq!(
        schema.json_schema(false),
        &json!({
            "title": "ConfigurationSchema",
            "type": "object",
            "properties": {
                "id": {
                    "title": "Id",
                    "description": "id",
                    "type": "integer"
                },
                "config_id": {
                    "title": "Config Id",
                    "description": "Unique id of the configuration.",
                    "type": "string",
                    "format": "uuid",
                    "default": CONFIG_ID
                },
                "name": {
                    "title": "Name",
                    "description": "name",
                    "maxLength": 100,
                    "type": "string"
                },
                "permissions": {
                    "title": "Permissions",
                    "description": "permissions",
                    "anyOf": json_value.clone(),
                    "default": {}
                },
                "changelog": {
                    "title": "Changelog",
                    "description": "changelog",
                    "anyOf": json_value.clone(),
                    "default": []
                },
                "metadata": {
                    "title": "Metadata",
                    "description": "metadata",
                    "anyOf": json_value
                },
                "version": {
                    "title": "Version",
                    "description": "version",
                    "maxLength": 5,
                    "type": "string",
                    "default": "0.0.1"
                }
            },
            "required": ["name"]
        })
    );
}

#[test]
fn preference_schema_enum_definitions() {
    let registry = testapp();
    let preference = registry.model_by_name("Preference").unwrap();

    let schema = SchemaDef::new("PreferenceSchema")
        .model(preference)
        .build(&registry)
        .unwrap();

    assert_eq!(
        schema.json_schema(false),
        &json!({
            "title": "PreferenceSchema",
            "description": "A user's preference.",
            "type": "object",
            "properties": {
                "id": {
                    "title": "Id",
                    "description": "id",
                    "type": "integer"
                },
                "name": {
                    "title": "Name",
                    "description": "name",
                    "maxLength": 128,
                    "type": "string"
                },
                "preferred_food": {
                    "title": "Preferred Food",
                    "description": "preferred_food",
                    "default": "ba",
                    "allOf": [{"$ref": "#/definitions/PreferenceSchemaPreferredFoodEnum"}]
                },
                "preferred_group": {
                    "title": "Preferred Group",
                    "description": "preferred_group",
                    "default": 1,
                    "allOf": [{"$ref": "#/definitions/PreferenceSchemaPreferredGroupEnum"}]
                }
            },
            "required": ["name"],
            "definitions": {
                "PreferenceSchemaPreferredFoodEnum": {
                    "title": "PreferenceSchemaPreferredFoodEnum",
                    "description": "An enumeration.",
                    "type": "string",
                    "enum": ["ba", "ap"]
                },
                "PreferenceSchemaPreferredGroupEnum": {
                    "title": "PreferenceSchemaPreferredGroupEnum",
                    "description": "An enumeration.",
                    "type": "integer",
                    "enum": [1, 2]
                }
            }
        })
    );
}

#[test]
fn enum_types_are_distinct_per_schema() {
    let registry = testapp();
    let preference = registry.model_by_name("Preference").unwrap();

    let first = SchemaDef::new("PreferenceSchema")
        .model(preference)
        .build(&registry)
        .unwrap();
    let second = SchemaDef::new("OtherPreferenceSchema")
        .model(preference)
        .build(&registry)
        .unwrap();

    let a = &first.field("preferred_food").unwrap().ty;
    let b = &second.field("preferred_food").unwrap().ty;
    assert_ne!(a, b);
    assert_eq!(a, &first.field("preferred_food").unwrap().ty);
}

#[test]
fn custom_field_resolves_through_base_chain() {
    let registry = testapp();
    let record = registry.model_by_name("Record").unwrap();

    let schema = SchemaDef::new("RecordSchema")
        .model(record)
        .build(&registry)
        .unwrap();

    let title = schema.field("title").unwrap();
    assert_eq!(title.ty, ValueType::Str);
    assert_eq!(title.spec.max_length, Some(20));
    assert!(title.spec.is_required());
}

#[test]
fn unmapped_custom_field_degrades_to_string() {
    let _ = env_logger::builder().is_test(true).try_init();

    let registry = testapp();
    let searchable = registry.model_by_name("Searchable").unwrap();

    let schema = SchemaDef::new("SearchableSchema")
        .model(searchable)
        .build(&registry)
        .unwrap();

    let vector = schema.field("search_vector").unwrap();
    assert!(vector.ty.is_nullable());
    assert_eq!(vector.ty.base(), &ValueType::Str);
    assert!(!vector.spec.is_required());
}

#[test]
fn file_backed_field_is_text() {
    let registry = testapp();
    let attachment = registry.model_by_name("Attachment").unwrap();

    let schema = SchemaDef::new("AttachmentSchema")
        .model(attachment)
        .build(&registry)
        .unwrap();

    let image = schema.field("image").unwrap();
    assert!(image.ty.is_nullable());
    assert!(image.ty.is_text());
    assert!(!image.spec.is_required());
}

#[test]
fn temporal_fields_carry_formats() {
    let registry = testapp();
    let message = registry.model_by_name("Message").unwrap();

    let schema = SchemaDef::new("MessageSchema")
        .model(message)
        .exclude(["thread"])
        .build(&registry)
        .unwrap();

    let json_schema = schema.json_schema(false);
    assert_eq!(
        json_schema["properties"]["created_at"]["format"],
        json!("date-time")
    );
    assert_eq!(json_schema["properties"]["created_at"]["type"], json!("string"));
}
