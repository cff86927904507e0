use super::{EnumTy, SchemaField, SchemaType, ValueType};

use heck::ToTitleCase;
use serde_json::{json, Map, Value};

/// Emits the JSON-schema description of a synthesized schema type.
///
/// Nested schema types and enumerations are hoisted into a shared
/// `definitions` map and referenced via `$ref`.
pub(crate) fn emit(schema: &SchemaType, by_alias: bool) -> Value {
    let mut defs = Map::new();
    let mut root = object_schema(schema, by_alias, &mut defs);
    if !defs.is_empty() {
        root["definitions"] = Value::Object(defs);
    }
    root
}

fn object_schema(schema: &SchemaType, by_alias: bool, defs: &mut Map<String, Value>) -> Value {
    let mut properties = Map::new();
    let mut required = vec![];

    for (key, field) in schema.fields() {
        let public = if by_alias { schema.alias_for(key) } else { key };
        properties.insert(public.to_string(), property(key, field, by_alias, defs));
        if field.spec.is_required() {
            required.push(Value::String(public.to_string()));
        }
    }

    let mut out = Map::new();
    out.insert("title".to_string(), json!(schema.name()));
    if let Some(doc) = schema.doc() {
        out.insert("description".to_string(), json!(doc));
    }
    out.insert("type".to_string(), json!("object"));
    out.insert("properties".to_string(), Value::Object(properties));
    if !required.is_empty() {
        out.insert("required".to_string(), Value::Array(required));
    }
    Value::Object(out)
}

fn property(
    key: &str,
    field: &SchemaField,
    by_alias: bool,
    defs: &mut Map<String, Value>,
) -> Value {
    let mut prop = type_fragment(field.ty.base(), by_alias, defs);

    let map = prop
        .as_object_mut()
        .expect("type fragment is always an object");
    map.insert(
        "title".to_string(),
        json!(field
            .spec
            .title
            .clone()
            .unwrap_or_else(|| key.to_title_case())),
    );
    if let Some(description) = &field.spec.description {
        map.insert("description".to_string(), json!(description));
    }
    if let Some(max_length) = field.spec.max_length {
        map.insert("maxLength".to_string(), json!(max_length));
    }
    // Factories are sampled once for display; null defaults are elided.
    if let Some(default) = field.spec.resolve_default() {
        if !default.is_null() {
            map.insert("default".to_string(), default);
        }
    }

    prop
}

fn type_fragment(ty: &ValueType, by_alias: bool, defs: &mut Map<String, Value>) -> Value {
    match ty {
        ValueType::Bool => json!({"type": "boolean"}),
        ValueType::Int => json!({"type": "integer"}),
        ValueType::Float | ValueType::Decimal => json!({"type": "number"}),
        ValueType::Str => json!({"type": "string"}),
        ValueType::Bytes => json!({"type": "string", "format": "binary"}),
        ValueType::Date => json!({"type": "string", "format": "date"}),
        ValueType::DateTime => json!({"type": "string", "format": "date-time"}),
        ValueType::Time => json!({"type": "string", "format": "time"}),
        ValueType::Duration => json!({"type": "number", "format": "time-delta"}),
        ValueType::Uuid => json!({"type": "string", "format": "uuid"}),
        ValueType::IpAddr => json!({"type": "string", "format": "ipvanyaddress"}),
        ValueType::Json => json!({
            "anyOf": [
                {"type": "string", "format": "json-string"},
                {"type": "object"},
                {"type": "array", "items": {}},
            ]
        }),
        ValueType::IdMap => json!({
            "type": "object",
            "additionalProperties": {"type": "integer"},
        }),
        ValueType::Enum(enum_ty) => {
            define_enum(enum_ty, defs);
            json!({"allOf": [{"$ref": format!("#/definitions/{}", enum_ty.name)}]})
        }
        ValueType::List(inner) => {
            json!({"type": "array", "items": type_fragment(inner, by_alias, defs)})
        }
        ValueType::Nested(nested) => {
            define_nested(nested, by_alias, defs);
            json!({"allOf": [{"$ref": format!("#/definitions/{}", nested.name())}]})
        }
        ValueType::Nullable(inner) => type_fragment(inner, by_alias, defs),
    }
}

fn define_enum(enum_ty: &EnumTy, defs: &mut Map<String, Value>) {
    if defs.contains_key(&enum_ty.name) {
        return;
    }
    let mut def = Map::new();
    def.insert("title".to_string(), json!(enum_ty.name));
    def.insert("description".to_string(), json!("An enumeration."));
    if let Some(ty) = enum_ty.uniform_json_type() {
        def.insert("type".to_string(), json!(ty));
    }
    def.insert(
        "enum".to_string(),
        Value::Array(enum_ty.values().cloned().collect()),
    );
    defs.insert(enum_ty.name.clone(), Value::Object(def));
}

fn define_nested(nested: &SchemaType, by_alias: bool, defs: &mut Map<String, Value>) {
    if defs.contains_key(nested.name()) {
        return;
    }
    // Reserve the slot first so self-referential nesting terminates.
    defs.insert(nested.name().to_string(), Value::Null);
    let def = object_schema(nested, by_alias, defs);
    defs.insert(nested.name().to_string(), def);
}
