use super::enum_ty::{EnumMember, EnumTy};
use super::{FieldSpec, SpecDefault, ValueType};
use crate::model::{Field, FieldDefault, StorageType};

use heck::{ToTitleCase, ToUpperCamelCase};
use serde_json::Value;
use std::sync::Arc;

/// Maps a single non-relation field descriptor to a value type and field
/// spec.
///
/// Relation fields never come through here for their own type; the resolver
/// only uses this to type a relation's target primary key.
pub(crate) fn classify(field: &Field, schema_name: &str) -> (ValueType, FieldSpec) {
    let mut spec = FieldSpec::default();
    let mut text_like = false;

    let ty = if field.has_choices() {
        ValueType::Enum(Arc::new(build_enum(field, schema_name)))
    } else {
        let storage = field
            .storage()
            .expect("relation fields are resolved, not classified");
        match storage_value_type(storage) {
            Some((ty, resolved)) => {
                text_like = resolved.is_text();
                ty
            }
            None => {
                // Permissive fallback for custom field subclasses: degrade
                // to string, never abort synthesis.
                log::warn!(
                    "no type mapping for field `{}` of type `{}`; defaulting to string",
                    field.name,
                    storage
                );
                ValueType::Str
            }
        }
    };

    match &field.default {
        Some(FieldDefault::Value(value)) => {
            spec.default = SpecDefault::Value(normalize_default(&ty, value));
        }
        Some(FieldDefault::Factory(factory)) => {
            spec.default_factory = Some(factory.clone());
        }
        None if field.primary_key || field.blank || field.nullable => {
            spec.default = SpecDefault::Value(Value::Null);
        }
        None => {}
    }

    let ty = if field.nullable { ty.optional() } else { ty };

    let label = field.label.as_deref().unwrap_or(&field.name);
    spec.title = Some(label.to_title_case());
    spec.description = Some(match field.help_text.as_deref() {
        Some(help) if !help.is_empty() => help.to_string(),
        _ => field.name.clone(),
    });
    if text_like && !field.has_choices() {
        spec.max_length = field.max_length;
    }

    (ty, spec)
}

/// Resolves a storage tag to a value type, walking the custom-type base
/// chain. Returns the mapped type together with the tag that matched.
pub(crate) fn storage_value_type(storage: &StorageType) -> Option<(ValueType, &StorageType)> {
    let mut current = Some(storage);
    while let Some(tag) = current {
        if let Some(ty) = mapped(tag) {
            return Some((ty, tag));
        }
        current = tag.base();
    }
    None
}

fn mapped(tag: &StorageType) -> Option<ValueType> {
    if tag.is_integer() {
        return Some(ValueType::Int);
    }
    if tag.is_text() {
        return Some(ValueType::Str);
    }
    Some(match tag {
        StorageType::Binary => ValueType::Bytes,
        StorageType::Boolean => ValueType::Bool,
        StorageType::Date => ValueType::Date,
        StorageType::DateTime => ValueType::DateTime,
        StorageType::Duration => ValueType::Duration,
        StorageType::Time => ValueType::Time,
        StorageType::Decimal => ValueType::Decimal,
        StorageType::Float => ValueType::Float,
        StorageType::Uuid => ValueType::Uuid,
        StorageType::IpAddress => ValueType::IpAddr,
        StorageType::Json => ValueType::Json,
        StorageType::Array(base) => {
            let (inner, _) = storage_value_type(base)?;
            ValueType::List(Box::new(inner))
        }
        _ => return None,
    })
}

fn build_enum(field: &Field, schema_name: &str) -> EnumTy {
    let mut members: Vec<EnumMember> = field
        .choices
        .iter()
        .map(|(value, label)| EnumMember {
            label: label.clone(),
            value: value.clone(),
        })
        .collect();

    // A blank-permitting choice field accepts the empty string alongside
    // its declared members.
    if field.blank {
        members.push(EnumMember {
            label: "_blank".to_string(),
            value: Value::String(String::new()),
        });
    }

    EnumTy {
        name: format!(
            "{}{}Enum",
            schema_name,
            field.name.to_upper_camel_case()
        ),
        members,
    }
}

/// A literal default declared as a display label is normalized to the
/// member's raw stored value.
fn normalize_default(ty: &ValueType, value: &Value) -> Value {
    if let ValueType::Enum(enum_ty) = ty {
        if !enum_ty.contains(value) {
            if let Some(raw) = value.as_str().and_then(|label| enum_ty.value_for_label(label)) {
                return raw.clone();
            }
        }
    }
    value.clone()
}
