use super::{SchemaType, ValueType};
use crate::error::{FieldError, FieldErrorKind};
use crate::model::Record;
use crate::{Error, Result};

use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

/// A populated schema instance.
///
/// The value tree is plain JSON-compatible data, independent of the storage
/// layer. When built by projection, the originating row rides along as a
/// side attribute that never appears in the values or any serialized
/// output.
pub struct SchemaInstance {
    schema: Arc<SchemaType>,
    values: Map<String, Value>,
    record: Option<Arc<dyn Record>>,
}

impl SchemaInstance {
    pub fn schema(&self) -> &Arc<SchemaType> {
        &self.schema
    }

    /// Looks up a value by canonical field name or public alias.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name).or_else(|| {
            self.schema
                .resolve_alias(name)
                .and_then(|key| self.values.get(key))
        })
    }

    /// The value tree under canonical field names.
    pub fn dump(&self) -> Map<String, Value> {
        self.values.clone()
    }

    /// The value tree under public-facing aliases.
    pub fn dump_by_alias(&self) -> Map<String, Value> {
        self.values
            .iter()
            .map(|(key, value)| (self.schema.alias_for(key).to_string(), value.clone()))
            .collect()
    }

    /// The live source row this instance was projected from, if any.
    pub fn record(&self) -> Option<&Arc<dyn Record>> {
        self.record.as_ref()
    }

    pub(crate) fn bind(mut self, record: Arc<dyn Record>) -> Self {
        self.record = Some(record);
        self
    }
}

impl fmt::Debug for SchemaInstance {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_struct("SchemaInstance")
            .field("schema", &self.schema.name())
            .field("values", &self.values)
            .field("bound", &self.record.is_some())
            .finish()
    }
}

/// Constructs a schema instance from a plain value mapping.
///
/// Missing fields fall back to their defaults (factories re-invoked per
/// call); required fields with no value, and values failing their type or
/// constraint checks, accumulate into a single validation error.
pub(crate) fn instantiate(
    schema: &Arc<SchemaType>,
    data: Map<String, Value>,
) -> Result<SchemaInstance> {
    let mut errors = vec![];
    let mut values = Map::new();

    for (key, field) in schema.fields() {
        let supplied = data.get(key).or_else(|| {
            let alias = schema.alias_for(key);
            if alias != key {
                data.get(alias)
            } else {
                None
            }
        });

        match supplied {
            Some(value) => {
                let before = errors.len();
                let checked = check(&field.ty, value, key, &mut errors);
                if errors.len() == before {
                    if let (Some(max), Some(s)) = (field.spec.max_length, checked.as_str()) {
                        if s.chars().count() > max {
                            errors.push(FieldError::new(
                                [key],
                                format!("ensure this value has at most {max} characters"),
                                FieldErrorKind::MaxLength,
                            ));
                            continue;
                        }
                    }
                    values.insert(key.to_string(), checked);
                }
            }
            None => match field.spec.resolve_default() {
                // Defaults are trusted as-is, matching the defaulting model.
                Some(default) => {
                    values.insert(key.to_string(), default);
                }
                None => errors.push(FieldError::missing([key])),
            },
        }
    }

    if !errors.is_empty() {
        return Err(Error::validation(schema.name(), errors));
    }

    Ok(SchemaInstance {
        schema: schema.clone(),
        values,
        record: None,
    })
}

fn type_error(loc: &str, expected: &str, errors: &mut Vec<FieldError>) -> Value {
    errors.push(FieldError::new(
        [loc],
        format!("value is not a valid {expected}"),
        FieldErrorKind::Type,
    ));
    Value::Null
}

fn check(ty: &ValueType, value: &Value, loc: &str, errors: &mut Vec<FieldError>) -> Value {
    match ty {
        ValueType::Nullable(inner) => {
            if value.is_null() {
                Value::Null
            } else {
                check(inner, value, loc, errors)
            }
        }
        ValueType::Int => {
            if value.is_i64() || value.is_u64() {
                value.clone()
            } else {
                type_error(loc, "integer", errors)
            }
        }
        ValueType::Float | ValueType::Decimal => {
            if value.is_number() {
                value.clone()
            } else {
                type_error(loc, "number", errors)
            }
        }
        ValueType::Bool => {
            if value.is_boolean() {
                value.clone()
            } else {
                type_error(loc, "boolean", errors)
            }
        }
        ValueType::Str | ValueType::Bytes | ValueType::Date | ValueType::DateTime
        | ValueType::Time => {
            if value.is_string() {
                value.clone()
            } else {
                type_error(loc, "string", errors)
            }
        }
        ValueType::Duration => {
            if value.is_number() || value.is_string() {
                value.clone()
            } else {
                type_error(loc, "duration", errors)
            }
        }
        ValueType::Uuid => match value.as_str() {
            Some(s) if uuid::Uuid::parse_str(s).is_ok() => value.clone(),
            _ => type_error(loc, "uuid", errors),
        },
        ValueType::IpAddr => match value.as_str() {
            Some(s) if s.parse::<std::net::IpAddr>().is_ok() => value.clone(),
            _ => type_error(loc, "IP address", errors),
        },
        ValueType::Json => {
            if value.is_string() || value.is_object() || value.is_array() {
                value.clone()
            } else {
                type_error(loc, "JSON value", errors)
            }
        }
        ValueType::Enum(enum_ty) => {
            if enum_ty.contains(value) {
                value.clone()
            } else {
                let permitted: Vec<String> =
                    enum_ty.values().map(|v| v.to_string()).collect();
                errors.push(FieldError::new(
                    [loc],
                    format!(
                        "value is not a valid enumeration member; permitted: {}",
                        permitted.join(", ")
                    ),
                    FieldErrorKind::EnumMember,
                ));
                Value::Null
            }
        }
        ValueType::List(inner) => match value.as_array() {
            Some(items) => {
                let checked: Vec<Value> = items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| check(inner, item, &format!("{loc}.{i}"), errors))
                    .collect();
                Value::Array(checked)
            }
            None => type_error(loc, "list", errors),
        },
        ValueType::IdMap => match value.as_object() {
            Some(map) if map.values().all(|v| v.is_i64() || v.is_u64()) => value.clone(),
            _ => type_error(loc, "key mapping", errors),
        },
        ValueType::Nested(nested) => match value.as_object() {
            Some(map) => match nested.instantiate(map.clone()) {
                Ok(instance) => Value::Object(instance.dump()),
                Err(err) => {
                    if let Some(nested_errors) = err.field_errors() {
                        errors.extend(
                            nested_errors.iter().cloned().map(|e| e.nest(loc)),
                        );
                    }
                    Value::Null
                }
            },
            None => type_error(loc, "mapping", errors),
        },
    }
}
