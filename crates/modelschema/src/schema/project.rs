use super::{SchemaInstance, SchemaType, ValueType};
use crate::model::{AttrValue, Record, Registry};
use crate::{Error, Result};

use serde_json::{json, Map, Value};
use std::sync::Arc;

/// Projects a live source row into a schema instance.
///
/// Attribute lookups go through the field's public alias; `__`-separated
/// aliases traverse relation hops, degrading to null at the first broken
/// link. Direct lookups of names the record does not know are programming
/// errors and fail.
pub(crate) fn project(
    schema: &Arc<SchemaType>,
    record: &Arc<dyn Record>,
    bind: bool,
) -> Result<SchemaInstance> {
    let mut data = Map::new();

    for (key, field) in schema.fields() {
        let lookup = field.spec.alias.as_deref().unwrap_or(key);

        let attr = if lookup.contains("__") {
            walk_path(record, lookup)
        } else {
            let attr = record.attr(lookup);
            if attr.is_missing() {
                return Err(Error::unknown_field(schema.name(), lookup));
            }
            attr
        };

        let value = coerce(schema.registry(), &field.ty, attr)?;
        data.insert(key.to_string(), value);
    }

    let instance = schema.instantiate(data)?;
    Ok(if bind {
        instance.bind(record.clone())
    } else {
        instance
    })
}

/// Walks a `__`-separated attribute chain left to right.
fn walk_path(record: &Arc<dyn Record>, path: &str) -> AttrValue {
    let mut current = record.clone();
    let mut parts = path.split("__").peekable();

    while let Some(part) = parts.next() {
        let attr = current.attr(part);
        if parts.peek().is_none() {
            return match attr {
                AttrValue::Missing => AttrValue::Null,
                other => other,
            };
        }
        match attr {
            AttrValue::Record(next) => current = next,
            // Broken intermediate hop: resolve to null, never fail.
            _ => return AttrValue::Null,
        }
    }

    AttrValue::Null
}

/// Applies value-type-directed coercions to a fetched attribute.
fn coerce(registry: &Arc<Registry>, ty: &ValueType, attr: AttrValue) -> Result<Value> {
    Ok(match attr {
        AttrValue::Null | AttrValue::Missing => Value::Null,
        AttrValue::Scalar(value) => value,
        // Attachment wrappers project as their stored name.
        AttrValue::File(file) => json!(file.name),
        AttrValue::Record(related) => match ty.as_nested() {
            Some(nested) => Value::Object(project(nested, &related, false)?.dump()),
            // A scalar-typed field holding a related row: substitute its
            // primary key.
            None => primary_key_value(registry, &related),
        },
        AttrValue::Many(rows) => match ty.as_list() {
            Some(ValueType::Nested(nested)) => {
                let mut items = Vec::with_capacity(rows.len());
                for row in &rows {
                    items.push(Value::Object(project(nested, row, false)?.dump()));
                }
                Value::Array(items)
            }
            // The unresolved-placeholder contract: a list of single-key
            // primary-key mappings.
            _ => Value::Array(
                rows.iter()
                    .map(|row| json!({"id": primary_key_value(registry, row)}))
                    .collect(),
            ),
        },
    })
}

fn primary_key_value(registry: &Registry, record: &Arc<dyn Record>) -> Value {
    let model = registry.model(record.model());
    match record.attr(&model.primary_key_field().name) {
        AttrValue::Scalar(value) => value,
        _ => Value::Null,
    }
}
