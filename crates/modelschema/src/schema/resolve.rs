use super::classify::classify;
use super::{FieldSpec, SpecDefault, ValueType};
use crate::model::{Field, Registry};

use serde_json::Value;

/// Synthesizes a placeholder for a relation field that has no explicitly
/// declared nested schema type.
///
/// Singular relations become the target's primary-key type; plural
/// relations become a list of single-key id mappings. When the schema
/// definition declares a nested type for the field, the synthesizer never
/// calls this.
pub(crate) fn resolve(registry: &Registry, field: &Field, schema_name: &str) -> (ValueType, FieldSpec) {
    let relation = field.expect_relation();
    let target = relation.target(registry);
    let pk = target.primary_key_field();

    // Key type for the placeholder, stripped of the nullability the
    // primary key's own classification may have added.
    let (key_ty, _) = classify(pk, schema_name);
    let key_ty = key_ty.base().clone();

    let mut spec = FieldSpec::default();

    let ty = if relation.is_plural() {
        // An unresolved list of related primary keys: [{"id": 3}, ..]
        ValueType::List(Box::new(ValueType::IdMap))
    } else {
        key_ty
    };

    let ty = if field.nullable || relation.is_reverse() {
        spec.default = SpecDefault::Value(Value::Null);
        if relation.is_plural() {
            ty
        } else {
            ty.optional()
        }
    } else {
        ty
    };

    // Forward relations describe themselves through the target's primary
    // key; a generic pointer has no fixed target and keeps its own name.
    spec.description = Some(if relation.kind.has_target_model() {
        pk.name.clone()
    } else {
        field.name.clone()
    });

    (ty, spec)
}
