use super::classify::classify;
use super::def::{DeclaredField, Include, SchemaDef};
use super::resolve::resolve;
use super::schema_type::SchemaTypeParts;
use super::{FieldSpec, SchemaField, SchemaType, SpecDefault};
use crate::model::Registry;
use crate::{Error, Result};

use indexmap::IndexMap;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Synthesizes the final schema type from a schema definition.
///
/// Merges explicit field declarations with fields derived from the source
/// model, applying the include/exclude filter and the first-occurrence-wins
/// dedup rule (source-model fields are visited before declared annotations).
pub(crate) fn synthesize(def: SchemaDef, registry: &Arc<Registry>) -> Result<Arc<SchemaType>> {
    let model_id = def.model.ok_or_else(|| {
        Error::config(format!(
            "schema `{}` names no source model (is `model` set?)",
            def.name
        ))
    })?;

    let model = registry.get_model(model_id).ok_or_else(|| {
        Error::config(format!(
            "{model_id:?} is not a registered source model (is `model` a valid source model?)"
        ))
    })?;

    if def.include != Include::All && !def.exclude.is_empty() {
        return Err(Error::config(
            "only one of `include` or `exclude` should be set in configuration",
        ));
    }

    let mut declared: IndexMap<&str, &DeclaredField> = IndexMap::new();
    for decl in &def.declared {
        declared.insert(decl.name.as_str(), decl);
    }

    // Source-model fields first, then declared annotations; the first
    // occurrence of a key claims it.
    let keys = model
        .fields
        .iter()
        .map(|field| (field.effective_name(), Some(field)))
        .chain(def.declared.iter().map(|decl| (decl.name.clone(), None)));

    let mut seen = HashSet::new();
    let mut fields: IndexMap<String, SchemaField> = IndexMap::new();

    for (key, model_field) in keys {
        if !seen.insert(key.clone()) {
            continue;
        }
        let included = match &def.include {
            Include::Only(names) => names.contains(&key),
            Include::AnnotationsOnly => declared.contains_key(key.as_str()),
            Include::All => !def.exclude.contains(&key),
        };
        if !included {
            continue;
        }

        let (ty, spec) = match declared.get(key.as_str()) {
            Some(decl) => match &decl.spec {
                // Annotation plus assigned value: both used as declared.
                Some(spec) => (decl.ty.clone(), spec.clone()),
                // Bare annotation: required unless the type permits null.
                None => {
                    let mut spec = FieldSpec::default();
                    if decl.ty.is_nullable() {
                        spec.default = SpecDefault::Value(Value::Null);
                    }
                    (decl.ty.clone(), spec)
                }
            },
            None => {
                let field = model_field.expect("key without model field must be declared");
                if field.is_relation() {
                    resolve(registry, field, &def.name)
                } else {
                    classify(field, &def.name)
                }
            }
        };

        fields.insert(key, SchemaField { ty, spec });
    }

    // Alias map, computed exhaustively so alias lookups during projection
    // can treat a miss as a programming error.
    let mut aliases = HashMap::new();
    for (key, field) in &fields {
        let alias = field.spec.alias.clone().unwrap_or_else(|| key.clone());
        aliases.insert(alias, key.clone());
    }

    let field_names = effective_field_names(&def, model, &fields);

    let doc = def.doc.or_else(|| model.doc.clone());

    Ok(SchemaType::from_parts(SchemaTypeParts {
        name: def.name,
        doc,
        model: model_id,
        registry: registry.clone(),
        fields,
        aliases,
        field_names,
    }))
}

/// The persisted include set backing `get_field_names`.
fn effective_field_names(
    def: &SchemaDef,
    model: &crate::model::Model,
    fields: &IndexMap<String, SchemaField>,
) -> Vec<String> {
    if !def.exclude.is_empty() {
        return model
            .fields
            .iter()
            .map(|field| field.effective_name())
            .filter(|name| !def.exclude.contains(name))
            .collect();
    }
    match &def.include {
        Include::Only(names) => names.clone(),
        _ => fields.keys().cloned().collect(),
    }
}
