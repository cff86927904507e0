use super::{instance, json, project, FieldSpec, SchemaInstance, ValueType};
use crate::model::{ModelId, Record, Registry};
use crate::Result;

use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

/// A synthesized schema type.
///
/// Produced once by [`super::SchemaDef::build`] and immutable afterwards;
/// shared behind an `Arc` so it can appear as a nested type inside other
/// schema types.
pub struct SchemaType {
    name: String,
    doc: Option<String>,
    model: ModelId,
    registry: Arc<Registry>,
    fields: IndexMap<String, SchemaField>,
    /// Public-facing alias (explicit alias or key name) back to key name.
    aliases: HashMap<String, String>,
    /// The persisted include decision, for `field_names`.
    field_names: Vec<String>,
    /// Memoized schema description, one slot per by-alias flag.
    schema_cache: [OnceLock<Value>; 2],
}

/// One field of a synthesized schema type.
#[derive(Debug, Clone)]
pub struct SchemaField {
    pub ty: ValueType,
    pub spec: FieldSpec,
}

pub(crate) struct SchemaTypeParts {
    pub(crate) name: String,
    pub(crate) doc: Option<String>,
    pub(crate) model: ModelId,
    pub(crate) registry: Arc<Registry>,
    pub(crate) fields: IndexMap<String, SchemaField>,
    pub(crate) aliases: HashMap<String, String>,
    pub(crate) field_names: Vec<String>,
}

impl SchemaType {
    pub(crate) fn from_parts(parts: SchemaTypeParts) -> Arc<Self> {
        Arc::new(SchemaType {
            name: parts.name,
            doc: parts.doc,
            model: parts.model,
            registry: parts.registry,
            fields: parts.fields,
            aliases: parts.aliases,
            field_names: parts.field_names,
            schema_cache: [OnceLock::new(), OnceLock::new()],
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn doc(&self) -> Option<&str> {
        self.doc.as_deref()
    }

    pub fn model(&self) -> ModelId {
        self.model
    }

    pub(crate) fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &SchemaField)> {
        self.fields.iter().map(|(key, field)| (key.as_str(), field))
    }

    pub fn field(&self, name: &str) -> Option<&SchemaField> {
        self.fields.get(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field names reflecting the effective include/exclude decision.
    pub fn field_names(&self) -> &[String] {
        &self.field_names
    }

    /// Maps a public-facing alias back to its canonical field key.
    pub fn resolve_alias(&self, alias: &str) -> Option<&str> {
        self.aliases.get(alias).map(String::as_str)
    }

    /// The public-facing alias of a field key.
    pub fn alias_for<'a>(&'a self, key: &'a str) -> &'a str {
        self.fields
            .get(key)
            .and_then(|field| field.spec.alias.as_deref())
            .unwrap_or(key)
    }

    /// The JSON-schema description of this type, memoized per flag.
    pub fn json_schema(&self, by_alias: bool) -> &Value {
        self.schema_cache[by_alias as usize].get_or_init(|| json::emit(self, by_alias))
    }

    /// Pretty-printed JSON-schema description.
    pub fn json_schema_string(&self, by_alias: bool) -> String {
        serde_json::to_string_pretty(self.json_schema(by_alias))
            .expect("JSON value serialization cannot fail")
    }

    /// Constructs a schema instance from a plain value mapping,
    /// validating types and constraints.
    pub fn instantiate(self: &Arc<Self>, data: Map<String, Value>) -> Result<SchemaInstance> {
        instance::instantiate(self, data)
    }

    /// Binds a single live source row into a schema instance.
    pub fn from_record(self: &Arc<Self>, record: &Arc<dyn Record>) -> Result<SchemaInstance> {
        project::project(self, record, true)
    }

    /// Projects a collection of rows; instance bindings are suppressed on
    /// this path to avoid staleness.
    pub fn from_records(
        self: &Arc<Self>,
        records: &[Arc<dyn Record>],
    ) -> Result<Vec<SchemaInstance>> {
        records
            .iter()
            .map(|record| project::project(self, record, false))
            .collect()
    }
}

impl fmt::Debug for SchemaType {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_struct("SchemaType")
            .field("name", &self.name)
            .field("model", &self.model)
            .field("fields", &self.fields.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}
