use super::{Field, FieldDefault, FieldTy, Model, ModelId, Relation, RelationKind, StorageType};
use crate::{Error, Result};

use indexmap::IndexMap;
use serde_json::Value;
use std::sync::Arc;

/// An immutable set of source-model definitions.
///
/// Built once via [`Registry::builder`], then shared behind an `Arc`. All
/// schema synthesis and projection resolves models through it.
#[derive(Debug, Default)]
pub struct Registry {
    models: IndexMap<ModelId, Model>,
}

impl Registry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Get a model by ID.
    #[track_caller]
    pub fn model(&self, id: impl Into<ModelId>) -> &Model {
        self.models.get(&id.into()).expect("invalid model ID")
    }

    pub fn get_model(&self, id: impl Into<ModelId>) -> Option<&Model> {
        self.models.get(&id.into())
    }

    pub fn model_by_name(&self, name: &str) -> Option<&Model> {
        self.models.values().find(|model| model.name == name)
    }

    pub fn models(&self) -> impl Iterator<Item = &Model> {
        self.models.values()
    }
}

/// Collects model definitions, then resolves relation targets and validates
/// the set as a whole.
#[derive(Default)]
pub struct RegistryBuilder {
    models: Vec<ModelDef>,
}

impl RegistryBuilder {
    pub fn model(mut self, model: ModelDef) -> Self {
        self.models.push(model);
        self
    }

    pub fn build(self) -> Result<Arc<Registry>> {
        let mut ids = IndexMap::new();
        for (index, def) in self.models.iter().enumerate() {
            let id = ModelId(index);
            if ids.insert(def.name.clone(), id).is_some() {
                return Err(Error::config(format!(
                    "model `{}` is registered more than once",
                    def.name
                )));
            }
        }

        let mut models = IndexMap::new();
        for (index, def) in self.models.into_iter().enumerate() {
            let id = ModelId(index);
            let model = def.resolve(id, &ids)?;
            models.insert(id, model);
        }

        let registry = Registry { models };

        // Relation targets must expose a primary key so placeholders can be
        // typed.
        for model in registry.models() {
            if !model.fields.iter().any(|field| field.primary_key) {
                return Err(Error::config(format!(
                    "model `{}` has no primary key field",
                    model.name
                )));
            }
        }

        Ok(Arc::new(registry))
    }
}

/// A model under construction.
pub struct ModelDef {
    name: String,
    doc: Option<String>,
    fields: Vec<FieldDef>,
}

impl ModelDef {
    pub fn new(name: impl Into<String>) -> Self {
        ModelDef {
            name: name.into(),
            doc: None,
            fields: vec![],
        }
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn field(mut self, field: FieldDef) -> Self {
        self.fields.push(field);
        self
    }

    fn resolve(self, id: ModelId, ids: &IndexMap<String, ModelId>) -> Result<Model> {
        let mut fields = Vec::with_capacity(self.fields.len());
        for def in self.fields {
            if fields.iter().any(|field: &Field| field.name == def.name) {
                return Err(Error::config(format!(
                    "model `{}` declares field `{}` more than once",
                    self.name, def.name
                )));
            }
            fields.push(def.resolve(id, &self.name, ids)?);
        }

        Ok(Model {
            id,
            name: self.name,
            doc: self.doc,
            fields,
        })
    }
}

enum FieldDefTy {
    Primitive(StorageType),
    Relation {
        kind: RelationKind,
        target: Option<String>,
    },
}

/// A field under construction.
pub struct FieldDef {
    name: String,
    ty: FieldDefTy,
    nullable: bool,
    blank: bool,
    max_length: Option<usize>,
    default: Option<FieldDefault>,
    label: Option<String>,
    help_text: Option<String>,
    choices: Vec<(Value, String)>,
    primary_key: bool,
    accessor: Option<String>,
}

impl FieldDef {
    pub fn new(name: impl Into<String>, storage: StorageType) -> Self {
        Self::with_ty(name, FieldDefTy::Primitive(storage))
    }

    /// Forward foreign key.
    pub fn many_to_one(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self::relation(name, RelationKind::ManyToOne, Some(target.into()))
    }

    /// Forward one-to-one.
    pub fn one_to_one(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self::relation(name, RelationKind::OneToOne, Some(target.into()))
    }

    /// Generated reverse side of a one-to-one declared on `target`.
    pub fn one_to_one_reverse(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self::relation(name, RelationKind::OneToOneReverse, Some(target.into()))
    }

    /// Generated reverse side of a foreign key declared on `target`.
    pub fn one_to_many(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self::relation(name, RelationKind::OneToMany, Some(target.into()))
    }

    /// Forward many-to-many.
    pub fn many_to_many(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self::relation(name, RelationKind::ManyToMany, Some(target.into()))
    }

    /// Generated reverse side of a many-to-many declared on `target`.
    pub fn many_to_many_reverse(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self::relation(name, RelationKind::ManyToManyReverse, Some(target.into()))
    }

    /// Concrete generic relation (content-type style), always plural.
    pub fn generic_relation(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self::relation(name, RelationKind::GenericRelation, Some(target.into()))
    }

    /// Forward generic pointer with no fixed target model; the owning
    /// model's own primary key types the placeholder.
    pub fn generic_foreign(name: impl Into<String>) -> Self {
        Self::relation(name, RelationKind::GenericForeign, None)
    }

    fn relation(name: impl Into<String>, kind: RelationKind, target: Option<String>) -> Self {
        Self::with_ty(name, FieldDefTy::Relation { kind, target })
    }

    fn with_ty(name: impl Into<String>, ty: FieldDefTy) -> Self {
        FieldDef {
            name: name.into(),
            ty,
            nullable: false,
            blank: false,
            max_length: None,
            default: None,
            label: None,
            help_text: None,
            choices: vec![],
            primary_key: false,
            accessor: None,
        }
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn blank(mut self) -> Self {
        self.blank = true;
        self
    }

    pub fn max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(FieldDefault::Value(value.into()));
        self
    }

    pub fn default_factory(
        mut self,
        factory: impl Fn() -> Value + Send + Sync + 'static,
    ) -> Self {
        self.default = Some(FieldDefault::Factory(Arc::new(factory)));
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn help_text(mut self, help_text: impl Into<String>) -> Self {
        self.help_text = Some(help_text.into());
        self
    }

    /// Ordered (raw stored value, display label) pairs.
    pub fn choices(
        mut self,
        choices: impl IntoIterator<Item = (Value, impl Into<String>)>,
    ) -> Self {
        self.choices = choices
            .into_iter()
            .map(|(value, label)| (value, label.into()))
            .collect();
        self
    }

    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    /// Reverse-accessor name for generated reverse relations.
    pub fn accessor(mut self, accessor: impl Into<String>) -> Self {
        self.accessor = Some(accessor.into());
        self
    }

    fn resolve(self, owner: ModelId, model_name: &str, ids: &IndexMap<String, ModelId>) -> Result<Field> {
        let ty = match self.ty {
            FieldDefTy::Primitive(storage) => FieldTy::Primitive(storage),
            FieldDefTy::Relation { kind, target } => {
                let target = match target {
                    Some(name) => *ids.get(&name).ok_or_else(|| {
                        Error::config(format!(
                            "field `{}::{}` references unregistered model `{}`",
                            model_name, self.name, name
                        ))
                    })?,
                    None => owner,
                };
                FieldTy::Relation(Relation {
                    kind,
                    target,
                    accessor: self.accessor,
                })
            }
        };

        Ok(Field {
            name: self.name,
            ty,
            nullable: self.nullable,
            blank: self.blank,
            max_length: self.max_length,
            default: self.default,
            label: self.label,
            help_text: self.help_text,
            choices: self.choices,
            primary_key: self.primary_key,
        })
    }
}
