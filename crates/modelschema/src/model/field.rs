use super::{Relation, StorageType};

use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// One declared attribute of a source model.
#[derive(Clone)]
pub struct Field {
    /// The field name as declared on the model.
    pub name: String,

    /// Primitive storage type or relation.
    pub ty: FieldTy,

    /// True if the stored value may be null.
    pub nullable: bool,

    /// True if an empty value is allowed at the form/validation layer.
    pub blank: bool,

    /// Maximum length for text-like types.
    pub max_length: Option<usize>,

    /// Declared default: a literal or a zero-argument factory.
    pub default: Option<FieldDefault>,

    /// Human-readable label.
    pub label: Option<String>,

    /// Help text, used as the derived field description.
    pub help_text: Option<String>,

    /// Enumerated choices as ordered (raw stored value, display label)
    /// pairs. Empty when the field is unrestricted.
    pub choices: Vec<(Value, String)>,

    /// True if the field is the model's primary key.
    pub primary_key: bool,
}

#[derive(Clone)]
pub enum FieldTy {
    Primitive(StorageType),
    Relation(Relation),
}

/// A declared field default.
#[derive(Clone)]
pub enum FieldDefault {
    Value(Value),
    Factory(Arc<dyn Fn() -> Value + Send + Sync>),
}

impl Field {
    pub fn is_relation(&self) -> bool {
        matches!(self.ty, FieldTy::Relation(_))
    }

    pub fn as_relation(&self) -> Option<&Relation> {
        match &self.ty {
            FieldTy::Relation(relation) => Some(relation),
            _ => None,
        }
    }

    pub fn storage(&self) -> Option<&StorageType> {
        match &self.ty {
            FieldTy::Primitive(storage) => Some(storage),
            _ => None,
        }
    }

    #[track_caller]
    pub fn expect_relation(&self) -> &Relation {
        match &self.ty {
            FieldTy::Relation(relation) => relation,
            _ => panic!("expected relation field, but was {:?}", self.ty),
        }
    }

    pub fn has_choices(&self) -> bool {
        !self.choices.is_empty()
    }

    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }

    /// The name the field is exposed under when derived into a schema.
    ///
    /// Plural reverse relations without an explicit accessor use the
    /// `<name>_set` convention; everything else uses the declared name.
    pub fn effective_name(&self) -> String {
        match &self.ty {
            FieldTy::Relation(relation) => relation.effective_name(&self.name),
            FieldTy::Primitive(_) => self.name.clone(),
        }
    }
}

impl fmt::Debug for Field {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_struct("Field")
            .field("name", &self.name)
            .field("ty", &self.ty)
            .field("nullable", &self.nullable)
            .field("primary_key", &self.primary_key)
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for FieldTy {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(storage) => storage.fmt(fmt),
            Self::Relation(relation) => relation.fmt(fmt),
        }
    }
}

impl FieldDefault {
    /// Resolves the default to a concrete value, invoking a factory.
    pub fn resolve(&self) -> Value {
        match self {
            Self::Value(value) => value.clone(),
            Self::Factory(factory) => factory(),
        }
    }
}

impl fmt::Debug for FieldDefault {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => fmt.debug_tuple("Value").field(value).finish(),
            Self::Factory(_) => fmt.write_str("Factory(..)"),
        }
    }
}
