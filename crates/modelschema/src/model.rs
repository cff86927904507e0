mod field;
pub use field::{Field, FieldDefault, FieldTy};

mod record;
pub use record::{AttrValue, FileRef, Record};

mod registry;
pub use registry::{FieldDef, ModelDef, Registry, RegistryBuilder};

mod relation;
pub use relation::{Relation, RelationKind};

mod storage;
pub use storage::StorageType;

use std::fmt;

/// A source-model definition: the relational entity a schema is derived
/// from.
#[derive(Debug, Clone)]
pub struct Model {
    /// Uniquely identifies the model within the registry.
    pub id: ModelId,

    /// The model name.
    pub name: String,

    /// The model's own documentation, used as a schema description fallback.
    pub doc: Option<String>,

    /// Fields in introspection order.
    pub fields: Vec<Field>,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct ModelId(pub usize);

impl Model {
    /// Gets the id.
    pub fn id(&self) -> ModelId {
        self.id
    }

    pub fn field_by_name(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// The field flagged as the primary key.
    ///
    /// Every registered model has one; the registry builder rejects models
    /// without it.
    pub fn primary_key_field(&self) -> &Field {
        self.fields
            .iter()
            .find(|field| field.primary_key)
            .expect("registered model has no primary key field")
    }
}

impl From<&Model> for ModelId {
    fn from(value: &Model) -> Self {
        value.id
    }
}

impl fmt::Debug for ModelId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "ModelId({})", self.0)
    }
}
