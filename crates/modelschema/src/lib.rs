#[macro_use]
mod error;
pub use error::{Error, FieldError, FieldErrorKind};

pub mod model;
pub use model::{FieldDef, ModelDef, ModelId, Record, Registry, StorageType};

pub mod schema;
pub use schema::{FieldSpec, SchemaDef, SchemaInstance, SchemaType, ValueType};

/// A Result type alias that uses this crate's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;
