mod build;
mod classify;
mod json;
mod project;
mod resolve;

mod def;
pub use def::{Include, SchemaDef};

mod enum_ty;
pub use enum_ty::EnumTy;

mod instance;
pub use instance::SchemaInstance;

mod schema_type;
pub use schema_type::{SchemaField, SchemaType};

mod spec;
pub use spec::{DefaultFactory, FieldSpec, SpecDefault};

mod ty;
pub use ty::ValueType;
