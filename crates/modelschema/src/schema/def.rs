use super::{build, FieldSpec, SchemaType, ValueType};
use crate::model::{ModelId, Registry};
use crate::Result;

use std::sync::Arc;

/// A declarative schema definition: the phase-one half of synthesis.
///
/// Plain data collecting the source model, include/exclude rules, and any
/// explicit field declarations or overrides. [`SchemaDef::build`] runs the
/// synthesizer and yields the immutable [`SchemaType`].
pub struct SchemaDef {
    pub(crate) name: String,
    pub(crate) doc: Option<String>,
    pub(crate) model: Option<ModelId>,
    pub(crate) include: Include,
    pub(crate) exclude: Vec<String>,
    pub(crate) declared: Vec<DeclaredField>,
}

/// Include rule for derived fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Include {
    /// Declared fields plus every source-model field.
    #[default]
    All,
    /// Only the listed field names.
    Only(Vec<String>),
    /// Only the explicitly declared fields, resolved once and frozen.
    AnnotationsOnly,
}

/// An explicit field declaration in the schema definition body.
pub(crate) struct DeclaredField {
    pub(crate) name: String,
    pub(crate) ty: ValueType,
    /// Present when the declaration also assigns a value/field-spec, absent
    /// for a bare annotation.
    pub(crate) spec: Option<FieldSpec>,
}

impl SchemaDef {
    pub fn new(name: impl Into<String>) -> Self {
        SchemaDef {
            name: name.into(),
            doc: None,
            model: None,
            include: Include::default(),
            exclude: vec![],
            declared: vec![],
        }
    }

    /// Names the source model to derive fields from.
    pub fn model(mut self, model: impl Into<ModelId>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn include(mut self, names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.include = Include::Only(names.into_iter().map(Into::into).collect());
        self
    }

    /// Restricts the field set to the explicitly declared fields.
    pub fn annotations_only(mut self) -> Self {
        self.include = Include::AnnotationsOnly;
        self
    }

    pub fn exclude(mut self, names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.exclude = names.into_iter().map(Into::into).collect();
        self
    }

    /// Declares a field with a bare annotation: required unless the type
    /// already permits null.
    pub fn field(mut self, name: impl Into<String>, ty: ValueType) -> Self {
        self.declared.push(DeclaredField {
            name: name.into(),
            ty,
            spec: None,
        });
        self
    }

    /// Declares a field with both an annotation and an explicit field spec.
    pub fn field_with(
        mut self,
        name: impl Into<String>,
        ty: ValueType,
        spec: FieldSpec,
    ) -> Self {
        self.declared.push(DeclaredField {
            name: name.into(),
            ty,
            spec: Some(spec),
        });
        self
    }

    /// Runs the synthesizer, producing the final schema type.
    ///
    /// Configuration errors (invalid model reference, include and exclude
    /// both set) surface here, at definition time.
    pub fn build(self, registry: &Arc<Registry>) -> Result<Arc<SchemaType>> {
        build::synthesize(self, registry)
    }
}
