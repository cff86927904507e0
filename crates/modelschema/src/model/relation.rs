use super::{Model, ModelId, Registry};

/// A relation-typed field's cardinality, direction, and target.
#[derive(Debug, Clone)]
pub struct Relation {
    pub kind: RelationKind,

    /// The related model. For `GenericForeign` this is the owning model
    /// itself, whose primary key types the placeholder.
    pub target: ModelId,

    /// Explicit reverse-accessor name, when one was declared.
    pub accessor: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationKind {
    /// Forward foreign key.
    ManyToOne,
    /// Forward one-to-one.
    OneToOne,
    /// Generated reverse side of a one-to-one.
    OneToOneReverse,
    /// Generated reverse side of a foreign key.
    OneToMany,
    /// Forward many-to-many.
    ManyToMany,
    /// Generated reverse side of a many-to-many.
    ManyToManyReverse,
    /// Concrete generic (polymorphic) relation, always plural.
    GenericRelation,
    /// Forward generic (polymorphic) pointer with no fixed target model.
    GenericForeign,
}

impl Relation {
    pub fn target<'a>(&self, registry: &'a Registry) -> &'a Model {
        registry.model(self.target)
    }

    pub fn is_plural(&self) -> bool {
        self.kind.is_plural()
    }

    pub fn is_reverse(&self) -> bool {
        self.kind.is_reverse()
    }

    /// The name the relation is exposed under.
    ///
    /// Plural reverse relations have no stable field name of their own and
    /// expose the declared accessor, or `<name>_set` when none was declared.
    pub(crate) fn effective_name(&self, field_name: &str) -> String {
        if self.kind.is_reverse() && !matches!(self.kind, RelationKind::OneToOneReverse) {
            self.accessor
                .clone()
                .unwrap_or_else(|| format!("{field_name}_set"))
        } else {
            field_name.to_string()
        }
    }
}

impl RelationKind {
    pub fn is_plural(self) -> bool {
        matches!(
            self,
            Self::OneToMany | Self::ManyToMany | Self::ManyToManyReverse | Self::GenericRelation
        )
    }

    /// True for generated (non-concrete) reverse accessors.
    pub fn is_reverse(self) -> bool {
        matches!(
            self,
            Self::OneToOneReverse | Self::OneToMany | Self::ManyToManyReverse
        )
    }

    /// True when the relation points at a concrete related model whose
    /// primary key can type a placeholder.
    pub fn has_target_model(self) -> bool {
        !matches!(self, Self::GenericForeign)
    }
}
