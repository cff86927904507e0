use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// A zero-argument default factory, re-invoked per instantiation.
pub type DefaultFactory = Arc<dyn Fn() -> Value + Send + Sync>;

/// Metadata attached to a synthesized schema field.
#[derive(Clone, Default)]
pub struct FieldSpec {
    pub default: SpecDefault,
    pub default_factory: Option<DefaultFactory>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub max_length: Option<usize>,
    /// Public-facing alias; may be a `__`-separated traversal path.
    pub alias: Option<String>,
}

/// Field default: the `Required` sentinel means "no default".
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SpecDefault {
    #[default]
    Required,
    Value(Value),
}

impl FieldSpec {
    pub fn required() -> Self {
        FieldSpec::default()
    }

    pub fn with_default(value: impl Into<Value>) -> Self {
        FieldSpec {
            default: SpecDefault::Value(value.into()),
            ..Default::default()
        }
    }

    pub fn default_factory(mut self, factory: impl Fn() -> Value + Send + Sync + 'static) -> Self {
        self.default_factory = Some(Arc::new(factory));
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// True when the field has neither a default nor a factory.
    pub fn is_required(&self) -> bool {
        matches!(self.default, SpecDefault::Required) && self.default_factory.is_none()
    }

    /// Resolves the default to a concrete value, if one exists.
    /// Factories are invoked anew on every call.
    pub fn resolve_default(&self) -> Option<Value> {
        if let Some(factory) = &self.default_factory {
            return Some(factory());
        }
        match &self.default {
            SpecDefault::Value(value) => Some(value.clone()),
            SpecDefault::Required => None,
        }
    }
}

impl fmt::Debug for FieldSpec {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_struct("FieldSpec")
            .field("default", &self.default)
            .field(
                "default_factory",
                &self.default_factory.as_ref().map(|_| ".."),
            )
            .field("title", &self.title)
            .field("description", &self.description)
            .field("max_length", &self.max_length)
            .field("alias", &self.alias)
            .finish()
    }
}
