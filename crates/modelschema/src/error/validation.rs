use serde::Serialize;

/// Error when a projected or supplied value mapping fails the schema's own
/// type and constraint checks.
#[derive(Debug)]
pub(super) struct ValidationError {
    pub(super) schema: String,
    pub(super) errors: Vec<FieldError>,
}

/// A single field-level validation failure.
///
/// Serializes to the conventional `{"loc": .., "msg": .., "type": ..}`
/// shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Path to the offending value, outermost field first.
    pub loc: Vec<String>,
    #[serde(rename = "msg")]
    pub message: String,
    #[serde(rename = "type")]
    pub kind: FieldErrorKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldErrorKind {
    /// A required field was absent from the value mapping.
    Missing,
    /// The value's type does not match the field's value type.
    Type,
    /// A string exceeded the field's max-length constraint.
    MaxLength,
    /// The value is not a member of the field's enumeration.
    EnumMember,
}

impl ValidationError {
    pub(super) fn new(schema: String, errors: Vec<FieldError>) -> Self {
        ValidationError { schema, errors }
    }

    pub(super) fn errors(&self) -> &[FieldError] {
        &self.errors
    }
}

impl FieldError {
    pub fn missing(loc: impl IntoIterator<Item = impl Into<String>>) -> Self {
        FieldError {
            loc: loc.into_iter().map(Into::into).collect(),
            message: "field required".to_string(),
            kind: FieldErrorKind::Missing,
        }
    }

    pub fn new(
        loc: impl IntoIterator<Item = impl Into<String>>,
        message: impl Into<String>,
        kind: FieldErrorKind,
    ) -> Self {
        FieldError {
            loc: loc.into_iter().map(Into::into).collect(),
            message: message.into(),
            kind,
        }
    }

    /// Prefixes the location path with an outer field name.
    pub(crate) fn nest(mut self, outer: &str) -> Self {
        self.loc.insert(0, outer.to_string());
        self
    }
}

impl std::error::Error for ValidationError {}

impl core::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let plural = if self.errors.len() == 1 { "" } else { "s" };
        write!(
            f,
            "{} validation error{} for {}",
            self.errors.len(),
            plural,
            self.schema
        )?;
        for err in &self.errors {
            write!(f, ": {}: {}", err.loc.join("."), err.message)?;
        }
        Ok(())
    }
}
