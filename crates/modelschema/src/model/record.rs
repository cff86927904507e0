use super::ModelId;

use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// A live source-model row.
///
/// The host storage layer implements this for whatever its rows look like;
/// the projector only ever reads attributes through it. Reading a `Many`
/// attribute may execute a query on the host side, so each access is treated
/// as a potentially blocking call.
pub trait Record {
    /// The model this row belongs to.
    fn model(&self) -> ModelId;

    /// Fetches an attribute by field name.
    fn attr(&self, name: &str) -> AttrValue;
}

/// A raw attribute value as fetched from a record.
#[derive(Clone)]
pub enum AttrValue {
    /// The record has no such attribute.
    Missing,
    /// The attribute exists but is unset.
    Null,
    /// A plain scalar or JSON-compatible value.
    Scalar(Value),
    /// A single related row.
    Record(Arc<dyn Record>),
    /// A collection of related rows (the collection-manager stand-in).
    Many(Vec<Arc<dyn Record>>),
    /// A file-like attachment wrapper carrying its stored name.
    File(FileRef),
}

/// The stored name/path of a file-like attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRef {
    pub name: String,
}

impl FileRef {
    pub fn new(name: impl Into<String>) -> Self {
        FileRef { name: name.into() }
    }
}

impl AttrValue {
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    pub fn as_record(&self) -> Option<&Arc<dyn Record>> {
        match self {
            Self::Record(record) => Some(record),
            _ => None,
        }
    }
}

impl From<Value> for AttrValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            other => Self::Scalar(other),
        }
    }
}

impl fmt::Debug for AttrValue {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => fmt.write_str("Missing"),
            Self::Null => fmt.write_str("Null"),
            Self::Scalar(value) => fmt.debug_tuple("Scalar").field(value).finish(),
            Self::Record(record) => fmt.debug_tuple("Record").field(&record.model()).finish(),
            Self::Many(records) => fmt.debug_tuple("Many").field(&records.len()).finish(),
            Self::File(file) => fmt.debug_tuple("File").field(&file.name).finish(),
        }
    }
}
