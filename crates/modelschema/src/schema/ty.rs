use super::{EnumTy, SchemaType};

use std::fmt;
use std::sync::Arc;

/// A validation-layer value type.
#[derive(Clone)]
pub enum ValueType {
    Bool,
    Int,
    Float,
    /// Fixed-point decimal, carried as a JSON number.
    Decimal,
    Str,
    /// Byte string, carried as a string value.
    Bytes,
    Date,
    DateTime,
    Duration,
    Time,
    Uuid,
    IpAddr,
    /// Union of raw-json-string, object, or array.
    Json,
    /// A closed enumeration over raw stored values.
    Enum(Arc<EnumTy>),
    /// A sequence of the inner type.
    List(Box<ValueType>),
    /// A single-key string-to-integer mapping; `List(IdMap)` is the
    /// placeholder for an unresolved list of related primary keys.
    IdMap,
    /// The inner type or null.
    Nullable(Box<ValueType>),
    /// A nested synthesized schema type.
    Nested(Arc<SchemaType>),
}

impl ValueType {
    /// Widens the type to "type or null". Idempotent.
    pub fn optional(self) -> ValueType {
        match self {
            Self::Nullable(_) => self,
            other => Self::Nullable(Box::new(other)),
        }
    }

    pub fn is_nullable(&self) -> bool {
        matches!(self, Self::Nullable(_))
    }

    /// The type with any nullability wrapper stripped.
    pub fn base(&self) -> &ValueType {
        match self {
            Self::Nullable(inner) => inner.base(),
            other => other,
        }
    }

    pub fn as_nested(&self) -> Option<&Arc<SchemaType>> {
        match self.base() {
            Self::Nested(schema) => Some(schema),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&ValueType> {
        match self.base() {
            Self::List(inner) => Some(inner),
            _ => None,
        }
    }

    /// True for the `List(IdMap)` relation placeholder.
    pub fn is_id_list(&self) -> bool {
        matches!(self.as_list(), Some(Self::IdMap))
    }

    pub fn is_text(&self) -> bool {
        matches!(self.base(), Self::Str)
    }
}

// Enum and nested types compare by identity: two schemas wrapping the same
// source field must not be considered the same type.
impl PartialEq for ValueType {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Enum(a), Self::Enum(b)) => Arc::ptr_eq(a, b),
            (Self::Nested(a), Self::Nested(b)) => Arc::ptr_eq(a, b),
            (Self::List(a), Self::List(b)) => a == b,
            (Self::Nullable(a), Self::Nullable(b)) => a == b,
            (a, b) => core::mem::discriminant(a) == core::mem::discriminant(b),
        }
    }
}

impl fmt::Debug for ValueType {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Enum(e) => fmt.debug_tuple("Enum").field(&e.name).finish(),
            Self::List(inner) => fmt.debug_tuple("List").field(inner).finish(),
            Self::Nullable(inner) => fmt.debug_tuple("Nullable").field(inner).finish(),
            Self::Nested(schema) => fmt.debug_tuple("Nested").field(&schema.name()).finish(),
            Self::Bool => fmt.write_str("Bool"),
            Self::Int => fmt.write_str("Int"),
            Self::Float => fmt.write_str("Float"),
            Self::Decimal => fmt.write_str("Decimal"),
            Self::Str => fmt.write_str("Str"),
            Self::Bytes => fmt.write_str("Bytes"),
            Self::Date => fmt.write_str("Date"),
            Self::DateTime => fmt.write_str("DateTime"),
            Self::Duration => fmt.write_str("Duration"),
            Self::Time => fmt.write_str("Time"),
            Self::Uuid => fmt.write_str("Uuid"),
            Self::IpAddr => fmt.write_str("IpAddr"),
            Self::Json => fmt.write_str("Json"),
            Self::IdMap => fmt.write_str("IdMap"),
        }
    }
}
