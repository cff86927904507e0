use std::fmt;

/// Semantic storage-type tag of a source-model field.
///
/// `Custom` carries an explicit base chain so permissive classification can
/// fall back to an inherited tag without runtime type introspection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageType {
    // Integer family
    Auto,
    BigAuto,
    Integer,
    SmallInteger,
    BigInteger,
    PositiveInteger,
    PositiveSmallInteger,

    // Text family
    Char,
    Text,
    Email,
    Url,
    Slug,
    FilePath,
    File,
    Image,

    // Exact scalar mappings
    Binary,
    Boolean,
    Date,
    DateTime,
    Duration,
    Time,
    Decimal,
    Float,
    Uuid,
    IpAddress,
    Json,

    /// An array of a base storage type.
    Array(Box<StorageType>),

    /// A custom field subclass with an optional inherited tag.
    Custom {
        name: String,
        base: Option<Box<StorageType>>,
    },
}

impl StorageType {
    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            Self::Auto
                | Self::BigAuto
                | Self::Integer
                | Self::SmallInteger
                | Self::BigInteger
                | Self::PositiveInteger
                | Self::PositiveSmallInteger
        )
    }

    pub fn is_text(&self) -> bool {
        matches!(
            self,
            Self::Char
                | Self::Text
                | Self::Email
                | Self::Url
                | Self::Slug
                | Self::FilePath
                | Self::File
                | Self::Image
        )
    }

    /// The base tag a custom type inherits from, if any.
    pub fn base(&self) -> Option<&StorageType> {
        match self {
            Self::Custom { base, .. } => base.as_deref(),
            _ => None,
        }
    }
}

impl fmt::Display for StorageType {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Array(base) => write!(fmt, "Array<{base}>"),
            Self::Custom { name, .. } => fmt.write_str(name),
            other => write!(fmt, "{other:?}"),
        }
    }
}
