mod config;
mod unknown_field;
mod validation;

use config::ConfigError;
use std::sync::Arc;
use unknown_field::UnknownFieldError;
use validation::ValidationError;

pub use validation::{FieldError, FieldErrorKind};

/// Helper macro for early-returning an ad-hoc error.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::Error::from_args(format_args!($($arg)*)))
    };
}

/// Helper macro for creating an ad-hoc error.
#[macro_export]
macro_rules! err {
    ($($arg:tt)*) => {
        $crate::Error::from_args(format_args!($($arg)*))
    };
}

/// An error that can occur during schema synthesis, instantiation, or
/// projection.
#[derive(Clone)]
pub struct Error {
    inner: Arc<ErrorInner>,
}

#[derive(Debug)]
struct ErrorInner {
    kind: ErrorKind,
    cause: Option<Error>,
}

#[derive(Debug)]
enum ErrorKind {
    Anyhow(anyhow::Error),
    /// Invalid schema configuration, raised at definition time.
    Config(ConfigError),
    /// A value mapping failed the schema's own type/constraint checks.
    Validation(ValidationError),
    /// A field name was looked up that the schema does not define.
    UnknownField(UnknownFieldError),
}

impl Error {
    #[doc(hidden)]
    pub fn from_args(args: core::fmt::Arguments<'_>) -> Error {
        Error::from(ErrorKind::Anyhow(anyhow::Error::msg(args.to_string())))
    }

    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Error {
        Error::from(ErrorKind::Config(ConfigError::new(message.into())))
    }

    /// Creates a validation error from the accumulated per-field errors.
    pub fn validation(schema: impl Into<String>, errors: Vec<FieldError>) -> Error {
        Error::from(ErrorKind::Validation(ValidationError::new(
            schema.into(),
            errors,
        )))
    }

    /// Creates an unknown-field error.
    pub fn unknown_field(schema: impl Into<String>, field: impl Into<String>) -> Error {
        Error::from(ErrorKind::UnknownField(UnknownFieldError::new(
            schema.into(),
            field.into(),
        )))
    }

    pub fn is_config(&self) -> bool {
        matches!(self.kind(), ErrorKind::Config(_))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self.kind(), ErrorKind::Validation(_))
    }

    pub fn is_unknown_field(&self) -> bool {
        matches!(self.kind(), ErrorKind::UnknownField(_))
    }

    /// Returns the per-field errors if this is a validation error.
    pub fn field_errors(&self) -> Option<&[FieldError]> {
        match self.kind() {
            ErrorKind::Validation(err) => Some(err.errors()),
            _ => None,
        }
    }

    /// Adds context to this error.
    ///
    /// Context is displayed in reverse order: the most recently added context
    /// is shown first, ending with the root cause.
    pub fn context(self, consequent: Error) -> Error {
        let mut inner = Arc::try_unwrap(consequent.inner).unwrap_or_else(|arc| ErrorInner {
            kind: ErrorKind::Anyhow(anyhow::Error::msg(arc.kind.to_string())),
            cause: None,
        });
        assert!(
            inner.cause.is_none(),
            "consequent error must not already have a cause"
        );
        inner.cause = Some(self);
        Error {
            inner: Arc::new(inner),
        }
    }

    fn chain(&self) -> impl Iterator<Item = &Error> {
        let mut err = self;
        core::iter::once(err).chain(core::iter::from_fn(move || {
            err = err.inner.cause.as_ref()?;
            Some(err)
        }))
    }

    fn kind(&self) -> &ErrorKind {
        &self.inner.kind
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self.kind() {
            ErrorKind::Anyhow(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let mut it = self.chain().peekable();
        while let Some(err) = it.next() {
            core::fmt::Display::fmt(err.kind(), f)?;
            if it.peek().is_some() {
                f.write_str(": ")?;
            }
        }
        Ok(())
    }
}

impl core::fmt::Debug for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if !f.alternate() {
            core::fmt::Display::fmt(self, f)
        } else {
            f.debug_struct("Error")
                .field("kind", &self.inner.kind)
                .field("cause", &self.inner.cause)
                .finish()
        }
    }
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self {
            ErrorKind::Anyhow(err) => core::fmt::Display::fmt(err, f),
            ErrorKind::Config(err) => core::fmt::Display::fmt(err, f),
            ErrorKind::Validation(err) => core::fmt::Display::fmt(err, f),
            ErrorKind::UnknownField(err) => core::fmt::Display::fmt(err, f),
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error {
            inner: Arc::new(ErrorInner { kind, cause: None }),
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Error {
        Error::from(ErrorKind::Anyhow(err))
    }
}
