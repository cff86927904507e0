/// Error when a field name is looked up that the schema does not define.
///
/// The alias map is computed exhaustively at synthesis time, so hitting this
/// is a programming error rather than bad input.
#[derive(Debug)]
pub(super) struct UnknownFieldError {
    pub(super) schema: String,
    pub(super) field: String,
}

impl UnknownFieldError {
    pub(super) fn new(schema: String, field: String) -> Self {
        UnknownFieldError { schema, field }
    }
}

impl std::error::Error for UnknownFieldError {}

impl core::fmt::Display for UnknownFieldError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "unknown field `{}` on schema `{}`",
            self.field, self.schema
        )
    }
}
