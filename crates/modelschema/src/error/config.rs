/// Error when a schema definition's configuration is invalid.
///
/// Raised synchronously while the schema type is being synthesized, never
/// deferred to first use.
#[derive(Debug)]
pub(super) struct ConfigError {
    pub(super) message: String,
}

impl ConfigError {
    pub(super) fn new(message: String) -> Self {
        ConfigError { message }
    }
}

impl std::error::Error for ConfigError {}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid schema configuration: {}", self.message)
    }
}
