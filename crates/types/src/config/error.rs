/// Error type for [`crate::config`] module. Captures errors related to loading
/// configuration from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Error loading from environment variable
    #[error("missing or non-unicode environment variable: {0}")]
    Var(String),
    /// Error parsing environment variable
    #[error("failed to parse environment variable: {0}")]
    Parse(#[from] std::num::ParseIntError),
    /// Error parsing an address from environment variable
    #[error("failed to parse address: {0}")]
    Address(#[from] crate::CodecError),
    /// Unknown chain name
    #[error(transparent)]
    Chain(#[from] lop_options_constants::ParseChainError),
    /// A value is out of range
    #[error("{key} is out of range: {reason}")]
    OutOfRange {
        /// The variable.
        key: &'static str,
        /// Why the value is rejected.
        reason: &'static str,
    },
}

impl ConfigError {
    /// Missing or non-unicode env var.
    pub fn missing(s: &str) -> Self {
        ConfigError::Var(s.to_string())
    }
}
