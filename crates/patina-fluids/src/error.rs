//! Error types for generator configuration.

/// Errors raised while registering, decoding, or encoding fluid generators.
#[derive(Debug, thiserror::Error)]
pub enum FluidError {
    /// A generator kind with this name is already registered.
    #[error("generator type '{0}' is already registered")]
    DuplicateType(String),

    /// A record names a generator kind the registry does not know.
    #[error("unknown fluid generator type: {0}")]
    UnknownType(String),

    /// A record is well-formed JSON but not a valid generator.
    #[error("invalid generator config: {0}")]
    InvalidConfig(String),

    /// The input could not be parsed as JSON.
    #[error("malformed generator JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience result type for generator configuration.
pub type FluidResult<T> = Result<T, FluidError>;
