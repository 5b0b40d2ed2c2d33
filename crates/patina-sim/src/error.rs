use patina_core::PatinaError;

/// Convenience result type for simulation operations.
pub type SimResult<T> = Result<T, SimError>;

/// Errors raised while building or running a simulation.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// The scenario's world layout is invalid.
    #[error(transparent)]
    World(#[from] PatinaError),

    /// The scenario file is not valid JSON for a scenario.
    #[error("invalid scenario: {0}")]
    Json(#[from] serde_json::Error),
}
