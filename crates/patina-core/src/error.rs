use crate::pos::BlockPos;

/// Alias for `Result<T, PatinaError>`.
pub type PatinaResult<T> = Result<T, PatinaError>;

/// Errors that can occur when building or loading a grid world.
#[derive(Debug, thiserror::Error)]
pub enum PatinaError {
    /// A placement targeted a cell that already holds something.
    #[error("cell {0} is already occupied")]
    Occupied(BlockPos),

    /// Two layout entries describe the same cell.
    #[error("cell {0} is listed more than once")]
    DuplicateCell(BlockPos),

    /// A door half has no matching partner above or below it.
    #[error("door half at {0} has no matching partner")]
    UnpairedDoor(BlockPos),

    /// A world layout could not be parsed.
    #[error("invalid world layout: {0}")]
    Json(#[from] serde_json::Error),
}
