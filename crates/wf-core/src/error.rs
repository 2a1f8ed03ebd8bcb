use std::path::PathBuf;

use crate::id::{CharacterId, LocationId, ObjectId};
use crate::validate::ValidationIssue;

/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur when loading or inspecting a world.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The world file could not be read.
    #[error("cannot read {}: {source}", path.display())]
    Io {
        /// The file that failed to load.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The world file is not valid JSON for the world schema.
    #[error("malformed world file: {0}")]
    Parse(#[from] serde_json::Error),

    /// The world references ids it does not define.
    #[error("world failed validation with {} issue(s)", .0.len())]
    Invalid(Vec<ValidationIssue>),

    /// The requested location id does not exist in the world.
    #[error("location not found: {0}")]
    UnknownLocation(LocationId),

    /// The requested object id does not exist in the world.
    #[error("object not found: {0}")]
    UnknownObject(ObjectId),

    /// The requested character id does not exist in the world.
    #[error("character not found: {0}")]
    UnknownCharacter(CharacterId),
}
