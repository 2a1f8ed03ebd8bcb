//! Error types for the engine.

use thiserror::Error;
use wf_core::CoreError;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Faults in world data discovered while dispatching a command.
///
/// These never cross the dispatcher boundary as `Err`; they are turned into a
/// failure [`CommandResult`](crate::CommandResult) prefixed with `Error:`.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A lookup in the world definition failed.
    #[error(transparent)]
    World(#[from] CoreError),
}

/// Errors raised by a minigame implementation.
///
/// The dispatcher reports these as a failed `use` (`Mini-game error: ...`).
#[derive(Debug, Error)]
pub enum MiniGameError {
    /// Reading input or writing output failed.
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// The minigame gave up for its own reasons.
    #[error("{0}")]
    Aborted(String),
}
