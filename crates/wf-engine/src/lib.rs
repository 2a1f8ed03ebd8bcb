//! Rule-resolution engine for Wayfarer adventures.
//!
//! Takes an immutable [`wf_core::Game`] and plays it: a [`Dispatcher`] applies
//! one verb at a time to a [`GameState`], resolving `use` against the use and
//! minigame rule tables and `give` against the gift rules. A [`Session`] adds
//! command parsing, `look`/`help`, end-of-game checks and typo hints on top.

/// Command parsing for player input.
pub mod command;
/// Engine configuration.
pub mod config;
/// The command dispatcher.
pub mod dispatcher;
/// Error types for the engine.
pub mod error;
/// Bounded in-game event log.
pub mod log;
/// Minigame contract, registry and the console lockpick.
pub mod minigame;
/// Mutable placement of objects, characters and opened exits.
pub mod overlay;
/// Selector resolution.
pub mod resolve;
/// Use, minigame and gift rule evaluation.
pub mod rules;
/// Play sessions and game status.
pub mod session;
/// Read-only views for presentation layers.
pub mod snapshot;
/// Runtime state of a playthrough.
pub mod state;
/// Typo suggestions.
pub mod suggest;

pub use command::{Command, parse_command};
pub use config::EngineConfig;
pub use dispatcher::{CommandResult, Dispatcher};
pub use error::{EngineError, EngineResult, MiniGameError};
pub use log::{EventLog, LogEntry};
pub use minigame::{LockpickConfig, LockpickGame, MiniGame, MiniGameOutcome, MiniGameRegistry};
pub use overlay::{Placement, WorldOverlay};
pub use rules::{InteractionRule, RuleMatch, Target, resolve_give, resolve_use};
pub use session::{GameStatus, Response, Session};
pub use snapshot::Snapshot;
pub use state::GameState;
