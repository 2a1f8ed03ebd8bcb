//! Core types for Wayfarer: the immutable world model an adventure is played in.
//!
//! A [`Game`] holds locations, objects, characters, and the three ordered rule
//! tables (use, give, minigame). It never changes once built; everything that
//! moves during play lives in the engine's runtime state. Games can be built
//! programmatically, loaded from JSON, or taken from the bundled sample.

/// Locations, objects, characters, and connections.
pub mod entity;
/// Error types used throughout the crate.
pub mod error;
/// The world definition that owns all entities and rule tables.
pub mod game;
/// Typed string identifiers.
pub mod id;
/// Reading world files from disk.
pub mod loader;
/// Interaction rules: use, give, and minigame triggers.
pub mod rule;
/// The bundled "Crypt Escape" world.
pub mod sample;
/// Match predicates over objects.
pub mod selector;
/// Reference checking for loaded worlds.
pub mod validate;

pub use entity::{Connection, GameCharacter, GameObject, Location, Want};
pub use error::{CoreError, CoreResult};
pub use game::Game;
pub use id::{CharacterId, LocationId, ObjectId};
pub use loader::{load_game, parse_game};
pub use rule::{GiveRule, MiniGameRule, PathUnlock, UseRule};
pub use sample::{SAMPLE_LOCKPICK_ID, sample_game};
pub use selector::Selector;
pub use validate::{ValidationIssue, validate};
