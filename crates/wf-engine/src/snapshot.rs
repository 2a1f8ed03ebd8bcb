//! Read-only view of a playthrough for presentation layers.

use serde::Serialize;
use wf_core::{CharacterId, ObjectId};

use crate::dispatcher::Dispatcher;
use crate::error::EngineResult;
use crate::log::LogEntry;
use crate::session::GameStatus;

/// Number of log lines a snapshot carries.
pub const RECENT_LOG_LINES: usize = 5;

/// An id with its display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Named {
    /// Entity id.
    pub id: String,
    /// Display name; the id when the world has no such entity.
    pub name: String,
}

/// The current location as shown to the player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocationView {
    /// Location id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Description.
    pub description: String,
    /// Image reference, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Everything a renderer needs after a command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    /// Game title.
    pub title: String,
    /// Where the player is.
    pub location: LocationView,
    /// Objects lying here.
    pub objects: Vec<Named>,
    /// Characters present.
    pub characters: Vec<Named>,
    /// Exit labels, built-in first.
    pub exits: Vec<String>,
    /// Carried objects.
    pub inventory: Vec<Named>,
    /// Turns taken so far.
    pub turns_taken: u32,
    /// Turn limit, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub turn_limit: Option<u32>,
    /// Whether the game is still running.
    pub status: GameStatus,
    /// The latest event log entries, oldest first.
    pub recent_log: Vec<LogEntry>,
}

impl Snapshot {
    /// Capture the dispatcher's current state.
    pub fn capture(dispatcher: &Dispatcher) -> EngineResult<Self> {
        let game = dispatcher.game();
        let state = dispatcher.state();
        let location = game.require_location(state.location.as_str())?;
        let object = |id: &ObjectId| Named {
            id: id.to_string(),
            name: game
                .object(id.as_str())
                .map_or_else(|| id.to_string(), |o| o.name.clone()),
        };
        let character = |id: &CharacterId| Named {
            id: id.to_string(),
            name: game
                .character(id.as_str())
                .map_or_else(|| id.to_string(), |c| c.name.clone()),
        };

        Ok(Self {
            title: game.title().to_string(),
            location: LocationView {
                id: location.id.to_string(),
                name: location.name.clone(),
                description: location.description.clone(),
                image: location.image.clone(),
            },
            objects: state
                .overlay
                .objects_in(location.id.as_str())
                .iter()
                .map(object)
                .collect(),
            characters: state
                .overlay
                .characters_in(location.id.as_str())
                .iter()
                .map(character)
                .collect(),
            exits: dispatcher
                .exits()?
                .into_iter()
                .map(|c| c.label.clone())
                .collect(),
            inventory: state.overlay.inventory().iter().map(object).collect(),
            turns_taken: state.turns_taken,
            turn_limit: game.turn_limit(),
            status: GameStatus::of(dispatcher),
            recent_log: state.log.recent(RECENT_LOG_LINES).cloned().collect(),
        })
    }

    /// The location description printed by `look`.
    pub fn describe(&self) -> String {
        let mut out = format!("== {} ==\n{}", self.location.name, self.location.description);
        if !self.exits.is_empty() {
            out.push_str(&format!("\nConnections: {}", self.exits.join(", ")));
        }
        if !self.objects.is_empty() {
            out.push_str(&format!("\nHere: {}", listing(&self.objects)));
        }
        if !self.characters.is_empty() {
            out.push_str(&format!("\nYou see: {}", listing(&self.characters)));
        }
        out
    }
}

fn listing(entries: &[Named]) -> String {
    entries
        .iter()
        .map(|e| format!("{}({})", e.name, e.id))
        .collect::<Vec<_>>()
        .join(", ")
}
