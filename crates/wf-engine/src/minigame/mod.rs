//! Minigames: synchronous side games launched by minigame rules.

mod lockpick;

pub use lockpick::{LockpickConfig, LockpickGame};

use std::collections::HashMap;

use wf_core::{Game, ObjectId};

use crate::error::MiniGameError;
use crate::state::GameState;

/// How a minigame ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MiniGameOutcome {
    /// Whether the player won.
    pub success: bool,
    /// Message reported to the player.
    pub message: String,
    /// Objects awarded. When empty, the rule's own rewards apply.
    pub produced: Vec<ObjectId>,
}

impl MiniGameOutcome {
    /// A win without objects of its own.
    pub fn win(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            produced: Vec::new(),
        }
    }

    /// A loss.
    pub fn loss(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            produced: Vec::new(),
        }
    }

    /// Award an object instead of the rule's rewards.
    pub fn producing(mut self, object: impl Into<ObjectId>) -> Self {
        self.produced.push(object.into());
        self
    }
}

/// A side game the dispatcher hands control to.
///
/// `play` blocks until the game is won or lost. It gets read access to the
/// world and the runtime state; every state change it causes is applied by
/// the dispatcher afterwards.
pub trait MiniGame: Send {
    /// Identifier that minigame rules refer to.
    fn id(&self) -> &str;

    /// Run the game to completion.
    fn play(&mut self, game: &Game, state: &GameState) -> Result<MiniGameOutcome, MiniGameError>;
}

/// Minigames available to a dispatcher, keyed by id.
#[derive(Default)]
pub struct MiniGameRegistry {
    games: HashMap<String, Box<dyn MiniGame>>,
}

impl MiniGameRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a minigame under its own id, replacing any previous one.
    pub fn register(&mut self, game: impl MiniGame + 'static) {
        self.games.insert(game.id().to_string(), Box::new(game));
    }

    /// Builder-style [`register`](Self::register).
    pub fn with(mut self, game: impl MiniGame + 'static) -> Self {
        self.register(game);
        self
    }

    /// Look up a minigame.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut (dyn MiniGame + 'static)> {
        self.games.get_mut(id).map(|game| game.as_mut())
    }

    /// Whether a minigame is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.games.contains_key(id)
    }

    /// Registered ids, sorted.
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<_> = self.games.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}

impl std::fmt::Debug for MiniGameRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MiniGameRegistry")
            .field("games", &self.ids())
            .finish()
    }
}
