//! Per-playthrough runtime state.

use std::collections::HashMap;

use wf_core::{CharacterId, Game, LocationId};

use crate::config::EngineConfig;
use crate::log::EventLog;
use crate::overlay::WorldOverlay;

/// Everything that changes while a game is played.
///
/// Mutated only by the [`Dispatcher`](crate::Dispatcher); minigames and the
/// presentation layer get shared references.
#[derive(Debug, Clone)]
pub struct GameState {
    /// Where the player is.
    pub location: LocationId,
    /// Commands dispatched so far.
    pub turns_taken: u32,
    /// Next phrase index per character.
    pub talk_cursors: HashMap<CharacterId, usize>,
    /// Bounded in-game event log.
    pub log: EventLog,
    /// Object placement, presence and opened exits.
    pub overlay: WorldOverlay,
}

impl GameState {
    /// Fresh state at the start location.
    pub fn new(game: &Game, config: &EngineConfig) -> Self {
        Self {
            location: game.start_location().clone(),
            turns_taken: 0,
            talk_cursors: HashMap::new(),
            log: EventLog::with_capacity(config.log_capacity),
            overlay: WorldOverlay::from_game(game),
        }
    }

    /// Whether the player carries the object.
    pub fn has_item(&self, object: &str) -> bool {
        self.overlay.is_held(object)
    }

    /// Take the next phrase index for a character, advancing its cursor.
    pub fn next_phrase(&mut self, character: &CharacterId, phrase_count: usize) -> usize {
        let cursor = self.talk_cursors.entry(character.clone()).or_insert(0);
        let index = *cursor % phrase_count.max(1);
        *cursor = index + 1;
        index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wf_core::{GameObject, Location};

    #[test]
    fn starts_at_start_location() {
        let game = Game::new("T", "loc_a")
            .with_location(Location::new("loc_a", "A").with_object("obj_x"))
            .with_object(GameObject::new("obj_x", "X"));
        let state = GameState::new(&game, &EngineConfig::default().with_log_capacity(3));
        assert_eq!(state.location, "loc_a");
        assert_eq!(state.turns_taken, 0);
        assert_eq!(state.log.capacity(), 3);
        assert!(!state.has_item("obj_x"));
        assert!(state.overlay.is_in_location("obj_x", "loc_a"));
    }

    #[test]
    fn phrase_cursors_are_per_character() {
        let game = Game::new("T", "loc_a").with_location(Location::new("loc_a", "A"));
        let mut state = GameState::new(&game, &EngineConfig::default());
        let a = CharacterId::from("char_a");
        let b = CharacterId::from("char_b");
        assert_eq!(state.next_phrase(&a, 2), 0);
        assert_eq!(state.next_phrase(&a, 2), 1);
        assert_eq!(state.next_phrase(&b, 2), 0);
        assert_eq!(state.next_phrase(&a, 2), 0);
    }
}
