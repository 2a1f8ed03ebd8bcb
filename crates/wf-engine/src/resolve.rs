//! Selector resolution against the world table and the visible pool.

use tracing::debug;
use wf_core::{Game, GameObject, Selector};

use crate::overlay::Placement;
use crate::state::GameState;

/// Objects an attribute selector may pick from: everything lying in the
/// current location in location order, then the inventory in pickup order.
///
/// Ids missing from the world table are skipped.
pub fn candidate_pool<'g>(game: &'g Game, state: &GameState) -> Vec<&'g GameObject> {
    state
        .overlay
        .objects_in(state.location.as_str())
        .iter()
        .chain(state.overlay.inventory())
        .filter_map(|id| game.object(id.as_str()))
        .collect()
}

/// Resolve what the player typed against what a rule requires.
///
/// An id operand is looked up in the world table directly; whether the object
/// is visible or held is not checked. An attribute operand picks the first
/// pool object that carries the tag and also satisfies the rule operand.
pub fn resolve_operand<'g>(
    game: &'g Game,
    state: &GameState,
    typed: &Selector,
    required: &Selector,
) -> Option<&'g GameObject> {
    match typed {
        Selector::Id(id) => game.object(id).filter(|object| required.matches(object)),
        Selector::Attribute(tag) => {
            let found = candidate_pool(game, state)
                .into_iter()
                .find(|object| object.has_attribute(tag) && required.matches(object));
            if let Some(object) = found {
                debug!(tag = %tag, object = %object.id, "attribute resolved");
            }
            found
        }
    }
}

/// Where objects produced by a `use` land: the current location when any id
/// operand lies there, the inventory otherwise.
pub fn use_scope(state: &GameState, primary: &Selector, secondary: Option<&Selector>) -> Placement {
    let location = state.location.as_str();
    let in_location = [Some(primary), secondary]
        .into_iter()
        .flatten()
        .filter_map(Selector::id)
        .any(|id| state.overlay.is_in_location(id, location));
    if in_location {
        Placement::InLocation(state.location.clone())
    } else {
        Placement::InInventory
    }
}
