use std::path::Path;

use crate::error::{CoreError, CoreResult};
use crate::game::Game;
use crate::validate::validate;

/// Load a world file and check its references.
///
/// Fails with [`CoreError::Invalid`] listing every dangling reference, so a
/// broken world is rejected before any command runs.
pub fn load_game(path: &Path) -> CoreResult<Game> {
    let json = std::fs::read_to_string(path).map_err(|source| CoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_game(&json)
}

/// Parse and validate a world from JSON text.
pub fn parse_game(json: &str) -> CoreResult<Game> {
    let game = Game::from_json(json)?;
    let issues = validate(&game);
    if issues.is_empty() {
        Ok(game)
    } else {
        Err(CoreError::Invalid(issues))
    }
}
