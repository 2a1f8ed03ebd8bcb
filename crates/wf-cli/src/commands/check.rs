use std::path::Path;

use colored::Colorize;
use tracing::debug;
use wf_core::{CoreError, Game, validate};

pub fn run(world: Option<&Path>) -> Result<(), String> {
    let game = super::load_world(world)?;
    verify(&game)?;

    let rules = game.use_rules().len() + game.give_rules().len() + game.minigame_rules().len();
    println!("  All checks passed for '{}'.", game.title().bold());
    println!(
        "  {} locations, {} objects, {} characters, {} rules",
        game.locations().len(),
        game.objects().len(),
        game.characters().len(),
        rules
    );
    if let Some(limit) = game.turn_limit() {
        println!("  turn limit: {limit}");
    }

    Ok(())
}

/// Validate the world as loaded, bundled sample included.
fn verify(game: &Game) -> Result<(), String> {
    let issues = validate(game);
    debug!(issues = issues.len(), "validated world");
    if issues.is_empty() {
        Ok(())
    } else {
        Err(super::describe_error(CoreError::Invalid(issues)))
    }
}
