//! Interactive play on the console.

use std::io::{self, Write};
use std::path::Path;

use colored::Colorize;
use tracing::info;
use wf_core::{Game, SAMPLE_LOCKPICK_ID};
use wf_engine::{Dispatcher, EngineConfig, LockpickConfig, LockpickGame, MiniGameRegistry, Session};

/// Minigame ids with this prefix are played as the console lockpick.
const LOCKPICK_PREFIX: &str = "lockpick";

pub fn run(world: Option<&Path>, seed: u64, tries: u32, log_capacity: usize) -> Result<(), String> {
    let game = super::load_world(world)?;
    let lockpick = LockpickConfig::default()
        .with_seed(seed)
        .with_max_tries(tries);
    let minigames = console_minigames(&game, &lockpick);
    info!(minigames = ?minigames.ids(), "starting session");

    let dispatcher = Dispatcher::with_config(
        game,
        EngineConfig::default().with_log_capacity(log_capacity),
    )
    .with_minigames(minigames);
    let mut session = Session::new(dispatcher);

    println!("{}", session.intro());

    // Stdin is locked per read only: a console minigame reads from it too
    // while a command runs.
    let stdin = io::stdin();
    let mut line = String::new();

    loop {
        print!("> ");
        io::stdout().flush().map_err(|e| e.to_string())?;

        line.clear();
        match stdin.read_line(&mut line) {
            Ok(0) => break, // EOF
            Err(e) => return Err(e.to_string()),
            _ => {}
        }

        if line.trim().is_empty() {
            continue;
        }

        let response = session.process(&line);
        if response.quit {
            break;
        }
        if response.success {
            println!("{}", response.text);
        } else {
            println!("{}", response.text.yellow());
        }
        if let Some(ending) = session.ending() {
            println!("{}", ending.bold());
            break;
        }
    }

    println!("Bye.");
    Ok(())
}

/// A console lockpick for the bundled world's id and for every lockpick id
/// the world's minigame rules name.
fn console_minigames(game: &Game, config: &LockpickConfig) -> MiniGameRegistry {
    let mut registry = MiniGameRegistry::new();
    let ids = game
        .minigame_rules()
        .iter()
        .map(|rule| rule.minigame.as_str())
        .filter(|id| id.starts_with(LOCKPICK_PREFIX))
        .chain([SAMPLE_LOCKPICK_ID]);
    for id in ids {
        if !registry.contains(id) {
            registry.register(LockpickGame::console(id, config.clone()));
        }
    }
    registry
}
