//! A play session: parsed input in, player-facing text and game status out.

use serde::Serialize;
use tracing::debug;
use wf_core::{LocationId, Selector};

use crate::command::{COMMAND_SUMMARY, Command, parse_command};
use crate::dispatcher::{CommandResult, Dispatcher};
use crate::snapshot::Snapshot;
use crate::suggest::closest;

/// Whether a playthrough is still running.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum GameStatus {
    /// Still playing.
    Active,
    /// The player reached an end location.
    Finished {
        /// The end location reached.
        location: LocationId,
    },
    /// The turn limit was used up.
    OutOfTurns {
        /// Turns taken.
        taken: u32,
        /// The limit.
        limit: u32,
    },
}

impl GameStatus {
    /// Status of the dispatcher's playthrough.
    ///
    /// Reaching an end location takes precedence over running out of turns.
    pub fn of(dispatcher: &Dispatcher) -> Self {
        let game = dispatcher.game();
        let state = dispatcher.state();
        if game.is_end_location(state.location.as_str()) {
            return Self::Finished {
                location: state.location.clone(),
            };
        }
        match game.turn_limit() {
            Some(limit) if state.turns_taken >= limit => Self::OutOfTurns {
                taken: state.turns_taken,
                limit,
            },
            _ => Self::Active,
        }
    }

    /// Whether the game has ended.
    pub fn is_over(&self) -> bool {
        !matches!(self, Self::Active)
    }
}

/// What the session answered to one line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Text for the player.
    pub text: String,
    /// Whether the command succeeded.
    pub success: bool,
    /// Status after the command.
    pub status: GameStatus,
    /// Whether the player asked to leave.
    pub quit: bool,
}

/// An interactive session around a [`Dispatcher`].
#[derive(Debug)]
pub struct Session {
    dispatcher: Dispatcher,
}

impl Session {
    /// Create a session.
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }

    /// The underlying dispatcher.
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Current game status.
    pub fn status(&self) -> GameStatus {
        GameStatus::of(&self.dispatcher)
    }

    /// Title, start message, command summary and the first location.
    pub fn intro(&self) -> String {
        let game = self.dispatcher.game();
        format!(
            "{}\n{}\n{}\n{}",
            game.title(),
            game.start_message(),
            COMMAND_SUMMARY,
            self.look()
        )
    }

    /// Describe the current location. Takes no turn.
    pub fn look(&self) -> String {
        match Snapshot::capture(&self.dispatcher) {
            Ok(snapshot) => snapshot.describe(),
            Err(err) => format!("Error: {err}"),
        }
    }

    /// The closing line once the game is over.
    pub fn ending(&self) -> Option<String> {
        match self.status() {
            GameStatus::Active => None,
            GameStatus::Finished { .. } => Some(format!(
                "Game ended. Turns: {}",
                self.dispatcher.state().turns_taken
            )),
            GameStatus::OutOfTurns { taken, limit } => {
                Some(format!("You ran out of time. Turns: {taken}/{limit}"))
            }
        }
    }

    /// Parse and execute one line of input.
    pub fn process(&mut self, input: &str) -> Response {
        let command = parse_command(input);
        self.execute(command)
    }

    /// Execute a parsed command.
    pub fn execute(&mut self, command: Command) -> Response {
        debug!(?command, "executing");
        let result = match &command {
            Command::Look => CommandResult::ok(self.look()),
            Command::Help => CommandResult::ok(COMMAND_SUMMARY),
            Command::Quit => {
                return Response {
                    text: "Bye.".to_string(),
                    success: true,
                    status: self.status(),
                    quit: true,
                };
            }
            Command::Invalid { usage } => CommandResult::fail(*usage),
            Command::Unknown { .. } => CommandResult::fail("Unknown command."),
            Command::Go { label } => self.dispatcher.go(label),
            Command::PickUp { object } => self.dispatcher.pick_up(object),
            Command::Drop { object } => self.dispatcher.drop(object),
            Command::Inventory => self.dispatcher.inventory(),
            Command::Examine { target } => {
                let game = self.dispatcher.game();
                if game.object(target).is_none() && game.character(target).is_some() {
                    self.dispatcher.examine_character(target)
                } else {
                    self.dispatcher.examine_object(target)
                }
            }
            Command::Talk { character } => self.dispatcher.talk(character),
            Command::Give { object, character } => self.dispatcher.give(object, character),
            Command::Use { primary, secondary } => {
                self.dispatcher.use_item(primary, secondary.as_deref())
            }
        };

        let mut text = result.message;
        let hint = if result.success {
            None
        } else {
            self.hint(&command)
        };
        if let Some(hint) = hint {
            text.push_str(&format!(" Did you mean '{hint}'?"));
        }
        Response {
            text,
            success: result.success,
            status: self.status(),
            quit: false,
        }
    }

    /// A close match for the first argument the world does not know.
    fn hint(&self, command: &Command) -> Option<&str> {
        let game = self.dispatcher.game();
        let objects = || game.objects().iter().map(|o| o.id.as_str());
        let characters = || game.characters().iter().map(|c| c.id.as_str());
        let unknown_object = |id: &str| game.object(id).is_none();
        let unknown_character = |id: &str| game.character(id).is_none();

        match command {
            Command::Go { label } => {
                let exits = self.dispatcher.exits().ok()?;
                closest(label, exits.into_iter().map(|c| c.label.as_str()))
            }
            Command::PickUp { object } | Command::Drop { object }
                if unknown_object(object.as_str()) =>
            {
                closest(object, objects())
            }
            Command::Examine { target }
                if unknown_object(target.as_str()) && unknown_character(target.as_str()) =>
            {
                closest(target, objects().chain(characters()))
            }
            Command::Talk { character } if unknown_character(character.as_str()) => {
                closest(character, characters())
            }
            Command::Give { object, character } => {
                if unknown_object(object.as_str()) {
                    closest(object, objects())
                } else if unknown_character(character.as_str()) {
                    closest(character, characters())
                } else {
                    None
                }
            }
            Command::Use { primary, secondary } => [Some(primary), secondary.as_ref()]
                .into_iter()
                .flatten()
                .filter_map(|token| match Selector::parse(token) {
                    Selector::Id(id) if unknown_object(id.as_str()) && unknown_character(id.as_str()) => {
                        closest(token, objects().chain(characters()))
                    }
                    _ => None,
                })
                .next(),
            _ => None,
        }
    }
}
