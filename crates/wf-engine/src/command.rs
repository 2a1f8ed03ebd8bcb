//! Command parsing for player input.

/// A parsed player command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Follow an exit.
    Go {
        /// The exit label; may contain spaces.
        label: String,
    },
    /// Pick up an object.
    PickUp {
        /// Object id.
        object: String,
    },
    /// Drop a carried object.
    Drop {
        /// Object id.
        object: String,
    },
    /// List the inventory.
    Inventory,
    /// Examine an object or a character.
    Examine {
        /// Object or character id.
        target: String,
    },
    /// Talk to a character.
    Talk {
        /// Character id.
        character: String,
    },
    /// Give a carried object to a character.
    Give {
        /// Object id.
        object: String,
        /// Character id.
        character: String,
    },
    /// Use an object, optionally with another.
    Use {
        /// Primary operand: an id or `@tag`.
        primary: String,
        /// Secondary operand, after `with`.
        secondary: Option<String>,
    },
    /// Describe the current location. Does not take a turn.
    Look,
    /// Show the command summary.
    Help,
    /// Leave the game.
    Quit,
    /// A known verb with missing arguments. Does not take a turn.
    Invalid {
        /// How the verb is used.
        usage: &'static str,
    },
    /// Input that is not a command.
    Unknown {
        /// The original input.
        input: String,
    },
}

impl Command {
    /// Whether dispatching this command takes a turn.
    pub fn takes_turn(&self) -> bool {
        !matches!(
            self,
            Self::Look | Self::Help | Self::Quit | Self::Invalid { .. } | Self::Unknown { .. }
        )
    }
}

/// Usage line for `go`.
pub const GO_USAGE: &str = "Usage: go <label>";
/// Usage line for `pickup`.
pub const PICKUP_USAGE: &str = "Usage: pickup <objectId>";
/// Usage line for `drop`.
pub const DROP_USAGE: &str = "Usage: drop <objectId>";
/// Usage line for `ex`.
pub const EXAMINE_USAGE: &str = "Usage: ex <objectId|characterId>";
/// Usage line for `talk`.
pub const TALK_USAGE: &str = "Usage: talk <characterId>";
/// Usage line for `give`.
pub const GIVE_USAGE: &str = "Usage: give <objectId> <characterId>";
/// Usage line for `use`.
pub const USE_USAGE: &str = "Usage: use <id|@attr> [with <id|@attr>]";

/// One-line summary of every verb.
pub const COMMAND_SUMMARY: &str = "Type: go <label> | pickup <id> | drop <id> | inv | ex <id> | \
use <id|@attr> [with <id|@attr>] | talk <charId> | give <objId> <charId> | look | help | quit";

/// Parse a player input string into a command.
///
/// Verbs are case-insensitive; ids are taken verbatim.
pub fn parse_command(input: &str) -> Command {
    let words: Vec<&str> = input.split_whitespace().collect();
    let Some((verb, rest)) = words.split_first() else {
        return Command::Look;
    };

    match verb.to_lowercase().as_str() {
        "go" => match rest {
            [] => Command::Invalid { usage: GO_USAGE },
            _ => Command::Go {
                label: rest.join(" "),
            },
        },
        "pickup" => single(rest, PICKUP_USAGE, |object| Command::PickUp { object }),
        "drop" => single(rest, DROP_USAGE, |object| Command::Drop { object }),
        "inv" | "inventory" => Command::Inventory,
        "ex" | "examine" => single(rest, EXAMINE_USAGE, |target| Command::Examine { target }),
        "talk" => single(rest, TALK_USAGE, |character| Command::Talk { character }),
        "give" => match rest {
            [object, character, ..] => Command::Give {
                object: object.to_string(),
                character: character.to_string(),
            },
            _ => Command::Invalid { usage: GIVE_USAGE },
        },
        "use" => parse_use(rest),
        "look" | "l" => Command::Look,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        _ => Command::Unknown {
            input: input.trim().to_string(),
        },
    }
}

fn single(rest: &[&str], usage: &'static str, build: impl FnOnce(String) -> Command) -> Command {
    match rest.first() {
        Some(arg) => build(arg.to_string()),
        None => Command::Invalid { usage },
    }
}

/// `use <a>` or `use <a> with <b>`. Anything after the primary operand that
/// is not a `with` clause is ignored.
fn parse_use(rest: &[&str]) -> Command {
    match rest {
        [] => Command::Invalid { usage: USE_USAGE },
        [primary, with, secondary, ..] if with.eq_ignore_ascii_case("with") => Command::Use {
            primary: primary.to_string(),
            secondary: Some(secondary.to_string()),
        },
        [primary, ..] => Command::Use {
            primary: primary.to_string(),
            secondary: None,
        },
    }
}
