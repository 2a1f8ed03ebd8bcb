use std::collections::{HashMap, HashSet};

use crate::game::Game;
use crate::selector::Selector;

/// A single problem found in a world definition.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationIssue {
    /// Two entities of the same kind share an id.
    #[error("duplicate {kind} id \"{id}\"")]
    DuplicateId {
        /// Entity kind ("location", "object", "character").
        kind: &'static str,
        /// The repeated id.
        id: String,
    },

    /// A reference points at a location that does not exist.
    #[error("{context}: unknown location \"{id}\"")]
    UnknownLocation {
        /// Where the reference was found.
        context: String,
        /// The dangling id.
        id: String,
    },

    /// A reference points at an object that does not exist.
    #[error("{context}: unknown object \"{id}\"")]
    UnknownObject {
        /// Where the reference was found.
        context: String,
        /// The dangling id.
        id: String,
    },

    /// A reference points at a character that does not exist.
    #[error("{context}: unknown character \"{id}\"")]
    UnknownCharacter {
        /// Where the reference was found.
        context: String,
        /// The dangling id.
        id: String,
    },

    /// Two exits of one location share a label (ignoring case).
    #[error("location \"{location}\": duplicate exit label \"{label}\"")]
    DuplicateExit {
        /// The location holding both exits.
        location: String,
        /// The repeated label.
        label: String,
    },

    /// An object starts out in more than one location.
    #[error("object \"{id}\" is placed in both \"{first}\" and \"{second}\"")]
    MultiplePlacement {
        /// The object.
        id: String,
        /// First location listing it.
        first: String,
        /// Second location listing it.
        second: String,
    },
}

/// Check every cross-reference in the world.
///
/// Returns all issues found; an empty list means the world is consistent.
pub fn validate(game: &Game) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    check_duplicates(game, &mut issues);

    let start = game.start_location().as_str();
    check_location(game, "start location", start, &mut issues);
    for end in game.end_locations() {
        check_location(game, "end locations", end.as_str(), &mut issues);
    }

    let mut placed: HashMap<&str, &str> = HashMap::new();
    for location in game.locations() {
        let ctx = format!("location \"{}\"", location.id);

        let mut labels = HashSet::new();
        for conn in &location.connections {
            check_location(game, &ctx, conn.target.as_str(), &mut issues);
            if !labels.insert(conn.label.to_lowercase()) {
                issues.push(ValidationIssue::DuplicateExit {
                    location: location.id.to_string(),
                    label: conn.label.clone(),
                });
            }
        }
        for object in &location.objects {
            check_object(game, &ctx, object.as_str(), &mut issues);
            let previous = placed.insert(object.as_str(), location.id.as_str());
            if let Some(first) = previous.filter(|first| *first != location.id.as_str()) {
                issues.push(ValidationIssue::MultiplePlacement {
                    id: object.to_string(),
                    first: first.to_string(),
                    second: location.id.to_string(),
                });
            }
        }
        for character in &location.characters {
            check_character(game, &ctx, character.as_str(), &mut issues);
        }
    }

    for object in game.objects() {
        let ctx = format!("object \"{}\"", object.id);
        for inner in &object.contains {
            check_object(game, &ctx, inner.as_str(), &mut issues);
        }
    }

    for character in game.characters() {
        let ctx = format!("character \"{}\" wants", character.id);
        for want in &character.wants {
            check_object_selector(game, &ctx, &want.0, &mut issues);
        }
    }

    for (i, rule) in game.use_rules().iter().enumerate() {
        let ctx = format!("use rule #{}", i + 1);
        check_object_selector(game, &ctx, &rule.primary, &mut issues);
        if let Some(with) = &rule.with {
            check_object_selector(game, &ctx, with, &mut issues);
        }
        for produced in &rule.produces {
            check_object(game, &ctx, produced.as_str(), &mut issues);
        }
        for unlock in &rule.opens {
            check_location(game, &ctx, unlock.from.as_str(), &mut issues);
            check_location(game, &ctx, unlock.to.as_str(), &mut issues);
        }
    }

    for (i, rule) in game.give_rules().iter().enumerate() {
        let ctx = format!("give rule #{}", i + 1);
        check_character(game, &ctx, rule.character.as_str(), &mut issues);
        check_object_selector(game, &ctx, &rule.item, &mut issues);
        for granted in &rule.grants {
            check_object(game, &ctx, granted.as_str(), &mut issues);
        }
    }

    for (i, rule) in game.minigame_rules().iter().enumerate() {
        let ctx = format!("minigame rule #{}", i + 1);
        check_object_selector(game, &ctx, &rule.primary, &mut issues);
        if let Some(Selector::Id(id)) = &rule.with {
            // The secondary may name a character instead of an object.
            if game.object(id).is_none() && game.character(id).is_none() {
                issues.push(ValidationIssue::UnknownObject {
                    context: ctx.clone(),
                    id: id.clone(),
                });
            }
        }
        for reward in &rule.rewards {
            check_object(game, &ctx, reward.as_str(), &mut issues);
        }
    }

    issues
}

fn check_duplicates(game: &Game, issues: &mut Vec<ValidationIssue>) {
    let mut seen = HashSet::new();
    for location in game.locations() {
        if !seen.insert(location.id.as_str()) {
            issues.push(ValidationIssue::DuplicateId {
                kind: "location",
                id: location.id.to_string(),
            });
        }
    }
    let mut seen = HashSet::new();
    for object in game.objects() {
        if !seen.insert(object.id.as_str()) {
            issues.push(ValidationIssue::DuplicateId {
                kind: "object",
                id: object.id.to_string(),
            });
        }
    }
    let mut seen = HashSet::new();
    for character in game.characters() {
        if !seen.insert(character.id.as_str()) {
            issues.push(ValidationIssue::DuplicateId {
                kind: "character",
                id: character.id.to_string(),
            });
        }
    }
}

fn check_location(game: &Game, context: &str, id: &str, issues: &mut Vec<ValidationIssue>) {
    if game.location(id).is_none() {
        issues.push(ValidationIssue::UnknownLocation {
            context: context.to_string(),
            id: id.to_string(),
        });
    }
}

fn check_object(game: &Game, context: &str, id: &str, issues: &mut Vec<ValidationIssue>) {
    if game.object(id).is_none() {
        issues.push(ValidationIssue::UnknownObject {
            context: context.to_string(),
            id: id.to_string(),
        });
    }
}

fn check_character(game: &Game, context: &str, id: &str, issues: &mut Vec<ValidationIssue>) {
    if game.character(id).is_none() {
        issues.push(ValidationIssue::UnknownCharacter {
            context: context.to_string(),
            id: id.to_string(),
        });
    }
}

fn check_object_selector(
    game: &Game,
    context: &str,
    selector: &Selector,
    issues: &mut Vec<ValidationIssue>,
) {
    if let Selector::Id(id) = selector {
        check_object(game, context, id, issues);
    }
}
