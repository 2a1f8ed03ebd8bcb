//! Rule tables: which interaction fires for a `use`, and which gift rule
//! accepts an item.

use tracing::debug;
use wf_core::{Game, GameCharacter, GameObject, GiveRule, MiniGameRule, Selector, UseRule};

use crate::resolve::resolve_operand;
use crate::state::GameState;

/// A rule that can fire for a `use` command.
#[derive(Debug, Clone, Copy)]
pub enum InteractionRule<'g> {
    /// Static transformation.
    Transform(&'g UseRule),
    /// Hand-off to a minigame.
    MiniGame(&'g MiniGameRule),
}

impl<'g> InteractionRule<'g> {
    /// Required primary operand.
    pub fn primary(&self) -> &'g Selector {
        match self {
            Self::Transform(rule) => &rule.primary,
            Self::MiniGame(rule) => &rule.primary,
        }
    }

    /// Required secondary operand, if any.
    pub fn secondary(&self) -> Option<&'g Selector> {
        match self {
            Self::Transform(rule) => rule.with.as_ref(),
            Self::MiniGame(rule) => rule.with.as_ref(),
        }
    }

    /// Minigame rules may name a character present in the location as their
    /// secondary operand.
    fn accepts_character(&self) -> bool {
        matches!(self, Self::MiniGame(_))
    }
}

/// Every interaction rule in evaluation order: all use rules, then all
/// minigame rules, each in declaration order.
pub fn interaction_rules(game: &Game) -> impl Iterator<Item = InteractionRule<'_>> {
    game.use_rules()
        .iter()
        .map(InteractionRule::Transform)
        .chain(game.minigame_rules().iter().map(InteractionRule::MiniGame))
}

/// What a secondary operand resolved to.
#[derive(Debug, Clone, Copy)]
pub enum Target<'g> {
    /// An object, consumed when the rule succeeds.
    Object(&'g GameObject),
    /// A character in the current location. Never consumed.
    Character(&'g GameCharacter),
}

impl<'g> Target<'g> {
    /// The object, if the target is one.
    pub fn object(&self) -> Option<&'g GameObject> {
        match self {
            Self::Object(object) => Some(object),
            Self::Character(_) => None,
        }
    }
}

/// A matched interaction rule with its resolved operands.
#[derive(Debug, Clone, Copy)]
pub struct RuleMatch<'g> {
    /// The rule that fired.
    pub rule: InteractionRule<'g>,
    /// The resolved primary object.
    pub primary: &'g GameObject,
    /// The resolved secondary operand.
    pub secondary: Option<Target<'g>>,
}

impl<'g> RuleMatch<'g> {
    /// Objects to consume when the rule takes effect.
    pub fn consumed(&self) -> impl Iterator<Item = &'g GameObject> + use<'g> {
        std::iter::once(self.primary).chain(self.secondary.and_then(|t| t.object()))
    }
}

/// Find the first interaction rule matching the typed operands.
pub fn resolve_use<'g>(
    game: &'g Game,
    state: &GameState,
    primary: &Selector,
    secondary: Option<&Selector>,
) -> Option<RuleMatch<'g>> {
    interaction_rules(game).find_map(|rule| {
        let primary = resolve_operand(game, state, primary, rule.primary())?;
        let secondary = match (secondary, rule.secondary()) {
            (None, None) => None,
            (Some(typed), Some(required)) => {
                Some(resolve_secondary(game, state, rule, typed, required)?)
            }
            _ => return None,
        };
        debug!(?rule, primary = %primary.id, "interaction rule matched");
        Some(RuleMatch {
            rule,
            primary,
            secondary,
        })
    })
}

fn resolve_secondary<'g>(
    game: &'g Game,
    state: &GameState,
    rule: InteractionRule<'g>,
    typed: &Selector,
    required: &Selector,
) -> Option<Target<'g>> {
    let character = match typed {
        Selector::Id(id) if game.object(id).is_none() => id,
        _ => return resolve_operand(game, state, typed, required).map(Target::Object),
    };
    let usable = rule.accepts_character()
        && state.overlay.is_character_in(character, state.location.as_str())
        && required.id() == Some(character.as_str());
    if !usable {
        return None;
    }
    game.character(character).map(Target::Character)
}

/// Find the first gift rule for this character that wants the object.
pub fn resolve_give<'g>(
    game: &'g Game,
    character: &str,
    object: &GameObject,
) -> Option<&'g GiveRule> {
    game.give_rules()
        .iter()
        .find(|rule| rule.character == character && rule.item.matches(object))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::overlay::Placement;
    use wf_core::{Location, ObjectId};

    fn game() -> Game {
        Game::new("T", "loc_a")
            .with_location(
                Location::new("loc_a", "A")
                    .with_object("obj_pole")
                    .with_object("obj_coffin")
                    .with_object("obj_chest")
                    .with_character("char_guard"),
            )
            .with_object(GameObject::new("obj_pole", "Pole").with_attribute("long"))
            .with_object(GameObject::new("obj_coffin", "Coffin"))
            .with_object(GameObject::new("obj_chest", "Chest"))
            .with_object(GameObject::new("obj_picks", "Picks").with_attribute("lockpick"))
            .with_object(GameObject::new("obj_water", "Water"))
            .with_character(GameCharacter::new("char_guard", "Guard"))
            .with_use_rule(
                UseRule::new(Selector::by_attribute("long"), "first")
                    .with_secondary(Selector::by_id("obj_coffin")),
            )
            .with_use_rule(
                UseRule::new(Selector::by_id("obj_pole"), "second")
                    .with_secondary(Selector::by_id("obj_coffin")),
            )
            .with_use_rule(UseRule::new(Selector::by_id("obj_pole"), "alone"))
            .with_minigame_rule(
                MiniGameRule::new(Selector::by_id("obj_pole"), "duel")
                    .with_secondary(Selector::by_id("obj_coffin")),
            )
            .with_minigame_rule(
                MiniGameRule::new(Selector::by_attribute("lockpick"), "lockpick")
                    .with_secondary(Selector::by_id("obj_chest")),
            )
            .with_minigame_rule(
                MiniGameRule::new(Selector::by_id("obj_pole"), "bribe")
                    .with_secondary(Selector::by_id("char_guard")),
            )
            .with_give_rule(GiveRule::new(
                "char_guard",
                Selector::by_id("obj_water"),
                "Thanks.",
            ))
            .with_give_rule(GiveRule::new(
                "char_guard",
                Selector::by_attribute("long"),
                "Nice pole.",
            ))
    }

    fn text(found: Option<RuleMatch<'_>>) -> Option<&str> {
        found.map(|m| match m.rule {
            InteractionRule::Transform(rule) => rule.text.as_str(),
            InteractionRule::MiniGame(rule) => rule.minigame.as_str(),
        })
    }

    #[test]
    fn first_declared_rule_wins() {
        let game = game();
        let state = GameState::new(&game, &EngineConfig::default());
        let found = resolve_use(
            &game,
            &state,
            &Selector::by_id("obj_pole"),
            Some(&Selector::by_id("obj_coffin")),
        );
        assert_eq!(text(found), Some("first"));
    }

    #[test]
    fn use_rules_precede_minigame_rules() {
        let game = game();
        let order: Vec<_> = interaction_rules(&game)
            .map(|r| matches!(r, InteractionRule::Transform(_)))
            .collect();
        assert_eq!(order, [true, true, true, false, false, false]);
    }

    #[test]
    fn secondary_presence_must_agree() {
        let game = game();
        let state = GameState::new(&game, &EngineConfig::default());
        assert_eq!(
            text(resolve_use(&game, &state, &Selector::by_id("obj_pole"), None)),
            Some("alone")
        );
        assert!(
            resolve_use(
                &game,
                &state,
                &Selector::by_id("obj_coffin"),
                Some(&Selector::by_id("obj_pole"))
            )
            .is_none()
        );
    }

    #[test]
    fn minigame_rule_with_attribute_primary() {
        let game = game();
        let mut state = GameState::new(&game, &EngineConfig::default());
        state
            .overlay
            .place(ObjectId::from("obj_picks"), Placement::InInventory);
        let found = resolve_use(
            &game,
            &state,
            &Selector::by_attribute("lockpick"),
            Some(&Selector::by_id("obj_chest")),
        );
        assert_eq!(text(found), Some("lockpick"));
        let found = found.unwrap();
        let consumed: Vec<_> = found.consumed().map(|o| o.id.as_str()).collect();
        assert_eq!(consumed, ["obj_picks", "obj_chest"]);
    }

    #[test]
    fn character_secondary_only_when_present() {
        let game = game();
        let mut state = GameState::new(&game, &EngineConfig::default());
        let found = resolve_use(
            &game,
            &state,
            &Selector::by_id("obj_pole"),
            Some(&Selector::by_id("char_guard")),
        )
        .unwrap();
        assert_eq!(text(Some(found)), Some("bribe"));
        assert!(matches!(found.secondary, Some(Target::Character(_))));
        assert_eq!(found.consumed().count(), 1);

        state.overlay.remove_character("loc_a", "char_guard");
        assert!(
            resolve_use(
                &game,
                &state,
                &Selector::by_id("obj_pole"),
                Some(&Selector::by_id("char_guard"))
            )
            .is_none()
        );
    }

    #[test]
    fn give_matches_character_and_item() {
        let game = game();
        let water = game.object("obj_water").unwrap();
        let pole = game.object("obj_pole").unwrap();
        let coffin = game.object("obj_coffin").unwrap();
        assert_eq!(
            resolve_give(&game, "char_guard", water).map(|r| r.text.as_str()),
            Some("Thanks.")
        );
        assert_eq!(
            resolve_give(&game, "char_guard", pole).map(|r| r.text.as_str()),
            Some("Nice pole.")
        );
        assert!(resolve_give(&game, "char_guard", coffin).is_none());
        assert!(resolve_give(&game, "char_other", water).is_none());
    }
}
