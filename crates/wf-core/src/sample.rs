use crate::entity::{GameCharacter, GameObject, Location};
use crate::game::Game;
use crate::rule::{GiveRule, MiniGameRule, UseRule};
use crate::selector::Selector;

/// Id under which the bundled world expects its lockpick minigame.
pub const SAMPLE_LOCKPICK_ID: &str = "lockpick_crypt";

/// The bundled "Crypt Escape" world.
///
/// Pry the coffin open with something long, pick the chest's lock, bring the
/// stranger in the tunnel some water, and use the key they give you on the
/// gate to get outside.
pub fn sample_game() -> Game {
    Game::new("Crypt Escape", "loc_crypt")
        .with_start_message("You awake in a crypt...")
        .with_end_location("loc_outside")
        .with_turn_limit(50)
        .with_location(
            Location::new("loc_crypt", "Crypt")
                .with_description("A stone room; a sealed coffin rests here.")
                .with_image("images/crypt.png")
                .with_object("obj_coffin")
                .with_object("obj_pole")
                .with_object("obj_locked_chest")
                .with_object("obj_lockpicks")
                .with_object("obj_garlic"),
        )
        .with_location(
            Location::new("loc_tunnel", "Hidden Tunnel")
                .with_description("A narrow passage leading north. An iron gate bars the way.")
                .with_image("images/tunnel.png")
                .with_object("obj_iron_gate")
                .with_character("char_patient")
                .with_connection("back", "loc_crypt"),
        )
        .with_location(
            Location::new("loc_outside", "Outside")
                .with_description("Fresh air at last!")
                .with_image("images/outside.png"),
        )
        .with_object(
            GameObject::new("obj_pole", "Pole")
                .with_description("A long wooden pole.")
                .portable()
                .with_attribute("long"),
        )
        .with_object(
            GameObject::new("obj_coffin", "Coffin")
                .with_description("The lid is stuck; something long could pry it open."),
        )
        .with_object(
            GameObject::new("obj_garlic", "Garlic")
                .with_description("Pungent cloves.")
                .portable()
                .with_attribute("repellent"),
        )
        .with_object(
            GameObject::new("obj_passage_north", "Passage North")
                .with_description("A dark passage heading north."),
        )
        .with_object(
            GameObject::new("obj_locked_chest", "Locked Chest")
                .with_description("It has a tricky lock."),
        )
        .with_object(
            GameObject::new("obj_open_chest", "Open Chest")
                .with_description("The lid is open. A cup of water sits inside.")
                .containing("obj_cup_water"),
        )
        .with_object(
            GameObject::new("obj_lockpicks", "Lockpicks")
                .with_description("A set of delicate picks.")
                .portable()
                .with_attribute("lockpick"),
        )
        .with_object(
            GameObject::new("obj_cup_water", "Cup of Water")
                .with_description("Cool, clear water.")
                .portable()
                .with_attribute("drink"),
        )
        .with_object(
            GameObject::new("obj_brass_key", "Brass Key")
                .with_description("A small brass key.")
                .portable()
                .with_attribute("key"),
        )
        .with_object(
            GameObject::new("obj_iron_gate", "Iron Gate")
                .with_description("Rusted bars with a brass keyhole."),
        )
        .with_object(
            GameObject::new("obj_open_gate", "Open Gate")
                .with_description("The gate hangs open."),
        )
        .with_character(
            GameCharacter::new("char_patient", "Bedridden Stranger")
                .with_description("Parched and weak.")
                .with_phrase("I'm so thirsty...")
                .with_phrase("Do you have water?")
                .with_want(Selector::by_id("obj_cup_water")),
        )
        .with_use_rule(
            UseRule::new(
                Selector::by_attribute("long"),
                "You pry open the coffin. A passage is revealed.",
            )
            .with_secondary(Selector::by_id("obj_coffin"))
            .producing("obj_passage_north")
            .opening("loc_crypt", "passage", "loc_tunnel"),
        )
        .with_use_rule(
            UseRule::new(
                Selector::by_attribute("key"),
                "The key turns with a screech. The gate swings open.",
            )
            .with_secondary(Selector::by_id("obj_iron_gate"))
            .producing("obj_open_gate")
            .opening("loc_tunnel", "north", "loc_outside"),
        )
        .with_give_rule(
            GiveRule::new(
                "char_patient",
                Selector::by_id("obj_cup_water"),
                "\u{201c}Thank you.\u{201d} They hand you a brass key.",
            )
            .granting("obj_brass_key"),
        )
        .with_minigame_rule(
            MiniGameRule::new(Selector::by_id("obj_locked_chest"), SAMPLE_LOCKPICK_ID)
                .with_secondary(Selector::by_attribute("lockpick"))
                .rewarding("obj_open_chest")
                .on_success("The lock yields with a click; the chest is now open.")
                .on_failure("You fail to pick the lock."),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::validate;

    #[test]
    fn sample_world_is_consistent() {
        let issues = validate(&sample_game());
        assert!(issues.is_empty(), "{issues:?}");
    }

    #[test]
    fn sample_world_survives_json() {
        let json = sample_game().to_json().unwrap();
        let game = crate::loader::parse_game(&json).unwrap();
        assert_eq!(game.title(), "Crypt Escape");
        assert_eq!(game.minigame_rules()[0].minigame, SAMPLE_LOCKPICK_ID);
    }
}
