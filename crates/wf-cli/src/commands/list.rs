use std::path::Path;

use clap::ValueEnum;
use comfy_table::{ContentArrangement, Table};
use wf_core::{Game, Selector};

/// What `wf list` prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListKind {
    /// Locations with their exits.
    Locations,
    /// Objects with their attributes.
    Objects,
    /// Characters.
    Characters,
    /// Use, give and minigame rules in evaluation order.
    Rules,
}

pub fn run(world: Option<&Path>, kind: ListKind) -> Result<(), String> {
    let game = super::load_world(world)?;

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);

    let count = match kind {
        ListKind::Locations => locations(&game, &mut table),
        ListKind::Objects => objects(&game, &mut table),
        ListKind::Characters => characters(&game, &mut table),
        ListKind::Rules => rules(&game, &mut table),
    };

    if count == 0 {
        println!("  Nothing found.");
        return Ok(());
    }

    println!("{table}");
    println!();
    println!("  {count} entries");

    Ok(())
}

fn locations(game: &Game, table: &mut Table) -> usize {
    table.set_header(vec!["Id", "Name", "Exits", "Description"]);
    for location in game.locations() {
        let exits = location
            .connections
            .iter()
            .map(|c| format!("{} -> {}", c.label, c.target))
            .collect::<Vec<_>>()
            .join(", ");
        let mut name = location.name.clone();
        if game.is_end_location(location.id.as_str()) {
            name.push_str(" (end)");
        }
        table.add_row(vec![
            location.id.to_string(),
            name,
            exits,
            super::truncate(&location.description, 50),
        ]);
    }
    game.locations().len()
}

fn objects(game: &Game, table: &mut Table) -> usize {
    table.set_header(vec!["Id", "Name", "Portable", "Attributes", "Description"]);
    for object in game.objects() {
        let attributes = object
            .attributes
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        table.add_row(vec![
            object.id.to_string(),
            object.name.clone(),
            if object.can_pick_up { "yes" } else { "no" }.to_string(),
            attributes,
            super::truncate(&object.description, 50),
        ]);
    }
    game.objects().len()
}

fn characters(game: &Game, table: &mut Table) -> usize {
    table.set_header(vec!["Id", "Name", "Phrases", "Description"]);
    for character in game.characters() {
        table.add_row(vec![
            character.id.to_string(),
            character.name.clone(),
            character.phrases.len().to_string(),
            super::truncate(&character.description, 50),
        ]);
    }
    game.characters().len()
}

fn rules(game: &Game, table: &mut Table) -> usize {
    table.set_header(vec!["#", "Kind", "Operands", "Effect"]);
    let mut n = 0;
    let mut row = |kind: &str, operands: String, effect: String| {
        n += 1;
        table.add_row(vec![n.to_string(), kind.to_string(), operands, effect]);
    };

    for rule in game.use_rules() {
        row("use", operands(&rule.primary, rule.with.as_ref()), super::truncate(&rule.text, 50));
    }
    for rule in game.minigame_rules() {
        row(
            "minigame",
            operands(&rule.primary, rule.with.as_ref()),
            format!("launches {}", rule.minigame),
        );
    }
    for rule in game.give_rules() {
        row(
            "give",
            format!("{} to {}", rule.item, rule.character),
            super::truncate(&rule.text, 50),
        );
    }
    n
}

fn operands(primary: &Selector, with: Option<&Selector>) -> String {
    match with {
        Some(with) => format!("{primary} with {with}"),
        None => primary.to_string(),
    }
}
