use std::path::Path;

use colored::Colorize;
use wf_core::{Game, GameCharacter, GameObject, Location};

pub fn run(world: Option<&Path>, id: &str) -> Result<(), String> {
    let game = super::load_world(world)?;

    if let Some(location) = game.location(id) {
        show_location(&game, location);
    } else if let Some(object) = game.object(id) {
        show_object(&game, object);
    } else if let Some(character) = game.character(id) {
        show_character(character);
    } else {
        return Err(format!("no location, object or character with id \"{id}\""));
    }

    Ok(())
}

fn header(name: &str, kind: &str, id: &str) {
    println!("  {} [{}] {}", name.bold(), kind.dimmed(), id.dimmed());
    println!();
}

fn description(text: &str) {
    if !text.is_empty() {
        for line in text.lines() {
            println!("  {}", line.trim());
        }
        println!();
    }
}

fn show_location(game: &Game, location: &Location) {
    let kind = if game.is_end_location(location.id.as_str()) {
        "end location"
    } else {
        "location"
    };
    header(&location.name, kind, location.id.as_str());
    description(&location.description);

    if let Some(image) = &location.image {
        println!("  image:      {image}");
    }
    for connection in &location.connections {
        let target = game
            .location(connection.target.as_str())
            .map_or(connection.target.as_str(), |l| l.name.as_str());
        println!("  exit:       {} -> {target}", connection.label);
    }
    if !location.objects.is_empty() {
        let ids: Vec<_> = location.objects.iter().map(|o| o.as_str()).collect();
        println!("  objects:    {}", ids.join(", "));
    }
    if !location.characters.is_empty() {
        let ids: Vec<_> = location.characters.iter().map(|c| c.as_str()).collect();
        println!("  characters: {}", ids.join(", "));
    }
    if game.start_location() == &location.id {
        println!();
        println!("  {}", "The game starts here.".dimmed());
    }
}

fn show_object(game: &Game, object: &GameObject) {
    header(&object.name, "object", object.id.as_str());
    description(&object.description);

    println!("  portable:   {}", if object.can_pick_up { "yes" } else { "no" });
    if !object.attributes.is_empty() {
        let tags: Vec<_> = object.attributes.iter().map(String::as_str).collect();
        println!("  attributes: {}", tags.join(", "));
    }
    if !object.contains.is_empty() {
        let ids: Vec<_> = object.contains.iter().map(|o| o.as_str()).collect();
        println!("  contains:   {}", ids.join(", "));
    }
    let starts_in: Vec<_> = game
        .locations()
        .iter()
        .filter(|l| l.objects.contains(&object.id))
        .map(|l| l.id.as_str())
        .collect();
    if !starts_in.is_empty() {
        println!("  starts in:  {}", starts_in.join(", "));
    }
}

fn show_character(character: &GameCharacter) {
    header(&character.name, "character", character.id.as_str());
    description(&character.description);

    if !character.phrases.is_empty() {
        println!("  {}", "Phrases:".dimmed());
        for phrase in &character.phrases {
            println!("    \"{phrase}\"");
        }
    }
    if !character.wants.is_empty() {
        let wants: Vec<_> = character.wants.iter().map(|w| w.0.to_string()).collect();
        println!("  wants:      {}", wants.join(", "));
    }
}
