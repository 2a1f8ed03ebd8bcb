//! The mutable facet of the world: where objects and characters are now, and
//! which exits have been opened since the game started.

use std::collections::HashMap;

use wf_core::{CharacterId, Connection, Game, LocationId, ObjectId};

/// The single authoritative container of an object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
    /// Lying in a location.
    InLocation(LocationId),
    /// Carried by the player.
    InInventory,
    /// Not in play yet: hidden inside a container or waiting to be produced.
    Nowhere,
    /// Used up by a rule or handed to a character. Containers never reveal it
    /// again; only a rule that produces or grants it brings it back.
    Consumed,
}

/// Runtime overlay on top of the immutable [`Game`].
///
/// Every object move goes through [`WorldOverlay::place`], which takes the
/// object out of its previous container before inserting it into the new one,
/// so an object is never in two places at once.
#[derive(Debug, Clone, Default)]
pub struct WorldOverlay {
    placements: HashMap<ObjectId, Placement>,
    location_objects: HashMap<LocationId, Vec<ObjectId>>,
    location_characters: HashMap<LocationId, Vec<CharacterId>>,
    inventory: Vec<ObjectId>,
    opened: HashMap<LocationId, Vec<Connection>>,
}

impl WorldOverlay {
    /// Seed the overlay from each location's initial contents.
    ///
    /// An object listed by several locations stays in the first one.
    pub fn from_game(game: &Game) -> Self {
        let mut overlay = Self::default();
        for location in game.locations() {
            for object in &location.objects {
                if !overlay.placements.contains_key(object.as_str()) {
                    overlay.place(object.clone(), Placement::InLocation(location.id.clone()));
                }
            }
            for character in &location.characters {
                overlay.add_character(&location.id, character.clone());
            }
        }
        overlay
    }

    /// Where the object is now.
    pub fn placement(&self, object: &str) -> Placement {
        self.placements
            .get(object)
            .cloned()
            .unwrap_or(Placement::Nowhere)
    }

    /// Whether the object lies in the given location.
    pub fn is_in_location(&self, object: &str, location: &str) -> bool {
        matches!(self.placements.get(object), Some(Placement::InLocation(l)) if l == location)
    }

    /// Whether the player carries the object.
    pub fn is_held(&self, object: &str) -> bool {
        matches!(self.placements.get(object), Some(Placement::InInventory))
    }

    /// Move an object into a container, removing it from wherever it was.
    ///
    /// Placing an object where it already is keeps its position in the list.
    pub fn place(&mut self, object: ObjectId, to: Placement) {
        let from = self.placement(object.as_str());
        if from == to {
            return;
        }
        match &from {
            Placement::InLocation(loc) => {
                if let Some(list) = self.location_objects.get_mut(loc) {
                    list.retain(|o| *o != object);
                }
            }
            Placement::InInventory => self.inventory.retain(|o| *o != object),
            Placement::Nowhere | Placement::Consumed => {}
        }
        match &to {
            Placement::InLocation(loc) => self
                .location_objects
                .entry(loc.clone())
                .or_default()
                .push(object.clone()),
            Placement::InInventory => self.inventory.push(object.clone()),
            Placement::Nowhere | Placement::Consumed => {}
        }
        if to == Placement::Nowhere {
            self.placements.remove(object.as_str());
        } else {
            self.placements.insert(object, to);
        }
    }

    /// Take an object out of play for good.
    pub fn remove(&mut self, object: &ObjectId) {
        self.place(object.clone(), Placement::Consumed);
    }

    /// Objects lying in a location, in the order they arrived.
    pub fn objects_in(&self, location: &str) -> &[ObjectId] {
        self.location_objects
            .get(location)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Objects carried, in pickup order.
    pub fn inventory(&self) -> &[ObjectId] {
        &self.inventory
    }

    /// Characters present in a location.
    pub fn characters_in(&self, location: &str) -> &[CharacterId] {
        self.location_characters
            .get(location)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether the character is present in the location.
    pub fn is_character_in(&self, character: &str, location: &str) -> bool {
        self.characters_in(location).iter().any(|c| c == character)
    }

    /// Add a character to a location (no duplicates).
    pub fn add_character(&mut self, location: &LocationId, character: CharacterId) {
        let list = self.location_characters.entry(location.clone()).or_default();
        if !list.contains(&character) {
            list.push(character);
        }
    }

    /// Remove a character from a location. Returns whether it was there.
    pub fn remove_character(&mut self, location: &str, character: &str) -> bool {
        match self.location_characters.get_mut(location) {
            Some(list) => {
                let before = list.len();
                list.retain(|c| c != character);
                list.len() != before
            }
            None => false,
        }
    }

    /// Open a new exit from a location. Returns `false` when the location
    /// already has an opened exit with that label.
    pub fn open_connection(&mut self, location: &LocationId, connection: Connection) -> bool {
        let list = self.opened.entry(location.clone()).or_default();
        if list.iter().any(|c| c.matches_label(&connection.label)) {
            return false;
        }
        list.push(connection);
        true
    }

    /// Exits opened at runtime for a location.
    pub fn opened_connections(&self, location: &str) -> &[Connection] {
        self.opened.get(location).map(Vec::as_slice).unwrap_or(&[])
    }
}
