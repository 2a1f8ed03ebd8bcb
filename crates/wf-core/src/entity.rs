use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::id::{CharacterId, LocationId, ObjectId};
use crate::selector::Selector;

/// A labelled exit from one location to another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    /// What the player types after `go`.
    pub label: String,
    /// Where the exit leads.
    pub target: LocationId,
}

impl Connection {
    /// Create a connection.
    pub fn new(label: impl Into<String>, target: impl Into<LocationId>) -> Self {
        Self {
            label: label.into(),
            target: target.into(),
        }
    }

    /// Case-insensitive label comparison.
    pub fn matches_label(&self, label: &str) -> bool {
        self.label.to_lowercase() == label.trim().to_lowercase()
    }
}

/// A place the player can stand in.
///
/// The object and character lists are the *initial* placement only. During
/// play the engine tracks what is actually here in its own overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Unique identifier.
    pub id: LocationId,
    /// Display name.
    pub name: String,
    /// Text shown on arrival and on `look`.
    #[serde(default)]
    pub description: String,
    /// Optional image reference for graphical front ends.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Objects present when the game starts, in display order.
    #[serde(default)]
    pub objects: Vec<ObjectId>,
    /// Characters present when the game starts.
    #[serde(default)]
    pub characters: Vec<CharacterId>,
    /// Exits available from the start.
    #[serde(default)]
    pub connections: Vec<Connection>,
}

impl Location {
    /// Create an empty location.
    pub fn new(id: impl Into<LocationId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            image: None,
            objects: Vec::new(),
            characters: Vec::new(),
            connections: Vec::new(),
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the image reference.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Place an object here at game start.
    pub fn with_object(mut self, object: impl Into<ObjectId>) -> Self {
        self.objects.push(object.into());
        self
    }

    /// Place a character here at game start.
    pub fn with_character(mut self, character: impl Into<CharacterId>) -> Self {
        self.characters.push(character.into());
        self
    }

    /// Add an exit.
    pub fn with_connection(
        mut self,
        label: impl Into<String>,
        target: impl Into<LocationId>,
    ) -> Self {
        self.connections.push(Connection::new(label, target));
        self
    }
}

/// A thing in the world. Objects never change; only their placement does.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameObject {
    /// Unique identifier.
    pub id: ObjectId,
    /// Display name.
    pub name: String,
    /// Text shown when examined.
    #[serde(default)]
    pub description: String,
    /// Whether `pickup` may move it into the inventory.
    #[serde(default)]
    pub can_pick_up: bool,
    /// Tags that attribute selectors match against.
    #[serde(default)]
    pub attributes: BTreeSet<String>,
    /// Objects revealed into the current location when this one is examined.
    #[serde(default)]
    pub contains: Vec<ObjectId>,
}

impl GameObject {
    /// Create a fixed object with no attributes.
    pub fn new(id: impl Into<ObjectId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            can_pick_up: false,
            attributes: BTreeSet::new(),
            contains: Vec::new(),
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Allow the player to pick this object up.
    pub fn portable(mut self) -> Self {
        self.can_pick_up = true;
        self
    }

    /// Add an attribute tag.
    pub fn with_attribute(mut self, tag: impl Into<String>) -> Self {
        self.attributes.insert(tag.into());
        self
    }

    /// Add a contained object.
    pub fn containing(mut self, object: impl Into<ObjectId>) -> Self {
        self.contains.push(object.into());
        self
    }

    /// Whether the object carries the tag.
    pub fn has_attribute(&self, tag: &str) -> bool {
        self.attributes.contains(tag)
    }
}

/// Something a character would accept. Part of the schema; the command set
/// itself resolves gifts through give rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Want(pub Selector);

impl Want {
    /// Whether the object would satisfy this want.
    pub fn accepts(&self, object: &GameObject) -> bool {
        self.0.matches(object)
    }
}

/// A non-player character the player can talk to and give things to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameCharacter {
    /// Unique identifier.
    pub id: CharacterId,
    /// Display name.
    pub name: String,
    /// Text shown when examined.
    #[serde(default)]
    pub description: String,
    /// Lines cycled through by `talk`.
    #[serde(default)]
    pub phrases: Vec<String>,
    /// Items the character is after.
    #[serde(default)]
    pub wants: Vec<Want>,
}

impl GameCharacter {
    /// Create a silent character.
    pub fn new(id: impl Into<CharacterId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            phrases: Vec::new(),
            wants: Vec::new(),
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Append a talk phrase.
    pub fn with_phrase(mut self, phrase: impl Into<String>) -> Self {
        self.phrases.push(phrase.into());
        self
    }

    /// Append a want.
    pub fn with_want(mut self, want: Selector) -> Self {
        self.wants.push(Want(want));
        self
    }

    /// Whether any of the character's wants accepts the object.
    pub fn wants(&self, object: &GameObject) -> bool {
        self.wants.iter().any(|w| w.accepts(object))
    }
}
