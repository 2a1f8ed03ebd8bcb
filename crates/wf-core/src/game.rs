use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::entity::{GameCharacter, GameObject, Location};
use crate::error::{CoreError, CoreResult};
use crate::id::{CharacterId, LocationId, ObjectId};
use crate::rule::{GiveRule, MiniGameRule, UseRule};

/// On-disk shape of a world file. Entities are listed, not keyed, so that
/// declaration order survives a round trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct GameFile {
    title: String,
    #[serde(default)]
    start_message: String,
    start_location: LocationId,
    #[serde(default)]
    end_locations: BTreeSet<LocationId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    turn_limit: Option<u32>,
    #[serde(default)]
    locations: Vec<Location>,
    #[serde(default)]
    objects: Vec<GameObject>,
    #[serde(default)]
    characters: Vec<GameCharacter>,
    #[serde(default)]
    use_rules: Vec<UseRule>,
    #[serde(default)]
    give_rules: Vec<GiveRule>,
    #[serde(default)]
    minigame_rules: Vec<MiniGameRule>,
}

/// The immutable world definition.
///
/// Built once (by the loader, [`sample_game`](crate::sample_game), or the
/// builder methods below) and then only read. Lookups are by id; listings
/// keep declaration order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "GameFile", into = "GameFile")]
pub struct Game {
    title: String,
    start_message: String,
    start_location: LocationId,
    end_locations: BTreeSet<LocationId>,
    turn_limit: Option<u32>,
    locations: Vec<Location>,
    objects: Vec<GameObject>,
    characters: Vec<GameCharacter>,
    use_rules: Vec<UseRule>,
    give_rules: Vec<GiveRule>,
    minigame_rules: Vec<MiniGameRule>,

    // Indexes (first declaration wins)
    location_index: HashMap<LocationId, usize>,
    object_index: HashMap<ObjectId, usize>,
    character_index: HashMap<CharacterId, usize>,
}

impl From<GameFile> for Game {
    fn from(file: GameFile) -> Self {
        let mut game = Game::new(file.title, file.start_location)
            .with_start_message(file.start_message);
        game.end_locations = file.end_locations;
        game.turn_limit = file.turn_limit;
        game.use_rules = file.use_rules;
        game.give_rules = file.give_rules;
        game.minigame_rules = file.minigame_rules;
        for location in file.locations {
            game = game.with_location(location);
        }
        for object in file.objects {
            game = game.with_object(object);
        }
        for character in file.characters {
            game = game.with_character(character);
        }
        game
    }
}

impl From<Game> for GameFile {
    fn from(game: Game) -> Self {
        Self {
            title: game.title,
            start_message: game.start_message,
            start_location: game.start_location,
            end_locations: game.end_locations,
            turn_limit: game.turn_limit,
            locations: game.locations,
            objects: game.objects,
            characters: game.characters,
            use_rules: game.use_rules,
            give_rules: game.give_rules,
            minigame_rules: game.minigame_rules,
        }
    }
}

impl Game {
    /// Start building a world.
    pub fn new(title: impl Into<String>, start_location: impl Into<LocationId>) -> Self {
        Self {
            title: title.into(),
            start_message: String::new(),
            start_location: start_location.into(),
            end_locations: BTreeSet::new(),
            turn_limit: None,
            locations: Vec::new(),
            objects: Vec::new(),
            characters: Vec::new(),
            use_rules: Vec::new(),
            give_rules: Vec::new(),
            minigame_rules: Vec::new(),
            location_index: HashMap::new(),
            object_index: HashMap::new(),
            character_index: HashMap::new(),
        }
    }

    /// Parse a world from its JSON representation. No validation is done here.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the world to pretty-printed JSON.
    pub fn to_json(&self) -> CoreResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    // -----------------------------------------------------------------------
    // Builder
    // -----------------------------------------------------------------------

    /// Set the text shown when play begins.
    pub fn with_start_message(mut self, message: impl Into<String>) -> Self {
        self.start_message = message.into();
        self
    }

    /// Mark a location as terminal.
    pub fn with_end_location(mut self, location: impl Into<LocationId>) -> Self {
        self.end_locations.insert(location.into());
        self
    }

    /// Limit the number of turns.
    pub fn with_turn_limit(mut self, limit: u32) -> Self {
        self.turn_limit = Some(limit);
        self
    }

    /// Add a location.
    pub fn with_location(mut self, location: Location) -> Self {
        self.location_index
            .entry(location.id.clone())
            .or_insert(self.locations.len());
        self.locations.push(location);
        self
    }

    /// Add an object.
    pub fn with_object(mut self, object: GameObject) -> Self {
        self.object_index
            .entry(object.id.clone())
            .or_insert(self.objects.len());
        self.objects.push(object);
        self
    }

    /// Add a character.
    pub fn with_character(mut self, character: GameCharacter) -> Self {
        self.character_index
            .entry(character.id.clone())
            .or_insert(self.characters.len());
        self.characters.push(character);
        self
    }

    /// Append a use rule (lower precedence than those already added).
    pub fn with_use_rule(mut self, rule: UseRule) -> Self {
        self.use_rules.push(rule);
        self
    }

    /// Append a give rule.
    pub fn with_give_rule(mut self, rule: GiveRule) -> Self {
        self.give_rules.push(rule);
        self
    }

    /// Append a minigame rule.
    pub fn with_minigame_rule(mut self, rule: MiniGameRule) -> Self {
        self.minigame_rules.push(rule);
        self
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    /// The world's title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Text shown when play begins.
    pub fn start_message(&self) -> &str {
        &self.start_message
    }

    /// Where the player starts.
    pub fn start_location(&self) -> &LocationId {
        &self.start_location
    }

    /// Locations that end the session when reached.
    pub fn end_locations(&self) -> &BTreeSet<LocationId> {
        &self.end_locations
    }

    /// Whether reaching the location ends the session.
    pub fn is_end_location(&self, id: &str) -> bool {
        self.end_locations.contains(id)
    }

    /// Maximum number of turns, if any.
    pub fn turn_limit(&self) -> Option<u32> {
        self.turn_limit
    }

    /// Look up a location.
    pub fn location(&self, id: &str) -> Option<&Location> {
        self.location_index.get(id).map(|&i| &self.locations[i])
    }

    /// Look up an object.
    pub fn object(&self, id: &str) -> Option<&GameObject> {
        self.object_index.get(id).map(|&i| &self.objects[i])
    }

    /// Look up a character.
    pub fn character(&self, id: &str) -> Option<&GameCharacter> {
        self.character_index.get(id).map(|&i| &self.characters[i])
    }

    /// Look up a location, failing with [`CoreError::UnknownLocation`].
    pub fn require_location(&self, id: &str) -> CoreResult<&Location> {
        self.location(id)
            .ok_or_else(|| CoreError::UnknownLocation(LocationId::from(id)))
    }

    /// Look up an object, failing with [`CoreError::UnknownObject`].
    pub fn require_object(&self, id: &str) -> CoreResult<&GameObject> {
        self.object(id)
            .ok_or_else(|| CoreError::UnknownObject(ObjectId::from(id)))
    }

    /// Look up a character, failing with [`CoreError::UnknownCharacter`].
    pub fn require_character(&self, id: &str) -> CoreResult<&GameCharacter> {
        self.character(id)
            .ok_or_else(|| CoreError::UnknownCharacter(CharacterId::from(id)))
    }

    /// All locations in declaration order.
    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    /// All objects in declaration order.
    pub fn objects(&self) -> &[GameObject] {
        &self.objects
    }

    /// All characters in declaration order.
    pub fn characters(&self) -> &[GameCharacter] {
        &self.characters
    }

    /// Use rules in precedence order.
    pub fn use_rules(&self) -> &[UseRule] {
        &self.use_rules
    }

    /// Give rules in precedence order.
    pub fn give_rules(&self) -> &[GiveRule] {
        &self.give_rules
    }

    /// Minigame rules in precedence order.
    pub fn minigame_rules(&self) -> &[MiniGameRule] {
        &self.minigame_rules
    }
}
