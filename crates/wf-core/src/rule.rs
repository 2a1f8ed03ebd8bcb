use serde::{Deserialize, Serialize};

use crate::id::{CharacterId, LocationId, ObjectId};
use crate::selector::Selector;

/// An exit added to a location at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathUnlock {
    /// Location that gains the exit.
    pub from: LocationId,
    /// Label of the new exit.
    pub label: String,
    /// Where the exit leads.
    pub to: LocationId,
}

/// A static transformation: using `primary` (optionally with `with`) consumes
/// the operands and produces new objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UseRule {
    /// Required primary operand.
    pub primary: Selector,
    /// Required secondary operand. `None` means the rule takes no secondary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub with: Option<Selector>,
    /// Message shown on success.
    pub text: String,
    /// Objects placed into the scope container.
    #[serde(default)]
    pub produces: Vec<ObjectId>,
    /// Exits opened when the rule fires.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub opens: Vec<PathUnlock>,
}

impl UseRule {
    /// Create a rule with no secondary operand.
    pub fn new(primary: Selector, text: impl Into<String>) -> Self {
        Self {
            primary,
            with: None,
            text: text.into(),
            produces: Vec::new(),
            opens: Vec::new(),
        }
    }

    /// Require a secondary operand.
    pub fn with_secondary(mut self, with: Selector) -> Self {
        self.with = Some(with);
        self
    }

    /// Produce an object.
    pub fn producing(mut self, object: impl Into<ObjectId>) -> Self {
        self.produces.push(object.into());
        self
    }

    /// Open an exit.
    pub fn opening(
        mut self,
        from: impl Into<LocationId>,
        label: impl Into<String>,
        to: impl Into<LocationId>,
    ) -> Self {
        self.opens.push(PathUnlock {
            from: from.into(),
            label: label.into(),
            to: to.into(),
        });
        self
    }
}

/// What happens when the player hands an item to a character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GiveRule {
    /// The receiving character.
    pub character: CharacterId,
    /// The item the character accepts.
    pub item: Selector,
    /// Message shown on success.
    pub text: String,
    /// Objects handed back to the player.
    #[serde(default)]
    pub grants: Vec<ObjectId>,
    /// Whether the exchange concludes the story.
    #[serde(default)]
    pub ends_game: bool,
}

impl GiveRule {
    /// Create a rule that grants nothing.
    pub fn new(character: impl Into<CharacterId>, item: Selector, text: impl Into<String>) -> Self {
        Self {
            character: character.into(),
            item,
            text: text.into(),
            grants: Vec::new(),
            ends_game: false,
        }
    }

    /// Hand an object to the player.
    pub fn granting(mut self, object: impl Into<ObjectId>) -> Self {
        self.grants.push(object.into());
        self
    }

    /// Mark the exchange as the finale.
    pub fn ending_game(mut self) -> Self {
        self.ends_game = true;
        self
    }
}

/// Using `primary` (optionally with `with`) hands control to a minigame.
///
/// The secondary operand may name a character present in the location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MiniGameRule {
    /// Required primary operand.
    pub primary: Selector,
    /// Required secondary operand (object or character).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub with: Option<Selector>,
    /// Registered id of the minigame to launch.
    pub minigame: String,
    /// Fallback rewards when the minigame produces nothing itself.
    #[serde(default)]
    pub rewards: Vec<ObjectId>,
    /// Overrides the minigame's own message on success when non-empty.
    #[serde(default)]
    pub success_text: String,
    /// Overrides the minigame's own message on failure when non-empty.
    #[serde(default)]
    pub failure_text: String,
}

impl MiniGameRule {
    /// Create a rule with no secondary operand, rewards, or text overrides.
    pub fn new(primary: Selector, minigame: impl Into<String>) -> Self {
        Self {
            primary,
            with: None,
            minigame: minigame.into(),
            rewards: Vec::new(),
            success_text: String::new(),
            failure_text: String::new(),
        }
    }

    /// Require a secondary operand.
    pub fn with_secondary(mut self, with: Selector) -> Self {
        self.with = Some(with);
        self
    }

    /// Add a fallback reward.
    pub fn rewarding(mut self, object: impl Into<ObjectId>) -> Self {
        self.rewards.push(object.into());
        self
    }

    /// Override the success message.
    pub fn on_success(mut self, text: impl Into<String>) -> Self {
        self.success_text = text.into();
        self
    }

    /// Override the failure message.
    pub fn on_failure(mut self, text: impl Into<String>) -> Self {
        self.failure_text = text.into();
        self
    }
}
