use std::fmt;

use serde::{Deserialize, Serialize};

use crate::entity::GameObject;

/// Marker that turns a typed token into an attribute selector (`@long`).
pub const ATTRIBUTE_MARKER: char = '@';

/// A match predicate over objects: either an exact id or an attribute tag.
///
/// Selectors appear both as what the player typed (`use @long with obj_coffin`)
/// and as rule operands. In world files they are written as `{"id": "..."}`
/// or `{"attribute": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Selector {
    /// Matches exactly one object (or character) by id.
    Id(String),
    /// Matches any object carrying the tag.
    Attribute(String),
}

impl Selector {
    /// Selector for an exact id.
    pub fn by_id(id: impl Into<String>) -> Self {
        Self::Id(id.into())
    }

    /// Selector for an attribute tag.
    pub fn by_attribute(tag: impl Into<String>) -> Self {
        Self::Attribute(tag.into())
    }

    /// Resolve a raw player token. A leading `@` marks an attribute.
    pub fn parse(token: &str) -> Self {
        match token.strip_prefix(ATTRIBUTE_MARKER) {
            Some(tag) => Self::Attribute(tag.to_string()),
            None => Self::Id(token.to_string()),
        }
    }

    /// Whether the candidate object satisfies this selector.
    pub fn matches(&self, candidate: &GameObject) -> bool {
        match self {
            Self::Id(id) => candidate.id == id.as_str(),
            Self::Attribute(tag) => candidate.has_attribute(tag),
        }
    }

    /// The id, for id selectors.
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::Id(id) => Some(id),
            Self::Attribute(_) => None,
        }
    }

    /// The tag, for attribute selectors.
    pub fn attribute(&self) -> Option<&str> {
        match self {
            Self::Id(_) => None,
            Self::Attribute(tag) => Some(tag),
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Attribute(tag) => write!(f, "{ATTRIBUTE_MARKER}{tag}"),
        }
    }
}
