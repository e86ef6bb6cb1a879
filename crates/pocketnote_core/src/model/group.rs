//! Group domain model.
//!
//! # Responsibility
//! - Define the named container that owns an ordered list of notes.
//! - Define the persisted collection shape.
//!
//! # Invariants
//! - `id` and `name` never change after creation.
//! - `notes` is ordered by creation; new notes are only appended.

use crate::model::note::Note;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Color assigned to every new group until color selection exists.
pub const DEFAULT_GROUP_COLOR: &str = "#ffffff";

/// Ordered sequence of groups, in creation order.
///
/// This is the unit of persistence: the store always reads and writes the
/// whole collection under one key.
pub type Collection = Vec<Group>;

/// Stable group identifier.
///
/// Serialized as a bare string so that collections written with numeric
/// timestamp ids keep loading.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(String);

impl GroupId {
    /// Wraps an existing id value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the raw id string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for GroupId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Named note container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// Unique within the collection for the group's whole lifetime.
    pub id: GroupId,
    /// Display name as entered by the user.
    pub name: String,
    /// Cosmetic color, currently always [`DEFAULT_GROUP_COLOR`].
    #[serde(default = "default_color")]
    pub color: String,
    /// Notes in creation order.
    #[serde(default)]
    pub notes: Vec<Note>,
}

impl Group {
    /// Creates an empty group with the default color.
    pub fn new(id: GroupId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            color: default_color(),
            notes: Vec::new(),
        }
    }

    /// Returns whether a note with `note_id` already exists in this group.
    pub fn has_note(&self, note_id: &str) -> bool {
        self.notes.iter().any(|note| note.id.as_str() == note_id)
    }
}

/// Listing projection for group pickers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupSummary {
    pub id: GroupId,
    pub name: String,
    pub note_count: usize,
}

impl From<&Group> for GroupSummary {
    fn from(group: &Group) -> Self {
        Self {
            id: group.id.clone(),
            name: group.name.clone(),
            note_count: group.notes.len(),
        }
    }
}

fn default_color() -> String {
    DEFAULT_GROUP_COLOR.to_string()
}
