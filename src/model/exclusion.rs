//! Exclusion rules suppressing vertices or properties.

use serde::{Deserialize, Serialize};

use super::EntityId;

/// A user-created suppression rule for one entity (vertex or property).
///
/// The two flags are independent strengths: `hidden` keeps the entity
/// rendered but dimmed/suppressed, `excluded` removes it from traversal and
/// queries entirely. At most one record may exist per entity id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exclusion {
    pub ent_id: EntityId,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub excluded: bool,
}

impl Exclusion {
    /// A full exclusion: the entity is removed from queries.
    pub fn new(ent_id: impl Into<EntityId>) -> Self {
        Self {
            ent_id: ent_id.into(),
            notes: String::new(),
            hidden: false,
            excluded: true,
        }
    }

    /// A soft rule: the entity stays queryable but renders dimmed.
    pub fn hidden_only(ent_id: impl Into<EntityId>) -> Self {
        Self {
            ent_id: ent_id.into(),
            notes: String::new(),
            hidden: true,
            excluded: false,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }
}

/// Merge-patch for [`Graphset::update_exclusion`](crate::graphset::Graphset::update_exclusion).
/// `None` fields keep their current values; the entity id is not patchable.
#[derive(Debug, Clone, Default)]
pub struct ExclusionPatch {
    pub notes: Option<String>,
    pub hidden: Option<bool>,
    pub excluded: Option<bool>,
}
