//! Property (relation type) referenced by edges.

use serde::{Deserialize, Serialize};

use super::EntityId;

/// A relation/attribute type, not a node. Edges carry a `property_id`
/// pointing at one of these; exclusions may target properties the same way
/// they target vertices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub id: EntityId,
    pub label: String,
    #[serde(default)]
    pub description: String,
}

impl Property {
    pub fn new(id: impl Into<EntityId>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}
