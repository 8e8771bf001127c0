//! Vertex (topic node) in the explored graph.

use serde::{Deserialize, Serialize};

use super::EntityId;
use crate::geom::Point3;

/// Draw radius shared by every vertex, in scene units. Doubles as the
/// minimum-depth padding on bounding extents so a box around a single vertex
/// is never zero-volume.
pub const VERTEX_RADIUS: f32 = 20.0;

/// A vertex in the graph.
///
/// `position` arrives pre-computed from the external layout service. `locked`
/// vertices are exempt from layout movement; `hidden` vertices stay loaded
/// but drop out of the visible subset. `fetched` marks whether the vertex's
/// own claims have been retrieved yet (unfetched vertices are placeholders at
/// the frontier of the explored graph).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub id: EntityId,
    pub label: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub url: String,
    pub position: Point3,
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub fetched: bool,
}

impl Vertex {
    pub fn new(id: impl Into<EntityId>, label: impl Into<String>, position: Point3) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            description: String::new(),
            url: String::new(),
            position,
            locked: false,
            hidden: false,
            fetched: false,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }
}
