//! User-created tags grouping vertices.

use serde::{Deserialize, Serialize};

use super::{EntityId, TagKey};

/// A named, colored grouping of vertices.
///
/// Membership is an ordered list of vertex ids; a vertex may belong to any
/// number of tags, and member ids that are not currently loaded simply do not
/// resolve. The two display flags are independent: a bounding box around the
/// members, and connecting edges drawn between them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub key: TagKey,
    pub label: String,
    pub color: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub vertex_ids: Vec<EntityId>,
    #[serde(default)]
    pub show_bounding_box: bool,
    #[serde(default)]
    pub show_connecting_edges: bool,
}

impl Tag {
    /// True if the vertex id is a member of this tag.
    pub fn contains(&self, id: &EntityId) -> bool {
        self.vertex_ids.contains(id)
    }
}

/// Merge-patch for [`Graphset::update_tag`](crate::graphset::Graphset::update_tag).
/// `None` fields keep their current values; the key itself is not patchable.
#[derive(Debug, Clone, Default)]
pub struct TagPatch {
    pub label: Option<String>,
    pub color: Option<String>,
    pub notes: Option<String>,
    pub vertex_ids: Option<Vec<EntityId>>,
    pub show_bounding_box: Option<bool>,
    pub show_connecting_edges: Option<bool>,
}
