//! The graphset: owner of all loaded graph data and user overlays.
//!
//! Everything mutable lives here — vertex/edge/property collections, tag and
//! exclusion overlays, selection and hover state. The camera and picking
//! modules only ever read vertex data.
//!
//! ## Failure semantics
//!
//! Upstream data is fetched incrementally, so edges and tag memberships may
//! reference entities that are not loaded yet. Every lookup by id therefore
//! resolves to an absent value instead of failing; the one reportable error
//! is creating a second exclusion for an entity that already has one.

use hashbrown::HashMap;
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::geom::{AxisExtent, Point3, SceneExtents};
use crate::model::{
    Edge, EdgeIndicator, EntityId, Exclusion, ExclusionPatch, GraphSnapshot, Property, Tag,
    TagKey, TagPatch, Vertex, VERTEX_RADIUS,
};
use crate::{Error, Result};

/// Edge indices touching one vertex; most vertices have only a handful.
type AdjacencyList = SmallVec<[usize; 8]>;

/// The aggregate over one loaded dataset plus the user's overlays.
///
/// Rebuilt wholesale whenever a new snapshot arrives: the data collections
/// and their indexes are replaced, selection and hover are cleared, and the
/// tag/exclusion overlays — user state, not dataset state — survive.
pub struct Graphset {
    vertices: Vec<Vertex>,
    edges: Vec<Edge>,
    properties: Vec<Property>,

    /// entity id → index into `vertices` / `properties`.
    vertex_index: HashMap<EntityId, usize>,
    property_index: HashMap<EntityId, usize>,
    /// entity id → indices into `edges` where the id is an endpoint,
    /// in input order.
    adjacency: HashMap<EntityId, AdjacencyList>,

    tags: Vec<Tag>,
    next_tag_key: u32,
    exclusions: Vec<Exclusion>,

    selected: Option<EntityId>,
    hovered: Option<EntityId>,
}

impl Default for Graphset {
    fn default() -> Self {
        Self::new()
    }
}

impl Graphset {
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            edges: Vec::new(),
            properties: Vec::new(),
            vertex_index: HashMap::new(),
            property_index: HashMap::new(),
            adjacency: HashMap::new(),
            tags: Vec::new(),
            next_tag_key: 1,
            exclusions: Vec::new(),
            selected: None,
            hovered: None,
        }
    }

    // ========================================================================
    // Snapshot refresh
    // ========================================================================

    /// Replace the loaded dataset wholesale.
    ///
    /// Selection and hover are cleared — callers that want them to survive a
    /// refresh must capture and re-apply them. Tag and exclusion overlays are
    /// kept; members that no longer resolve are tolerated.
    pub fn replace(&mut self, snapshot: GraphSnapshot) {
        debug!(
            vertices = snapshot.vertices.len(),
            edges = snapshot.edges.len(),
            properties = snapshot.properties.len(),
            "replacing graphset data"
        );
        self.vertices = snapshot.vertices;
        self.edges = snapshot.edges;
        self.properties = snapshot.properties;
        self.selected = None;
        self.hovered = None;
        self.rebuild_indexes();
    }

    /// Decode a JSON snapshot from the service layer and replace.
    pub fn replace_from_json(&mut self, json: &str) -> Result<()> {
        let snapshot: GraphSnapshot = serde_json::from_str(json).map_err(Error::Snapshot)?;
        self.replace(snapshot);
        Ok(())
    }

    fn rebuild_indexes(&mut self) {
        self.vertex_index = self
            .vertices
            .iter()
            .enumerate()
            .map(|(i, v)| (v.id.clone(), i))
            .collect();
        self.property_index = self
            .properties
            .iter()
            .enumerate()
            .map(|(i, p)| (p.id.clone(), i))
            .collect();

        self.adjacency = HashMap::new();
        for (i, edge) in self.edges.iter().enumerate() {
            self.adjacency
                .entry(edge.source_id.clone())
                .or_default()
                .push(i);
            if edge.target_id != edge.source_id {
                self.adjacency
                    .entry(edge.target_id.clone())
                    .or_default()
                    .push(i);
            }
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn exclusions(&self) -> &[Exclusion] {
        &self.exclusions
    }

    pub fn vertex(&self, id: &EntityId) -> Option<&Vertex> {
        self.vertex_index.get(id).map(|&i| &self.vertices[i])
    }

    pub fn property(&self, id: &EntityId) -> Option<&Property> {
        self.property_index.get(id).map(|&i| &self.properties[i])
    }

    // ========================================================================
    // Structural queries
    // ========================================================================

    /// All edges where the vertex is source or target, in input order.
    pub fn related_edges(&self, vertex: &Vertex) -> Vec<&Edge> {
        self.adjacency
            .get(&vertex.id)
            .map(|indices| indices.iter().map(|&i| &self.edges[i]).collect())
            .unwrap_or_default()
    }

    /// The vertex at the other end of the edge relative to the given one.
    /// `None` if that vertex is not currently loaded.
    pub fn alternate_vertex(&self, edge: &Edge, vertex: &Vertex) -> Option<&Vertex> {
        let alt_id = if edge.is_source(vertex) {
            &edge.target_id
        } else {
            &edge.source_id
        };
        self.vertex(alt_id)
    }

    /// Vertices whose id is in `target_ids`, excluding hidden or excluded
    /// ones. The single authoritative visible-subset query — rendering and
    /// UI code goes through here, never the raw collection.
    pub fn vertices_by_ids(&self, target_ids: &[EntityId]) -> Vec<&Vertex> {
        self.vertices
            .iter()
            .filter(|v| target_ids.contains(&v.id) && self.vertex_is_visible(v))
            .collect()
    }

    /// The whole vertex set under the same visibility filter as
    /// [`vertices_by_ids`](Self::vertices_by_ids); feeds the per-frame draw
    /// and pick loops.
    pub fn visible_vertices(&self) -> impl Iterator<Item = &Vertex> {
        self.vertices.iter().filter(|v| self.vertex_is_visible(v))
    }

    fn vertex_is_visible(&self, vertex: &Vertex) -> bool {
        !vertex.hidden && !self.vertex_is_excluded(vertex)
    }

    /// True if an exclusion record removes this vertex from queries.
    pub fn vertex_is_excluded(&self, vertex: &Vertex) -> bool {
        self.exclusions
            .iter()
            .any(|x| x.excluded && x.ent_id == vertex.id)
    }

    /// True if an exclusion record removes this property from queries.
    pub fn property_is_excluded(&self, property_id: &EntityId) -> bool {
        self.exclusions
            .iter()
            .any(|x| x.excluded && x.ent_id == *property_id)
    }

    /// True if a soft (`hidden`) exclusion dims this entity without removing
    /// it from queries. Render styling only.
    pub fn entity_is_dimmed(&self, id: &EntityId) -> bool {
        self.exclusions.iter().any(|x| x.hidden && x.ent_id == *id)
    }

    /// Per-axis bounding extents over the full vertex set, or over a subset
    /// when `target_ids` names a non-empty id list.
    ///
    /// `diff` is `max - min` padded by the vertex radius so a box around a
    /// single vertex is never zero-volume. An empty input set leaves min/max
    /// at the infinite sentinels with `diff` 0 — callers guard via
    /// [`SceneExtents::is_empty`].
    pub fn extents_of(&self, target_ids: Option<&[EntityId]>) -> SceneExtents {
        let restrict = target_ids.filter(|ids| !ids.is_empty());

        let mut min = [f32::INFINITY; 3];
        let mut max = [f32::NEG_INFINITY; 3];
        for v in &self.vertices {
            if let Some(ids) = restrict {
                if !ids.contains(&v.id) {
                    continue;
                }
            }
            let p = [v.position.x, v.position.y, v.position.z];
            for axis in 0..3 {
                min[axis] = min[axis].min(p[axis]);
                max[axis] = max[axis].max(p[axis]);
            }
        }

        let extent = |axis: usize| {
            let diff = if min[axis].is_finite() {
                max[axis] - min[axis] + VERTEX_RADIUS
            } else {
                0.0
            };
            AxisExtent {
                min: min[axis],
                max: max[axis],
                diff,
            }
        };
        SceneExtents {
            x: extent(0),
            y: extent(1),
            z: extent(2),
        }
    }

    /// Display decision for `edge` relative to `vertex`.
    ///
    /// `None` means the edge is not drawn for this vertex: its other endpoint
    /// is not loaded, its property is missing or excluded, or it is the
    /// secondary member of a parallel pair (the edge with the
    /// lexicographically smaller statement id draws; the other is skipped to
    /// avoid a doubled line).
    pub fn edge_indicator(&self, edge: &Edge, vertex: &Vertex) -> Option<EdgeIndicator> {
        self.alternate_vertex(edge, vertex)?;
        let property = self.property(&edge.property_id)?;
        if self.property_is_excluded(&property.id) {
            return None;
        }

        let related = self.related_edges(vertex);
        if let Some(parallel) = edge.parallel_in(&related) {
            if edge.statement_id > parallel.statement_id {
                return None;
            }
            return Some(EdgeIndicator::Bidirectional);
        }

        Some(if edge.is_source(vertex) {
            EdgeIndicator::Outward
        } else {
            EdgeIndicator::Inward
        })
    }

    // ========================================================================
    // Vertex update operations
    // ========================================================================

    /// Move a vertex to a new layout position. Locked vertices are exempt
    /// from layout movement and report `false`.
    pub fn update_vertex_position(&mut self, id: &EntityId, position: Point3) -> bool {
        let Some(&i) = self.vertex_index.get(id) else {
            return false;
        };
        if self.vertices[i].locked {
            return false;
        }
        self.vertices[i].position = position;
        true
    }

    pub fn set_vertex_locked(&mut self, id: &EntityId, locked: bool) -> bool {
        let Some(&i) = self.vertex_index.get(id) else {
            return false;
        };
        self.vertices[i].locked = locked;
        true
    }

    pub fn set_vertex_hidden(&mut self, id: &EntityId, hidden: bool) -> bool {
        let Some(&i) = self.vertex_index.get(id) else {
            return false;
        };
        self.vertices[i].hidden = hidden;
        true
    }

    // ========================================================================
    // Selection / hover
    // ========================================================================

    pub fn set_selected(&mut self, id: Option<EntityId>) {
        if self.selected != id {
            trace!(?id, "selection changed");
            self.selected = id;
        }
    }

    pub fn set_hovered(&mut self, id: Option<EntityId>) {
        if self.hovered != id {
            trace!(?id, "hover changed");
            self.hovered = id;
        }
    }

    pub fn selected_id(&self) -> Option<&EntityId> {
        self.selected.as_ref()
    }

    pub fn hovered_id(&self) -> Option<&EntityId> {
        self.hovered.as_ref()
    }

    /// The selected vertex, if one is selected and currently loaded.
    pub fn selected_vertex(&self) -> Option<&Vertex> {
        self.selected.as_ref().and_then(|id| self.vertex(id))
    }

    /// The hovered vertex, if one is hovered and currently loaded.
    pub fn hovered_vertex(&self) -> Option<&Vertex> {
        self.hovered.as_ref().and_then(|id| self.vertex(id))
    }

    pub fn is_selected(&self, vertex: &Vertex) -> bool {
        self.selected.as_ref() == Some(&vertex.id)
    }

    pub fn is_hovered(&self, vertex: &Vertex) -> bool {
        self.hovered.as_ref() == Some(&vertex.id)
    }

    // ========================================================================
    // Tag operations
    // ========================================================================

    /// Create a tag and return its key. Keys come from a dedicated monotonic
    /// counter, so a key is never reused within a session even after the
    /// highest tag is deleted.
    pub fn create_tag(
        &mut self,
        label: impl Into<String>,
        color: impl Into<String>,
        vertex_ids: Vec<EntityId>,
        notes: impl Into<String>,
    ) -> TagKey {
        let key = TagKey(self.next_tag_key);
        self.next_tag_key += 1;
        let label = label.into();
        debug!(%key, %label, members = vertex_ids.len(), "created tag");
        self.tags.push(Tag {
            key,
            label,
            color: color.into(),
            notes: notes.into(),
            vertex_ids,
            show_bounding_box: false,
            show_connecting_edges: false,
        });
        key
    }

    /// Merge-patch a tag by key. Returns `false` if no tag has the key.
    pub fn update_tag(&mut self, key: TagKey, patch: TagPatch) -> bool {
        let Some(tag) = self.tags.iter_mut().find(|t| t.key == key) else {
            return false;
        };
        if let Some(label) = patch.label {
            tag.label = label;
        }
        if let Some(color) = patch.color {
            tag.color = color;
        }
        if let Some(notes) = patch.notes {
            tag.notes = notes;
        }
        if let Some(vertex_ids) = patch.vertex_ids {
            tag.vertex_ids = vertex_ids;
        }
        if let Some(show) = patch.show_bounding_box {
            tag.show_bounding_box = show;
        }
        if let Some(show) = patch.show_connecting_edges {
            tag.show_connecting_edges = show;
        }
        true
    }

    /// Delete a tag by key. Irreversible; member vertices are untouched.
    pub fn delete_tag(&mut self, key: TagKey) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| t.key != key);
        let deleted = self.tags.len() != before;
        if deleted {
            debug!(%key, "deleted tag");
        }
        deleted
    }

    pub fn tag(&self, key: TagKey) -> Option<&Tag> {
        self.tags.iter().find(|t| t.key == key)
    }

    /// All tags the vertex id belongs to, in tag-creation order.
    pub fn tags_by_vertex(&self, id: &EntityId) -> Vec<&Tag> {
        self.tags.iter().filter(|t| t.contains(id)).collect()
    }

    /// Add a vertex to an existing tag. No-op (returning `false`) when the
    /// tag is missing or the vertex is already a member.
    pub fn add_vertex_to_tag(&mut self, id: &EntityId, key: TagKey) -> bool {
        let Some(tag) = self.tags.iter_mut().find(|t| t.key == key) else {
            return false;
        };
        if tag.contains(id) {
            return false;
        }
        tag.vertex_ids.push(id.clone());
        true
    }

    /// Remove every tag.
    pub fn clear_tags(&mut self) {
        debug!(count = self.tags.len(), "cleared all tags");
        self.tags.clear();
    }

    /// Bounding extents over a tag's members; feeds the tag bounding-box
    /// display. `None` if no tag has the key.
    pub fn tag_extents(&self, key: TagKey) -> Option<SceneExtents> {
        let tag = self.tag(key)?;
        Some(self.extents_of(Some(&tag.vertex_ids)))
    }

    // ========================================================================
    // Exclusion operations
    // ========================================================================

    /// Create an exclusion record. At most one may exist per entity id;
    /// a duplicate create fails without touching the existing record.
    pub fn create_exclusion(&mut self, exclusion: Exclusion) -> Result<()> {
        if self.exclusions.iter().any(|x| x.ent_id == exclusion.ent_id) {
            return Err(Error::DuplicateExclusion(exclusion.ent_id));
        }
        debug!(ent_id = %exclusion.ent_id, "created exclusion");
        self.exclusions.push(exclusion);
        Ok(())
    }

    /// Merge-patch an exclusion by entity id. Returns `false` if absent.
    pub fn update_exclusion(&mut self, id: &EntityId, patch: ExclusionPatch) -> bool {
        let Some(exclusion) = self.exclusions.iter_mut().find(|x| x.ent_id == *id) else {
            return false;
        };
        if let Some(notes) = patch.notes {
            exclusion.notes = notes;
        }
        if let Some(hidden) = patch.hidden {
            exclusion.hidden = hidden;
        }
        if let Some(excluded) = patch.excluded {
            exclusion.excluded = excluded;
        }
        true
    }

    /// Delete the exclusion for an entity id. Returns `false` if absent.
    pub fn delete_exclusion(&mut self, id: &EntityId) -> bool {
        let before = self.exclusions.len();
        self.exclusions.retain(|x| x.ent_id != *id);
        let deleted = self.exclusions.len() != before;
        if deleted {
            debug!(ent_id = %id, "deleted exclusion");
        }
        deleted
    }

    pub fn exclusion(&self, id: &EntityId) -> Option<&Exclusion> {
        self.exclusions.iter().find(|x| x.ent_id == *id)
    }

    /// Drop every exclusion whose entity id resolves to a loaded vertex.
    /// Records for entities not currently loaded are left alone.
    pub fn clear_vertex_exclusions(&mut self) {
        let index = &self.vertex_index;
        self.exclusions.retain(|x| !index.contains_key(&x.ent_id));
    }

    /// Drop every exclusion whose entity id resolves to a loaded property.
    /// Records for entities not currently loaded are left alone.
    pub fn clear_property_exclusions(&mut self) {
        let index = &self.property_index;
        self.exclusions.retain(|x| !index.contains_key(&x.ent_id));
    }
}

// ============================================================================
// Tests
// ============================================================================
