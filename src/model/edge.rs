//! Edge (statement) connecting two vertices.

use serde::{Deserialize, Serialize};

use super::{EntityId, Vertex};

/// Display direction of an edge relative to a reference vertex.
///
/// A parallel (swapped-endpoint, same-property) pair renders as one
/// bidirectional line instead of two directed ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EdgeIndicator {
    Outward,
    Inward,
    Bidirectional,
}

/// A directed edge. Read-only once constructed.
///
/// `statement_id` is the provenance key of the upstream claim this edge was
/// built from; it also breaks ties when exactly one of a parallel pair must
/// be chosen for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub source_id: EntityId,
    pub target_id: EntityId,
    pub property_id: EntityId,
    pub statement_id: String,
}

impl Edge {
    pub fn new(
        source_id: impl Into<EntityId>,
        target_id: impl Into<EntityId>,
        property_id: impl Into<EntityId>,
        statement_id: impl Into<String>,
    ) -> Self {
        Self {
            source_id: source_id.into(),
            target_id: target_id.into(),
            property_id: property_id.into(),
            statement_id: statement_id.into(),
        }
    }

    /// True if the given vertex is the source of this edge.
    pub fn is_source(&self, vertex: &Vertex) -> bool {
        self.source_id == vertex.id
    }

    /// True if the given vertex is the target of this edge.
    pub fn is_target(&self, vertex: &Vertex) -> bool {
        self.target_id == vertex.id
    }

    /// True if the given entity id is either endpoint.
    pub fn touches(&self, id: &EntityId) -> bool {
        self.source_id == *id || self.target_id == *id
    }

    /// True when `other` runs the same property in the opposite direction —
    /// the two edges form a bidirectional pair.
    pub fn is_parallel_to(&self, other: &Edge) -> bool {
        other.property_id == self.property_id
            && other.source_id == self.target_id
            && other.target_id == self.source_id
    }

    /// Finds the parallel (bidirectional) counterpart among `candidates`, if
    /// one exists.
    pub fn parallel_in<'a>(&self, candidates: &[&'a Edge]) -> Option<&'a Edge> {
        candidates.iter().copied().find(|e| self.is_parallel_to(e))
    }
}
