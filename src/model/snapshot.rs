//! Inbound dataset snapshot from the service layer.

use serde::{Deserialize, Serialize};

use super::{Edge, Property, Vertex};

/// One atomic replacement payload: the full vertex/edge/property collections
/// for the current exploration.
///
/// The service layer assembles this off-thread and hands it over finished;
/// [`Graphset::replace`](crate::graphset::Graphset::replace) swaps it in
/// wholesale — there is no incremental merge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    #[serde(default)]
    pub vertices: Vec<Vertex>,
    #[serde(default)]
    pub edges: Vec<Edge>,
    #[serde(default)]
    pub properties: Vec<Property>,
}
