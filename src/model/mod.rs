//! # Graph model
//!
//! Plain data records that cross every boundary: service layer ↔ graphset ↔
//! camera/picking ↔ host UI.
//!
//! Design rule: this module is pure data — no frame state, no I/O, no
//! indexes. All mutation of loaded records goes through the owning
//! [`Graphset`](crate::graphset::Graphset).

pub mod edge;
pub mod exclusion;
pub mod ids;
pub mod property;
pub mod snapshot;
pub mod tag;
pub mod vertex;

pub use edge::{Edge, EdgeIndicator};
pub use exclusion::{Exclusion, ExclusionPatch};
pub use ids::{EntityId, TagKey};
pub use property::Property;
pub use snapshot::GraphSnapshot;
pub use tag::{Tag, TagPatch};
pub use vertex::{Vertex, VERTEX_RADIUS};
