//! Layered geodesic sphere mesh.
//!
//! A [`Mesh`] starts from an icosahedron and splits every triangle into four
//! at each subdivision step. Nodes and cells live in per-layer arenas and
//! refer to each other through [`NodeId`] and [`CellId`] handles, so cells on
//! either side of an edge always hold the same two corner ids.

mod base;
mod cell;
mod error;
mod ids;
mod layer;
mod lookup;
mod mesh;
mod node;
mod subdivide;

pub use cell::Cell;
pub use error::MeshError;
pub use ids::{CellId, NodeId};
pub use layer::{Layer, NodeOrigin};
pub use mesh::{MAX_DEPTH, Mesh};
pub use node::{BASE_CAPACITY, MIDPOINT_CAPACITY, Node};
