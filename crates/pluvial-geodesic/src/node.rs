//! Mesh vertices and their adjacency lists.

use pluvial_math::SpherePoint;
use smallvec::SmallVec;

use crate::NodeId;

/// Connection capacity of the twelve original icosahedron vertices.
pub const BASE_CAPACITY: u8 = 5;
/// Connection capacity of every vertex created by subdivision.
pub const MIDPOINT_CAPACITY: u8 = 6;

/// A mesh vertex: its position and the nodes it is directly connected to.
///
/// The connection list never holds more than `capacity` entries and never
/// refers to the node itself.
#[derive(Clone, Debug)]
pub struct Node {
    point: SpherePoint,
    capacity: u8,
    connections: SmallVec<[NodeId; 6]>,
}

impl Node {
    #[must_use]
    pub fn new(point: SpherePoint, capacity: u8) -> Self {
        Self {
            point,
            capacity,
            connections: SmallVec::new(),
        }
    }

    #[must_use]
    pub fn point(&self) -> SpherePoint {
        self.point
    }

    #[must_use]
    pub fn capacity(&self) -> u8 {
        self.capacity
    }

    #[must_use]
    pub fn connections(&self) -> &[NodeId] {
        &self.connections
    }

    /// True once every connection slot is filled.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.connections.len() >= usize::from(self.capacity)
    }

    /// Add `other` unless it is already present or the list is full.
    ///
    /// Returns whether the connection was added.
    pub(crate) fn connect(&mut self, other: NodeId) -> bool {
        if self.is_full() || self.connections.contains(&other) {
            return false;
        }
        self.connections.push(other);
        true
    }
}
