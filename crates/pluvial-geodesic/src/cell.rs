//! Triangular mesh faces.

use pluvial_math::{Point3, SpherePoint};

use crate::{CellId, NodeId};

/// A triangular face.
///
/// Corners are wound counter-clockwise seen from outside the sphere.
/// `neighbors[j]` is the cell across the edge opposite `corners[j]`, i.e.
/// the one sharing `corners[(j + 1) % 3]` and `corners[(j + 2) % 3]`.
#[derive(Clone, Debug)]
pub struct Cell {
    pub(crate) corners: [NodeId; 3],
    pub(crate) neighbors: [Option<CellId>; 3],
    pub(crate) children: Option<[CellId; 4]>,
    pub(crate) centroid: SpherePoint,
}

impl Cell {
    pub(crate) fn new(corners: [NodeId; 3], points: [SpherePoint; 3]) -> Self {
        Self {
            corners,
            neighbors: [None; 3],
            children: None,
            centroid: centroid(points),
        }
    }

    #[must_use]
    pub fn corners(&self) -> [NodeId; 3] {
        self.corners
    }

    #[must_use]
    pub fn neighbors(&self) -> [Option<CellId>; 3] {
        self.neighbors
    }

    /// The four cells this one was split into. `None` on the finest layer.
    #[must_use]
    pub fn children(&self) -> Option<[CellId; 4]> {
        self.children
    }

    #[must_use]
    pub fn centroid(&self) -> SpherePoint {
        self.centroid
    }

    /// Slot of `neighbor` in this cell's neighbor array.
    #[must_use]
    pub fn neighbor_slot(&self, neighbor: CellId) -> Option<usize> {
        self.neighbors.iter().position(|n| *n == Some(neighbor))
    }
}

/// Projection of the planar centroid of three surface points.
fn centroid(points: [SpherePoint; 3]) -> SpherePoint {
    let sum = points
        .iter()
        .fold(glam::DVec3::ZERO, |acc, p| acc + p.to_point3().to_dvec3());
    Point3::from(sum).to_sphere()
}
