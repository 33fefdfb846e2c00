//! One level of the subdivision hierarchy.

use pluvial_math::SpherePoint;

use crate::{Cell, CellId, Node, NodeId};

/// Where a node of a layer came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeOrigin {
    /// An original icosahedron vertex.
    Base,
    /// Carried over unchanged from the same id in the parent layer.
    Corner(NodeId),
    /// Created on the edge between two parent-layer nodes.
    Midpoint(NodeId, NodeId),
}

/// Node and cell arenas for one subdivision depth.
#[derive(Clone, Debug)]
pub struct Layer {
    pub(crate) nodes: Vec<Node>,
    pub(crate) cells: Vec<Cell>,
    pub(crate) origins: Vec<NodeOrigin>,
}

impl Layer {
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[must_use]
    pub fn origins(&self) -> &[NodeOrigin] {
        &self.origins
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// # Panics
    ///
    /// Panics if `id` does not belong to this layer.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    /// # Panics
    ///
    /// Panics if `id` does not belong to this layer.
    #[must_use]
    pub fn cell(&self, id: CellId) -> &Cell {
        &self.cells[id.index()]
    }

    /// Surface positions of a cell's three corners, in corner order.
    #[must_use]
    pub fn corner_points(&self, id: CellId) -> [SpherePoint; 3] {
        self.cell(id).corners.map(|n| self.node(n).point())
    }
}
