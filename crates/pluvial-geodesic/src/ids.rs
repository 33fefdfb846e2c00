//! Integer handles into a layer's node and cell arenas.

use std::fmt;

/// Index of a node within one mesh layer.
///
/// Node ids are stable across layers: a node created at layer `d` keeps the
/// same id in every deeper layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

/// Index of a cell within one mesh layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId(pub u32);

impl NodeId {
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl CellId {
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The `k`th of the four cells this cell splits into one layer down.
    #[must_use]
    pub const fn child(self, k: u32) -> CellId {
        CellId(self.0 * 4 + k)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cell#{}", self.0)
    }
}
