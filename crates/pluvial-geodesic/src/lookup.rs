//! Nearest-cell search.
//!
//! A cell's score for a query point is the mean great-circle distance from
//! the point to the cell's three corners; the lowest score wins. This picks
//! the containing cell for all but points close to a cell boundary, where a
//! neighbor may win instead.

use pluvial_math::{SpherePoint, angular_distance};

use crate::{CellId, Layer, Mesh};

impl Layer {
    /// Mean angular distance from `point` to the corners of `cell`.
    #[must_use]
    pub fn score(&self, cell: CellId, point: SpherePoint) -> f64 {
        self.corner_points(cell)
            .iter()
            .map(|c| angular_distance(point, *c))
            .sum::<f64>()
            / 3.0
    }

    /// Best-scoring cell among `candidates`. Earlier candidates win ties.
    #[must_use]
    pub fn nearest_of(
        &self,
        point: SpherePoint,
        candidates: impl IntoIterator<Item = CellId>,
    ) -> Option<CellId> {
        let mut best: Option<(CellId, f64)> = None;
        for id in candidates {
            let s = self.score(id, point);
            if best.is_none_or(|(_, b)| s.total_cmp(&b).is_lt()) {
                best = Some((id, s));
            }
        }
        best.map(|(id, _)| id)
    }

    /// Best-scoring cell of the whole layer, by linear scan.
    #[must_use]
    pub fn find_cell(&self, point: SpherePoint) -> Option<CellId> {
        self.nearest_of(point, (0..self.cell_count() as u32).map(CellId))
    }
}

impl Mesh {
    /// Best-scoring cell of layer `depth`, by linear scan.
    #[must_use]
    pub fn find_cell(&self, point: SpherePoint, depth: usize) -> Option<CellId> {
        self.layer(depth)?.find_cell(point)
    }

    /// Descend from the base layer to `depth`, scanning only the four
    /// children of the previous pick at each step.
    #[must_use]
    pub fn locate_at(&self, point: SpherePoint, depth: usize) -> Option<CellId> {
        let mut current = self.layer(0)?.find_cell(point)?;
        for d in 1..=depth {
            let children = self.layer(d - 1)?.cell(current).children()?;
            current = self.layer(d)?.nearest_of(point, children)?;
        }
        Some(current)
    }

    /// Hierarchical lookup on the finest layer.
    ///
    /// # Panics
    ///
    /// The layers tile the whole sphere, so a lookup that finds no cell means
    /// the mesh is corrupt; this panics rather than returning a value.
    #[must_use]
    pub fn locate(&self, point: SpherePoint) -> CellId {
        match self.locate_at(point, self.depth()) {
            Some(id) => id,
            None => panic!(
                "mesh invariant violated: no cell found for ({}, {}) at depth {}",
                point.longitude,
                point.latitude,
                self.depth()
            ),
        }
    }
}
