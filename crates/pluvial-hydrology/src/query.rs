//! Continuous field queries over the discrete node state.

use pluvial_geodesic::CellId;
use pluvial_math::{Point3, SpherePoint, barycentric, tricubic};

use crate::smoothing::{GRID_MULTIPLIER, LatticeCache};
use crate::{Field, Simulation};

impl Simulation {
    /// Barycentric value of `field` at `point` within finest-layer `cell`.
    #[must_use]
    pub fn interpolate_in_cell(&self, cell: CellId, point: SpherePoint, field: Field) -> f64 {
        let layer = self.mesh.finest();
        let values = layer
            .cell(cell)
            .corners()
            .map(|n| field.read(&self.nodes[n.index()]));
        barycentric(point, layer.corner_points(cell), values)
    }

    /// Barycentric value of `field` in the cell found for `point`.
    ///
    /// Continuous across cells but with visible facets.
    ///
    /// The lookup scores cells by mean distance to their corners, so a
    /// point sitting exactly on a node can resolve to a cell that does not
    /// have that node as a corner. The result is then that cell's
    /// extrapolated value, not the node's stored one. Use
    /// [`interpolate_in_cell`](Self::interpolate_in_cell) with an adjacent
    /// cell when corner exactness matters.
    ///
    /// # Panics
    ///
    /// Panics if the mesh lookup finds no cell, which the mesh construction
    /// rules out.
    #[must_use]
    pub fn value_at(&self, point: SpherePoint, field: Field) -> f64 {
        let cell = self.mesh.locate(point);
        self.interpolate_in_cell(cell, point, field)
    }

    /// Tricubic value of `field` at `point`, interpolated from cached
    /// [`value_at`](Self::value_at) samples on a 3D lattice.
    #[must_use]
    pub fn cubic_value_at(&self, point: SpherePoint, field: Field) -> f64 {
        let p = point.to_point3();
        let (x, y, z) = (p.x * GRID_MULTIPLIER, p.y * GRID_MULTIPLIER, p.z * GRID_MULTIPLIER);
        let base = [x.floor() as i64 - 1, y.floor() as i64 - 1, z.floor() as i64 - 1];
        let cache = self.smoothing.field(field);

        let mut samples = [[[0.0; 4]; 4]; 4];
        for (i, slab) in samples.iter_mut().enumerate() {
            for (j, row) in slab.iter_mut().enumerate() {
                for (k, value) in row.iter_mut().enumerate() {
                    let at = [base[0] + i as i64, base[1] + j as i64, base[2] + k as i64];
                    *value = self.lattice_value(cache, at, field);
                }
            }
        }
        tricubic(x, y, z, &samples)
    }

    fn lattice_value(&self, cache: &LatticeCache, [x, y, z]: [i64; 3], field: Field) -> f64 {
        cache.get_or_compute(x, y, z, || {
            let direction = Point3::new(x as f64, y as f64, z as f64);
            self.value_at(direction.to_sphere(), field)
        })
    }

    #[must_use]
    pub fn query_precipitate(&self, point: SpherePoint) -> f64 {
        self.value_at(point, Field::Precipitate)
    }

    #[must_use]
    pub fn query_cloud(&self, point: SpherePoint) -> f64 {
        self.value_at(point, Field::Cloud)
    }

    #[must_use]
    pub fn query_smoothed_precipitate(&self, point: SpherePoint) -> f64 {
        self.cubic_value_at(point, Field::Precipitate)
    }

    #[must_use]
    pub fn query_smoothed_cloud(&self, point: SpherePoint) -> f64 {
        self.cubic_value_at(point, Field::Cloud)
    }
}

#[cfg(test)]
mod tests {
    use crate::sampler::ConstantPlanet;
    use crate::{Field, Simulation, SimulationParams};
    use pluvial_geodesic::CellId;
    use pluvial_math::SpherePoint;

    fn ocean(subdivisions: usize) -> Simulation {
        let params = SimulationParams {
            subdivisions,
            iterations: 5,
        };
        Simulation::with_params(&ConstantPlanet::ocean(), 101.0, params).unwrap()
    }

    #[test]
    fn test_uniform_field_queries() {
        let sim = ocean(2);
        for &(lon, lat) in &[(0.0, 0.0), (1.0, 0.5), (-2.5, -1.2), (3.1, 1.5)] {
            let p = SpherePoint::new(lon, lat);
            assert!((sim.query_precipitate(p) - 500.0).abs() < 1e-9);
            assert!(sim.query_cloud(p).abs() < 1e-12);
            let smooth = sim.query_smoothed_precipitate(p);
            assert!((smooth - 500.0).abs() < 1e-8, "smoothed {smooth} at {p:?}");
            assert!(sim.query_smoothed_cloud(p).abs() < 1e-12);
        }
    }

    #[test]
    fn test_corner_values_are_exact() {
        let mut sim = ocean(2);
        for i in 0..sim.node_count() {
            sim.node_mut(pluvial_geodesic::NodeId(i as u32)).precipitate = i as f64 * 1.5;
        }
        let layer = sim.mesh().finest();
        for (c, cell) in layer.cells().iter().enumerate() {
            for (k, corner) in cell.corners().iter().enumerate() {
                let point = layer.node(*corner).point();
                let got = sim.interpolate_in_cell(CellId(c as u32), point, Field::Precipitate);
                assert_eq!(got, corner.index() as f64 * 1.5, "cell {c} corner {k}");
            }
        }
    }

    #[test]
    fn test_step_refreshes_smoothed_values() {
        let mut sim = ocean(2);
        let p = SpherePoint::new(0.4, 0.2);
        assert!((sim.query_smoothed_precipitate(p) - 500.0).abs() < 1e-8);
        sim.step();
        let raw = sim.query_precipitate(p);
        let smooth = sim.query_smoothed_precipitate(p);
        assert!(raw < 490.0, "step did not evaporate: {raw}");
        assert!((smooth - raw).abs() < 1e-3 * raw, "stale smoothed value {smooth} vs {raw}");
    }
}
