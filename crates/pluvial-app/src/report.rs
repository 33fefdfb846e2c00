//! Summary statistics over a longitude/latitude sampling of the field.

use std::f64::consts::{PI, TAU};
use std::fmt;

use pluvial_hydrology::Simulation;
use pluvial_math::SpherePoint;
use rayon::prelude::*;

/// Cell-centred grid points, row-major from the south-west corner.
pub fn grid_points(width: u32, height: u32) -> impl Iterator<Item = SpherePoint> {
    (0..height).flat_map(move |j| {
        (0..width).map(move |i| {
            let lon = -PI + TAU * (f64::from(i) + 0.5) / f64::from(width);
            let lat = -PI / 2.0 + PI * (f64::from(j) + 0.5) / f64::from(height);
            SpherePoint::new(lon, lat)
        })
    })
}

/// Precipitation at every grid point, sampled in parallel.
pub fn sample_precipitation(sim: &Simulation, width: u32, height: u32, smoothed: bool) -> Vec<f64> {
    let points: Vec<SpherePoint> = grid_points(width, height).collect();
    points
        .par_iter()
        .map(|&p| {
            if smoothed {
                sim.query_smoothed_precipitate(p)
            } else {
                sim.query_precipitate(p)
            }
        })
        .collect()
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridSummary {
    pub samples: usize,
    pub min: f64,
    pub mean: f64,
    pub max: f64,
}

impl GridSummary {
    /// `None` for an empty slice.
    #[must_use]
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let (min, max, sum) = values.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY, 0.0),
            |(lo, hi, sum), &v| (lo.min(v), hi.max(v), sum + v),
        );
        Some(Self {
            samples: values.len(),
            min,
            mean: sum / values.len() as f64,
            max,
        })
    }
}

impl fmt::Display for GridSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "min {:.3}  mean {:.3}  max {:.3}  ({} samples)",
            self.min, self.mean, self.max, self.samples
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pluvial_hydrology::{ConstantPlanet, SimulationParams};

    #[test]
    fn test_grid_points_cover_both_hemispheres() {
        let points: Vec<_> = grid_points(8, 4).collect();
        assert_eq!(points.len(), 32);
        assert!(points.iter().all(|p| p.longitude.abs() < PI && p.latitude.abs() < PI / 2.0));
        assert!((points[0].longitude + PI * 7.0 / 8.0).abs() < 1e-12);
        assert!((points[0].latitude + PI * 3.0 / 8.0).abs() < 1e-12);
        assert!((points[31].latitude - PI * 3.0 / 8.0).abs() < 1e-12);
    }

    #[test]
    fn test_summary_statistics() {
        let summary = GridSummary::from_values(&[2.0, -1.0, 5.0, 2.0]).unwrap();
        assert_eq!(summary.samples, 4);
        assert_eq!(summary.min, -1.0);
        assert_eq!(summary.max, 5.0);
        assert_eq!(summary.mean, 2.0);
        assert_eq!(GridSummary::from_values(&[]), None);
        assert_eq!(
            summary.to_string(),
            "min -1.000  mean 2.000  max 5.000  (4 samples)"
        );
    }

    #[test]
    fn test_uniform_ocean_grid() {
        let params = SimulationParams {
            subdivisions: 2,
            iterations: 1,
        };
        let sim = Simulation::with_params(&ConstantPlanet::ocean(), 101.0, params).unwrap();
        for smoothed in [false, true] {
            let values = sample_precipitation(&sim, 12, 6, smoothed);
            let summary = GridSummary::from_values(&values).unwrap();
            assert_eq!(summary.samples, 72);
            assert!((summary.min - 500.0).abs() < 1e-8, "smoothed={smoothed}: {summary}");
            assert!((summary.max - 500.0).abs() < 1e-8, "smoothed={smoothed}: {summary}");
        }
    }
}
