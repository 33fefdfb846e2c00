//! Hydrology state carried by each finest-layer mesh node.

use crate::accumulator::AtomicF64;
use crate::coefficients::{self, OCEAN_PRECIPITATE, PRECIPITIVITY};
use crate::sampler::SurfaceSample;

/// Water and transport coefficients at one node.
///
/// Changes computed during an iteration are gathered in two pending
/// accumulators and applied only once every node has been visited.
#[derive(Debug, Default)]
pub struct HydroNode {
    /// Airborne moisture.
    pub cloud: f64,
    /// Moisture on the surface.
    pub precipitate: f64,
    pub conductivity: f64,
    pub evaporativity: f64,
    pub precipitivity: f64,
    pub runoff: f64,
    is_water_source: bool,
    pending_cloud: AtomicF64,
    pending_precipitate: AtomicF64,
}

impl HydroNode {
    /// Derive the node's coefficients from its surface sample.
    #[must_use]
    pub fn from_surface(sample: &SurfaceSample, pressure_kpa: f64) -> Self {
        Self {
            cloud: 0.0,
            precipitate: 0.0,
            conductivity: coefficients::conductivity(sample.roughness),
            evaporativity: coefficients::evaporativity(sample.temperature, pressure_kpa),
            precipitivity: PRECIPITIVITY,
            runoff: coefficients::runoff(sample.altitude),
            is_water_source: coefficients::is_ocean(sample.altitude),
            pending_cloud: AtomicF64::default(),
            pending_precipitate: AtomicF64::default(),
        }
    }

    /// Whether this node is an ocean reservoir refilled from global runoff.
    /// Fixed once the simulation is initialized.
    #[must_use]
    pub fn is_water_source(&self) -> bool {
        self.is_water_source
    }

    pub(crate) fn demote_to_land(&mut self) {
        self.is_water_source = false;
    }

    /// Turn a water-source node into a full, drain-free reservoir.
    pub(crate) fn fill_reservoir(&mut self) {
        self.runoff = 0.0;
        self.precipitate = OCEAN_PRECIPITATE;
    }

    pub(crate) fn push_cloud(&self, delta: f64) {
        self.pending_cloud.add(delta);
    }

    pub(crate) fn push_precipitate(&self, delta: f64) {
        self.pending_precipitate.add(delta);
    }

    /// Fold the pending deltas into the current state and zero them.
    pub(crate) fn apply_pending(&mut self) {
        self.cloud += self.pending_cloud.take();
        self.precipitate += self.pending_precipitate.take();
    }

    /// Total water held at this node.
    #[must_use]
    pub fn water(&self) -> f64 {
        self.cloud + self.precipitate
    }
}
