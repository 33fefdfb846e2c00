//! Simulation lifecycle and the diffusion step.

use std::f64::consts::PI;

use pluvial_geodesic::{Mesh, NodeId};
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::control::{CancelToken, ProgressSink};
use crate::node::HydroNode;
use crate::sampler::PlanetSampler;
use crate::smoothing::SmoothingCache;
use crate::HydrologyError;

/// Subdivision depth of the simulation mesh.
pub const DEFAULT_SUBDIVISIONS: usize = 5;
/// Fixed number of diffusion steps per run.
pub const DEFAULT_ITERATIONS: usize = 1600;

/// Iterations between periodic debug reports.
const REPORT_INTERVAL: usize = 100;

/// Mesh resolution and run length.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SimulationParams {
    pub subdivisions: usize,
    pub iterations: usize,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            subdivisions: DEFAULT_SUBDIVISIONS,
            iterations: DEFAULT_ITERATIONS,
        }
    }
}

/// Where a simulation is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimulationState {
    /// Initialized, no run started.
    Ready,
    Running,
    /// The last run performed every iteration.
    Done,
    /// The last run stopped early on cancellation.
    Aborted,
}

/// Result of [`Simulation::run`].
#[must_use]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    Completed { iterations: usize },
    /// Cancelled; the state reflects the last fully applied iteration.
    Aborted { completed_iterations: usize },
}

impl RunOutcome {
    #[must_use]
    pub fn is_complete(self) -> bool {
        matches!(self, Self::Completed { .. })
    }
}

/// A per-node field that can be queried.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    Cloud,
    Precipitate,
}

impl Field {
    #[must_use]
    pub fn read(self, node: &HydroNode) -> f64 {
        match self {
            Self::Cloud => node.cloud,
            Self::Precipitate => node.precipitate,
        }
    }
}

/// A water cycle simulated on the finest layer of a geodesic mesh.
///
/// Ocean nodes act as reservoirs. Each iteration moves water between
/// surface and cloud at every node, diffuses cloud to connected nodes and
/// returns all drained runoff to the reservoirs, so total water is
/// conserved whenever at least one reservoir exists.
#[derive(Debug)]
pub struct Simulation {
    pub(crate) mesh: Mesh,
    pub(crate) nodes: Vec<HydroNode>,
    radius: f64,
    pressure_kpa: f64,
    params: SimulationParams,
    water_sources: usize,
    iterations_completed: usize,
    state: SimulationState,
    cancel: CancelToken,
    pub(crate) smoothing: SmoothingCache,
}

impl Simulation {
    /// Build the default-depth mesh and initialize it from `sampler`.
    pub fn create<S: PlanetSampler + ?Sized>(
        sampler: &S,
        pressure_kpa: f64,
    ) -> Result<Self, HydrologyError> {
        Self::with_params(sampler, pressure_kpa, SimulationParams::default())
    }

    /// Build a mesh of `params.subdivisions` and initialize it from
    /// `sampler`. No iterations are run.
    ///
    /// Sampler output is stored as given; non-finite values propagate into
    /// the node state.
    pub fn with_params<S: PlanetSampler + ?Sized>(
        sampler: &S,
        pressure_kpa: f64,
        params: SimulationParams,
    ) -> Result<Self, HydrologyError> {
        if params.iterations == 0 {
            return Err(HydrologyError::ZeroIterations);
        }
        if !(pressure_kpa.is_finite() && pressure_kpa > 0.0) {
            return Err(HydrologyError::InvalidPressure(pressure_kpa));
        }

        let mesh = Mesh::new(params.subdivisions)?;
        let layer = mesh.finest();
        let radius = sampler.radius();
        let precision = (4.0 * PI * radius * radius / layer.node_count() as f64).sqrt();

        let mut nodes: Vec<HydroNode> = layer
            .nodes()
            .par_iter()
            .map(|node| {
                let p = node.point();
                let sample = sampler.sample(p.longitude, p.latitude, precision);
                HydroNode::from_surface(&sample, pressure_kpa)
            })
            .collect();

        // Classify against the sampled ocean mask, not the partly demoted one.
        let coastal: Vec<usize> = (0..nodes.len())
            .into_par_iter()
            .filter(|&i| {
                nodes[i].is_water_source()
                    && layer.nodes()[i]
                        .connections()
                        .iter()
                        .any(|c| !nodes[c.index()].is_water_source())
            })
            .collect();
        for &i in &coastal {
            nodes[i].demote_to_land();
        }

        let water_sources: usize = nodes
            .par_iter_mut()
            .filter(|n| n.is_water_source())
            .map(|n| {
                n.fill_reservoir();
                1
            })
            .sum();

        let sim = Self {
            mesh,
            nodes,
            radius,
            pressure_kpa,
            params,
            water_sources,
            iterations_completed: 0,
            state: SimulationState::Ready,
            cancel: CancelToken::new(),
            smoothing: SmoothingCache::default(),
        };
        info!(
            nodes = sim.node_count(),
            water_sources,
            coastal = coastal.len(),
            percent_ocean = sim.percent_ocean(),
            precision_m = precision,
            "hydrology simulation initialised"
        );
        Ok(sim)
    }

    /// Run `params.iterations` steps, or fewer if cancelled.
    ///
    /// The smoothing cache is cleared first. `progress` receives one equal
    /// increment per completed iteration, the last one rounded so the total
    /// is exactly `1.0`.
    pub fn run(&mut self, mut progress: Option<&mut dyn ProgressSink>) -> RunOutcome {
        self.smoothing.clear();
        self.state = SimulationState::Running;
        let total = self.params.iterations;
        let increment = 1.0 / total as f64;
        let mut reported = 0.0;
        info!(iterations = total, nodes = self.node_count(), "simulation run started");

        for i in 0..total {
            if self.cancel.is_cancelled() {
                self.state = SimulationState::Aborted;
                warn!(completed_iterations = i, of = total, "simulation run aborted");
                return RunOutcome::Aborted {
                    completed_iterations: i,
                };
            }
            self.iterate();
            self.iterations_completed += 1;

            if let Some(sink) = progress.as_deref_mut() {
                let step = if i + 1 == total { 1.0 - reported } else { increment };
                reported += step;
                sink.report(step);
            }
            if (i + 1) % REPORT_INTERVAL == 0 {
                debug!(iteration = i + 1, total_water = self.total_water(), "hydrology iteration");
            }
        }

        self.state = SimulationState::Done;
        info!(iterations = total, total_water = self.total_water(), "simulation run complete");
        RunOutcome::Completed { iterations: total }
    }

    /// Run exactly one iteration outside of [`run`](Self::run).
    pub fn step(&mut self) {
        self.smoothing.clear();
        self.iterate();
        self.iterations_completed += 1;
    }

    /// One diffusion step: gather every node's deltas concurrently, then
    /// apply them all.
    fn iterate(&mut self) {
        let layer = self.mesh.finest();
        let nodes = &self.nodes;

        let drained: f64 = nodes
            .par_iter()
            .zip(layer.nodes().par_iter())
            .map(|(node, topology)| {
                let mut d_cloud =
                    node.evaporativity * node.precipitate - node.precipitivity * node.cloud;
                let d_precipitate = node.precipitivity * node.cloud
                    - node.evaporativity * node.precipitate
                    - node.runoff;

                let connections = topology.connections();
                if !connections.is_empty() {
                    let transfer = node.conductivity * node.cloud / connections.len() as f64;
                    for c in connections {
                        nodes[c.index()].push_cloud(transfer);
                        d_cloud -= transfer;
                    }
                }
                node.push_cloud(d_cloud);
                node.push_precipitate(d_precipitate);
                node.runoff
            })
            .sum();

        // With no reservoir to refill, drained water leaves the system.
        if self.water_sources > 0 {
            let share = drained / self.water_sources as f64;
            nodes
                .par_iter()
                .filter(|n| n.is_water_source())
                .for_each(|n| n.push_precipitate(share));
        }

        self.nodes.par_iter_mut().for_each(HydroNode::apply_pending);
    }

    /// Handle for cancelling a run from another thread.
    #[must_use]
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    #[must_use]
    pub fn state(&self) -> SimulationState {
        self.state
    }

    #[must_use]
    pub fn params(&self) -> SimulationParams {
        self.params
    }

    #[must_use]
    pub fn pressure_kpa(&self) -> f64 {
        self.pressure_kpa
    }

    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    #[must_use]
    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// Iterations applied since creation, across all runs and steps.
    #[must_use]
    pub fn iterations_completed(&self) -> usize {
        self.iterations_completed
    }

    #[must_use]
    pub fn water_source_count(&self) -> usize {
        self.water_sources
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Hydrology state of every finest-layer node, indexed by node id.
    #[must_use]
    pub fn nodes(&self) -> &[HydroNode] {
        &self.nodes
    }

    /// # Panics
    ///
    /// Panics if `id` is not a finest-layer node.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &HydroNode {
        &self.nodes[id.index()]
    }

    /// Mutable access for seeding experiments. Invalidates smoothed values.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not a finest-layer node.
    pub fn node_mut(&mut self, id: NodeId) -> &mut HydroNode {
        self.smoothing.clear();
        &mut self.nodes[id.index()]
    }

    /// Sum of cloud and surface water over all nodes.
    #[must_use]
    pub fn total_water(&self) -> f64 {
        self.nodes.par_iter().map(HydroNode::water).sum()
    }

    /// Share of nodes acting as ocean reservoirs, in percent.
    #[must_use]
    pub fn percent_ocean(&self) -> f64 {
        100.0 * self.water_sources as f64 / self.nodes.len() as f64
    }
}
