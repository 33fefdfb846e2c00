//! Water cycle simulation on a geodesic sphere mesh.
//!
//! A [`Simulation`] samples a [`PlanetSampler`] at every node of the finest
//! mesh layer, iterates an evaporation, precipitation and cloud diffusion
//! step, and answers point queries for the resulting moisture fields with
//! barycentric or tricubic interpolation.

mod accumulator;
pub mod coefficients;
mod control;
mod error;
mod node;
mod noise_planet;
mod query;
mod sampler;
mod simulation;
pub mod smoothing;

pub use accumulator::AtomicF64;
pub use control::{CancelToken, ProgressSink, accumulator_sink, channel_sink};
pub use error::HydrologyError;
pub use node::HydroNode;
pub use noise_planet::{NoiseParams, NoisePlanet};
pub use sampler::{ConstantPlanet, PlanetSampler, SurfaceSample};
pub use simulation::{
    DEFAULT_ITERATIONS, DEFAULT_SUBDIVISIONS, Field, RunOutcome, Simulation, SimulationParams,
    SimulationState,
};
