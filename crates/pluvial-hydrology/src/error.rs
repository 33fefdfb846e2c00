//! Error types for simulation setup.

use pluvial_geodesic::MeshError;

/// Errors raised while constructing a [`Simulation`](crate::Simulation).
#[derive(Debug, thiserror::Error)]
pub enum HydrologyError {
    #[error("failed to build mesh: {0}")]
    Mesh(#[from] MeshError),

    #[error("iteration count must be at least 1")]
    ZeroIterations,

    #[error("atmospheric pressure must be positive and finite, got {0} kPa")]
    InvalidPressure(f64),
}
