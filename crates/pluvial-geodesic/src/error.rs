//! Error types for mesh construction.

/// Errors raised while building or querying a [`Mesh`](crate::Mesh).
#[derive(Debug, thiserror::Error)]
pub enum MeshError {
    #[error("subdivision depth {requested} exceeds the maximum of {max}")]
    DepthTooLarge { requested: usize, max: usize },

    #[error("expected one value per base node ({expected}), got {actual}")]
    ValueCountMismatch { expected: usize, actual: usize },
}
