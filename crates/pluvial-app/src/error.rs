use pluvial_config::ConfigError;
use pluvial_hydrology::HydrologyError;

use crate::platform::PlatformError;

/// Anything that stops the generator before it can print a summary.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to size the worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error(transparent)]
    Hydrology(#[from] HydrologyError),

    #[error("failed to spawn simulation thread: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("simulation thread panicked")]
    WorkerPanicked,
}
