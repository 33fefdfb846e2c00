//! Configuration for the pluvial moisture generator.
//!
//! Settings persist as `config.ron` in a config directory. Missing fields
//! fall back to defaults, unknown fields are ignored, and command-line
//! flags override whatever was loaded.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{Config, DebugConfig, OutputConfig, PlanetConfig, SimulationConfig};
pub use error::ConfigError;
