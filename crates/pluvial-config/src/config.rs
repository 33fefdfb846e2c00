//! Configuration sections, their defaults, and RON persistence.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const CONFIG_FILE: &str = "config.ron";

/// Deepest mesh the simulation will build.
const MAX_SUBDIVISIONS: usize = 8;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub simulation: SimulationConfig,
    pub planet: PlanetConfig,
    pub output: OutputConfig,
    pub debug: DebugConfig,
}

/// Water cycle simulation settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    /// Surface atmospheric pressure in kPa.
    pub pressure_kpa: f64,
    /// Diffusion steps per run.
    pub iterations: usize,
    /// Geodesic mesh subdivision depth (0-8).
    pub subdivisions: usize,
    /// Worker threads for the simulation pool (0 = one per logical CPU).
    pub threads: usize,
    /// Cancel the run after this many seconds (0 = no limit).
    pub time_limit_secs: u64,
}

/// Procedural planet settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlanetConfig {
    /// World seed for deterministic terrain.
    pub seed: u64,
    /// Planet radius in meters.
    pub radius_m: f64,
    /// Raw terrain height treated as sea level, in meters.
    pub sea_level_m: f64,
    /// Relief of the roughest terrain, in meters.
    pub mountain_height_m: f64,
    /// Frequency of the broadest terrain octave, in cycles per radius.
    pub base_frequency: f64,
    /// Maximum terrain noise octaves.
    pub octaves: u32,
    /// Sea-level equatorial temperature in °C.
    pub equatorial_temperature_c: f64,
    /// Equator-to-pole temperature change in °C.
    pub polar_temperature_delta_c: f64,
    /// Temperature change per meter of altitude.
    pub lapse_rate_c_per_m: f64,
}

/// Summary grid settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Longitude samples in the summary grid.
    pub grid_width: u32,
    /// Latitude samples in the summary grid.
    pub grid_height: u32,
    /// Sample with tricubic smoothing instead of raw barycentric values.
    pub smoothed: bool,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Also write JSON logs to a file in release builds.
    pub log_to_file: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            pressure_kpa: 101.0,
            iterations: 1600,
            subdivisions: 5,
            threads: 0,
            time_limit_secs: 0,
        }
    }
}

impl Default for PlanetConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            radius_m: 6_371_000.0,
            sea_level_m: 0.0,
            mountain_height_m: 6000.0,
            base_frequency: 1.5,
            octaves: 6,
            equatorial_temperature_c: 28.0,
            polar_temperature_delta_c: -48.0,
            lapse_rate_c_per_m: -0.0065,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            grid_width: 72,
            grid_height: 36,
            smoothed: true,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_to_file: false,
        }
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            let config = Self::read(config_dir)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(2)
            .separate_tuple_members(true)
            .enumerate_arrays(false);
        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(config_dir.join(CONFIG_FILE), serialized).map_err(ConfigError::WriteError)
    }

    /// Re-read the file; `Some(new_config)` when it differs from `self`.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let new_config = Self::read(config_dir)?;
        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }

    fn read(config_dir: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(config_dir.join(CONFIG_FILE))
            .map_err(ConfigError::ReadError)?;
        ron::from_str(&contents).map_err(ConfigError::ParseError)
    }

    /// Reject settings the generator cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let sim = &self.simulation;
        if !(sim.pressure_kpa.is_finite() && sim.pressure_kpa > 0.0) {
            return Err(invalid(
                "simulation.pressure_kpa",
                format!("{} is not a positive pressure", sim.pressure_kpa),
            ));
        }
        if sim.iterations == 0 {
            return Err(invalid("simulation.iterations", "must be at least 1".to_string()));
        }
        if sim.subdivisions > MAX_SUBDIVISIONS {
            return Err(invalid(
                "simulation.subdivisions",
                format!("{} exceeds the maximum of {MAX_SUBDIVISIONS}", sim.subdivisions),
            ));
        }
        if !(self.planet.radius_m.is_finite() && self.planet.radius_m > 0.0) {
            return Err(invalid(
                "planet.radius_m",
                format!("{} is not a positive radius", self.planet.radius_m),
            ));
        }
        if self.output.grid_width == 0 || self.output.grid_height == 0 {
            return Err(invalid("output", "grid dimensions must be non-zero".to_string()));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: String) -> ConfigError {
    ConfigError::Invalid { field, reason }
}
