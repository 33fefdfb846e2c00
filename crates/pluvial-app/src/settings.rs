//! Translation of loaded configuration into simulation inputs.

use std::time::Duration;

use pluvial_config::{PlanetConfig, SimulationConfig};
use pluvial_hydrology::{NoiseParams, SimulationParams};

#[must_use]
pub fn simulation_params(config: &SimulationConfig) -> SimulationParams {
    SimulationParams {
        subdivisions: config.subdivisions,
        iterations: config.iterations,
    }
}

/// Octave spacing is not configurable; it keeps the noise defaults.
#[must_use]
pub fn noise_params(config: &PlanetConfig) -> NoiseParams {
    NoiseParams {
        seed: config.seed,
        radius_m: config.radius_m,
        sea_level_m: config.sea_level_m,
        mountain_height_m: config.mountain_height_m,
        base_frequency: config.base_frequency,
        octaves: config.octaves,
        equatorial_temperature_c: config.equatorial_temperature_c,
        polar_temperature_delta_c: config.polar_temperature_delta_c,
        lapse_rate_c_per_m: config.lapse_rate_c_per_m,
        ..NoiseParams::default()
    }
}

/// Configured thread count, with 0 meaning one per logical CPU.
#[must_use]
pub fn worker_threads(config: &SimulationConfig) -> usize {
    match config.threads {
        0 => num_cpus::get().max(1),
        n => n,
    }
}

#[must_use]
pub fn time_limit(config: &SimulationConfig) -> Option<Duration> {
    (config.time_limit_secs > 0).then(|| Duration::from_secs(config.time_limit_secs))
}

/// Size the global rayon pool. Must run before any parallel work.
pub fn init_thread_pool(threads: usize) -> Result<(), rayon::ThreadPoolBuildError> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(|i| format!("pluvial-worker-{i}"))
        .build_global()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulation_params_follow_config() {
        let config = SimulationConfig {
            iterations: 250,
            subdivisions: 4,
            ..SimulationConfig::default()
        };
        assert_eq!(
            simulation_params(&config),
            SimulationParams {
                subdivisions: 4,
                iterations: 250
            }
        );
    }

    #[test]
    fn test_default_configs_match_library_defaults() {
        assert_eq!(
            simulation_params(&SimulationConfig::default()),
            SimulationParams::default()
        );
        let params = noise_params(&PlanetConfig::default());
        let reference = NoiseParams::default();
        assert_eq!(params.seed, reference.seed);
        assert_eq!(params.radius_m, reference.radius_m);
        assert_eq!(params.octaves, reference.octaves);
        assert_eq!(params.lapse_rate_c_per_m, reference.lapse_rate_c_per_m);
        assert_eq!(params.lacunarity, reference.lacunarity);
    }

    #[test]
    fn test_noise_params_carry_planet_settings() {
        let config = PlanetConfig {
            seed: 77,
            radius_m: 3_389_500.0,
            sea_level_m: 150.0,
            ..PlanetConfig::default()
        };
        let params = noise_params(&config);
        assert_eq!(params.seed, 77);
        assert_eq!(params.radius_m, 3_389_500.0);
        assert_eq!(params.sea_level_m, 150.0);
    }

    #[test]
    fn test_worker_threads() {
        let mut config = SimulationConfig::default();
        assert!(worker_threads(&config) >= 1);
        config.threads = 3;
        assert_eq!(worker_threads(&config), 3);
    }

    #[test]
    fn test_time_limit() {
        let mut config = SimulationConfig::default();
        assert_eq!(time_limit(&config), None);
        config.time_limit_secs = 90;
        assert_eq!(time_limit(&config), Some(Duration::from_secs(90)));
    }
}
