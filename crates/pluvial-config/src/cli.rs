//! Command-line argument parsing for the `pluvial` generator.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Pluvial command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "pluvial", about = "Planetary moisture field generator")]
pub struct CliArgs {
    /// World seed.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Surface atmospheric pressure in kPa.
    #[arg(long)]
    pub pressure: Option<f64>,

    /// Diffusion iterations.
    #[arg(long)]
    pub iterations: Option<usize>,

    /// Mesh subdivision depth.
    #[arg(long)]
    pub subdivisions: Option<usize>,

    /// Longitude samples in the summary grid.
    #[arg(long)]
    pub grid_width: Option<u32>,

    /// Latitude samples in the summary grid.
    #[arg(long)]
    pub grid_height: Option<u32>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Worker threads (0 = one per logical CPU).
    #[arg(long)]
    pub threads: Option<usize>,

    /// Cancel the run after this many seconds (0 = no limit).
    #[arg(long)]
    pub time_limit: Option<u64>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(seed) = args.seed {
            self.planet.seed = seed;
        }
        if let Some(pressure) = args.pressure {
            self.simulation.pressure_kpa = pressure;
        }
        if let Some(n) = args.iterations {
            self.simulation.iterations = n;
        }
        if let Some(depth) = args.subdivisions {
            self.simulation.subdivisions = depth;
        }
        if let Some(w) = args.grid_width {
            self.output.grid_width = w;
        }
        if let Some(h) = args.grid_height {
            self.output.grid_height = h;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
        if let Some(threads) = args.threads {
            self.simulation.threads = threads;
        }
        if let Some(secs) = args.time_limit {
            self.simulation.time_limit_secs = secs;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            seed: Some(1234),
            pressure: Some(85.5),
            subdivisions: Some(3),
            time_limit: Some(60),
            ..CliArgs::default()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.planet.seed, 1234);
        assert_eq!(config.simulation.pressure_kpa, 85.5);
        assert_eq!(config.simulation.subdivisions, 3);
        assert_eq!(config.simulation.time_limit_secs, 60);
        // Non-overridden fields retain defaults
        assert_eq!(config.simulation.iterations, 1600);
        assert_eq!(config.output.grid_width, 72);
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config, original);
    }

    #[test]
    fn test_parse_flags() {
        let args = CliArgs::try_parse_from([
            "pluvial",
            "--iterations",
            "200",
            "--grid-width",
            "180",
            "--log-level",
            "debug",
            "--threads",
            "4",
            "--config",
            "/tmp/pluvial",
        ])
        .unwrap();
        assert_eq!(args.iterations, Some(200));
        assert_eq!(args.grid_width, Some(180));
        assert_eq!(args.log_level.as_deref(), Some("debug"));
        assert_eq!(args.threads, Some(4));
        assert_eq!(args.config, Some(PathBuf::from("/tmp/pluvial")));
        assert_eq!(args.seed, None);
    }

    #[test]
    fn test_parse_rejects_bad_number() {
        assert!(CliArgs::try_parse_from(["pluvial", "--pressure", "high"]).is_err());
    }
}
