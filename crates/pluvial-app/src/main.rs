//! The `pluvial` binary: generate a planet, run its water cycle, and print
//! a summary of the resulting precipitation field.

mod error;
mod platform;
mod report;
mod runner;
mod settings;

use std::time::Instant;

use clap::Parser;
use pluvial_config::{CliArgs, Config};
use pluvial_hydrology::{NoisePlanet, RunOutcome, Simulation};
use tracing::{info, warn};

use crate::error::AppError;
use crate::platform::PlatformDirs;
use crate::report::GridSummary;

fn main() {
    let args = CliArgs::parse();
    if let Err(e) = run(&args) {
        eprintln!("pluvial: {e}");
        std::process::exit(1);
    }
}

fn run(args: &CliArgs) -> Result<(), AppError> {
    let dirs = PlatformDirs::resolve(args.config.as_deref())?;
    dirs.create_dirs()?;

    // Load or create config, then apply CLI overrides
    let mut config = Config::load_or_create(&dirs.config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(args);
    config.validate()?;

    pluvial_log::init_logging(Some(&dirs.log_dir), cfg!(debug_assertions), Some(&config));

    let threads = settings::worker_threads(&config.simulation);
    settings::init_thread_pool(threads)?;
    info!(
        threads,
        seed = config.planet.seed,
        config_dir = %dirs.config_dir.display(),
        "pluvial starting"
    );

    let planet = NoisePlanet::new(settings::noise_params(&config.planet));
    let sim = Simulation::with_params(
        &planet,
        config.simulation.pressure_kpa,
        settings::simulation_params(&config.simulation),
    )?;

    let started = Instant::now();
    let (sim, outcome) = runner::run_on_worker(sim, settings::time_limit(&config.simulation))?;
    let elapsed_ms = started.elapsed().as_millis() as u64;
    match outcome {
        RunOutcome::Completed { iterations } => {
            info!(iterations, elapsed_ms, "water cycle complete");
        }
        RunOutcome::Aborted { completed_iterations } => {
            warn!(
                completed_iterations,
                elapsed_ms, "water cycle cancelled, summarising partial field"
            );
        }
    }

    print_summary(&config, &sim, outcome);
    Ok(())
}

fn print_summary(config: &Config, sim: &Simulation, outcome: RunOutcome) {
    let output = &config.output;
    let values =
        report::sample_precipitation(sim, output.grid_width, output.grid_height, output.smoothed);
    let status = match outcome {
        RunOutcome::Completed { .. } => "complete",
        RunOutcome::Aborted { .. } => "cancelled",
    };
    let sampling = if output.smoothed { "tricubic" } else { "barycentric" };

    println!("pluvial moisture field (seed {})", config.planet.seed);
    println!("  nodes:          {}", sim.node_count());
    println!("  water sources:  {}", sim.water_source_count());
    println!("  ocean:          {:.1}%", sim.percent_ocean());
    println!(
        "  iterations:     {} of {} ({status})",
        sim.iterations_completed(),
        config.simulation.iterations
    );
    match GridSummary::from_values(&values) {
        Some(summary) => println!(
            "  precipitation:  {summary} on a {}x{} {sampling} grid",
            output.grid_width, output.grid_height
        ),
        None => println!("  precipitation:  no samples"),
    }
}
