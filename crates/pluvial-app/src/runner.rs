//! Runs a simulation on a worker thread while the caller watches progress.

use std::time::{Duration, Instant};

use crossbeam_channel::RecvTimeoutError;
use pluvial_hydrology::{RunOutcome, Simulation, channel_sink};
use tracing::{info, warn};

use crate::error::AppError;

/// Percentage between progress log lines.
const PROGRESS_STEP: u32 = 10;

/// Turns progress increments into one log line per crossed step.
#[derive(Debug)]
struct ProgressLog {
    done: f64,
    next_percent: u32,
}

impl ProgressLog {
    fn new() -> Self {
        Self {
            done: 0.0,
            next_percent: PROGRESS_STEP,
        }
    }

    /// Record `increment`, returning how many steps it crossed.
    fn advance(&mut self, increment: f64) -> u32 {
        self.done += increment;
        let mut crossed = 0;
        while self.next_percent <= 100
            && self.done * 100.0 >= f64::from(self.next_percent) - 1e-9
        {
            info!(percent = self.next_percent, "simulation progress");
            self.next_percent += PROGRESS_STEP;
            crossed += 1;
        }
        crossed
    }
}

/// Move `sim` onto a named worker thread, run it, and hand it back.
///
/// Past `time_limit` the run is cancelled; the worker then stops after its
/// current iteration.
pub fn run_on_worker(
    mut sim: Simulation,
    time_limit: Option<Duration>,
) -> Result<(Simulation, RunOutcome), AppError> {
    let token = sim.cancel_token();
    let (sender, receiver) = crossbeam_channel::unbounded::<f64>();

    let worker = std::thread::Builder::new()
        .name("pluvial-sim".into())
        .spawn(move || {
            let mut sink = channel_sink(sender);
            let outcome = sim.run(Some(&mut sink));
            (sim, outcome)
        })
        .map_err(AppError::Spawn)?;

    let deadline = time_limit.map(|limit| Instant::now() + limit);
    let mut progress = ProgressLog::new();
    loop {
        let next = match deadline {
            Some(at) if !token.is_cancelled() => receiver.recv_deadline(at),
            _ => receiver.recv().map_err(|_| RecvTimeoutError::Disconnected),
        };
        match next {
            Ok(increment) => {
                progress.advance(increment);
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
        // A busy channel never times out, so the deadline is checked on
        // every wakeup.
        if !token.is_cancelled() && deadline.is_some_and(|at| Instant::now() >= at) {
            warn!(
                limit_ms = time_limit.map_or(0, |l| l.as_millis() as u64),
                "time limit reached, cancelling simulation"
            );
            token.cancel();
        }
    }

    worker.join().map_err(|_| AppError::WorkerPanicked)
}
