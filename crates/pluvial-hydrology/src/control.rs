//! Run control: cooperative cancellation and progress reporting.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crossbeam_channel::Sender;

use crate::accumulator::AtomicF64;

/// Shared flag asking a running simulation to stop.
///
/// Clones share the same flag. The simulation checks it once per iteration,
/// before starting the next one.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    /// Clear a previous request so the simulation can run again.
    pub fn reset(&self) {
        self.0.store(false, Ordering::Relaxed);
    }
}

/// Receiver of run progress.
///
/// Each call carries the fraction of the run completed since the previous
/// call. Over an uninterrupted run the increments add up to exactly `1.0`.
pub trait ProgressSink {
    fn report(&mut self, increment: f64);
}

impl<F: FnMut(f64)> ProgressSink for F {
    fn report(&mut self, increment: f64) {
        self(increment);
    }
}

/// A sink that forwards every increment over `sender`.
///
/// Increments sent after the receiver is dropped are discarded.
pub fn channel_sink(sender: Sender<f64>) -> impl FnMut(f64) {
    move |increment| {
        sender.send(increment).ok();
    }
}

/// A sink that adds every increment into `total`.
pub fn accumulator_sink(total: &AtomicF64) -> impl FnMut(f64) + '_ {
    move |increment| total.add(increment)
}
