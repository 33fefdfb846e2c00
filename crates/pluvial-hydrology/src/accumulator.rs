//! Lock-free `f64` accumulation.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// An `f64` that many threads can add into at once.
///
/// Stored as its bit pattern in an [`AtomicU64`]; [`add`](Self::add) retries
/// a compare-exchange until its update lands, so no contribution is lost.
#[derive(Default)]
pub struct AtomicF64(AtomicU64);

impl AtomicF64 {
    #[must_use]
    pub fn new(value: f64) -> Self {
        Self(AtomicU64::new(value.to_bits()))
    }

    /// Add `delta` to the stored value.
    pub fn add(&self, delta: f64) {
        // The closure never declines, so the update always lands.
        self.0
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |bits| {
                Some((f64::from_bits(bits) + delta).to_bits())
            })
            .ok();
    }

    #[must_use]
    pub fn load(&self) -> f64 {
        f64::from_bits(self.0.load(Ordering::Acquire))
    }

    pub fn store(&self, value: f64) {
        self.0.store(value.to_bits(), Ordering::Release);
    }

    /// Return the stored value and reset it to zero.
    pub fn take(&mut self) -> f64 {
        f64::from_bits(std::mem::take(self.0.get_mut()))
    }
}

impl fmt::Debug for AtomicF64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AtomicF64").field(&self.load()).finish()
    }
}
