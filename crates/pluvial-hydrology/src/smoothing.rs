//! Lattice cache behind the tricubic smoothed queries.
//!
//! Smoothed values are interpolated from point queries taken on a regular
//! 3D lattice of spacing [`GRID_SPACING`] around the unit sphere. Each
//! lattice value is computed at most once between clears.

use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::Field;

/// Lattice spacing in unit-sphere coordinates.
pub const GRID_SPACING: f64 = 0.015;
/// Lattice cells per unit of distance.
pub const GRID_MULTIPLIER: f64 = 1.0 / GRID_SPACING;
/// Side length of the cached lattice cube, with margin for the 4×4×4 stencil.
pub const GRID_SIZE: usize = (2.0 * GRID_MULTIPLIER) as usize + 6;
/// Offset from a signed lattice coordinate to a cache index.
pub const GRID_OFFSET: i64 = GRID_MULTIPLIER as i64 + 3;

/// Marks an empty slot. Never produced by arithmetic, which yields the
/// canonical NaN instead.
const EMPTY: u64 = u64::MAX;

/// Dense cache of lattice values for one field, allocated on first use.
#[derive(Debug, Default)]
pub struct LatticeCache {
    slots: OnceLock<Box<[AtomicU64]>>,
}

impl LatticeCache {
    /// Cached value at lattice point `(x, y, z)`, computing and storing it on
    /// a miss. Points outside the cached cube are computed every time.
    ///
    /// Two threads missing the same slot may both compute it; they store
    /// the same value.
    pub fn get_or_compute(&self, x: i64, y: i64, z: i64, compute: impl FnOnce() -> f64) -> f64 {
        let Some(index) = slot_index(x, y, z) else {
            return compute();
        };
        let slots = self.slots.get_or_init(|| {
            (0..GRID_SIZE * GRID_SIZE * GRID_SIZE)
                .map(|_| AtomicU64::new(EMPTY))
                .collect()
        });
        let bits = slots[index].load(Ordering::Acquire);
        if bits != EMPTY {
            return f64::from_bits(bits);
        }
        let value = compute();
        slots[index].store(value.to_bits(), Ordering::Release);
        value
    }

    /// Drop every cached value.
    pub fn clear(&mut self) {
        self.slots.take();
    }

    /// Whether any storage is currently allocated.
    #[must_use]
    pub fn is_allocated(&self) -> bool {
        self.slots.get().is_some()
    }
}

/// One lattice cache per queryable field.
#[derive(Debug, Default)]
pub struct SmoothingCache {
    cloud: LatticeCache,
    precipitate: LatticeCache,
}

impl SmoothingCache {
    #[must_use]
    pub fn field(&self, field: Field) -> &LatticeCache {
        match field {
            Field::Cloud => &self.cloud,
            Field::Precipitate => &self.precipitate,
        }
    }

    pub fn clear(&mut self) {
        self.cloud.clear();
        self.precipitate.clear();
    }
}

fn slot_index(x: i64, y: i64, z: i64) -> Option<usize> {
    let size = GRID_SIZE as i64;
    let shift = |v: i64| {
        let s = v + GRID_OFFSET;
        (0..size).contains(&s).then_some(s as usize)
    };
    Some((shift(x)? * GRID_SIZE + shift(y)?) * GRID_SIZE + shift(z)?)
}
