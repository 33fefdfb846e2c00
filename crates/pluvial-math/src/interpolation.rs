//! Cubic and spherical barycentric interpolation kernels.

use crate::{SpherePoint, spherical::spherical_excess};

/// Below this fractional offset the cubic kernel returns the left sample.
const SNAP_LOW: f64 = 1e-8;
/// Above this fractional offset the cubic kernel returns the right sample.
const SNAP_HIGH: f64 = 0.999_999_9;
/// Squared chord length under which a query counts as sitting on a corner.
const CORNER_SNAP_SQ: f64 = 1e-24;
/// Sub-area total, in steradians, below which a triangle counts as
/// degenerate. Rounding leaves collapsed triangles around `1e-17`.
const DEGENERATE_AREA: f64 = 1e-15;

/// Catmull-Rom interpolation through four equally spaced samples.
///
/// `samples` are taken at `floor(x) - 1`, `floor(x)`, `floor(x) + 1` and
/// `floor(x) + 2`; only the fractional part of `x` matters. At the two
/// central sample sites the sample itself is returned unmodified.
#[must_use]
pub fn cubic(x: f64, samples: [f64; 4]) -> f64 {
    let [yn2, yn1, yp1, yp2] = samples;
    let w = x - x.floor();
    if w < SNAP_LOW {
        return yn1;
    }
    if w > SNAP_HIGH {
        return yp1;
    }
    let a = -0.5 * yn2 + 1.5 * yn1 - 1.5 * yp1 + 0.5 * yp2;
    let b = yn2 - 2.5 * yn1 + 2.0 * yp1 - 0.5 * yp2;
    let c = -0.5 * yn2 + 0.5 * yp1;
    let d = yn1;
    ((a * w + b) * w + c) * w + d
}

/// Bicubic interpolation over a 4×4 neighborhood indexed `[y][z]`.
#[must_use]
pub fn bicubic(y: f64, z: f64, samples: &[[f64; 4]; 4]) -> f64 {
    cubic(y, samples.map(|row| cubic(z, row)))
}

/// Tricubic interpolation over a 4×4×4 neighborhood indexed `[x][y][z]`.
///
/// Reduces each `x` slab bicubically, then interpolates the four slab
/// results along `x`.
#[must_use]
pub fn tricubic(x: f64, y: f64, z: f64, samples: &[[[f64; 4]; 4]; 4]) -> f64 {
    cubic(x, samples.map(|slab| bicubic(y, z, &slab)))
}

/// Normalized spherical barycentric weights of `at` within the triangle
/// `corners`.
///
/// Each weight is the area of the sub-triangle opposite its corner divided
/// by the total of all three sub-areas. A query that coincides with a
/// corner gets exactly `1.0` for that corner. When the sub-areas total less
/// than a rounding-level threshold the weights are split evenly.
#[must_use]
pub fn barycentric_weights(at: SpherePoint, corners: [SpherePoint; 3]) -> [f64; 3] {
    let p = at.to_point3();
    for (i, corner) in corners.iter().enumerate() {
        if corner.to_point3().distance_squared(p) <= CORNER_SNAP_SQ {
            let mut weights = [0.0; 3];
            weights[i] = 1.0;
            return weights;
        }
    }
    let [a, b, c] = corners;
    let raw = [
        spherical_excess(at, b, c),
        spherical_excess(a, at, c),
        spherical_excess(a, b, at),
    ];
    let total: f64 = raw.iter().sum();
    if total <= DEGENERATE_AREA || !total.is_finite() {
        return [1.0 / 3.0; 3];
    }
    raw.map(|w| w / total)
}

/// Barycentric combination of per-corner `values` at `at`.
#[must_use]
pub fn barycentric(at: SpherePoint, corners: [SpherePoint; 3], values: [f64; 3]) -> f64 {
    let weights = barycentric_weights(at, corners);
    weights.iter().zip(values).map(|(w, v)| w * v).sum()
}
