//! Great-circle geometry on the unit sphere.
//!
//! All angles are in radians. Functions that take a `radius` scale a unit
//! sphere result into physical units; everything else works on the unit
//! sphere.

use std::f64::consts::{PI, TAU};

use crate::{Point3, SpherePoint};

/// `hav(θ) = sin²(θ / 2)`.
#[must_use]
pub fn haversine(theta: f64) -> f64 {
    let s = (theta * 0.5).sin();
    s * s
}

/// Inverse of [`haversine`]. Inputs outside \[0, 1\] are clamped.
#[must_use]
pub fn inverse_haversine(h: f64) -> f64 {
    2.0 * h.clamp(0.0, 1.0).sqrt().asin()
}

/// Central angle between two surface points.
#[must_use]
pub fn angular_distance(a: SpherePoint, b: SpherePoint) -> f64 {
    let h = haversine(b.latitude - a.latitude)
        + a.latitude.cos() * b.latitude.cos() * haversine(b.longitude - a.longitude);
    inverse_haversine(h.min(1.0))
}

/// Surface distance between two points on a sphere of `radius`.
#[must_use]
pub fn great_circle_distance(a: SpherePoint, b: SpherePoint, radius: f64) -> f64 {
    angular_distance(a, b) * radius
}

/// Initial bearing from `from` towards `to`, clockwise from north, in
/// (-π, π\].
#[must_use]
pub fn bearing(from: SpherePoint, to: SpherePoint) -> f64 {
    let d_lon = to.longitude - from.longitude;
    let (sin_lat1, cos_lat1) = from.latitude.sin_cos();
    let (sin_lat2, cos_lat2) = to.latitude.sin_cos();
    (d_lon.sin() * cos_lat2).atan2(cos_lat1 * sin_lat2 - sin_lat1 * cos_lat2 * d_lon.cos())
}

/// Travel `distance` radians along the great circle leaving `origin` at
/// `bearing`.
#[must_use]
pub fn follow_bearing(origin: SpherePoint, bearing: f64, distance: f64) -> SpherePoint {
    let (sin_lat1, cos_lat1) = origin.latitude.sin_cos();
    let (sin_d, cos_d) = distance.sin_cos();
    let sin_lat2 = (sin_lat1 * cos_d + cos_lat1 * sin_d * bearing.cos()).clamp(-1.0, 1.0);
    let latitude = sin_lat2.asin();
    let longitude = origin.longitude
        + (bearing.sin() * sin_d * cos_lat1).atan2(cos_d - sin_lat1 * sin_lat2);
    SpherePoint::new(wrap_longitude(longitude), latitude)
}

/// Wrap a longitude into \[-π, π).
#[must_use]
pub fn wrap_longitude(longitude: f64) -> f64 {
    (longitude + PI).rem_euclid(TAU) - PI
}

/// Interior angle at `vertex` of the spherical triangle `a`, `vertex`, `c`.
///
/// Measured between the tangent directions towards `a` and `c`, so the
/// result is in \[0, π\]. Returns 0 when either side is degenerate.
#[must_use]
pub fn angle_between(a: SpherePoint, vertex: SpherePoint, c: SpherePoint) -> f64 {
    let v = vertex.to_point3().to_dvec3();
    let to_a = a.to_point3().to_dvec3();
    let to_c = c.to_point3().to_dvec3();
    let ta = to_a - v * to_a.dot(v);
    let tc = to_c - v * to_c.dot(v);
    if ta.length_squared() == 0.0 || tc.length_squared() == 0.0 {
        return 0.0;
    }
    ta.angle_between(tc)
}

/// Spherical excess (solid angle) of the triangle `a`, `b`, `c` on the unit
/// sphere.
///
/// Uses the Van Oosterom–Strackee form, which stays well conditioned for
/// thin and tiny triangles. Always non-negative regardless of winding.
#[must_use]
pub fn spherical_excess(a: SpherePoint, b: SpherePoint, c: SpherePoint) -> f64 {
    let a = a.to_point3().to_dvec3();
    let b = b.to_point3().to_dvec3();
    let c = c.to_point3().to_dvec3();
    let triple = a.dot(b.cross(c)).abs();
    let denom = 1.0 + a.dot(b) + b.dot(c) + c.dot(a);
    2.0 * triple.atan2(denom)
}

/// Area of the spherical triangle `a`, `b`, `c` on a sphere of `radius`.
#[must_use]
pub fn triangle_area(a: SpherePoint, b: SpherePoint, c: SpherePoint, radius: f64) -> f64 {
    spherical_excess(a, b, c) * radius * radius
}

/// Great-circle midpoint of `a` and `b`.
///
/// Computed from the sum of the two unit vectors, so `midpoint(a, b)` and
/// `midpoint(b, a)` are bit-identical. Antipodal inputs have no unique
/// midpoint; the result is then (0, 0).
#[must_use]
pub fn midpoint(a: SpherePoint, b: SpherePoint) -> SpherePoint {
    let pa = a.to_point3().to_dvec3();
    let pb = b.to_point3().to_dvec3();
    Point3::from(pa + pb).to_sphere()
}

/// Indices of the `n` candidates nearest to `origin` by straight-line
/// distance, nearest first.
///
/// Candidates bit-identical to `origin` are skipped so a point is never its
/// own neighbor. Ties keep candidate order.
#[must_use]
pub fn closest_n_points(origin: Point3, n: usize, candidates: &[Point3]) -> Vec<usize> {
    let mut ranked: Vec<(usize, f64)> = candidates
        .iter()
        .enumerate()
        .filter(|(_, p)| **p != origin)
        .map(|(i, p)| (i, p.distance_squared(origin)))
        .collect();
    ranked.sort_by(|a, b| a.1.total_cmp(&b.1));
    ranked.into_iter().take(n).map(|(i, _)| i).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    const EPSILON: f64 = 1e-10;

    #[test]
    fn test_haversine_round_trip() {
        for &theta in &[0.0, 0.1, 1.0, 2.0, PI] {
            let back = inverse_haversine(haversine(theta));
            assert!((back - theta).abs() < 1e-7, "θ={theta} came back as {back}");
        }
    }

    #[test]
    fn test_inverse_haversine_clamps() {
        assert_eq!(inverse_haversine(-0.5), 0.0);
        assert!((inverse_haversine(1.5) - PI).abs() < EPSILON);
    }

    #[test]
    fn test_angular_distance_pole_to_equator() {
        let pole = SpherePoint::new(0.0, FRAC_PI_2);
        let eq = SpherePoint::new(1.0, 0.0);
        assert!((angular_distance(pole, eq) - FRAC_PI_2).abs() < EPSILON);
    }

    #[test]
    fn test_angular_distance_antipodes() {
        let a = SpherePoint::new(0.5, 0.3);
        let b = SpherePoint::new(0.5 - PI, -0.3);
        assert!((angular_distance(a, b) - PI).abs() < 1e-7);
    }

    #[test]
    fn test_angular_distance_matches_chord() {
        let a = SpherePoint::new(0.2, -0.4);
        let b = SpherePoint::new(-1.1, 0.7);
        let chord = a.to_point3().distance_squared(b.to_point3()).sqrt();
        let expected = 2.0 * (chord / 2.0).asin();
        assert!((angular_distance(a, b) - expected).abs() < EPSILON);
    }

    #[test]
    fn test_great_circle_distance_scales_with_radius() {
        let a = SpherePoint::new(0.0, 0.0);
        let b = SpherePoint::new(FRAC_PI_2, 0.0);
        let d = great_circle_distance(a, b, 6_371_000.0);
        assert!((d - 6_371_000.0 * FRAC_PI_2).abs() < 1e-3, "got {d}");
    }

    #[test]
    fn test_bearing_cardinal_directions() {
        let origin = SpherePoint::new(0.0, 0.0);
        let north = bearing(origin, SpherePoint::new(0.0, 0.5));
        let east = bearing(origin, SpherePoint::new(0.5, 0.0));
        let west = bearing(origin, SpherePoint::new(-0.5, 0.0));
        assert!(north.abs() < EPSILON, "north bearing {north}");
        assert!((east - FRAC_PI_2).abs() < EPSILON, "east bearing {east}");
        assert!((west + FRAC_PI_2).abs() < EPSILON, "west bearing {west}");
    }

    #[test]
    fn test_follow_bearing_reaches_target() {
        let a = SpherePoint::new(0.4, 0.6);
        let b = SpherePoint::new(-0.9, -0.2);
        let reached = follow_bearing(a, bearing(a, b), angular_distance(a, b));
        assert!(
            angular_distance(reached, b) < 1e-9,
            "expected {b:?}, reached {reached:?}"
        );
    }

    #[test]
    fn test_follow_bearing_wraps_longitude() {
        let start = SpherePoint::new(PI - 0.1, 0.0);
        let end = follow_bearing(start, FRAC_PI_2, 0.2);
        assert!((end.longitude - (-PI + 0.1)).abs() < 1e-9, "got {end:?}");
    }

    #[test]
    fn test_angle_between_octant_corner_is_right_angle() {
        let x = SpherePoint::new(FRAC_PI_2, 0.0);
        let y = SpherePoint::new(0.0, FRAC_PI_2);
        let z = SpherePoint::new(0.0, 0.0);
        assert!((angle_between(x, z, y) - FRAC_PI_2).abs() < EPSILON);
        assert_eq!(angle_between(z, z, y), 0.0);
    }

    #[test]
    fn test_octant_excess_is_half_pi() {
        let x = SpherePoint::new(FRAC_PI_2, 0.0);
        let y = SpherePoint::new(0.0, FRAC_PI_2);
        let z = SpherePoint::new(0.0, 0.0);
        let e = spherical_excess(x, y, z);
        assert!((e - FRAC_PI_2).abs() < EPSILON, "octant excess {e}");
        assert!((spherical_excess(x, z, y) - e).abs() < EPSILON, "winding changed area");
    }

    #[test]
    fn test_degenerate_triangle_has_zero_area() {
        let a = SpherePoint::new(0.1, 0.1);
        let b = SpherePoint::new(0.3, 0.1);
        assert!(spherical_excess(a, a, b).abs() < EPSILON);
        assert!(spherical_excess(a, midpoint(a, b), b).abs() < 1e-9);
    }

    #[test]
    fn test_octant_area_on_earth() {
        let x = SpherePoint::new(FRAC_PI_2, 0.0);
        let y = SpherePoint::new(0.0, FRAC_PI_2);
        let z = SpherePoint::new(0.0, 0.0);
        let r = 6_371_000.0;
        let sphere = 4.0 * PI * r * r;
        let area = triangle_area(x, y, z, r);
        assert!((area / sphere - 0.125).abs() < EPSILON);
    }

    #[test]
    fn test_midpoint_is_equidistant() {
        let a = SpherePoint::new(0.2, 0.1);
        let b = SpherePoint::new(1.4, -0.8);
        let m = midpoint(a, b);
        let da = angular_distance(a, m);
        let db = angular_distance(b, m);
        assert!((da - db).abs() < EPSILON);
        assert!((da + db - angular_distance(a, b)).abs() < EPSILON);
    }

    #[test]
    fn test_midpoint_is_symmetric_bitwise() {
        let a = SpherePoint::new(-2.9, 0.33);
        let b = SpherePoint::new(2.8, 0.41);
        assert_eq!(midpoint(a, b), midpoint(b, a));
    }

    #[test]
    fn test_closest_n_points_skips_origin() {
        let pts = [
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.9, 0.1, 0.0),
            Point3::new(-1.0, 0.0, 0.0),
        ];
        let nearest = closest_n_points(pts[0], 2, &pts);
        assert_eq!(nearest, vec![2, 1]);
    }

    #[test]
    fn test_closest_n_points_caps_at_available() {
        let pts = [Point3::new(1.0, 0.0, 0.0), Point3::new(0.0, 1.0, 0.0)];
        assert_eq!(closest_n_points(pts[0], 5, &pts), vec![1]);
    }

    #[test]
    fn test_wrap_longitude() {
        assert!((wrap_longitude(PI + 0.5) - (-PI + 0.5)).abs() < EPSILON);
        assert!((wrap_longitude(-PI - 0.5) - (PI - 0.5)).abs() < EPSILON);
        assert!((wrap_longitude(0.25) - 0.25).abs() < EPSILON);
    }
}
