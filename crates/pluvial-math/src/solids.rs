//! Base Platonic solids inscribed in the unit sphere.

use crate::Point3;

/// The golden ratio.
pub const PHI: f64 = 1.618_033_988_749_895;

/// The 12 vertices of a regular icosahedron, normalized to unit length.
#[must_use]
pub fn icosahedron_vertices() -> [Point3; 12] {
    [
        (0.0, 1.0, PHI),
        (0.0, 1.0, -PHI),
        (0.0, -1.0, PHI),
        (0.0, -1.0, -PHI),
        (1.0, PHI, 0.0),
        (1.0, -PHI, 0.0),
        (-1.0, PHI, 0.0),
        (-1.0, -PHI, 0.0),
        (PHI, 0.0, 1.0),
        (PHI, 0.0, -1.0),
        (-PHI, 0.0, 1.0),
        (-PHI, 0.0, -1.0),
    ]
    .map(|(x, y, z)| Point3::new(x, y, z).normalized())
}

/// The 20 vertices of a regular dodecahedron, normalized to unit length.
///
/// Axes are permuted `(x, y, z) -> (z, y, x)` relative to the textbook
/// listing so that each vertex is the center of one face of
/// [`icosahedron_vertices`].
#[must_use]
pub fn dodecahedron_vertices() -> [Point3; 20] {
    let inv = 1.0 / PHI;
    [
        (1.0, 1.0, 1.0),
        (1.0, 1.0, -1.0),
        (1.0, -1.0, 1.0),
        (1.0, -1.0, -1.0),
        (-1.0, 1.0, 1.0),
        (-1.0, 1.0, -1.0),
        (-1.0, -1.0, 1.0),
        (-1.0, -1.0, -1.0),
        (0.0, inv, PHI),
        (0.0, inv, -PHI),
        (0.0, -inv, PHI),
        (0.0, -inv, -PHI),
        (inv, PHI, 0.0),
        (inv, -PHI, 0.0),
        (-inv, PHI, 0.0),
        (-inv, -PHI, 0.0),
        (PHI, 0.0, inv),
        (PHI, 0.0, -inv),
        (-PHI, 0.0, inv),
        (-PHI, 0.0, -inv),
    ]
    .map(|(x, y, z)| Point3::new(z, y, x).normalized())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::closest_n_points;

    const EPSILON: f64 = 1e-12;

    #[test]
    fn test_vertices_lie_on_unit_sphere() {
        for p in icosahedron_vertices().iter().chain(dodecahedron_vertices().iter()) {
            assert!((p.length() - 1.0).abs() < EPSILON, "{p:?} is off the sphere");
        }
    }

    #[test]
    fn test_icosahedron_vertex_degree_is_five() {
        let verts = icosahedron_vertices();
        for v in &verts {
            let nearest = closest_n_points(*v, 6, &verts);
            let d5 = verts[nearest[4]].distance_squared(*v);
            let d6 = verts[nearest[5]].distance_squared(*v);
            let d1 = verts[nearest[0]].distance_squared(*v);
            assert!((d5 - d1).abs() < EPSILON, "first five neighbors not equidistant");
            assert!(d6 > d5 + 0.1, "sixth neighbor too close: {d6} vs {d5}");
        }
    }

    #[test]
    fn test_dodecahedron_vertices_are_face_centers() {
        let ico = icosahedron_vertices();
        for center in dodecahedron_vertices() {
            let nearest = closest_n_points(center, 4, &ico);
            let d: Vec<f64> = nearest.iter().map(|&i| ico[i].distance_squared(center)).collect();
            assert!((d[0] - d[2]).abs() < EPSILON, "three corners not equidistant: {d:?}");
            assert!(d[3] > d[2] + 0.1, "fourth vertex too close: {d:?}");
            let sum = nearest[..3]
                .iter()
                .fold(glam::DVec3::ZERO, |acc, &i| acc + ico[i].to_dvec3());
            let dir = sum.normalize();
            assert!(
                dir.distance(center.to_dvec3()) < 1e-9,
                "{center:?} is not the centroid direction {dir:?}"
            );
        }
    }
}
