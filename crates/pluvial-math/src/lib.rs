//! Points, great-circle geometry, base solids, and interpolation kernels for
//! the unit sphere.

mod interpolation;
mod point;
mod solids;
pub mod spherical;

pub use interpolation::{barycentric, barycentric_weights, bicubic, cubic, tricubic};
pub use point::{Point3, SpherePoint};
pub use solids::{PHI, dodecahedron_vertices, icosahedron_vertices};
pub use spherical::{angular_distance, closest_n_points, midpoint, spherical_excess};
