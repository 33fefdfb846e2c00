//! Cartesian and spherical point types.
//!
//! Both types compare and hash by the exact bit pattern of their components,
//! so two values are equal only when they were produced by the same
//! arithmetic. This makes them usable as hash-map keys for memoized mesh
//! construction, where "close enough" must never merge distinct vertices.

use std::hash::{Hash, Hasher};

use glam::DVec3;

/// An immutable point in 3D space.
///
/// On the unit sphere, `y` is the polar axis and the prime meridian lies in
/// the `+z` direction.
#[derive(Clone, Copy, Debug, Default)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Euclidean length of the position vector.
    #[must_use]
    pub fn length(self) -> f64 {
        self.to_dvec3().length()
    }

    /// Squared Euclidean distance to `other`.
    #[must_use]
    pub fn distance_squared(self, other: Self) -> f64 {
        self.to_dvec3().distance_squared(other.to_dvec3())
    }

    /// Scale to unit length. The zero vector is returned unchanged.
    #[must_use]
    pub fn normalized(self) -> Self {
        let v = self.to_dvec3();
        let len = v.length();
        if len == 0.0 { self } else { Self::from(v / len) }
    }

    #[must_use]
    pub fn to_dvec3(self) -> DVec3 {
        DVec3::new(self.x, self.y, self.z)
    }

    /// Project onto the unit sphere and convert to longitude/latitude.
    #[must_use]
    pub fn to_sphere(self) -> SpherePoint {
        SpherePoint::from(self)
    }

    fn bits(self) -> [u64; 3] {
        [self.x.to_bits(), self.y.to_bits(), self.z.to_bits()]
    }
}

impl From<DVec3> for Point3 {
    fn from(v: DVec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl PartialEq for Point3 {
    fn eq(&self, other: &Self) -> bool {
        self.bits() == other.bits()
    }
}

impl Eq for Point3 {}

impl Hash for Point3 {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bits().hash(state);
    }
}

/// An immutable position on the sphere surface, in radians.
///
/// Longitude lies in \[-π, π\] and latitude in \[-π/2, π/2\].
#[derive(Clone, Copy, Debug, Default)]
pub struct SpherePoint {
    pub longitude: f64,
    pub latitude: f64,
}

impl SpherePoint {
    #[must_use]
    pub const fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }

    /// Construct from degrees.
    #[must_use]
    pub fn from_degrees(longitude: f64, latitude: f64) -> Self {
        Self::new(longitude.to_radians(), latitude.to_radians())
    }

    /// The corresponding point on the unit sphere.
    #[must_use]
    pub fn to_point3(self) -> Point3 {
        let (sin_lon, cos_lon) = self.longitude.sin_cos();
        let (sin_lat, cos_lat) = self.latitude.sin_cos();
        Point3::new(sin_lon * cos_lat, sin_lat, cos_lon * cos_lat)
    }

    fn bits(self) -> [u64; 2] {
        [self.longitude.to_bits(), self.latitude.to_bits()]
    }
}

impl From<Point3> for SpherePoint {
    /// Longitude is measured from `+z` towards `+x`; a point on the polar
    /// axis gets longitude 0. The origin maps to (0, 0).
    fn from(p: Point3) -> Self {
        let r = p.length();
        if r == 0.0 {
            return Self::new(0.0, 0.0);
        }
        let horizontal = (p.x * p.x + p.z * p.z).sqrt();
        let longitude = if horizontal == 0.0 {
            0.0
        } else {
            let lon = (p.z / horizontal).clamp(-1.0, 1.0).acos();
            if p.x < 0.0 { -lon } else { lon }
        };
        let latitude = (p.y / r).clamp(-1.0, 1.0).asin();
        Self::new(longitude, latitude)
    }
}

impl PartialEq for SpherePoint {
    fn eq(&self, other: &Self) -> bool {
        self.bits() == other.bits()
    }
}

impl Eq for SpherePoint {}

impl Hash for SpherePoint {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bits().hash(state);
    }
}
