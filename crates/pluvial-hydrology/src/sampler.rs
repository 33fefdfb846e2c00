//! The planet surface interface consumed by the simulation.

/// Surface properties at one location.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SurfaceSample {
    /// Height above sea level in meters. Zero or below is ocean.
    pub altitude: f64,
    /// Terrain ruggedness, nominally in \[0, 2\].
    pub roughness: f64,
    /// Surface air temperature in °C.
    pub temperature: f64,
}

/// A source of planet surface data.
///
/// Samples are taken from many threads at once during initialization.
pub trait PlanetSampler: Sync {
    /// Mean planet radius in meters.
    fn radius(&self) -> f64;

    /// Surface properties at (`longitude`, `latitude`) in radians.
    ///
    /// `precision` is the approximate spacing in meters between the points
    /// that will be sampled; detail finer than this can be skipped.
    fn sample(&self, longitude: f64, latitude: f64, precision: f64) -> SurfaceSample;
}

/// A planet with the same surface everywhere.
#[derive(Clone, Copy, Debug)]
pub struct ConstantPlanet {
    pub radius: f64,
    pub surface: SurfaceSample,
}

impl ConstantPlanet {
    /// An Earth-sized planet covered by ocean 100 m deep.
    #[must_use]
    pub fn ocean() -> Self {
        Self {
            radius: 6_371_000.0,
            surface: SurfaceSample {
                altitude: -100.0,
                roughness: 0.0,
                temperature: 15.0,
            },
        }
    }

    /// An Earth-sized planet of uniform land at `altitude` meters.
    #[must_use]
    pub fn land(altitude: f64) -> Self {
        Self {
            radius: 6_371_000.0,
            surface: SurfaceSample {
                altitude,
                roughness: 1.0,
                temperature: 15.0,
            },
        }
    }
}

impl PlanetSampler for ConstantPlanet {
    fn radius(&self) -> f64 {
        self.radius
    }

    fn sample(&self, _longitude: f64, _latitude: f64, _precision: f64) -> SurfaceSample {
        self.surface
    }
}
