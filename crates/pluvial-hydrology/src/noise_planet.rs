//! A procedural reference planet built from fractal simplex noise.
//!
//! Altitude, roughness and temperature come from three independently
//! seeded fBm fields sampled on the unit sphere, so the surface has no
//! seams at the poles or the antimeridian.

use glam::DVec3;
use noise::{NoiseFn, Simplex};
use pluvial_math::SpherePoint;

use crate::sampler::{PlanetSampler, SurfaceSample};

/// Shape and climate parameters for [`NoisePlanet`].
#[derive(Clone, Debug)]
pub struct NoiseParams {
    /// World seed for deterministic generation.
    pub seed: u64,
    /// Planet radius in meters.
    pub radius_m: f64,
    /// Raw terrain height that counts as sea level, in meters.
    pub sea_level_m: f64,
    /// Relief of the roughest terrain, in meters.
    pub mountain_height_m: f64,
    /// Frequency of the broadest octave, in cycles per planet radius.
    pub base_frequency: f64,
    /// Maximum number of octaves. Fewer are used when the sampling
    /// precision cannot resolve the finer ones.
    pub octaves: u32,
    /// Frequency multiplier between successive octaves.
    pub lacunarity: f64,
    /// Amplitude multiplier between successive octaves.
    pub persistence: f64,
    /// Sea-level temperature at the equator, in °C.
    pub equatorial_temperature_c: f64,
    /// Temperature change from equator to pole, in °C.
    pub polar_temperature_delta_c: f64,
    /// Temperature change per meter of altitude above sea level.
    pub lapse_rate_c_per_m: f64,
}

impl Default for NoiseParams {
    fn default() -> Self {
        Self {
            seed: 0,
            radius_m: 6_371_000.0,
            sea_level_m: 0.0,
            mountain_height_m: 6000.0,
            base_frequency: 1.5,
            octaves: 6,
            lacunarity: 2.0,
            persistence: 0.5,
            equatorial_temperature_c: 28.0,
            polar_temperature_delta_c: -48.0,
            lapse_rate_c_per_m: -0.0065,
        }
    }
}

/// Amplitude of the temperature noise, in °C.
const CLIMATE_VARIATION_C: f64 = 4.0;
/// Roughness features are this much finer than continents.
const RIDGE_SCALE: f64 = 2.0;

/// A deterministic procedural planet.
pub struct NoisePlanet {
    continents: Simplex,
    ridges: Simplex,
    climate: Simplex,
    params: NoiseParams,
}

impl NoisePlanet {
    #[must_use]
    pub fn new(params: NoiseParams) -> Self {
        let seed = params.seed as u32;
        Self {
            continents: Simplex::new(seed),
            ridges: Simplex::new(seed.wrapping_add(1)),
            climate: Simplex::new(seed.wrapping_add(2)),
            params,
        }
    }

    #[must_use]
    pub fn params(&self) -> &NoiseParams {
        &self.params
    }

    /// Octaves whose wavelength on the surface is at least `precision`
    /// meters, but always at least one.
    #[must_use]
    pub fn octaves_for(&self, precision: f64) -> u32 {
        let mut frequency = self.params.base_frequency;
        let mut count = 0;
        while count < self.params.octaves && self.params.radius_m / frequency >= precision {
            count += 1;
            frequency *= self.params.lacunarity;
        }
        count.max(1)
    }

    /// fBm normalized to roughly \[-1, 1\].
    fn fbm(&self, noise: &Simplex, point: DVec3, octaves: u32) -> f64 {
        let mut total = 0.0;
        let mut norm = 0.0;
        let mut frequency = self.params.base_frequency;
        let mut amplitude = 1.0;
        for _ in 0..octaves {
            let p = point * frequency;
            total += noise.get([p.x, p.y, p.z]) * amplitude;
            norm += amplitude;
            frequency *= self.params.lacunarity;
            amplitude *= self.params.persistence;
        }
        if norm == 0.0 { 0.0 } else { total / norm }
    }

    fn roughness(&self, point: DVec3, octaves: u32) -> f64 {
        let ridge = self.fbm(&self.ridges, point * RIDGE_SCALE, octaves);
        (1.0 + 1.5 * ridge).clamp(0.0, 2.0)
    }

    fn altitude(&self, point: DVec3, roughness: f64, octaves: u32) -> f64 {
        let relief = self.params.mountain_height_m * (0.25 + 0.375 * roughness);
        self.fbm(&self.continents, point, octaves) * relief - self.params.sea_level_m
    }

    fn temperature(&self, point: DVec3, latitude: f64, altitude: f64) -> f64 {
        let polar = self.params.polar_temperature_delta_c * (1.0 - latitude.cos());
        let local = CLIMATE_VARIATION_C * self.fbm(&self.climate, point, 2);
        self.params.equatorial_temperature_c
            + polar
            + local
            + self.params.lapse_rate_c_per_m * altitude.max(0.0)
    }
}

impl PlanetSampler for NoisePlanet {
    fn radius(&self) -> f64 {
        self.params.radius_m
    }

    fn sample(&self, longitude: f64, latitude: f64, precision: f64) -> SurfaceSample {
        let point = SpherePoint::new(longitude, latitude).to_point3().to_dvec3();
        let octaves = self.octaves_for(precision);
        let roughness = self.roughness(point, octaves);
        let altitude = self.altitude(point, roughness, octaves);
        SurfaceSample {
            altitude,
            roughness,
            temperature: self.temperature(point, latitude, altitude),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> impl Iterator<Item = (f64, f64)> {
        (0..40).flat_map(|i| {
            (0..20).map(move |j| {
                let lon = -3.1 + 6.2 * f64::from(i) / 39.0;
                let lat = -1.5 + 3.0 * f64::from(j) / 19.0;
                (lon, lat)
            })
        })
    }

    #[test]
    fn test_deterministic_per_seed() {
        let a = NoisePlanet::new(NoiseParams::default());
        let b = NoisePlanet::new(NoiseParams::default());
        for (lon, lat) in grid() {
            assert_eq!(a.sample(lon, lat, 1000.0), b.sample(lon, lat, 1000.0));
        }
    }

    #[test]
    fn test_seeds_differ() {
        let a = NoisePlanet::new(NoiseParams::default());
        let b = NoisePlanet::new(NoiseParams {
            seed: 99,
            ..NoiseParams::default()
        });
        let differing = grid()
            .filter(|&(lon, lat)| a.sample(lon, lat, 1000.0) != b.sample(lon, lat, 1000.0))
            .count();
        assert!(differing > 700, "only {differing} samples differ");
    }

    #[test]
    fn test_has_land_and_sea() {
        let planet = NoisePlanet::new(NoiseParams::default());
        let (land, sea): (Vec<_>, Vec<_>) = grid()
            .map(|(lon, lat)| planet.sample(lon, lat, 60_000.0).altitude)
            .partition(|&a| a > 0.0);
        assert!(!land.is_empty() && !sea.is_empty(), "{} land, {} sea", land.len(), sea.len());
    }

    #[test]
    fn test_roughness_in_range() {
        let planet = NoisePlanet::new(NoiseParams::default());
        for (lon, lat) in grid() {
            let r = planet.sample(lon, lat, 1000.0).roughness;
            assert!((0.0..=2.0).contains(&r), "roughness {r}");
        }
    }

    #[test]
    fn test_poles_are_colder() {
        let planet = NoisePlanet::new(NoiseParams::default());
        let mean = |lat: f64| {
            (0..36)
                .map(|i| planet.sample(-3.1 + f64::from(i) * 0.17, lat, 60_000.0).temperature)
                .sum::<f64>()
                / 36.0
        };
        assert!(mean(1.4) < mean(0.0) - 20.0, "pole {} equator {}", mean(1.4), mean(0.0));
    }

    #[test]
    fn test_precision_limits_octaves() {
        let planet = NoisePlanet::new(NoiseParams::default());
        assert_eq!(planet.octaves_for(1.0), 6);
        assert_eq!(planet.octaves_for(1e12), 1);
        // Wavelengths: R/1.5 ≈ 4247 km, then halving each octave.
        assert_eq!(planet.octaves_for(1_500_000.0), 2);
    }
}
