//! Per-node transport coefficients derived from surface samples.

/// Fraction of cloud water passed to neighbors each step, never below this.
pub const MIN_CONDUCTIVITY: f64 = 0.05;
/// Fraction of cloud water that falls as precipitation each step.
pub const PRECIPITIVITY: f64 = 0.17;
/// Upper bound on the fraction of surface water evaporated each step.
pub const MAX_EVAPORATIVITY: f64 = 0.5;
/// Surface water held by every ocean node at the start of a simulation.
pub const OCEAN_PRECIPITATE: f64 = 500.0;
/// Sea-level reference pressure in kPa.
pub const REFERENCE_PRESSURE_KPA: f64 = 100.0;

/// Cloud transport rate. Smooth terrain passes moisture on more readily.
#[must_use]
pub fn conductivity(roughness: f64) -> f64 {
    (0.1 * (2.0 - roughness.clamp(0.0, 2.0))).max(MIN_CONDUCTIVITY)
}

/// Evaporation rate, rising with temperature and falling with pressure.
#[must_use]
pub fn evaporativity(temperature: f64, pressure_kpa: f64) -> f64 {
    let thermal = 0.5 * (0.10 + (0.01 * temperature).max(0.05));
    ((REFERENCE_PRESSURE_KPA / pressure_kpa) * thermal).min(MAX_EVAPORATIVITY)
}

/// Surface water lost to ground drainage each step. Grows with altitude.
#[must_use]
pub fn runoff(altitude: f64) -> f64 {
    altitude.max(0.0) * 0.000_02 + 0.005
}

/// Whether a node at `altitude` starts as an ocean reservoir.
#[must_use]
pub fn is_ocean(altitude: f64) -> bool {
    altitude <= 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    #[test]
    fn test_conductivity_range() {
        assert!((conductivity(0.0) - 0.2).abs() < EPSILON);
        assert!((conductivity(1.0) - 0.1).abs() < EPSILON);
        assert_eq!(conductivity(2.0), MIN_CONDUCTIVITY);
        assert_eq!(conductivity(5.0), MIN_CONDUCTIVITY);
        assert!((conductivity(-3.0) - 0.2).abs() < EPSILON);
    }

    #[test]
    fn test_evaporativity_floor_and_cap() {
        // Below 5 °C the thermal term is floored.
        let cold = evaporativity(-20.0, 100.0);
        assert!((cold - 0.075).abs() < EPSILON, "cold {cold}");
        let warm = evaporativity(30.0, 100.0);
        assert!((warm - 0.2).abs() < EPSILON, "warm {warm}");
        assert_eq!(evaporativity(30.0, 10.0), MAX_EVAPORATIVITY);
    }

    #[test]
    fn test_evaporativity_falls_with_pressure() {
        assert!(evaporativity(20.0, 150.0) < evaporativity(20.0, 101.0));
    }

    #[test]
    fn test_runoff() {
        assert!((runoff(-500.0) - 0.005).abs() < EPSILON);
        assert!((runoff(1000.0) - 0.025).abs() < EPSILON);
    }

    #[test]
    fn test_ocean_threshold() {
        assert!(is_ocean(0.0));
        assert!(is_ocean(-1.0));
        assert!(!is_ocean(0.1));
    }
}
