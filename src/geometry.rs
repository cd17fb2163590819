//! Transverse-plane distances between line conductors, their earth-return images and the duct.
//!
//! Coordinates are `(x, y)` in meters with `y` positive upward and the earth surface at
//! `y = 0`. Every function is a pure function of its arguments.

use crate::constants::{angular_frequency, PhysicalConstants};
use crate::errors::{ensure_finite, CouplingError, Result};
use crate::math::{Scalar, R2};

fn check_position(p: R2, label: &str) -> Result<()> {
    if p.iter().all(|c| c.is_finite()) {
        Ok(())
    } else {
        Err(CouplingError::InvalidGeometry(format!(
            "{label} position ({}, {}) is not finite",
            p.x, p.y
        )))
    }
}

/// Euclidean distance between two positions.
pub fn distance(a: R2, b: R2) -> Result<Scalar> {
    check_position(a, "first")?;
    check_position(b, "second")?;
    ensure_finite((a - b).norm(), "distance")
}

/// Distance between a conductor and the duct, rejecting coincident positions.
pub fn separation(conductor: R2, duct: R2) -> Result<Scalar> {
    let d = distance(conductor, duct)?;
    if d > 0.0 {
        Ok(d)
    } else {
        Err(CouplingError::InvalidGeometry(format!(
            "conductor at ({}, {}) coincides with the duct",
            conductor.x, conductor.y
        )))
    }
}

/// Checks that frequency and soil resistivity are finite and strictly positive.
pub fn validate_earth_parameters(soil_resistivity: Scalar, frequency_hz: Scalar) -> Result<()> {
    if !(frequency_hz.is_finite() && frequency_hz > 0.0) {
        return Err(CouplingError::InvalidScenario(format!(
            "frequency must be positive and finite, got {frequency_hz} Hz"
        )));
    }
    if !(soil_resistivity.is_finite() && soil_resistivity > 0.0) {
        return Err(CouplingError::InvalidScenario(format!(
            "soil resistivity must be positive and finite, got {soil_resistivity} Ω·m"
        )));
    }
    Ok(())
}

/// Carson–Clem equivalent earth-return depth `D_e` in meters.
///
/// `D_e = 2·e^(1/2 − γ) · sqrt(ρ / (ω μ₀))`, which evaluates to about `658.87·sqrt(ρ/f)`.
pub fn equivalent_earth_depth(
    soil_resistivity: Scalar,
    frequency_hz: Scalar,
    constants: &PhysicalConstants,
) -> Result<Scalar> {
    validate_earth_parameters(soil_resistivity, frequency_hz)?;
    let omega = angular_frequency(frequency_hz);
    let factor = 2.0 * (0.5 - constants.euler_mascheroni).exp();
    let depth = factor * (soil_resistivity / (omega * constants.vacuum_permeability)).sqrt();
    ensure_finite(depth, "equivalent earth-return depth")
}

/// Distance from the duct to a conductor's earth-return image.
///
/// The image is the conductor mirrored in the earth surface and lowered a further `depth`,
/// so it sits at `(x, −y − depth)` whatever the conductor height.
pub fn image_distance_at_depth(conductor: R2, duct: R2, depth: Scalar) -> Result<Scalar> {
    let image = R2::new(conductor.x, -conductor.y - depth);
    let d = distance(image, duct)?;
    if d > 0.0 {
        Ok(d)
    } else {
        Err(CouplingError::InvalidGeometry(format!(
            "duct at ({}, {}) coincides with the earth-return image",
            duct.x, duct.y
        )))
    }
}

/// Distance from the duct to the conductor's earth-return image.
///
/// The image depth is derived from `soil_resistivity` and `frequency_hz` on every call.
pub fn image_distance(
    conductor: R2,
    duct: R2,
    soil_resistivity: Scalar,
    frequency_hz: Scalar,
) -> Result<Scalar> {
    let depth =
        equivalent_earth_depth(soil_resistivity, frequency_hz, &PhysicalConstants::CODATA_2018)?;
    image_distance_at_depth(conductor, duct, depth)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn distance_is_symmetric_and_zero_on_diagonal() {
        let a = R2::new(-3.3, 15.0);
        let b = R2::new(0.0, -1.5);
        assert_eq!(distance(a, b).unwrap(), distance(b, a).unwrap());
        assert_eq!(distance(a, a).unwrap(), 0.0);
        assert_relative_eq!(distance(R2::new(0.0, 0.0), R2::new(3.0, 4.0)).unwrap(), 5.0);
    }

    #[test]
    fn separation_rejects_coincident_points() {
        let err = separation(R2::zeros(), R2::zeros()).unwrap_err();
        assert!(matches!(err, CouplingError::InvalidGeometry(_)));
    }

    #[test]
    fn non_finite_coordinates_are_invalid_geometry() {
        let err = distance(R2::new(f64::NAN, 0.0), R2::zeros()).unwrap_err();
        assert!(matches!(err, CouplingError::InvalidGeometry(_)));
    }

    #[test]
    fn depth_matches_carson_clem_rule_of_thumb() {
        let depth = equivalent_earth_depth(100.0, 60.0, &PhysicalConstants::CODATA_2018).unwrap();
        assert_relative_eq!(depth, 658.87 * (100.0_f64 / 60.0).sqrt(), max_relative = 1.0e-4);
    }

    #[test]
    fn depth_tracks_scenario_parameters() {
        let c = PhysicalConstants::CODATA_2018;
        let base = equivalent_earth_depth(100.0, 60.0, &c).unwrap();
        let deeper = equivalent_earth_depth(400.0, 60.0, &c).unwrap();
        let shallower = equivalent_earth_depth(100.0, 240.0, &c).unwrap();
        assert_relative_eq!(deeper, 2.0 * base, max_relative = 1.0e-12);
        assert_relative_eq!(shallower, 0.5 * base, max_relative = 1.0e-12);
    }

    #[test]
    fn depth_rejects_non_physical_parameters() {
        let c = PhysicalConstants::CODATA_2018;
        assert!(matches!(
            equivalent_earth_depth(100.0, 0.0, &c),
            Err(CouplingError::InvalidScenario(_))
        ));
        assert!(matches!(
            equivalent_earth_depth(-1.0, 60.0, &c),
            Err(CouplingError::InvalidScenario(_))
        ));
    }

    #[test]
    fn image_depth_is_measured_from_the_earth_surface() {
        let conductor = R2::new(0.0, 10.0);
        let duct = R2::zeros();
        let depth = equivalent_earth_depth(100.0, 60.0, &PhysicalConstants::CODATA_2018).unwrap();
        let d = image_distance(conductor, duct, 100.0, 60.0).unwrap();
        assert_relative_eq!(d, depth + 10.0, max_relative = 1.0e-12);
    }

    #[test]
    fn raising_the_conductor_lowers_its_image() {
        let duct = R2::new(0.0, -1.5);
        let depth = 65.89;
        let mut previous = 0.0;
        for height in [10.0, 40.0, depth - 1.5, 200.0] {
            let image = image_distance_at_depth(R2::new(0.0, height), duct, depth).unwrap();
            let direct = distance(R2::new(0.0, height), duct).unwrap();
            assert!(image > previous);
            assert!(image > direct, "image {image} m not beyond conductor at {direct} m");
            previous = image;
        }
    }
}
