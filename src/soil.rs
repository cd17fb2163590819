//! Earth models reduced to the uniform resistivity the coupling formula consumes.

use std::f64::consts::PI;

use crate::constants::PhysicalConstants;
use crate::errors::{ensure_finite, CouplingError, Result};
use crate::geometry::validate_earth_parameters;
use crate::math::Scalar;

/// Soil description.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "model", rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SoilModel {
    /// Homogeneous earth.
    Uniform {
        /// Resistivity in Ω·m.
        resistivity: Scalar,
    },
    /// Upper layer of finite thickness over a semi-infinite lower layer.
    TwoLayer {
        /// Upper layer resistivity ρ₁ in Ω·m.
        upper_resistivity: Scalar,
        /// Lower layer resistivity ρ₂ in Ω·m.
        lower_resistivity: Scalar,
        /// Upper layer thickness h₁ in meters.
        upper_thickness: Scalar,
    },
}

impl SoilModel {
    /// Homogeneous soil of resistivity `resistivity` Ω·m.
    #[must_use]
    pub const fn uniform(resistivity: Scalar) -> Self {
        Self::Uniform { resistivity }
    }

    /// Equivalent uniform resistivity at `frequency_hz`.
    ///
    /// Two-layer soil is collapsed with
    /// `ρeq = ρ₁·((a + b) + (a − b)k)² / ((a + b) − (a − b)k)²` where `a = ρ₁^(−1/2)`,
    /// `b = ρ₂^(−1/2)` and `k = exp(−2h₁·sqrt(π f μ₀ / ρ₁))`.
    pub fn equivalent_resistivity(
        &self,
        frequency_hz: Scalar,
        constants: &PhysicalConstants,
    ) -> Result<Scalar> {
        match *self {
            Self::Uniform { resistivity } => {
                validate_earth_parameters(resistivity, frequency_hz)?;
                Ok(resistivity)
            }
            Self::TwoLayer {
                upper_resistivity,
                lower_resistivity,
                upper_thickness,
            } => {
                validate_earth_parameters(upper_resistivity, frequency_hz)?;
                validate_earth_parameters(lower_resistivity, frequency_hz)?;
                if !(upper_thickness.is_finite() && upper_thickness >= 0.0) {
                    return Err(CouplingError::InvalidScenario(format!(
                        "upper soil layer thickness must be non-negative, got {upper_thickness} m"
                    )));
                }

                let a = upper_resistivity.sqrt().recip();
                let b = lower_resistivity.sqrt().recip();
                let k = (-2.0
                    * upper_thickness
                    * (PI * frequency_hz * constants.vacuum_permeability / upper_resistivity)
                        .sqrt())
                .exp();
                let ratio = ((a + b) + (a - b) * k) / ((a + b) - (a - b) * k);
                ensure_finite(upper_resistivity * ratio * ratio, "equivalent soil resistivity")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    const C: PhysicalConstants = PhysicalConstants::CODATA_2018;

    #[test]
    fn uniform_soil_is_returned_unchanged() {
        assert_eq!(SoilModel::uniform(100.0).equivalent_resistivity(60.0, &C).unwrap(), 100.0);
    }

    #[test]
    fn identical_layers_reduce_to_uniform() {
        let soil = SoilModel::TwoLayer {
            upper_resistivity: 250.0,
            lower_resistivity: 250.0,
            upper_thickness: 3.0,
        };
        let rho = soil.equivalent_resistivity(60.0, &C).unwrap();
        assert_relative_eq!(rho, 250.0, max_relative = 1.0e-12);
    }

    #[test]
    fn thin_upper_layer_is_dominated_by_lower_layer() {
        let soil = SoilModel::TwoLayer {
            upper_resistivity: 100.0,
            lower_resistivity: 1000.0,
            upper_thickness: 2.0,
        };
        let rho = soil.equivalent_resistivity(60.0, &C).unwrap();
        assert_relative_eq!(rho, 982.723, max_relative = 1.0e-4);
    }

    #[test]
    fn zero_thickness_upper_layer_is_the_lower_layer() {
        let soil = SoilModel::TwoLayer {
            upper_resistivity: 30.0,
            lower_resistivity: 500.0,
            upper_thickness: 0.0,
        };
        let rho = soil.equivalent_resistivity(50.0, &C).unwrap();
        assert_relative_eq!(rho, 500.0, max_relative = 1.0e-12);
    }

    #[test]
    fn non_physical_layers_are_rejected() {
        let soil = SoilModel::TwoLayer {
            upper_resistivity: 100.0,
            lower_resistivity: 0.0,
            upper_thickness: 1.0,
        };
        assert!(matches!(
            soil.equivalent_resistivity(60.0, &C),
            Err(CouplingError::InvalidScenario(_))
        ));
    }
}
