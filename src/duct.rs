//! The buried pipeline exposed to the crossing, and its distributed electrical parameters.

use std::f64::consts::{PI, SQRT_2};

use num_complex::Complex;

use crate::coupling::{EarthReturn, ScenarioParameters};
use crate::errors::{ensure_finite, ensure_finite_phasor, CouplingError, Result};
use crate::materials::{CoatingMaterial, PipeMaterial};
use crate::math::{CScalar, Scalar, R2};

/// Physical construction of the pipe.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipeProperties {
    /// Outer diameter of the metallic wall (m).
    pub outer_diameter: Scalar,
    /// Coating thickness (m).
    pub coating_thickness: Scalar,
    /// Metallic wall thickness (m). When absent the wall is treated as a thin shell.
    #[cfg_attr(feature = "serde", serde(default))]
    pub wall_thickness: Option<Scalar>,
    /// Wall material.
    #[cfg_attr(feature = "serde", serde(default))]
    pub material: PipeMaterial,
    /// Coating dielectric.
    #[cfg_attr(feature = "serde", serde(default))]
    pub coating: CoatingMaterial,
}

impl PipeProperties {
    /// Polyethylene-coated pipe of the given wall material.
    #[must_use]
    pub fn new(outer_diameter: Scalar, coating_thickness: Scalar, material: PipeMaterial) -> Self {
        Self {
            outer_diameter,
            coating_thickness,
            wall_thickness: None,
            material,
            coating: CoatingMaterial::polyethylene(),
        }
    }

    /// Sets the metallic wall thickness.
    #[must_use]
    pub fn with_wall_thickness(mut self, wall_thickness: Scalar) -> Self {
        self.wall_thickness = Some(wall_thickness);
        self
    }

    /// Geometric mean radius of the wall cross-section (m).
    ///
    /// A tube of outer radius `r₂` and inner radius `r₁` has
    /// `ln GMR = ln r₂ − r₁⁴·ln(r₂/r₁)/(r₂² − r₁²)² + (3r₁² − r₂²)/(4(r₂² − r₁²))`,
    /// which falls to `r₂·e^(−1/4)` for a solid bar. Without a wall thickness the outer
    /// radius is returned.
    #[must_use]
    pub fn geometric_mean_radius(&self) -> Scalar {
        let outer = 0.5 * self.outer_diameter;
        let Some(wall) = self.wall_thickness else {
            return outer;
        };
        let inner = outer - wall;
        if inner <= 0.0 {
            return outer * (-0.25_f64).exp();
        }
        let area = outer * outer - inner * inner;
        let ln_gmr = outer.ln() - inner.powi(4) * (outer / inner).ln() / (area * area)
            + (3.0 * inner * inner - outer * outer) / (4.0 * area);
        ln_gmr.exp()
    }

    fn validate(&self) -> Result<()> {
        let positive = [
            ("pipe outer diameter", self.outer_diameter),
            ("coating thickness", self.coating_thickness),
            ("wall resistivity", self.material.resistivity()),
            ("wall relative permeability", self.material.relative_permeability()),
            ("coating resistivity", self.coating.resistivity),
            ("coating relative permittivity", self.coating.relative_permittivity),
        ];
        for (what, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(CouplingError::InvalidGeometry(format!(
                    "{what} must be positive, got {value}"
                )));
            }
        }
        if let Some(wall) = self.wall_thickness {
            if !(wall.is_finite() && wall > 0.0 && wall <= 0.5 * self.outer_diameter) {
                return Err(CouplingError::InvalidGeometry(format!(
                    "wall thickness must lie in (0, {}] m, got {wall} m",
                    0.5 * self.outer_diameter
                )));
            }
        }
        Ok(())
    }

    /// Distributed parameters of the pipe under `earth`.
    pub fn characteristics(
        &self,
        earth: &EarthReturn,
        scenario: &ScenarioParameters,
    ) -> Result<DuctCharacteristics> {
        self.validate()?;
        let omega = earth.angular_frequency();
        let mu0 = earth.permeability();
        let eps0 = scenario.constants.vacuum_permittivity;
        let d = self.outer_diameter;

        let mu_wall = self.material.relative_permeability() * mu0;
        let internal = (self.material.resistivity() * mu_wall * omega).sqrt() / (PI * d * SQRT_2);
        let geometric_mean_radius = self.geometric_mean_radius();
        let external =
            earth.reactance_coefficient() * (earth.equivalent_depth() / geometric_mean_radius).ln();
        let self_impedance = ensure_finite_phasor(
            Complex::new(internal + earth.resistance(), internal + external),
            "pipe self impedance",
        )?;

        let t = self.coating_thickness;
        let conductance = PI * d / (self.coating.resistivity * t);
        let capacitance = eps0 * self.coating.relative_permittivity * PI * d / t;
        let shunt_admittance = ensure_finite_phasor(
            Complex::new(conductance, omega * capacitance),
            "coating shunt admittance",
        )?;

        let characteristic_impedance = ensure_finite_phasor(
            (self_impedance / shunt_admittance).sqrt(),
            "characteristic impedance",
        )?;
        let propagation_constant = ensure_finite_phasor(
            (self_impedance * shunt_admittance).sqrt(),
            "propagation constant",
        )?;
        let characteristic_length = if propagation_constant.re > 0.0 {
            ensure_finite(propagation_constant.re.recip(), "characteristic length")?
        } else {
            Scalar::INFINITY
        };

        Ok(DuctCharacteristics {
            geometric_mean_radius,
            self_impedance,
            shunt_admittance,
            characteristic_impedance,
            propagation_constant,
            characteristic_length,
        })
    }
}

/// Distributed electrical parameters of the pipe.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DuctCharacteristics {
    /// Radius the external flux term is taken from (m).
    pub geometric_mean_radius: Scalar,
    /// Series self impedance with earth return (Ω/m).
    pub self_impedance: CScalar,
    /// Coating shunt admittance (S/m).
    pub shunt_admittance: CScalar,
    /// Characteristic impedance `sqrt(Z/Y)` (Ω).
    pub characteristic_impedance: CScalar,
    /// Propagation constant `sqrt(Z·Y)` (1/m).
    pub propagation_constant: CScalar,
    /// `1/Re(γ)` in meters; infinite for a lossless pipe.
    pub characteristic_length: Scalar,
}

/// Pipeline segment crossing the transmission line.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Duct {
    /// Position in meters.
    pub position: R2,
    /// Length of pipe exposed to the crossing (m).
    pub crossing_length: Scalar,
    /// Construction details, when self-impedance effects are reported.
    pub pipe: Option<PipeProperties>,
}

impl Duct {
    /// Duct at `(x, y)` exposed over `crossing_length` meters.
    #[must_use]
    pub fn new(x: Scalar, y: Scalar, crossing_length: Scalar) -> Self {
        Self {
            position: R2::new(x, y),
            crossing_length,
            pipe: None,
        }
    }

    /// Attaches pipe construction details.
    #[must_use]
    pub fn with_pipe(mut self, pipe: PipeProperties) -> Self {
        self.pipe = Some(pipe);
        self
    }

    /// Same duct moved by `dx` meters horizontally.
    #[must_use]
    pub fn shifted(mut self, dx: Scalar) -> Self {
        self.position.x += dx;
        self
    }

    /// Checks the position and crossing length.
    pub fn validate(&self) -> Result<()> {
        if !self.position.iter().all(|c| c.is_finite()) {
            return Err(CouplingError::InvalidGeometry(format!(
                "duct position ({}, {}) is not finite",
                self.position.x, self.position.y
            )));
        }
        if !(self.crossing_length.is_finite() && self.crossing_length >= 0.0) {
            return Err(CouplingError::InvalidGeometry(format!(
                "crossing length must be non-negative, got {} m",
                self.crossing_length
            )));
        }
        Ok(())
    }

    /// Distributed parameters of the pipe; requires [`PipeProperties`].
    pub fn characteristics(&self, scenario: &ScenarioParameters) -> Result<DuctCharacteristics> {
        let pipe = self.pipe.ok_or(CouplingError::MissingParameter("pipe"))?;
        let earth = EarthReturn::new(scenario)?;
        pipe.characteristics(&earth, scenario)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn steel_duct() -> Duct {
        Duct::new(0.0, -1.5, 1000.0)
            .with_pipe(PipeProperties::new(0.219, 0.003, PipeMaterial::Steel))
    }

    #[test]
    fn self_impedance_exceeds_earth_return_resistance() {
        let scenario = ScenarioParameters::new(60.0, 100.0);
        let ch = steel_duct().characteristics(&scenario).unwrap();
        let earth = EarthReturn::new(&scenario).unwrap();
        assert!(ch.self_impedance.re > earth.resistance());
        assert!(ch.self_impedance.im > 0.0);
    }

    #[test]
    fn line_parameters_are_consistent() {
        let ch = steel_duct().characteristics(&ScenarioParameters::new(60.0, 100.0)).unwrap();
        let z = ch.characteristic_impedance * ch.propagation_constant;
        assert_relative_eq!(z.re, ch.self_impedance.re, max_relative = 1.0e-9);
        assert_relative_eq!(z.im, ch.self_impedance.im, max_relative = 1.0e-9);
        assert_relative_eq!(
            ch.characteristic_length,
            1.0 / ch.propagation_constant.re,
            max_relative = 1.0e-12
        );
        assert!(ch.characteristic_length > 0.0);
    }

    #[test]
    fn admittance_scales_inversely_with_coating() {
        let scenario = ScenarioParameters::new(60.0, 100.0);
        let thin = steel_duct().characteristics(&scenario).unwrap();
        let thick = Duct::new(0.0, -1.5, 1000.0)
            .with_pipe(PipeProperties::new(0.219, 0.006, PipeMaterial::Steel))
            .characteristics(&scenario)
            .unwrap();
        let (thin, thick) = (thin.shunt_admittance, thick.shunt_admittance);
        assert_relative_eq!(thin.re, 2.0 * thick.re, max_relative = 1.0e-12);
        assert_relative_eq!(thin.im, 2.0 * thick.im, max_relative = 1.0e-12);
    }

    #[test]
    fn wall_thickness_sets_the_geometric_mean_radius() {
        let shell = PipeProperties::new(0.219, 0.003, PipeMaterial::Steel);
        assert_eq!(shell.geometric_mean_radius(), 0.1095);

        let walled = shell.with_wall_thickness(0.008);
        assert_relative_eq!(walled.geometric_mean_radius(), 0.106_867_01, max_relative = 1.0e-6);

        let solid = shell.with_wall_thickness(0.1095);
        assert_relative_eq!(
            solid.geometric_mean_radius(),
            0.1095 * (-0.25_f64).exp(),
            max_relative = 1.0e-12
        );
    }

    #[test]
    fn thicker_wall_raises_the_self_reactance() {
        let scenario = ScenarioParameters::new(60.0, 100.0);
        let shell = steel_duct().characteristics(&scenario).unwrap();
        let pipe = PipeProperties::new(0.219, 0.003, PipeMaterial::Steel).with_wall_thickness(0.05);
        let walled = Duct::new(0.0, -1.5, 1000.0)
            .with_pipe(pipe)
            .characteristics(&scenario)
            .unwrap();
        assert!(walled.geometric_mean_radius < shell.geometric_mean_radius);
        assert_eq!(walled.self_impedance.re, shell.self_impedance.re);
        assert!(walled.self_impedance.im > shell.self_impedance.im);
    }

    #[test]
    fn wall_thicker_than_the_radius_is_rejected() {
        let pipe = PipeProperties::new(0.219, 0.003, PipeMaterial::Steel).with_wall_thickness(0.2);
        let err = Duct::new(0.0, -1.5, 1.0)
            .with_pipe(pipe)
            .characteristics(&ScenarioParameters::new(60.0, 100.0))
            .unwrap_err();
        assert!(matches!(err, CouplingError::InvalidGeometry(_)));
    }

    #[test]
    fn characteristics_need_pipe_properties() {
        let err = Duct::new(0.0, 0.0, 10.0)
            .characteristics(&ScenarioParameters::new(60.0, 100.0))
            .unwrap_err();
        assert_eq!(err, CouplingError::MissingParameter("pipe"));
    }

    #[test]
    fn negative_crossing_length_is_invalid() {
        assert!(matches!(
            Duct::new(0.0, 0.0, -1.0).validate(),
            Err(CouplingError::InvalidGeometry(_))
        ));
        assert!(Duct::new(0.0, 0.0, 0.0).validate().is_ok());
    }

    #[test]
    fn shifted_moves_only_horizontally() {
        let d = Duct::new(1.0, -2.0, 5.0).shifted(3.0);
        assert_eq!(d.position, R2::new(4.0, -2.0));
        assert_eq!(d.crossing_length, 5.0);
    }
}
