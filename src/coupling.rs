//! Mutual impedance between line conductors and the duct, and the induced voltage they produce.
//!
//! The model is the Carson–Clem earth-return approximation. For a conductor at direct
//! separation `d` from the duct, whose earth-return image sits at distance `D_image`,
//!
//! ```text
//! Z_m = μ₀ω/8 + j·(μ₀ω/2π)·ln(D_image / d)      [Ω/m]
//! ```
//!
//! and the voltage induced over a crossing of length `L` is the phasor sum
//! `V = Σ Z_m,k · L · I_k`.
//!
//! ## Assumptions
//!
//! * Power frequencies, up to roughly 1 kHz; displacement currents in the earth are neglected.
//! * Homogeneous non-magnetic earth (layered soil is reduced first, see [`crate::soil`]).
//! * Separations small compared with the equivalent depth `D_e`.
//! * Ducts buried shallower than `D_e/2`; deeper ones are rejected, never given a negative
//!   reactance.
//! * All current phase angles share one system reference.

use tracing::{debug, trace};

use crate::constants::{angular_frequency, PhysicalConstants};
use crate::duct::Duct;
use crate::errors::{ensure_finite, ensure_finite_phasor, CouplingError, Result};
use crate::geometry::{
    equivalent_earth_depth, image_distance_at_depth, separation, validate_earth_parameters,
};
use crate::line::{Conductor, ConductorKind};
use crate::math::{phasor_angle_deg, CScalar, Scalar};
use crate::soil::SoilModel;

/// Frequency, soil and constants defining one evaluation.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScenarioParameters {
    /// System frequency in hertz.
    pub frequency_hz: Scalar,
    /// Uniform (or equivalent uniform) soil resistivity in Ω·m.
    pub soil_resistivity: Scalar,
    /// Physical constants in force.
    pub constants: PhysicalConstants,
}

impl ScenarioParameters {
    /// Scenario at `frequency_hz` over uniform soil of `soil_resistivity` Ω·m, CODATA constants.
    #[must_use]
    pub const fn new(frequency_hz: Scalar, soil_resistivity: Scalar) -> Self {
        Self {
            frequency_hz,
            soil_resistivity,
            constants: PhysicalConstants::CODATA_2018,
        }
    }

    /// Scenario whose resistivity is the equivalent uniform value of `soil`.
    pub fn from_soil(frequency_hz: Scalar, soil: &SoilModel) -> Result<Self> {
        let constants = PhysicalConstants::CODATA_2018;
        let soil_resistivity = soil.equivalent_resistivity(frequency_hz, &constants)?;
        Ok(Self {
            frequency_hz,
            soil_resistivity,
            constants,
        })
    }

    /// Replaces the constants table.
    #[must_use]
    pub fn with_constants(mut self, constants: PhysicalConstants) -> Self {
        self.constants = constants;
        self
    }

    /// Checks frequency, resistivity and constants.
    pub fn validate(&self) -> Result<()> {
        self.constants.validate()?;
        validate_earth_parameters(self.soil_resistivity, self.frequency_hz)
    }
}

/// Scenario-level earth-return quantities, shared by every conductor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EarthReturn {
    omega: Scalar,
    resistance: Scalar,
    reactance_coefficient: Scalar,
    depth: Scalar,
    permeability: Scalar,
}

impl EarthReturn {
    /// Validates `scenario` and derives ω, the earth-return resistance and `D_e`.
    pub fn new(scenario: &ScenarioParameters) -> Result<Self> {
        scenario.validate()?;
        let mu0 = scenario.constants.vacuum_permeability;
        let omega = angular_frequency(scenario.frequency_hz);
        let depth = equivalent_earth_depth(
            scenario.soil_resistivity,
            scenario.frequency_hz,
            &scenario.constants,
        )?;
        let earth = Self {
            omega: ensure_finite(omega, "angular frequency")?,
            resistance: ensure_finite(mu0 * omega / 8.0, "earth-return resistance")?,
            reactance_coefficient: ensure_finite(
                mu0 * omega / (2.0 * std::f64::consts::PI),
                "reactance coefficient",
            )?,
            depth,
            permeability: mu0,
        };
        debug!(
            frequency_hz = scenario.frequency_hz,
            soil_resistivity = scenario.soil_resistivity,
            depth_m = depth,
            resistance_ohm_per_m = earth.resistance,
            "earth-return model prepared"
        );
        Ok(earth)
    }

    /// Angular frequency ω in rad/s.
    #[must_use]
    pub const fn angular_frequency(&self) -> Scalar {
        self.omega
    }

    /// Earth-return resistance `μ₀ω/8` in Ω/m.
    #[must_use]
    pub const fn resistance(&self) -> Scalar {
        self.resistance
    }

    /// Equivalent earth-return depth `D_e` in meters.
    #[must_use]
    pub const fn equivalent_depth(&self) -> Scalar {
        self.depth
    }

    /// Vacuum permeability used by this model.
    #[must_use]
    pub const fn permeability(&self) -> Scalar {
        self.permeability
    }

    /// `μ₀ω/(2π)` in Ω/m; multiplies the logarithmic geometry term.
    #[must_use]
    pub const fn reactance_coefficient(&self) -> Scalar {
        self.reactance_coefficient
    }

    /// Mutual reactance `(μ₀ω/2π)·ln(image / direct)` in Ω/m.
    pub fn mutual_reactance(&self, direct: Scalar, image: Scalar) -> Result<Scalar> {
        if !(direct.is_finite() && direct > 0.0 && image.is_finite() && image > 0.0) {
            return Err(CouplingError::InvalidGeometry(format!(
                "distances must be positive, got direct {direct} m and image {image} m"
            )));
        }
        ensure_finite(
            self.reactance_coefficient * (image / direct).ln(),
            "mutual reactance",
        )
    }

    /// Mutual impedance per unit length between `conductor` and `duct`, in Ω/m.
    pub fn mutual_impedance(&self, conductor: &Conductor, duct: &Duct) -> Result<CScalar> {
        let (direct, image) = self.distances(conductor, duct)?;
        let reactance = self.mutual_reactance(direct, image)?;
        Ok(CScalar::new(self.resistance, reactance))
    }

    /// Full coupling record for one conductor, including its voltage contribution.
    pub fn couple(
        &self,
        index: usize,
        conductor: &Conductor,
        duct: &Duct,
    ) -> Result<ConductorCoupling> {
        let current = ensure_finite_phasor(conductor.current, "conductor current")?;
        let (direct, image) = self.distances(conductor, duct)?;
        let mutual_impedance = CScalar::new(self.resistance, self.mutual_reactance(direct, image)?);
        let contribution = ensure_finite_phasor(
            mutual_impedance * duct.crossing_length * current,
            "voltage contribution",
        )?;
        trace!(
            index,
            separation_m = direct,
            image_distance_m = image,
            z_re = mutual_impedance.re,
            z_im = mutual_impedance.im,
            contribution_v = contribution.norm(),
            "conductor coupled"
        );
        Ok(ConductorCoupling {
            index,
            kind: conductor.kind,
            separation: direct,
            image_distance: image,
            mutual_impedance,
            contribution,
        })
    }

    fn distances(&self, conductor: &Conductor, duct: &Duct) -> Result<(Scalar, Scalar)> {
        let direct = separation(conductor.position, duct.position)?;
        if let Some(radius) = conductor.radius {
            if !(radius.is_finite() && radius > 0.0) {
                return Err(CouplingError::InvalidGeometry(format!(
                    "conductor radius must be positive, got {radius} m"
                )));
            }
            if direct <= radius {
                return Err(CouplingError::InvalidGeometry(format!(
                    "duct lies within the conductor radius ({direct} m ≤ {radius} m)"
                )));
            }
        }
        let image = image_distance_at_depth(conductor.position, duct.position, self.depth)?;
        if image < direct {
            return Err(CouplingError::InvalidGeometry(format!(
                "duct at depth {} m lies below half the earth-return depth {} m",
                -duct.position.y, self.depth
            )));
        }
        Ok((direct, image))
    }
}

/// Coupling between one conductor and the duct.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConductorCoupling {
    /// Position of the conductor in the input slice.
    pub index: usize,
    /// Conductor role.
    pub kind: ConductorKind,
    /// Direct conductor–duct separation (m).
    pub separation: Scalar,
    /// Duct to earth-return image distance (m).
    pub image_distance: Scalar,
    /// Mutual impedance (Ω/m).
    pub mutual_impedance: CScalar,
    /// Voltage contributed over the crossing length (V).
    pub contribution: CScalar,
}

/// Per-conductor couplings and the resulting induced voltage.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct CouplingReport {
    /// System frequency (Hz).
    pub frequency_hz: Scalar,
    /// Soil resistivity used (Ω·m).
    pub soil_resistivity: Scalar,
    /// Equivalent earth-return depth (m).
    pub equivalent_depth: Scalar,
    /// Exposed crossing length (m).
    pub crossing_length: Scalar,
    /// One entry per conductor, in input order.
    pub couplings: Vec<ConductorCoupling>,
    /// Phasor sum of all contributions (V).
    pub total_voltage: CScalar,
}

impl CouplingReport {
    /// Magnitude of the induced voltage (V).
    #[must_use]
    pub fn magnitude(&self) -> Scalar {
        self.total_voltage.norm()
    }

    /// Phase of the induced voltage in degrees, against the current reference.
    #[must_use]
    pub fn phase_deg(&self) -> Scalar {
        phasor_angle_deg(self.total_voltage)
    }
}

/// Mutual impedance per unit length (Ω/m) between one conductor and the duct.
pub fn mutual_impedance(
    conductor: &Conductor,
    duct: &Duct,
    scenario: &ScenarioParameters,
) -> Result<CScalar> {
    duct.validate()?;
    EarthReturn::new(scenario)?.mutual_impedance(conductor, duct)
}

/// Voltage (V) induced on the duct by all `conductors`.
pub fn induced_voltage(
    duct: &Duct,
    conductors: &[Conductor],
    scenario: &ScenarioParameters,
) -> Result<CScalar> {
    duct.validate()?;
    let earth = EarthReturn::new(scenario)?;
    let total = conductors
        .iter()
        .enumerate()
        .try_fold(CScalar::new(0.0, 0.0), |acc, (i, c)| {
            Ok::<_, CouplingError>(acc + earth.couple(i, c, duct)?.contribution)
        })?;
    let total = ensure_finite_phasor(total, "induced voltage")?;
    debug!(
        conductors = conductors.len(),
        magnitude_v = total.norm(),
        phase_deg = phasor_angle_deg(total),
        "induced voltage computed"
    );
    Ok(total)
}

/// Builds the per-conductor coupling report.
pub fn analyze(
    duct: &Duct,
    conductors: &[Conductor],
    scenario: &ScenarioParameters,
) -> Result<CouplingReport> {
    duct.validate()?;
    let earth = EarthReturn::new(scenario)?;
    let couplings = conductors
        .iter()
        .enumerate()
        .map(|(i, c)| earth.couple(i, c, duct))
        .collect::<Result<Vec<_>>>()?;
    let total_voltage = ensure_finite_phasor(
        couplings.iter().map(|c| c.contribution).sum(),
        "induced voltage",
    )?;
    debug!(
        conductors = couplings.len(),
        magnitude_v = total_voltage.norm(),
        "coupling report assembled"
    );
    Ok(CouplingReport {
        frequency_hz: scenario.frequency_hz,
        soil_resistivity: scenario.soil_resistivity,
        equivalent_depth: earth.equivalent_depth(),
        crossing_length: duct.crossing_length,
        couplings,
        total_voltage,
    })
}
