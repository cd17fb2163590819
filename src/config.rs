//! Scenario description as supplied by an external caller, and its conversion to model types.
//!
//! With the `serde` feature the configuration derives `Deserialize`, so a scenario can be read
//! from JSON or any other serde format:
//!
//! ```json
//! {
//!   "conductors": [{ "x": 0.0, "y": 10.0, "current_magnitude": 100.0, "current_phase_deg": 0.0 }],
//!   "duct": { "x": 0.0, "y": 0.0, "crossing_length_m": 50.0 },
//!   "scenario": { "frequency_hz": 60.0, "soil_resistivity_ohm_m": 100.0 }
//! }
//! ```

use std::collections::BTreeMap;

use crate::assessment::CoatingKind;
use crate::constants::PhysicalConstants;
use crate::coupling::{analyze, CouplingReport, ScenarioParameters};
use crate::duct::{Duct, DuctCharacteristics, PipeProperties};
use crate::errors::{CouplingError, Result};
use crate::line::{Conductor, ConductorKind, TransmissionLine};
use crate::math::Scalar;
use crate::soil::SoilModel;

/// One conductor descriptor.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct ConductorConfig {
    /// Horizontal position (m).
    pub x: Scalar,
    /// Height (m), positive above ground.
    pub y: Scalar,
    /// RMS current magnitude (A).
    pub current_magnitude: Scalar,
    /// Current phase against the system reference (degrees).
    #[cfg_attr(feature = "serde", serde(default))]
    pub current_phase_deg: Scalar,
    /// Conductor radius (m).
    #[cfg_attr(feature = "serde", serde(default))]
    pub radius: Option<Scalar>,
    /// Conductor role.
    #[cfg_attr(feature = "serde", serde(default))]
    pub kind: ConductorKind,
}

impl ConductorConfig {
    fn build(&self) -> Conductor {
        let conductor =
            Conductor::from_polar(self.x, self.y, self.current_magnitude, self.current_phase_deg)
                .with_kind(self.kind);
        match self.radius {
            Some(r) => conductor.with_radius(r),
            None => conductor,
        }
    }
}

/// Duct descriptor.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct DuctConfig {
    /// Horizontal position (m).
    pub x: Scalar,
    /// Vertical position (m), negative below ground.
    pub y: Scalar,
    /// Exposed crossing length (m).
    pub crossing_length_m: Scalar,
    /// Optional construction details.
    #[cfg_attr(feature = "serde", serde(default))]
    pub pipe: Option<PipeProperties>,
    /// Coating family used for the withstand check.
    #[cfg_attr(feature = "serde", serde(default))]
    pub coating_kind: CoatingKind,
}

/// Scenario parameters descriptor.
///
/// The soil is given either as a plain resistivity or as a [`SoilModel`]; when both are
/// present the model wins.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParametersConfig {
    /// System frequency (Hz).
    #[cfg_attr(feature = "serde", serde(default))]
    pub frequency_hz: Option<Scalar>,
    /// Uniform soil resistivity (Ω·m).
    #[cfg_attr(feature = "serde", serde(default))]
    pub soil_resistivity_ohm_m: Option<Scalar>,
    /// Layered soil description.
    #[cfg_attr(feature = "serde", serde(default))]
    pub soil: Option<SoilModel>,
    /// Replacement constants table; must name every required constant.
    #[cfg_attr(feature = "serde", serde(default))]
    pub constants: Option<BTreeMap<String, Scalar>>,
}

impl ParametersConfig {
    fn soil_model(&self) -> Result<SoilModel> {
        match (self.soil, self.soil_resistivity_ohm_m) {
            (Some(model), _) => Ok(model),
            (None, Some(rho)) => Ok(SoilModel::uniform(rho)),
            (None, None) => Err(CouplingError::MissingParameter("soil_resistivity_ohm_m")),
        }
    }

    /// Resolves frequency, soil and constants into validated [`ScenarioParameters`].
    pub fn build(&self) -> Result<ScenarioParameters> {
        let frequency_hz = self
            .frequency_hz
            .ok_or(CouplingError::MissingParameter("frequency_hz"))?;
        let constants = match &self.constants {
            Some(table) => {
                PhysicalConstants::from_entries(table.iter().map(|(k, v)| (k.as_str(), *v)))?
            }
            None => PhysicalConstants::CODATA_2018,
        };
        let soil_resistivity = self
            .soil_model()?
            .equivalent_resistivity(frequency_hz, &constants)?;
        let scenario = ScenarioParameters {
            frequency_hz,
            soil_resistivity,
            constants,
        };
        scenario.validate()?;
        Ok(scenario)
    }
}

/// Complete scenario description.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioConfig {
    /// Identifier used in logs and reports.
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    /// Transmission-line conductors.
    pub conductors: Vec<ConductorConfig>,
    /// The exposed duct.
    pub duct: DuctConfig,
    /// Frequency, soil and constants.
    pub scenario: ParametersConfig,
}

impl ScenarioConfig {
    /// Validates the description and converts it into model types.
    pub fn build(&self) -> Result<CrossingScenario> {
        let mut line = TransmissionLine::new(self.name.clone());
        for conductor in &self.conductors {
            line.add_conductor(conductor.build());
        }
        let mut duct = Duct::new(self.duct.x, self.duct.y, self.duct.crossing_length_m);
        if let Some(pipe) = self.duct.pipe {
            duct = duct.with_pipe(pipe);
        }
        duct.validate()?;
        Ok(CrossingScenario {
            line,
            duct,
            coating_kind: self.duct.coating_kind,
            parameters: self.scenario.build()?,
        })
    }
}

/// Validated model types ready for evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct CrossingScenario {
    /// The transmission line.
    pub line: TransmissionLine,
    /// The exposed duct.
    pub duct: Duct,
    /// Coating family of the duct.
    pub coating_kind: CoatingKind,
    /// Frequency, soil and constants.
    pub parameters: ScenarioParameters,
}

impl CrossingScenario {
    /// Per-conductor coupling report.
    pub fn analyze(&self) -> Result<CouplingReport> {
        analyze(&self.duct, self.line.conductors(), &self.parameters)
    }

    /// Distributed parameters of the duct, when its construction is known.
    pub fn duct_characteristics(&self) -> Option<Result<DuctCharacteristics>> {
        self.duct
            .pipe
            .map(|_| self.duct.characteristics(&self.parameters))
    }
}
