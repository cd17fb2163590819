//! Convenience re-exports for evaluating crossing scenarios.

pub use crate::assessment::{
    ac_current_density, assess_coating, CoatingAssessment, CoatingKind, CorrosionRisk,
    DEFAULT_HOLIDAY_DIAMETER,
};
pub use crate::config::{
    ConductorConfig, CrossingScenario, DuctConfig, ParametersConfig, ScenarioConfig,
};
pub use crate::constants::{angular_frequency, PhysicalConstants};
pub use crate::coupling::{
    analyze, induced_voltage, mutual_impedance, ConductorCoupling, CouplingReport, EarthReturn,
    ScenarioParameters,
};
pub use crate::duct::{Duct, DuctCharacteristics, PipeProperties};
pub use crate::errors::CouplingError;
pub use crate::geometry::{distance, equivalent_earth_depth, image_distance, separation};
pub use crate::line::{Conductor, ConductorKind, TransmissionLine};
pub use crate::materials::{CoatingMaterial, PipeMaterial};
pub use crate::math::{phasor, phasor_angle_deg, phasor_deg, CScalar, Scalar, R2};
pub use crate::soil::SoilModel;
pub use crate::sweep::{
    frequency_response, lateral_profile, linspace, logspace_hz, mag, phase_deg, soil_sensitivity,
    ProfilePoint, SoilGridPoint,
};
