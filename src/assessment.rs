//! Screening of an induced voltage against coating withstand limits and AC-corrosion criteria.

use std::f64::consts::PI;

use crate::errors::{ensure_finite, CouplingError, Result};
use crate::math::{CScalar, Scalar};

/// Current density below which AC corrosion is unlikely (A/m²).
pub const LOW_RISK_CURRENT_DENSITY: Scalar = 20.0;
/// Current density above which AC corrosion is very likely (A/m²).
pub const HIGH_RISK_CURRENT_DENSITY: Scalar = 100.0;
/// Holiday (coating defect) diameter giving a 1 cm² exposed area (m).
pub const DEFAULT_HOLIDAY_DIAMETER: Scalar = 0.011_28;

/// Pipeline coating family.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoatingKind {
    /// Three-layer or extruded polyethylene.
    #[default]
    ExtrudedPolyethylene,
    /// Fusion-bonded epoxy.
    FusionBondedEpoxy,
    /// Plastic tape wrap.
    PlasticTape,
}

impl CoatingKind {
    /// Withstand voltage of the coating in kV.
    #[must_use]
    pub const fn withstand_kv(&self) -> Scalar {
        match self {
            Self::ExtrudedPolyethylene => 5.0,
            Self::FusionBondedEpoxy => 3.0,
            Self::PlasticTape => 2.0,
        }
    }
}

/// Coating stress verdict.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoatingAssessment {
    /// Coating assessed.
    pub coating: CoatingKind,
    /// Magnitude of the induced voltage (kV).
    pub voltage_kv: Scalar,
    /// Coating withstand (kV).
    pub limit_kv: Scalar,
    /// Whether the voltage stays within the withstand.
    pub safe: bool,
    /// `limit / voltage`; infinite when no voltage is induced.
    pub safety_factor: Scalar,
}

/// Compares `voltage` with the withstand of `coating`.
#[must_use]
pub fn assess_coating(voltage: CScalar, coating: CoatingKind) -> CoatingAssessment {
    let voltage_kv = voltage.norm() / 1000.0;
    let limit_kv = coating.withstand_kv();
    let safety_factor = if voltage_kv > 0.0 {
        limit_kv / voltage_kv
    } else {
        Scalar::INFINITY
    };
    CoatingAssessment {
        coating,
        voltage_kv,
        limit_kv,
        safe: voltage_kv <= limit_kv,
        safety_factor,
    }
}

/// AC corrosion likelihood band.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CorrosionRisk {
    /// Below 20 A/m².
    Low,
    /// 20 to 100 A/m².
    Moderate,
    /// 100 A/m² and above.
    High,
}

impl CorrosionRisk {
    /// Classifies an AC current density in A/m².
    #[must_use]
    pub fn classify(current_density: Scalar) -> Self {
        if current_density < LOW_RISK_CURRENT_DENSITY {
            Self::Low
        } else if current_density < HIGH_RISK_CURRENT_DENSITY {
            Self::Moderate
        } else {
            Self::High
        }
    }
}

/// AC current density `J = 8|V| / (ρ π d)` (A/m²) through a circular holiday of diameter `d`.
pub fn ac_current_density(
    voltage: CScalar,
    soil_resistivity: Scalar,
    holiday_diameter: Scalar,
) -> Result<Scalar> {
    if !(soil_resistivity.is_finite() && soil_resistivity > 0.0) {
        return Err(CouplingError::InvalidScenario(format!(
            "soil resistivity must be positive and finite, got {soil_resistivity} Ω·m"
        )));
    }
    if !(holiday_diameter.is_finite() && holiday_diameter > 0.0) {
        return Err(CouplingError::InvalidGeometry(format!(
            "holiday diameter must be positive, got {holiday_diameter} m"
        )));
    }
    ensure_finite(
        8.0 * voltage.norm() / (soil_resistivity * PI * holiday_diameter),
        "AC current density",
    )
}
