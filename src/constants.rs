//! Physical constants used by the earth-return coupling model.
//!
//! ## Accuracy
//!
//! Measured constants (ε₀, μ₀) are provided with 11-12 significant figures, which is far
//! beyond what the Carson–Clem approximation can resolve. The Euler–Mascheroni constant
//! enters the equivalent earth-return depth.
//!
//! ## References
//!
//! - NIST Reference on Constants, Units, and Uncertainty: <https://physics.nist.gov/cuu/Constants/>
//! - CODATA 2018 values published May 20, 2019 (following 2019 SI redefinition)
//! - J. R. Carson, "Wave propagation in overhead wires with ground return",
//!   Bell System Technical Journal, vol. 5, 1926.
//!
//! All scenario computations read constants through a [`PhysicalConstants`] table rather than
//! the bare `const` items, so an alternative table can be supplied and is validated before use.

use std::f64::consts::PI;

use crate::errors::{CouplingError, Result};
use crate::math::Scalar;

/// Vacuum permittivity ε₀ in farads per meter (F/m).
/// Approximate value: 8.8541878128 × 10⁻¹² F/m (11 significant figures).
pub const VACUUM_PERMITTIVITY: f64 = 8.854_187_812_8e-12;
/// Vacuum permeability μ₀ in henries per meter (H/m).
/// Approximate value: 1.25663706212 × 10⁻⁶ H/m (12 significant figures).
pub const VACUUM_PERMEABILITY: f64 = 1.256_637_062_12e-6;
/// Euler–Mascheroni constant γ (dimensionless).
pub const EULER_MASCHERONI: f64 = 0.577_215_664_901_532_9;

/// Names of the constants a [`PhysicalConstants`] table must carry.
pub const REQUIRED_CONSTANTS: [&str; 3] =
    ["vacuum_permeability", "vacuum_permittivity", "euler_mascheroni"];

/// Immutable table of the physical constants in force for a scenario.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicalConstants {
    /// Vacuum permeability μ₀ (H/m).
    pub vacuum_permeability: Scalar,
    /// Vacuum permittivity ε₀ (F/m).
    pub vacuum_permittivity: Scalar,
    /// Euler–Mascheroni constant γ.
    pub euler_mascheroni: Scalar,
}

impl PhysicalConstants {
    /// CODATA 2018 values.
    pub const CODATA_2018: Self = Self {
        vacuum_permeability: VACUUM_PERMEABILITY,
        vacuum_permittivity: VACUUM_PERMITTIVITY,
        euler_mascheroni: EULER_MASCHERONI,
    };

    /// Builds a table from named entries.
    ///
    /// Every name in [`REQUIRED_CONSTANTS`] must be present; there is no fallback to the
    /// CODATA values. Unknown names are rejected so that a misspelt override cannot be
    /// silently ignored, and a name given twice is rejected rather than overwritten.
    pub fn from_entries<'a, I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, Scalar)>,
    {
        let mut permeability = None;
        let mut permittivity = None;
        let mut gamma = None;
        for (name, value) in entries {
            let slot = match name {
                "vacuum_permeability" => &mut permeability,
                "vacuum_permittivity" => &mut permittivity,
                "euler_mascheroni" => &mut gamma,
                other => {
                    return Err(CouplingError::InvalidConstant {
                        name: other.to_owned(),
                        value,
                    })
                }
            };
            if slot.replace(value).is_some() {
                return Err(CouplingError::InvalidConstant {
                    name: name.to_owned(),
                    value,
                });
            }
        }

        let table = Self {
            vacuum_permeability: permeability
                .ok_or(CouplingError::MissingParameter("vacuum_permeability"))?,
            vacuum_permittivity: permittivity
                .ok_or(CouplingError::MissingParameter("vacuum_permittivity"))?,
            euler_mascheroni: gamma.ok_or(CouplingError::MissingParameter("euler_mascheroni"))?,
        };
        table.validate()?;
        Ok(table)
    }

    /// Checks that every constant is finite and strictly positive.
    pub fn validate(&self) -> Result<()> {
        let entries = [
            ("vacuum_permeability", self.vacuum_permeability),
            ("vacuum_permittivity", self.vacuum_permittivity),
            ("euler_mascheroni", self.euler_mascheroni),
        ];
        for (name, value) in entries {
            if !value.is_finite() || value <= 0.0 {
                return Err(CouplingError::InvalidConstant {
                    name: name.to_owned(),
                    value,
                });
            }
        }
        Ok(())
    }
}

impl Default for PhysicalConstants {
    fn default() -> Self {
        Self::CODATA_2018
    }
}

/// Returns the angular frequency corresponding to a linear frequency `hz`.
#[inline]
#[must_use]
pub fn angular_frequency(hz: f64) -> f64 {
    2.0 * PI * hz
}
