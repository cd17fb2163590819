//! Pipe wall and coating material models.

use crate::math::Scalar;

/// Pipe wall material.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PipeMaterial {
    /// Carbon steel.
    #[default]
    Steel,
    /// Aluminium alloy.
    Aluminium,
    /// Arbitrary wall material.
    Custom {
        /// Resistivity in Ω·m.
        resistivity: Scalar,
        /// Relative permeability μr.
        relative_permeability: Scalar,
    },
}

impl PipeMaterial {
    /// Wall resistivity ρ in Ω·m.
    #[must_use]
    pub const fn resistivity(&self) -> Scalar {
        match self {
            Self::Steel => 1.72e-7,
            Self::Aluminium => 2.82e-8,
            Self::Custom { resistivity, .. } => *resistivity,
        }
    }

    /// Relative permeability μr of the wall.
    #[must_use]
    pub const fn relative_permeability(&self) -> Scalar {
        match self {
            Self::Steel => 300.0,
            Self::Aluminium => 1.0,
            Self::Custom {
                relative_permeability,
                ..
            } => *relative_permeability,
        }
    }
}

/// Dielectric coating around the pipe wall.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoatingMaterial {
    /// Coating resistivity in Ω·m.
    pub resistivity: Scalar,
    /// Relative permittivity εr.
    pub relative_permittivity: Scalar,
}

impl CoatingMaterial {
    /// Extruded polyethylene.
    #[must_use]
    pub const fn polyethylene() -> Self {
        Self {
            resistivity: 1.0e8,
            relative_permittivity: 2.3,
        }
    }
}

impl Default for CoatingMaterial {
    fn default() -> Self {
        Self::polyethylene()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steel_is_magnetic_and_aluminium_is_not() {
        assert!(PipeMaterial::Steel.relative_permeability() > 100.0);
        assert_eq!(PipeMaterial::Aluminium.relative_permeability(), 1.0);
        assert!(PipeMaterial::Aluminium.resistivity() < PipeMaterial::Steel.resistivity());
    }

    #[test]
    fn custom_material_reports_its_own_values() {
        let m = PipeMaterial::Custom {
            resistivity: 1.0e-6,
            relative_permeability: 50.0,
        };
        assert_eq!(m.resistivity(), 1.0e-6);
        assert_eq!(m.relative_permeability(), 50.0);
    }
}
