//! Transmission-line conductors carrying phasor currents.

use crate::math::{phasor_deg, CScalar, Scalar, R2};

/// Role of a conductor within the transmission line.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConductorKind {
    /// Energised phase conductor.
    #[default]
    Phase,
    /// Neutral conductor.
    Neutral,
    /// Overhead shield (ground) wire.
    ShieldWire,
}

/// One conductor of the transmission line.
///
/// The current is an RMS phasor whose angle is measured against the common system
/// reference shared by every conductor of the scenario.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Conductor {
    /// Position in meters.
    pub position: R2,
    /// Current phasor in amperes RMS.
    pub current: CScalar,
    /// Conductor radius in meters, when known.
    pub radius: Option<Scalar>,
    /// Conductor role.
    pub kind: ConductorKind,
}

impl Conductor {
    /// Phase conductor at `(x, y)` carrying `current`.
    #[must_use]
    pub fn new(x: Scalar, y: Scalar, current: CScalar) -> Self {
        Self {
            position: R2::new(x, y),
            current,
            radius: None,
            kind: ConductorKind::Phase,
        }
    }

    /// Phase conductor with current given as magnitude (A) and phase angle (degrees).
    #[must_use]
    pub fn from_polar(x: Scalar, y: Scalar, magnitude: Scalar, phase_deg: Scalar) -> Self {
        Self::new(x, y, phasor_deg(magnitude, phase_deg))
    }

    /// Sets the conductor radius.
    #[must_use]
    pub fn with_radius(mut self, radius: Scalar) -> Self {
        self.radius = Some(radius);
        self
    }

    /// Sets the conductor role.
    #[must_use]
    pub fn with_kind(mut self, kind: ConductorKind) -> Self {
        self.kind = kind;
        self
    }

    /// Same conductor carrying a different current.
    #[must_use]
    pub fn with_current(mut self, current: CScalar) -> Self {
        self.current = current;
        self
    }

    /// Balanced three-phase set: phase A at 0°, B at −120°, C at +120°.
    #[must_use]
    pub fn balanced_three_phase(positions: [(Scalar, Scalar); 3], magnitude: Scalar) -> [Self; 3] {
        let [a, b, c] = positions;
        [
            Self::from_polar(a.0, a.1, magnitude, 0.0),
            Self::from_polar(b.0, b.1, magnitude, -120.0),
            Self::from_polar(c.0, c.1, magnitude, 120.0),
        ]
    }
}

/// A named set of conductors sharing one phase reference.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TransmissionLine {
    /// Human-readable identifier.
    pub name: String,
    /// Conductors in declaration order.
    pub conductors: Vec<Conductor>,
}

impl TransmissionLine {
    /// Creates an empty line.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            conductors: Vec::new(),
        }
    }

    /// Appends a conductor.
    pub fn add_conductor(&mut self, conductor: Conductor) {
        self.conductors.push(conductor);
    }

    /// Conductors as a slice.
    #[must_use]
    pub fn conductors(&self) -> &[Conductor] {
        &self.conductors
    }

    /// Phasor sum of all conductor currents (the residual earth current).
    #[must_use]
    pub fn residual_current(&self) -> CScalar {
        self.conductors.iter().map(|c| c.current).sum()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn balanced_set_has_no_residual_current() {
        let mut line = TransmissionLine::new("138 kV");
        for c in Conductor::balanced_three_phase([(-3.3, 15.0), (0.0, 19.0), (3.3, 23.0)], 529.0) {
            line.add_conductor(c);
        }
        line.add_conductor(
            Conductor::new(0.0, 26.7, CScalar::new(0.0, 0.0))
                .with_kind(ConductorKind::ShieldWire)
                .with_radius(0.004_572),
        );
        assert_eq!(line.conductors().len(), 4);
        assert_relative_eq!(line.residual_current().norm(), 0.0, epsilon = 1.0e-9);
    }

    #[test]
    fn from_polar_uses_degrees() {
        let c = Conductor::from_polar(1.0, 2.0, 100.0, 90.0);
        assert_relative_eq!(c.current.re, 0.0, epsilon = 1.0e-12);
        assert_relative_eq!(c.current.im, 100.0, epsilon = 1.0e-12);
        assert_eq!(c.kind, ConductorKind::Phase);
        assert_eq!(c.radius, None);
    }
}
