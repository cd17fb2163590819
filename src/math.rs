//! Shared numerical primitives anchored on `nalgebra` and `num-complex`.

use nalgebra::Vector2;

/// Primary scalar type used across the crate.
pub type Scalar = f64;
/// Transverse-plane position `(x, y)` in meters.
pub type R2 = Vector2<Scalar>;
/// Primary complex scalar type used for phasors.
pub type CScalar = num_complex::Complex<Scalar>;

/// Returns the complex exponential `e^(j * theta)` using `Scalar` precision.
#[must_use]
pub fn phasor(theta: Scalar) -> CScalar {
    CScalar::from_polar(1.0, theta)
}

/// Builds a phasor from a magnitude and a phase angle in degrees.
#[must_use]
pub fn phasor_deg(magnitude: Scalar, phase_deg: Scalar) -> CScalar {
    phasor(phase_deg.to_radians()) * magnitude
}

/// Phase angle of a phasor in degrees.
#[must_use]
pub fn phasor_angle_deg(value: CScalar) -> Scalar {
    value.arg().to_degrees()
}
