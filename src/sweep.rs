//! Parameter sweeps of the induced voltage and post-processing helpers.

use num_complex::Complex;
use tracing::debug;

use crate::coupling::{induced_voltage, ScenarioParameters};
use crate::duct::Duct;
use crate::errors::{CouplingError, Result};
use crate::line::Conductor;
use crate::math::{CScalar, Scalar};
use crate::soil::SoilModel;

/// Generates `n` linearly spaced samples in [start, stop].
#[must_use]
pub fn linspace(start: Scalar, stop: Scalar, n: usize) -> Vec<Scalar> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n as Scalar - 1.0);
            (0..n).map(|i| start + step * i as Scalar).collect()
        }
    }
}

/// Generates `n` logarithmically spaced samples between `start` and `stop` (Hz).
///
/// Both bounds must be finite and strictly positive.
pub fn logspace_hz(start_hz: Scalar, stop_hz: Scalar, n: usize) -> Result<Vec<Scalar>> {
    for bound in [start_hz, stop_hz] {
        if !(bound.is_finite() && bound > 0.0) {
            return Err(CouplingError::InvalidScenario(format!(
                "logarithmic sweep bounds must be positive and finite, got {bound} Hz"
            )));
        }
    }
    Ok(match n {
        0 => Vec::new(),
        1 => vec![start_hz],
        _ => {
            let log_start = start_hz.log10();
            let log_stop = stop_hz.log10();
            let step = (log_stop - log_start) / (n as Scalar - 1.0);
            (0..n)
                .map(|i| 10f64.powf(log_start + step * i as Scalar))
                .collect()
        }
    })
}

/// One sample of a sweep.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfilePoint {
    /// Swept value (Hz for frequency sweeps, m for offset sweeps).
    pub parameter: Scalar,
    /// Induced voltage phasor (V).
    pub voltage: CScalar,
}

/// Induced voltage at each frequency in `frequencies_hz`.
///
/// The soil is reduced to its equivalent resistivity afresh at every frequency.
pub fn frequency_response<I>(
    duct: &Duct,
    conductors: &[Conductor],
    soil: &SoilModel,
    frequencies_hz: I,
) -> Result<Vec<ProfilePoint>>
where
    I: IntoIterator<Item = Scalar>,
{
    let points = frequencies_hz
        .into_iter()
        .map(|f| {
            let scenario = ScenarioParameters::from_soil(f, soil)?;
            Ok::<_, CouplingError>(ProfilePoint {
                parameter: f,
                voltage: induced_voltage(duct, conductors, &scenario)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    debug!(points = points.len(), "frequency response computed");
    Ok(points)
}

/// Induced voltage with the duct displaced horizontally by each of `offsets_m`.
pub fn lateral_profile<I>(
    duct: &Duct,
    conductors: &[Conductor],
    scenario: &ScenarioParameters,
    offsets_m: I,
) -> Result<Vec<ProfilePoint>>
where
    I: IntoIterator<Item = Scalar>,
{
    let points = offsets_m
        .into_iter()
        .map(|dx| {
            Ok::<_, CouplingError>(ProfilePoint {
                parameter: dx,
                voltage: induced_voltage(&duct.shifted(dx), conductors, scenario)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    debug!(points = points.len(), "lateral profile computed");
    Ok(points)
}

/// One cell of a two-layer soil sensitivity grid.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SoilGridPoint {
    /// Upper-layer resistivity (Ω·m).
    pub upper_resistivity: Scalar,
    /// Lower-layer resistivity (Ω·m).
    pub lower_resistivity: Scalar,
    /// Equivalent uniform resistivity the pair reduces to (Ω·m).
    pub equivalent_resistivity: Scalar,
    /// Induced voltage phasor (V).
    pub voltage: CScalar,
}

/// Induced voltage over every pairing of `upper_resistivities` × `lower_resistivities`.
///
/// Each cell is a [`SoilModel::TwoLayer`] with an upper layer `upper_thickness` meters deep.
/// Points are ordered with the upper resistivity varying slowest.
pub fn soil_sensitivity(
    duct: &Duct,
    conductors: &[Conductor],
    frequency_hz: Scalar,
    upper_thickness: Scalar,
    upper_resistivities: &[Scalar],
    lower_resistivities: &[Scalar],
) -> Result<Vec<SoilGridPoint>> {
    let mut points = Vec::with_capacity(upper_resistivities.len() * lower_resistivities.len());
    for &upper_resistivity in upper_resistivities {
        for &lower_resistivity in lower_resistivities {
            let soil = SoilModel::TwoLayer {
                upper_resistivity,
                lower_resistivity,
                upper_thickness,
            };
            let scenario = ScenarioParameters::from_soil(frequency_hz, &soil)?;
            points.push(SoilGridPoint {
                upper_resistivity,
                lower_resistivity,
                equivalent_resistivity: scenario.soil_resistivity,
                voltage: induced_voltage(duct, conductors, &scenario)?,
            });
        }
    }
    debug!(
        points = points.len(),
        upper_thickness_m = upper_thickness,
        "soil sensitivity grid computed"
    );
    Ok(points)
}

/// Magnitude of complex sequence.
#[must_use]
pub fn mag(values: impl IntoIterator<Item = Complex<Scalar>>) -> Vec<Scalar> {
    values.into_iter().map(|v| v.norm()).collect()
}

/// Phase in radians of complex sequence.
#[must_use]
pub fn phase_rad(values: impl IntoIterator<Item = Complex<Scalar>>) -> Vec<Scalar> {
    values.into_iter().map(|v| v.arg()).collect()
}

/// Phase in degrees of complex sequence.
#[must_use]
pub fn phase_deg(values: impl IntoIterator<Item = Complex<Scalar>>) -> Vec<Scalar> {
    phase_rad(values).into_iter().map(|r| r.to_degrees()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn crossing() -> (Duct, [Conductor; 3]) {
        (
            Duct::new(0.0, -1.5, 1000.0),
            Conductor::balanced_three_phase([(-3.3, 15.0), (0.0, 19.0), (3.3, 23.0)], 529.0),
        )
    }

    #[test]
    fn linspace_basic() {
        let v = linspace(0.0, 1.0, 5);
        assert_eq!(v, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn logspace_spans_decades() {
        let v = logspace_hz(1.0, 1000.0, 4).unwrap();
        assert_relative_eq!(v[1], 10.0, max_relative = 1e-12);
        assert_relative_eq!(v[3], 1000.0, max_relative = 1e-12);
    }

    #[test]
    fn logspace_rejects_non_positive_bounds() {
        for (start, stop) in [(0.0, 1000.0), (10.0, -60.0), (f64::NAN, 60.0)] {
            let err = logspace_hz(start, stop, 5).unwrap_err();
            assert!(matches!(err, CouplingError::InvalidScenario(_)));
        }
        assert!(logspace_hz(50.0, 60.0, 0).unwrap().is_empty());
    }

    #[test]
    fn mag_phase_roundtrip() {
        let x = vec![Complex::new(1.0, 0.0), Complex::new(0.0, 1.0)];
        let m = mag(x.clone());
        let p = phase_deg(x);
        assert_relative_eq!(m[0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(m[1], 1.0, epsilon = 1e-12);
        assert_relative_eq!(p[0], 0.0, epsilon = 1e-12);
        assert_relative_eq!(p[1], 90.0, epsilon = 1e-12);
    }

    #[test]
    fn voltage_rises_with_frequency() {
        let (duct, conductors) = crossing();
        let soil = SoilModel::uniform(100.0);
        let points = frequency_response(&duct, &conductors, &soil, [50.0, 60.0, 400.0]).unwrap();
        assert_eq!(points.len(), 3);
        assert_eq!(points[1].parameter, 60.0);
        assert!(points[2].voltage.norm() > points[0].voltage.norm());
    }

    #[test]
    fn frequency_sweep_stops_at_invalid_frequency() {
        let (duct, conductors) = crossing();
        let soil = SoilModel::uniform(100.0);
        let err = frequency_response(&duct, &conductors, &soil, [60.0, 0.0]).unwrap_err();
        assert!(matches!(err, CouplingError::InvalidScenario(_)));
    }

    #[test]
    fn single_conductor_coupling_decays_with_offset() {
        let duct = Duct::new(0.0, -1.5, 100.0);
        let conductor = [Conductor::from_polar(0.0, 20.0, 500.0, 0.0)];
        let scenario = ScenarioParameters::new(60.0, 100.0);
        let points =
            lateral_profile(&duct, &conductor, &scenario, linspace(0.0, 200.0, 5)).unwrap();
        let magnitudes = mag(points.iter().map(|p| p.voltage));
        assert!(magnitudes.windows(2).all(|w| w[1] < w[0]));
    }

    #[test]
    fn soil_grid_covers_every_layer_pairing() {
        let (duct, conductors) = crossing();
        let upper = [10.0, 100.0, 1000.0];
        let lower = [100.0, 10_000.0];
        let grid = soil_sensitivity(&duct, &conductors, 60.0, 2.0, &upper, &lower).unwrap();
        assert_eq!(grid.len(), 6);
        assert_eq!(grid[1].upper_resistivity, 10.0);
        assert_eq!(grid[1].lower_resistivity, 10_000.0);
        assert_eq!(grid[2].upper_resistivity, 100.0);

        for point in &grid {
            let soil = SoilModel::TwoLayer {
                upper_resistivity: point.upper_resistivity,
                lower_resistivity: point.lower_resistivity,
                upper_thickness: 2.0,
            };
            let scenario = ScenarioParameters::from_soil(60.0, &soil).unwrap();
            assert_eq!(point.equivalent_resistivity, scenario.soil_resistivity);
            assert_eq!(point.voltage, induced_voltage(&duct, &conductors, &scenario).unwrap());
        }
    }

    #[test]
    fn equal_layers_reduce_to_uniform_soil() {
        let (duct, conductors) = crossing();
        let grid = soil_sensitivity(&duct, &conductors, 60.0, 2.0, &[300.0], &[300.0]).unwrap();
        assert_relative_eq!(grid[0].equivalent_resistivity, 300.0, max_relative = 1.0e-12);
        let uniform =
            induced_voltage(&duct, &conductors, &ScenarioParameters::new(60.0, 300.0)).unwrap();
        assert_relative_eq!(grid[0].voltage.re, uniform.re, max_relative = 1.0e-9);
        assert_relative_eq!(grid[0].voltage.im, uniform.im, max_relative = 1.0e-9);
    }

    #[test]
    fn soil_grid_stops_at_invalid_layer() {
        let (duct, conductors) = crossing();
        let err = soil_sensitivity(&duct, &conductors, 60.0, 2.0, &[100.0, -1.0], &[1000.0])
            .unwrap_err();
        assert!(matches!(err, CouplingError::InvalidScenario(_)));
    }
}
