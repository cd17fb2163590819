#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![warn(clippy::all, clippy::cargo, clippy::nursery, missing_docs)]
#![doc = include_str!("../README.md")]

/// Physical constants and the validated constants table.
pub mod constants;
/// Shared numerical aliases and phasor helpers.
pub mod math;
/// Error types shared by every module.
pub mod errors;
/// Direct and earth-return image distances.
pub mod geometry;
/// Transmission-line conductors.
pub mod line;
/// Pipe wall and coating materials.
pub mod materials;
/// The exposed duct and its distributed parameters.
pub mod duct;
/// Uniform and layered earth models.
pub mod soil;
/// Mutual impedance and induced voltage.
pub mod coupling;
/// Coating-stress and AC-corrosion screening.
pub mod assessment;
/// Frequency and lateral-offset sweeps.
pub mod sweep;
/// Scenario descriptions supplied by callers.
pub mod config;

/// Common exports for downstream crates.
pub mod prelude;
