//! Problem configuration and loading.
//!
//! A problem file describes the two segments and the solver. JSON and TOML
//! are accepted, picked by file extension:
//!
//! ```json
//! {
//!   "segments": [
//!     { "mass": 1.0, "length": 1.0, "theta": 1.5708, "omega": 0.0 },
//!     { "mass": 1.0, "length": 1.0, "theta": 1.5708, "omega": 0.0 }
//!   ],
//!   "solver": { "type": "Runge-Kutta", "T": 10.0, "dt": 0.01 }
//! }
//! ```
//!
//! `g` (default 9.81) and `solver.halt_on_non_finite` (default `false`) are
//! optional.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::{
    Integrator,
    pendulum::{STANDARD_GRAVITY, State},
    segment::Arm,
};

/// Errors that can occur while loading or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed JSON problem: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed TOML problem: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("unsupported problem file format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("expected exactly 2 segments, found {0}")]
    SegmentCount(usize),

    #[error("{field} must be positive and finite, got {value}")]
    NonPositive { field: &'static str, value: f64 },

    #[error("{field} must be finite, got {value}")]
    NonFinite { field: &'static str, value: f64 },

    #[error("solver.T / solver.dt = {ratio} exceeds the limit of {max} steps", max = MAX_STEPS)]
    TooManySteps { ratio: f64 },
}

/// Most integration steps a single solve may take.
pub const MAX_STEPS: usize = 10_000_000;

/// Initial description of one pendulum segment.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct SegmentConfig {
    /// Mass in kg.
    pub mass: f64,
    /// Length in m.
    pub length: f64,
    /// Initial angle from the downward vertical, in rad.
    pub theta: f64,
    /// Initial angular velocity in rad/s.
    #[serde(default)]
    pub omega: f64,
}

impl SegmentConfig {
    fn validate(&self, index: usize) -> Result<(), ConfigError> {
        let [mass, length, theta, omega] = SEGMENT_FIELDS[index];
        positive(mass, self.mass)?;
        positive(length, self.length)?;
        finite(theta, self.theta)?;
        finite(omega, self.omega)
    }

    /// Returns the arm described by this segment.
    ///
    /// # Errors
    ///
    /// Returns a [`ModelError`](crate::ModelError) if mass or length is not
    /// positive. Segments held by a [`Config`] never fail here.
    pub fn arm(&self) -> Result<Arm, crate::ModelError> {
        Arm::new(self.mass, self.length)
    }
}

const SEGMENT_FIELDS: [[&str; 4]; 2] = [
    [
        "segments[0].mass",
        "segments[0].length",
        "segments[0].theta",
        "segments[0].omega",
    ],
    [
        "segments[1].mass",
        "segments[1].length",
        "segments[1].theta",
        "segments[1].omega",
    ],
];

/// Solver selection and time horizon.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct SolverConfig {
    /// Integration scheme.
    #[serde(rename = "type", alias = "kind")]
    pub integrator: Integrator,
    /// Total simulated time in s.
    #[serde(rename = "T", alias = "duration")]
    pub duration: f64,
    /// Fixed step size in s.
    pub dt: f64,
    /// Fail the solve at the first non-finite sample instead of recording it.
    #[serde(default)]
    pub halt_on_non_finite: bool,
}

impl SolverConfig {
    /// Creates a validated solver configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if `duration` or `dt` is not positive and finite, or
    /// if they would take more than [`MAX_STEPS`] steps.
    pub fn new(integrator: Integrator, duration: f64, dt: f64) -> Result<Self, ConfigError> {
        let config = Self {
            integrator,
            duration,
            dt,
            halt_on_non_finite: false,
        };
        config.validate()?;
        Ok(config)
    }

    /// Stops the solve with an error at the first non-finite sample.
    #[must_use]
    pub fn halting_on_non_finite(mut self) -> Self {
        self.halt_on_non_finite = true;
        self
    }

    /// Number of integration steps: `round(duration / dt)`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn step_count(&self) -> usize {
        (self.duration / self.dt).round() as usize
    }

    #[allow(clippy::cast_precision_loss)]
    fn validate(&self) -> Result<(), ConfigError> {
        positive("solver.T", self.duration)?;
        positive("solver.dt", self.dt)?;

        let ratio = self.duration / self.dt;
        if ratio.is_finite() && ratio.round() <= MAX_STEPS as f64 {
            Ok(())
        } else {
            Err(ConfigError::TooManySteps { ratio })
        }
    }
}

/// A validated problem: gravity, two segments, and a solver.
///
/// Immutable once built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    gravity: f64,
    segments: [SegmentConfig; 2],
    solver: SolverConfig,
}

/// Problem file layout before validation.
#[derive(Debug, Deserialize)]
struct ProblemFile {
    #[serde(default = "default_gravity")]
    g: f64,
    segments: Vec<SegmentConfig>,
    solver: SolverConfig,
}

fn default_gravity() -> f64 {
    STANDARD_GRAVITY
}

impl Config {
    /// Creates a configuration under standard gravity.
    ///
    /// # Errors
    ///
    /// Returns an error if any mass, length, duration, or step size is not
    /// positive, or any angle or angular velocity is not finite.
    pub fn new(
        first: SegmentConfig,
        second: SegmentConfig,
        solver: SolverConfig,
    ) -> Result<Self, ConfigError> {
        Self::with_gravity(STANDARD_GRAVITY, first, second, solver)
    }

    /// Creates a configuration with an explicit gravitational acceleration.
    ///
    /// # Errors
    ///
    /// See [`Config::new`]; `gravity` must also be positive and finite.
    pub fn with_gravity(
        gravity: f64,
        first: SegmentConfig,
        second: SegmentConfig,
        solver: SolverConfig,
    ) -> Result<Self, ConfigError> {
        positive("g", gravity)?;
        first.validate(0)?;
        second.validate(1)?;
        solver.validate()?;

        Ok(Self {
            gravity,
            segments: [first, second],
            solver,
        })
    }

    /// Loads a problem file, choosing the parser by extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, has an unknown
    /// extension, cannot be parsed, or fails validation.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        let parse: fn(&str) -> Result<Self, ConfigError> = match extension.as_deref() {
            Some("json") => Self::from_json_str,
            Some("toml") => Self::from_toml_str,
            _ => return Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        };

        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded problem file");

        parse(&text)
    }

    /// Parses and validates a JSON problem.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid problem.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        serde_json::from_str::<ProblemFile>(text)?.validate()
    }

    /// Parses and validates a TOML problem.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid problem.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        toml::from_str::<ProblemFile>(text)?.validate()
    }

    #[must_use]
    pub fn gravity(&self) -> f64 {
        self.gravity
    }

    #[must_use]
    pub fn segments(&self) -> &[SegmentConfig; 2] {
        &self.segments
    }

    #[must_use]
    pub fn solver(&self) -> &SolverConfig {
        &self.solver
    }

    /// Returns the state the integration starts from.
    #[must_use]
    pub fn initial_state(&self) -> State {
        let [first, second] = self.segments;
        State {
            theta1: first.theta,
            theta2: second.theta,
            omega1: first.omega,
            omega2: second.omega,
        }
    }
}

impl ProblemFile {
    fn validate(self) -> Result<Config, ConfigError> {
        let [first, second] = <[SegmentConfig; 2]>::try_from(self.segments)
            .map_err(|segments| ConfigError::SegmentCount(segments.len()))?;
        Config::with_gravity(self.g, first, second, self.solver)
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

fn finite(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFinite { field, value })
    }
}
