use swing_solvers::transient;
use thiserror::Error;

use crate::ConfigError;

/// Errors raised when constructing the physical model.
///
/// Guards direct use of [`Arm::new`](crate::Arm::new) and
/// [`DoublePendulum::new`](crate::DoublePendulum::new). Values taken from a
/// validated [`Config`](crate::Config) have already passed the same check.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum ModelError {
    #[error("{name} must be positive and finite, got {value}")]
    NonPositive { name: &'static str, value: f64 },
}

impl ModelError {
    pub(crate) fn check_positive(name: &'static str, value: f64) -> Result<(), Self> {
        if value.is_finite() && value > 0.0 {
            Ok(())
        } else {
            Err(Self::NonPositive { name, value })
        }
    }
}

/// Errors that can occur while building, solving, or exporting a session.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid pendulum: {0}")]
    Model(#[from] ModelError),

    #[error("integration failed: {0}")]
    Solver(#[from] transient::Error),

    #[error("non-finite state at tick {tick}")]
    NonFinite { tick: usize },

    #[error("trajectory is full ({capacity} samples)")]
    TrajectoryFull { capacity: usize },

    #[error("csv export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "gui")]
    #[error("window failed: {0}")]
    Window(#[from] eframe::Error),
}
