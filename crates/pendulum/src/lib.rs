//! A planar double pendulum solved with fixed-step integrators.
//!
//! A [`Session`] validates a [`Config`], solves the whole horizon once with
//! the chosen [`Integrator`], and stores the result as a [`Trajectory`].
//! Playback then walks the stored samples one tick at a time, recording a
//! bounded subset for graphs and CSV export.
//!
//! # Features
//!
//! - `gui`: an eframe window that animates a session.
//! - `plot`: enables the `energy_drift` example.

mod config;
mod error;
mod export;
mod integrator;
mod pendulum;
mod playback;
mod segment;
mod session;
mod trajectory;

#[cfg(feature = "gui")]
pub mod gui;

pub use config::{Config, ConfigError, MAX_STEPS, SegmentConfig, SolverConfig};
pub use error::{Error, ModelError};
pub use export::{CSV_HEADER, export_csv, write_csv};
pub use integrator::Integrator;
pub use pendulum::{DoublePendulum, Input, Output, PendulumProblem, STANDARD_GRAVITY, State, StateRate};
pub use playback::{Frame, GRAPH_CAPACITY, Playback, sample_stride};
pub use segment::{Arm, Point, Pose};
pub use session::Session;
pub use trajectory::{Sample, Trajectory};
