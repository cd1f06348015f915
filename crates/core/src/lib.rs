//! Core traits and types for the Swing pendulum simulator.
//!
//! This crate defines the abstractions that the solvers, observers, and the
//! pendulum model build on:
//!
//! - [`Model`]: a deterministic callable mapping a typed input to a typed output
//! - [`Snapshot`]: a captured input/output pair from a model call
//! - [`Observer`]: receives solver events and optionally returns control actions
//! - [`OdeProblem`]: adapts a model's input and output to a steppable state
//! - [`StepIntegrable`]: a state that can be advanced by a derivative

mod model;
mod observer;
mod problems;
mod step;

pub use observer::Observer;
pub use problems::OdeProblem;
pub use step::{DerivativeOf, StepIntegrable};
pub use {model::Model, model::Snapshot};
