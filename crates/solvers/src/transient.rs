//! Fixed-step transient integrators.
//!
//! Both integrators march a model forward a fixed number of steps, record
//! every accepted snapshot (initial state included), and emit an [`Event`]
//! per snapshot so an observer can watch or stop the run.
//!
//! - [`euler`]: explicit first-order Euler
//! - [`rk4`]: classical fourth-order Runge-Kutta

mod action;
mod error;
mod event;
mod march;
mod solution;

pub use action::Action;
pub use error::Error;
pub use event::Event;
pub use solution::{Solution, Status};

pub mod euler;
pub mod rk4;
