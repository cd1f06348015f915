//! Capability traits for cross-solver observers.
//!
//! These traits abstract over solver-specific event and action types so an
//! observer can be written once and reused with either transient solver.
//!
//! # Example
//!
//! ```rust
//! use swing_core::Observer;
//! use swing_observers::traits::{CanStopEarly, HasStep};
//!
//! struct StopAfter(usize);
//!
//! impl<E: HasStep, A: CanStopEarly> Observer<E, A> for StopAfter {
//!     fn observe(&mut self, event: &E) -> Option<A> {
//!         (event.step() >= self.0).then(A::stop_early)
//!     }
//! }
//! ```

use swing_solvers::transient;

/// An action type that can signal early termination.
pub trait CanStopEarly {
    /// Returns the action that stops the solver early.
    fn stop_early() -> Self;
}

/// An event that knows which solver step produced it.
pub trait HasStep {
    /// Returns the step number, with 0 for the initial state.
    fn step(&self) -> usize;
}

/// A value whose numbers can be checked for NaN and infinity.
pub trait CheckFinite {
    /// Returns `true` if every number carried by the value is finite.
    fn is_finite(&self) -> bool;
}

impl CanStopEarly for transient::Action {
    fn stop_early() -> Self {
        Self::StopEarly
    }
}

impl<I, O> HasStep for transient::Event<I, O> {
    fn step(&self) -> usize {
        self.step
    }
}

impl CheckFinite for f64 {
    fn is_finite(&self) -> bool {
        f64::is_finite(*self)
    }
}

impl<I: CheckFinite, O: CheckFinite> CheckFinite for transient::Event<I, O> {
    fn is_finite(&self) -> bool {
        self.snapshot.input.is_finite() && self.snapshot.output.is_finite()
    }
}
