//! Fixed-step solvers for the Swing pendulum simulator.
//!
//! Solvers are generic over a [`Model`] and an [`OdeProblem`], so any model
//! whose state implements [`StepIntegrable`] can be integrated.
//!
//! # Modules
//!
//! - [`transient`]: time-marching integrators ([`transient::euler`],
//!   [`transient::rk4`])
//!
//! [`Model`]: swing_core::Model
//! [`OdeProblem`]: swing_core::OdeProblem
//! [`StepIntegrable`]: swing_core::StepIntegrable

pub mod transient;
