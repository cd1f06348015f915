//! Reusable observers for the Swing pendulum simulator.
//!
//! This crate provides [`Observer`] implementations and capability traits
//! that work with the transient solvers in `swing-solvers`.
//!
//! # Modules
//!
//! - [`traits`]: capability traits ([`CanStopEarly`], [`CheckFinite`], [`HasStep`])
//! - [`FiniteGuard`]: stops a solve at the first non-finite snapshot
//!
//! # Features
//!
//! - `plot`: enables [`PlotObserver`] for viewing recorded traces via egui.
//!   This feature adds dependencies on `eframe` and `egui_plot`.
//!
//! [`Observer`]: swing_core::Observer
//! [`CanStopEarly`]: traits::CanStopEarly
//! [`CheckFinite`]: traits::CheckFinite
//! [`HasStep`]: traits::HasStep

pub mod traits;

mod guard;

pub use guard::FiniteGuard;

#[cfg(feature = "plot")]
mod plot;

#[cfg(feature = "plot")]
pub use plot::{PlotObserver, Plottable, ShowConfig};
