use std::fmt;

use serde::Deserialize;
use swing_core::Observer;
use swing_solvers::transient::{self, Action, Event, Solution, euler, rk4};

use crate::pendulum::{DoublePendulum, Input, Output, PendulumProblem, State};

/// The time-stepping scheme used to solve a session.
///
/// Selected once from the configuration. Both variants drive the same
/// [`DoublePendulum`] model through [`PendulumProblem`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum Integrator {
    /// Explicit first-order Euler.
    Euler,

    /// Classical fourth-order Runge-Kutta.
    #[serde(alias = "Runge-Kutta", alias = "RK4")]
    RungeKutta,
}

impl Integrator {
    /// Integrates `steps` fixed steps of size `dt` starting from `initial` at
    /// time zero.
    ///
    /// The returned history holds `steps + 1` snapshots unless the observer
    /// stops the run early.
    ///
    /// # Errors
    ///
    /// Returns an error if the solver reports a model or problem failure.
    pub fn integrate<Obs>(
        self,
        pendulum: &DoublePendulum,
        initial: State,
        dt: f64,
        steps: usize,
        observer: Obs,
    ) -> Result<Solution<Input, Output>, transient::Error>
    where
        Obs: Observer<Event<Input, Output>, Action>,
    {
        let initial = Input {
            time: 0.0,
            state: initial,
        };

        match self {
            Self::Euler => euler::solve(pendulum, &PendulumProblem, initial, dt, steps, observer),
            Self::RungeKutta => rk4::solve(pendulum, &PendulumProblem, initial, dt, steps, observer),
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Euler => "Euler",
            Self::RungeKutta => "Runge-Kutta",
        }
    }
}

impl fmt::Display for Integrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
