//! Explicit Euler integration.
//!
//! Every component of the state advances with the derivative evaluated at
//! the start of the step:
//!
//! ```text
//! state_{n+1} = state_n + derivative(state_n) * dt
//! ```
//!
//! For a mechanical system this means positions move with the start-of-step
//! velocities and velocities move with the start-of-step accelerations. The
//! scheme is first-order accurate and does not conserve energy; the drift is
//! a useful diagnostic when compared against [`rk4`](super::rk4).
//!
//! # Example
//!
//! ```ignore
//! use swing_solvers::transient::euler;
//!
//! let solution = euler::solve_unobserved(&model, &problem, initial, 0.01, 1000)?;
//! assert_eq!(solution.history.len(), 1001);
//! ```

use swing_core::{Model, Observer, OdeProblem, StepIntegrable};

use super::{Action, Error, Event, Solution, march::march};

/// Integrates an ODE problem using explicit Euler.
///
/// # Algorithm
///
/// 1. Call the model with the initial input and emit step 0.
/// 2. For each step:
///    - Extract the state and its derivative from the current snapshot.
///    - Step the state: `state + derivative * dt`.
///    - Build and finalize the next input.
///    - Call the model and emit the new snapshot to the observer.
///
/// The observer may return [`Action::StopEarly`] to end the run.
///
/// # Errors
///
/// Returns an error if the model or problem fails at any point.
pub fn solve<M, P, Obs>(
    model: &M,
    problem: &P,
    initial: M::Input,
    dt: P::Delta,
    steps: usize,
    observer: Obs,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    M::Input: Clone,
    M::Output: Clone,
    P: OdeProblem<Input = M::Input, Output = M::Output>,
    P::Delta: Clone,
    Obs: Observer<Event<M::Input, M::Output>, Action>,
{
    march(model, initial, steps, observer, |current| {
        let state = problem.state(&current.input).map_err(Error::problem)?;
        let derivative = problem
            .derivative(&current.input, &current.output)
            .map_err(Error::problem)?;

        let next_state = state.step(derivative, dt.clone());

        let next_input = problem
            .build_input(&current.input, &next_state, &dt)
            .map_err(Error::problem)?;
        problem
            .finalize_step(next_input, &current.input, &current.output, &dt)
            .map_err(Error::problem)
    })
}

/// Integrates an ODE problem using explicit Euler without observation.
///
/// # Errors
///
/// Returns an error if the model or problem fails at any point.
pub fn solve_unobserved<M, P>(
    model: &M,
    problem: &P,
    initial: M::Input,
    dt: P::Delta,
    steps: usize,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    M::Input: Clone,
    M::Output: Clone,
    P: OdeProblem<Input = M::Input, Output = M::Output>,
    P::Delta: Clone,
{
    solve(model, problem, initial, dt, steps, ())
}
