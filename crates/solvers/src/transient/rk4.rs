//! Classical fourth-order Runge-Kutta integration.
//!
//! Each step evaluates the derivative four times and advances the state with
//! their weighted average:
//!
//! ```text
//! k1 = f(y)
//! k2 = f(y + dt/2 * k1)
//! k3 = f(y + dt/2 * k2)
//! k4 = f(y + dt   * k3)
//! y_{n+1} = y + dt/6 * (k1 + 2*k2 + 2*k3 + k4)
//! ```
//!
//! Intermediate stages build a fresh model input from the probed state and
//! call the model, so nothing is shared between stages except the values
//! passed explicitly. Only the final state of a step is reported to the
//! observer and stored in the history.
//!
//! Weighting the stages requires the derivative type to support addition and
//! scaling by `f64`, and the step size to support halving.

use std::ops::{Add, Div, Mul};

use swing_core::{DerivativeOf, Model, Observer, OdeProblem, StepIntegrable};

use super::{Action, Error, Event, Solution, march::march};

/// Integrates an ODE problem using classical fourth-order Runge-Kutta.
///
/// Takes the same arguments and produces the same shape of [`Solution`] as
/// [`euler::solve`](super::euler::solve).
///
/// # Errors
///
/// Returns an error if the model or problem fails at any stage.
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
    P::Delta: Clone + Div<f64, Output = P::Delta>,
    DerivativeOf<P::State, P::Delta>: Clone
        + Add<Output = DerivativeOf<P::State, P::Delta>>
        + Mul<f64, Output = DerivativeOf<P::State, P::Delta>>,
    Obs: Observer<Event<M::Input, M::Output>, Action>,
{
    let half = dt.clone() / 2.0;

    march(model, initial, steps, observer, |current| {
        let state = problem.state(&current.input).map_err(Error::problem)?;

        let k1 = problem
            .derivative(&current.input, &current.output)
            .map_err(Error::problem)?;
        let k2 = stage(model, problem, &current.input, &state, k1.clone(), &half)?;
        let k3 = stage(model, problem, &current.input, &state, k2.clone(), &half)?;
        let k4 = stage(model, problem, &current.input, &state, k3.clone(), &dt)?;

        let slope = (k1 + k2 * 2.0 + k3 * 2.0 + k4) * (1.0 / 6.0);
        let next_state = state.step(slope, dt.clone());

        let next_input = problem
            .build_input(&current.input, &next_state, &dt)
            .map_err(Error::problem)?;
        problem
            .finalize_step(next_input, &current.input, &current.output, &dt)
            .map_err(Error::problem)
    })
}

/// Integrates an ODE problem using fourth-order Runge-Kutta without observation.
///
/// # Errors
///
/// Returns an error if the model or problem fails at any stage.
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
    P::Delta: Clone + Div<f64, Output = P::Delta>,
    DerivativeOf<P::State, P::Delta>: Clone
        + Add<Output = DerivativeOf<P::State, P::Delta>>
        + Mul<f64, Output = DerivativeOf<P::State, P::Delta>>,
{
    solve(model, problem, initial, dt, steps, ())
}

/// Evaluates the derivative at `state + slope * delta`.
fn stage<M, P>(
    model: &M,
    problem: &P,
    base: &M::Input,
    state: &P::State,
    slope: DerivativeOf<P::State, P::Delta>,
    delta: &P::Delta,
) -> Result<DerivativeOf<P::State, P::Delta>, Error>
where
    M: Model,
    P: OdeProblem<Input = M::Input, Output = M::Output>,
    P::Delta: Clone,
{
    let probe = state.step(slope, delta.clone());
    let input = problem
        .build_input(base, &probe, delta)
        .map_err(Error::problem)?;
    let output = model.call(&input).map_err(Error::model)?;
    problem.derivative(&input, &output).map_err(Error::problem)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::convert::Infallible;

    use approx::assert_relative_eq;

    use crate::transient::{Status, euler};

    // --- Test fixtures ---

    #[derive(Debug, Clone, Copy, PartialEq)]
    struct Swing {
        theta: f64,
        omega: f64,
    }

    #[derive(Debug, Clone, Copy)]
    struct SwingRate {
        dtheta: f64,
        domega: f64,
    }

    impl Add for SwingRate {
        type Output = Self;

        fn add(self, rhs: Self) -> Self {
            SwingRate {
                dtheta: self.dtheta + rhs.dtheta,
                domega: self.domega + rhs.domega,
            }
        }
    }

    impl Mul<f64> for SwingRate {
        type Output = Self;

        fn mul(self, rhs: f64) -> Self {
            SwingRate {
                dtheta: self.dtheta * rhs,
                domega: self.domega * rhs,
            }
        }
    }

    impl StepIntegrable<f64> for Swing {
        type Derivative = SwingRate;

        fn step(&self, rate: SwingRate, dt: f64) -> Self {
            Swing {
                theta: self.theta + rate.dtheta * dt,
                omega: self.omega + rate.domega * dt,
            }
        }
    }

    #[derive(Debug, Clone)]
    struct Input {
        swing: Swing,
        time: f64,
    }

    #[derive(Debug, Clone)]
    struct Output {
        alpha: f64,
    }

    /// Linearized pendulum: `alpha = -k * theta`.
    struct Linear {
        k: f64,
    }

    impl Model for Linear {
        type Input = Input;
        type Output = Output;
        type Error = Infallible;

        fn call(&self, input: &Input) -> Result<Output, Infallible> {
            Ok(Output {
                alpha: -self.k * input.swing.theta,
            })
        }
    }

    struct SwingProblem;

    impl OdeProblem for SwingProblem {
        type Input = Input;
        type Output = Output;
        type Delta = f64;
        type State = Swing;
        type Error = Infallible;

        fn state(&self, input: &Input) -> Result<Swing, Infallible> {
            Ok(input.swing)
        }

        fn derivative(&self, input: &Input, output: &Output) -> Result<SwingRate, Infallible> {
            Ok(SwingRate {
                dtheta: input.swing.omega,
                domega: output.alpha,
            })
        }

        fn build_input(&self, base: &Input, swing: &Swing, dt: &f64) -> Result<Input, Infallible> {
            Ok(Input {
                swing: *swing,
                time: base.time + dt,
            })
        }
    }

    fn at_rest(theta: f64) -> Input {
        Input {
            swing: Swing { theta, omega: 0.0 },
            time: 0.0,
        }
    }

    // --- Tests ---

    #[test]
    fn tracks_the_analytical_oscillation() {
        // theta(t) = cos(t) for k = 1 starting at rest from theta = 1.
        let solution = solve_unobserved(&Linear { k: 1.0 }, &SwingProblem, at_rest(1.0), 0.1, 100)
            .expect("should solve");

        assert_eq!(solution.status, Status::Complete);
        assert_eq!(solution.history.len(), 101);

        for snapshot in &solution.history {
            let t = snapshot.input.time;
            assert_relative_eq!(snapshot.input.swing.theta, t.cos(), epsilon = 1e-4);
            assert_relative_eq!(snapshot.input.swing.omega, -t.sin(), epsilon = 1e-4);
        }
    }

    #[test]
    fn single_step_matches_taylor_expansion() {
        // For a linear system RK4 reproduces the Taylor series through dt^4.
        let dt: f64 = 0.2;
        let solution = solve_unobserved(&Linear { k: 1.0 }, &SwingProblem, at_rest(1.0), dt, 1)
            .expect("should solve");

        let expected = 1.0 - dt.powi(2) / 2.0 + dt.powi(4) / 24.0;
        assert_relative_eq!(
            solution.history[1].input.swing.theta,
            expected,
            epsilon = 1e-14
        );
    }

    #[test]
    fn holds_energy_far_better_than_euler() {
        let model = Linear { k: 1.0 };
        let energy = |s: &Swing| 0.5 * s.omega.powi(2) + 0.5 * s.theta.powi(2);
        let drift = |history: &[swing_core::Snapshot<Input, Output>]| {
            let start = energy(&history[0].input.swing);
            history
                .iter()
                .map(|s| (energy(&s.input.swing) - start).abs())
                .fold(0.0, f64::max)
        };

        let rk4 = solve_unobserved(&model, &SwingProblem, at_rest(1.0), 0.05, 400).unwrap();
        let euler = euler::solve_unobserved(&model, &SwingProblem, at_rest(1.0), 0.05, 400).unwrap();

        let rk4_drift = drift(rk4.history.as_slice());
        let euler_drift = drift(euler.history.as_slice());

        assert!(rk4_drift < 1e-4, "rk4 drift {rk4_drift}");
        assert!(euler_drift > 100.0 * rk4_drift, "euler {euler_drift} vs rk4 {rk4_drift}");
    }

    #[test]
    fn intermediate_stages_are_not_observed() {
        let mut seen = Vec::new();
        solve(
            &Linear { k: 1.0 },
            &SwingProblem,
            at_rest(0.5),
            0.1,
            3,
            |event: &Event<Input, Output>| {
                seen.push((event.step, event.snapshot.input.time));
                None
            },
        )
        .expect("should solve");

        assert_eq!(seen.len(), 4);
        for (step, time) in seen {
            #[allow(clippy::cast_precision_loss)]
            let expected = step as f64 * 0.1;
            assert_relative_eq!(time, expected, epsilon = 1e-12);
        }
    }

    #[test]
    fn observer_can_stop_early() {
        let observer = |event: &Event<Input, Output>| (event.step == 2).then_some(Action::StopEarly);

        let solution = solve(
            &Linear { k: 1.0 },
            &SwingProblem,
            at_rest(0.5),
            0.1,
            50,
            observer,
        )
        .expect("should stop early");

        assert_eq!(solution.status, Status::StoppedByObserver);
        assert_eq!(solution.steps, 2);
        assert_eq!(solution.history.len(), 3);
    }

    #[test]
    fn zero_steps_returns_initial() {
        let solution = solve_unobserved(&Linear { k: 1.0 }, &SwingProblem, at_rest(0.5), 0.1, 0)
            .expect("should return initial");

        assert_eq!(solution.steps, 0);
        assert_eq!(solution.history.len(), 1);
    }
}
