//! Equations of motion and energy of a planar double pendulum.
//!
//! Angles are measured from the downward vertical. Both arms are massless
//! rods with a point mass at their end.

use std::{
    convert::Infallible,
    ops::{Add, Mul},
};

use swing_core::{DerivativeOf, Model, OdeProblem, StepIntegrable};
use swing_observers::traits::CheckFinite;

use crate::{
    ModelError,
    segment::{Arm, Point, Pose},
};

/// Standard gravitational acceleration in m/s².
pub const STANDARD_GRAVITY: f64 = 9.81;

/// Angles (rad) and angular velocities (rad/s) of both arms.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct State {
    pub theta1: f64,
    pub theta2: f64,
    pub omega1: f64,
    pub omega2: f64,
}

/// Time derivative of a [`State`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StateRate {
    pub dtheta1: f64,
    pub dtheta2: f64,
    pub domega1: f64,
    pub domega2: f64,
}

impl Add for StateRate {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            dtheta1: self.dtheta1 + rhs.dtheta1,
            dtheta2: self.dtheta2 + rhs.dtheta2,
            domega1: self.domega1 + rhs.domega1,
            domega2: self.domega2 + rhs.domega2,
        }
    }
}

impl Mul<f64> for StateRate {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self {
            dtheta1: self.dtheta1 * rhs,
            dtheta2: self.dtheta2 * rhs,
            domega1: self.domega1 * rhs,
            domega2: self.domega2 * rhs,
        }
    }
}

impl StepIntegrable<f64> for State {
    type Derivative = StateRate;

    fn step(&self, rate: StateRate, dt: f64) -> Self {
        Self {
            theta1: self.theta1 + rate.dtheta1 * dt,
            theta2: self.theta2 + rate.dtheta2 * dt,
            omega1: self.omega1 + rate.domega1 * dt,
            omega2: self.omega2 + rate.domega2 * dt,
        }
    }
}

/// Model input: the state at a point in time.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Input {
    pub time: f64,
    pub state: State,
}

/// Model output: angular accelerations and total energy at the input state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Output {
    pub alpha1: f64,
    pub alpha2: f64,
    pub energy: f64,
}

/// A double pendulum: two arms under uniform gravity.
///
/// The first arm pivots on a fixed anchor and the second on the first arm's
/// end point. Calling the model evaluates the coupled equations of motion
/// and the total mechanical energy; it holds no integration state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DoublePendulum {
    first: Arm,
    second: Arm,
    gravity: f64,
}

impl DoublePendulum {
    /// Creates a double pendulum.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::NonPositive`] if `gravity` is not a positive,
    /// finite number.
    pub fn new(first: Arm, second: Arm, gravity: f64) -> Result<Self, ModelError> {
        ModelError::check_positive("gravity", gravity)?;
        Ok(Self {
            first,
            second,
            gravity,
        })
    }

    #[must_use]
    pub fn first(&self) -> &Arm {
        &self.first
    }

    #[must_use]
    pub fn second(&self) -> &Arm {
        &self.second
    }

    #[must_use]
    pub fn gravity(&self) -> f64 {
        self.gravity
    }

    /// Returns the angular accelerations `(alpha1, alpha2)` at `state`.
    ///
    /// The shared denominator `l1 * (2 m1 + m2 (1 - cos 2Δθ))` is bounded
    /// below by `2 m1 l1`, but gets small when `m1` is much lighter than `m2`
    /// and Δθ nears a multiple of π. No guard is applied; overflow surfaces
    /// as non-finite values.
    #[must_use]
    pub fn accelerations(&self, state: &State) -> (f64, f64) {
        let (m1, l1) = (self.first.mass(), self.first.length());
        let (m2, l2) = (self.second.mass(), self.second.length());
        let g = self.gravity;
        let State {
            theta1,
            theta2,
            omega1,
            omega2,
        } = *state;

        let delta = theta1 - theta2;
        let denom = l1 * (2.0 * m1 + m2 - m2 * (2.0 * theta1 - 2.0 * theta2).cos());

        let alpha1 = (-g * (2.0 * m1 + m2) * theta1.sin()
            - m2 * g * (theta1 - 2.0 * theta2).sin()
            - 2.0 * delta.sin() * m2 * (omega2.powi(2) * l2 + omega1.powi(2) * l1 * delta.cos()))
            / denom;

        let alpha2 = (2.0
            * delta.sin()
            * (omega1.powi(2) * l1 * (m1 + m2)
                + g * (m1 + m2) * theta1.cos()
                + omega2.powi(2) * l2 * m2 * delta.cos()))
            / (l2 / l1 * denom);

        (alpha1, alpha2)
    }

    /// Returns the total mechanical energy at `state`.
    ///
    /// Potential energy is zero at the height of the anchor, so a pendulum
    /// hanging at rest has energy `-(m1 + m2) g l1 - m2 g l2`. Kinetic
    /// energy includes the coupling term between the two arms.
    #[must_use]
    pub fn energy(&self, state: &State) -> f64 {
        let (m1, l1) = (self.first.mass(), self.first.length());
        let (m2, l2) = (self.second.mass(), self.second.length());
        let g = self.gravity;

        let kinetic = 0.5 * (m1 + m2) * l1.powi(2) * state.omega1.powi(2)
            + 0.5 * m2 * l2.powi(2) * state.omega2.powi(2)
            + m2 * l1 * l2 * state.omega1 * state.omega2 * (state.theta1 - state.theta2).cos();
        let potential =
            -(m1 + m2) * g * l1 * state.theta1.cos() - m2 * g * l2 * state.theta2.cos();

        kinetic + potential
    }

    /// Returns the joint positions for the given angles.
    #[must_use]
    pub fn pose(&self, anchor: Point, theta1: f64, theta2: f64) -> Pose {
        Pose::new(anchor, &self.first, &self.second, theta1, theta2)
    }
}

impl Model for DoublePendulum {
    type Input = Input;
    type Output = Output;
    type Error = Infallible;

    fn call(&self, input: &Input) -> Result<Output, Infallible> {
        let (alpha1, alpha2) = self.accelerations(&input.state);
        Ok(Output {
            alpha1,
            alpha2,
            energy: self.energy(&input.state),
        })
    }
}

/// Wires [`DoublePendulum`] inputs and outputs to the transient solvers.
#[derive(Debug, Clone, Copy, Default)]
pub struct PendulumProblem;

impl OdeProblem for PendulumProblem {
    type Input = Input;
    type Output = Output;
    type Delta = f64;
    type State = State;
    type Error = Infallible;

    fn state(&self, input: &Input) -> Result<State, Infallible> {
        Ok(input.state)
    }

    fn derivative(
        &self,
        input: &Input,
        output: &Output,
    ) -> Result<DerivativeOf<State, f64>, Infallible> {
        Ok(StateRate {
            dtheta1: input.state.omega1,
            dtheta2: input.state.omega2,
            domega1: output.alpha1,
            domega2: output.alpha2,
        })
    }

    fn build_input(&self, base: &Input, state: &State, dt: &f64) -> Result<Input, Infallible> {
        Ok(Input {
            time: base.time + dt,
            state: *state,
        })
    }
}

impl CheckFinite for State {
    fn is_finite(&self) -> bool {
        [self.theta1, self.theta2, self.omega1, self.omega2]
            .iter()
            .all(|v| v.is_finite())
    }
}

impl CheckFinite for Input {
    fn is_finite(&self) -> bool {
        self.time.is_finite() && self.state.is_finite()
    }
}

impl CheckFinite for Output {
    fn is_finite(&self) -> bool {
        self.alpha1.is_finite() && self.alpha2.is_finite() && self.energy.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, PI};

    use approx::assert_relative_eq;

    use super::*;

    fn unit_pendulum() -> DoublePendulum {
        let arm = Arm::new(1.0, 1.0).unwrap();
        DoublePendulum::new(arm, arm, STANDARD_GRAVITY).unwrap()
    }

    #[test]
    fn equilibrium_has_no_acceleration() {
        let (alpha1, alpha2) = unit_pendulum().accelerations(&State::default());

        assert_eq!(alpha1, 0.0);
        assert_eq!(alpha2, 0.0);
    }

    #[test]
    fn both_arms_horizontal() {
        // denom = 2, alpha1 = (-3g + g) / 2 = -g, and sin(0) zeroes alpha2.
        let state = State {
            theta1: FRAC_PI_2,
            theta2: FRAC_PI_2,
            ..State::default()
        };

        let (alpha1, alpha2) = unit_pendulum().accelerations(&state);

        assert_relative_eq!(alpha1, -STANDARD_GRAVITY, epsilon = 1e-12);
        assert_relative_eq!(alpha2, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn small_angles_follow_the_linearized_equations() {
        // Linearized unit pendulum: alpha1 = -2g θ1 + g θ2, alpha2 = 2g θ1 - 2g θ2.
        let g = STANDARD_GRAVITY;
        let state = State {
            theta1: 1e-4,
            theta2: -2e-4,
            ..State::default()
        };

        let (alpha1, alpha2) = unit_pendulum().accelerations(&state);

        assert_relative_eq!(alpha1, -2.0 * g * 1e-4 + g * -2e-4, max_relative = 1e-6);
        assert_relative_eq!(alpha2, 2.0 * g * 1e-4 - 2.0 * g * -2e-4, max_relative = 1e-6);
    }

    #[test]
    fn accelerations_are_mirror_symmetric() {
        let pendulum = unit_pendulum();
        let state = State {
            theta1: 0.7,
            theta2: -1.1,
            omega1: 0.4,
            omega2: -2.0,
        };
        let mirrored = State {
            theta1: -0.7,
            theta2: 1.1,
            omega1: -0.4,
            omega2: 2.0,
        };

        let (a1, a2) = pendulum.accelerations(&state);
        let (b1, b2) = pendulum.accelerations(&mirrored);

        assert_relative_eq!(a1, -b1, epsilon = 1e-12);
        assert_relative_eq!(a2, -b2, epsilon = 1e-12);
    }

    #[test]
    fn energy_at_rest_is_pure_potential() {
        let pendulum = unit_pendulum();
        let g = STANDARD_GRAVITY;

        assert_relative_eq!(pendulum.energy(&State::default()), -3.0 * g);

        let inverted = State {
            theta1: PI,
            theta2: PI,
            ..State::default()
        };
        assert_relative_eq!(pendulum.energy(&inverted), 3.0 * g, epsilon = 1e-12);

        let horizontal = State {
            theta1: FRAC_PI_2,
            theta2: FRAC_PI_2,
            ..State::default()
        };
        assert_relative_eq!(pendulum.energy(&horizontal), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn kinetic_energy_includes_the_coupling_term() {
        let pendulum = unit_pendulum();
        let g = STANDARD_GRAVITY;
        let state = State {
            omega1: 1.0,
            omega2: 1.0,
            ..State::default()
        };

        // Rigidly rotating straight pendulum: tip moves at 2 m/s, elbow at 1 m/s.
        // T = ½·1·1² + ½·1·2² = 2.5, compared with 1.5 without coupling.
        assert_relative_eq!(pendulum.energy(&state), 2.5 - 3.0 * g, epsilon = 1e-12);
    }

    #[test]
    fn model_call_reports_accelerations_and_energy() {
        let pendulum = unit_pendulum();
        let input = Input {
            time: 0.0,
            state: State {
                theta1: 0.3,
                theta2: 0.1,
                omega1: -0.5,
                omega2: 0.8,
            },
        };

        let output = pendulum.call(&input).unwrap();
        let (alpha1, alpha2) = pendulum.accelerations(&input.state);

        assert_eq!(output.alpha1, alpha1);
        assert_eq!(output.alpha2, alpha2);
        assert_eq!(output.energy, pendulum.energy(&input.state));
    }

    #[test]
    fn problem_maps_state_to_its_rate() {
        let input = Input {
            time: 1.0,
            state: State {
                theta1: 0.1,
                theta2: 0.2,
                omega1: 0.3,
                omega2: 0.4,
            },
        };
        let output = Output {
            alpha1: -1.0,
            alpha2: 2.0,
            energy: 0.0,
        };

        let rate = PendulumProblem.derivative(&input, &output).unwrap();
        let next = PendulumProblem
            .build_input(&input, &input.state.step(rate, 0.5), &0.5)
            .unwrap();

        assert_relative_eq!(next.time, 1.5, epsilon = 1e-12);
        assert_relative_eq!(next.state.theta1, 0.25, epsilon = 1e-12);
        assert_relative_eq!(next.state.theta2, 0.4, epsilon = 1e-12);
        assert_relative_eq!(next.state.omega1, -0.2, epsilon = 1e-12);
        assert_relative_eq!(next.state.omega2, 1.4, epsilon = 1e-12);
    }

    #[test]
    fn gravity_must_be_positive() {
        let arm = Arm::new(1.0, 1.0).unwrap();
        assert_eq!(
            DoublePendulum::new(arm, arm, 0.0),
            Err(ModelError::NonPositive {
                name: "gravity",
                value: 0.0
            })
        );
    }

    #[test]
    fn finiteness_checks_every_field() {
        let mut state = State::default();
        assert!(state.is_finite());

        state.omega2 = f64::NAN;
        assert!(!state.is_finite());
        assert!(
            !Output {
                alpha1: 0.0,
                alpha2: f64::INFINITY,
                energy: 0.0
            }
            .is_finite()
        );
    }
}
