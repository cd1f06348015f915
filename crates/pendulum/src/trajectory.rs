//! Storage for a solved trajectory.
//!
//! A [`Trajectory`] is filled once, in order, while a session solves, and is
//! read by tick afterwards. Each quantity is kept in its own index-aligned
//! sequence so graphs and exports can borrow a column directly.

use swing_core::Snapshot;

use crate::{
    Error,
    pendulum::{Input, Output, State},
};

/// One trajectory entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub tick: usize,
    /// Simulated time in s: `tick * dt`.
    pub time: f64,
    pub theta1: f64,
    pub theta2: f64,
    pub omega1: f64,
    pub omega2: f64,
    /// Total mechanical energy in J.
    pub energy: f64,
}

impl Sample {
    #[must_use]
    pub fn state(&self) -> State {
        State {
            theta1: self.theta1,
            theta2: self.theta2,
            omega1: self.omega1,
            omega2: self.omega2,
        }
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        [
            self.theta1,
            self.theta2,
            self.omega1,
            self.omega2,
            self.energy,
        ]
        .iter()
        .all(|v| v.is_finite())
    }
}

/// Five index-aligned sequences: both angles, both angular velocities, and
/// energy, sampled every `dt` seconds starting at time zero.
///
/// Capacity is fixed at construction; [`push`](Trajectory::push) refuses to
/// grow past it.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    dt: f64,
    capacity: usize,
    theta1: Vec<f64>,
    theta2: Vec<f64>,
    omega1: Vec<f64>,
    omega2: Vec<f64>,
    energy: Vec<f64>,
}

impl Trajectory {
    /// Creates an empty trajectory that can hold `capacity` samples.
    #[must_use]
    pub fn with_capacity(dt: f64, capacity: usize) -> Self {
        Self {
            dt,
            capacity,
            theta1: Vec::with_capacity(capacity),
            theta2: Vec::with_capacity(capacity),
            omega1: Vec::with_capacity(capacity),
            omega2: Vec::with_capacity(capacity),
            energy: Vec::with_capacity(capacity),
        }
    }

    /// Builds a trajectory from a solver history.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TrajectoryFull`] if the history is longer than
    /// `capacity`.
    pub fn from_history(
        dt: f64,
        capacity: usize,
        history: &[Snapshot<Input, Output>],
    ) -> Result<Self, Error> {
        let mut trajectory = Self::with_capacity(dt, capacity);
        for snapshot in history {
            trajectory.push(&snapshot.input.state, snapshot.output.energy)?;
        }
        Ok(trajectory)
    }

    /// Appends one sample and returns its tick.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TrajectoryFull`] once `capacity` samples are stored.
    pub fn push(&mut self, state: &State, energy: f64) -> Result<usize, Error> {
        if self.len() == self.capacity {
            return Err(Error::TrajectoryFull {
                capacity: self.capacity,
            });
        }

        self.theta1.push(state.theta1);
        self.theta2.push(state.theta2);
        self.omega1.push(state.omega1);
        self.omega2.push(state.omega2);
        self.energy.push(energy);

        Ok(self.len() - 1)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.energy.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.energy.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns `true` once every expected sample has been stored.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.len() == self.capacity
    }

    /// Number of steps between the first and last stored sample.
    #[must_use]
    pub fn step_count(&self) -> usize {
        self.len().saturating_sub(1)
    }

    #[must_use]
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Simulated time at `tick`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn time(&self, tick: usize) -> f64 {
        tick as f64 * self.dt
    }

    /// Returns the sample at `tick`, or `None` past the end.
    #[must_use]
    pub fn sample(&self, tick: usize) -> Option<Sample> {
        Some(Sample {
            tick,
            time: self.time(tick),
            theta1: *self.theta1.get(tick)?,
            theta2: self.theta2[tick],
            omega1: self.omega1[tick],
            omega2: self.omega2[tick],
            energy: self.energy[tick],
        })
    }

    /// Iterates over every stored sample in tick order.
    pub fn iter(&self) -> impl Iterator<Item = Sample> + '_ {
        (0..self.len()).filter_map(|tick| self.sample(tick))
    }

    #[must_use]
    pub fn theta1(&self) -> &[f64] {
        &self.theta1
    }

    #[must_use]
    pub fn theta2(&self) -> &[f64] {
        &self.theta2
    }

    #[must_use]
    pub fn omega1(&self) -> &[f64] {
        &self.omega1
    }

    #[must_use]
    pub fn omega2(&self) -> &[f64] {
        &self.omega2
    }

    #[must_use]
    pub fn energy(&self) -> &[f64] {
        &self.energy
    }

    /// Largest absolute deviation of energy from its initial value.
    ///
    /// Returns NaN if any energy sample is non-finite, and zero for an empty
    /// trajectory.
    #[must_use]
    pub fn energy_drift(&self) -> f64 {
        let Some(&initial) = self.energy.first() else {
            return 0.0;
        };
        self.energy.iter().fold(0.0, |worst: f64, &e| {
            let deviation = (e - initial).abs();
            if deviation.is_nan() || worst.is_nan() {
                f64::NAN
            } else {
                worst.max(deviation)
            }
        })
    }

    /// [`energy_drift`](Self::energy_drift) relative to the magnitude of the
    /// initial energy.
    ///
    /// Infinite when the initial energy is exactly zero and the energy moved.
    #[must_use]
    pub fn relative_energy_drift(&self) -> f64 {
        let drift = self.energy_drift();
        match self.energy.first() {
            Some(&initial) if drift != 0.0 => drift / initial.abs(),
            _ => 0.0,
        }
    }

    /// Returns the tick of the first sample holding a NaN or infinity.
    #[must_use]
    pub fn first_non_finite(&self) -> Option<usize> {
        self.iter()
            .find(|sample| !sample.is_finite())
            .map(|sample| sample.tick)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn state(theta1: f64) -> State {
        State {
            theta1,
            theta2: -theta1,
            omega1: 2.0 * theta1,
            omega2: -2.0 * theta1,
        }
    }

    fn filled(energies: &[f64]) -> Trajectory {
        let mut trajectory = Trajectory::with_capacity(0.1, energies.len());
        for (i, &energy) in energies.iter().enumerate() {
            #[allow(clippy::cast_precision_loss)]
            let theta1 = i as f64;
            trajectory.push(&state(theta1), energy).unwrap();
        }
        trajectory
    }

    #[test]
    fn push_keeps_sequences_aligned() {
        let trajectory = filled(&[-1.0, -2.0, -3.0]);

        assert_eq!(trajectory.len(), 3);
        assert!(trajectory.is_complete());
        assert_eq!(trajectory.step_count(), 2);
        assert_eq!(trajectory.theta1(), [0.0, 1.0, 2.0]);
        assert_eq!(trajectory.theta2(), [0.0, -1.0, -2.0]);
        assert_eq!(trajectory.omega1(), [0.0, 2.0, 4.0]);
        assert_eq!(trajectory.omega2(), [0.0, -2.0, -4.0]);
        assert_eq!(trajectory.energy(), [-1.0, -2.0, -3.0]);
    }

    #[test]
    fn push_refuses_to_grow_past_capacity() {
        let mut trajectory = filled(&[0.0, 0.0]);

        assert!(matches!(
            trajectory.push(&State::default(), 0.0),
            Err(Error::TrajectoryFull { capacity: 2 })
        ));
        assert_eq!(trajectory.len(), 2);
    }

    #[test]
    fn sample_reads_one_tick() {
        let trajectory = filled(&[5.0, 6.0, 7.0]);
        let sample = trajectory.sample(2).unwrap();

        assert_eq!(sample.tick, 2);
        assert_relative_eq!(sample.time, 0.2);
        assert_eq!(sample.state(), state(2.0));
        assert_eq!(sample.energy, 7.0);
        assert!(trajectory.sample(3).is_none());
    }

    #[test]
    fn iter_visits_every_tick_in_order() {
        let trajectory = filled(&[1.0, 2.0, 3.0, 4.0]);
        let ticks: Vec<usize> = trajectory.iter().map(|s| s.tick).collect();

        assert_eq!(ticks, [0, 1, 2, 3]);
    }

    #[test]
    fn drift_is_the_worst_deviation_from_the_start() {
        let trajectory = filled(&[-10.0, -9.5, -10.8, -10.1]);

        assert_relative_eq!(trajectory.energy_drift(), 0.8, epsilon = 1e-12);
        assert_relative_eq!(trajectory.relative_energy_drift(), 0.08, epsilon = 1e-12);
    }

    #[test]
    fn drift_of_constant_or_empty_energy_is_zero() {
        assert_eq!(filled(&[0.0, 0.0, 0.0]).relative_energy_drift(), 0.0);
        assert_eq!(Trajectory::with_capacity(0.1, 0).energy_drift(), 0.0);
    }

    #[test]
    fn non_finite_samples_are_reported_not_hidden() {
        let trajectory = filled(&[1.0, 1.0, f64::NAN, 1.0]);

        assert_eq!(trajectory.first_non_finite(), Some(2));
        assert!(trajectory.energy_drift().is_nan());
        assert_eq!(filled(&[1.0, 2.0]).first_non_finite(), None);
    }
}
