use std::{io, path::Path};

use swing_observers::{FiniteGuard, traits::CheckFinite};
use swing_solvers::transient::{Action, Event, Solution, Status};
use tracing::{debug, info, warn};

use crate::{
    Config, Error,
    export,
    pendulum::{DoublePendulum, Input, Output},
    playback::{Frame, Playback},
    segment::{Point, Pose},
    trajectory::{Sample, Trajectory},
};

/// A solved simulation and its playback cursor.
///
/// Construction runs the configured integrator over the whole horizon.
/// Afterwards the trajectory never changes; [`advance`](Session::advance)
/// and [`reset`](Session::reset) only move the cursor and its recorded
/// samples.
#[derive(Debug, Clone)]
pub struct Session {
    config: Config,
    pendulum: DoublePendulum,
    trajectory: Trajectory,
    playback: Playback,
}

impl Session {
    /// Builds the pendulum described by `config` and solves it.
    ///
    /// # Errors
    ///
    /// Returns an error if the pendulum is invalid, the solver fails, or the
    /// configuration asks to halt on non-finite values and one occurs.
    pub fn new(config: Config) -> Result<Self, Error> {
        let [first, second] = config.segments();
        let pendulum = DoublePendulum::new(first.arm()?, second.arm()?, config.gravity())?;
        let trajectory = solve(&config, &pendulum)?;
        let playback = Playback::new(trajectory.step_count());

        Ok(Self {
            config,
            pendulum,
            trajectory,
            playback,
        })
    }

    /// Loads a problem file and solves it.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be loaded or the session cannot
    /// be built.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Error> {
        Self::new(Config::from_path(path)?)
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub fn pendulum(&self) -> &DoublePendulum {
        &self.pendulum
    }

    #[must_use]
    pub fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }

    #[must_use]
    pub fn playback(&self) -> &Playback {
        &self.playback
    }

    /// Samples recorded for graphing and export since the last reset.
    #[must_use]
    pub fn recorded(&self) -> &[Sample] {
        self.playback.recorded()
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.playback.is_finished(&self.trajectory)
    }

    /// Reads the next playback sample, or `None` at the end.
    pub fn advance(&mut self) -> Option<Frame> {
        self.playback.advance(&self.trajectory)
    }

    /// Rewinds playback to tick 0 and clears recorded samples.
    pub fn reset(&mut self) {
        debug!(tick = self.playback.tick(), "playback reset");
        self.playback.reset();
    }

    /// Returns the joint positions of `sample` with the first arm pivoting
    /// on `anchor`.
    #[must_use]
    pub fn pose(&self, anchor: Point, sample: &Sample) -> Pose {
        self.pendulum.pose(anchor, sample.theta1, sample.theta2)
    }

    /// Writes the recorded samples as CSV.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn write_csv<W: io::Write>(&self, writer: W) -> Result<(), Error> {
        export::write_csv(writer, self.recorded())
    }

    /// Writes the recorded samples to a CSV file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or written.
    pub fn export_csv(&self, path: impl AsRef<Path>) -> Result<(), Error> {
        let path = path.as_ref();
        export::export_csv(path, self.recorded())?;
        info!(path = %path.display(), rows = self.recorded().len(), "exported results");
        Ok(())
    }
}

/// Runs the configured integrator over the full horizon.
fn solve(config: &Config, pendulum: &DoublePendulum) -> Result<Trajectory, Error> {
    let solver = config.solver();
    let steps = solver.step_count();
    let integrator = solver.integrator;
    let initial = config.initial_state();

    info!(%integrator, steps, dt = solver.dt, "solving");

    let solution = if solver.halt_on_non_finite {
        let mut guard = FiniteGuard::new();
        let solution = integrator.integrate(pendulum, initial, solver.dt, steps, &mut guard)?;
        if let Some(tick) = guard.tripped_at() {
            warn!(tick, "non-finite state, solve halted");
            return Err(Error::NonFinite { tick });
        }
        solution
    } else {
        let mut reported = false;
        integrator.integrate(
            pendulum,
            initial,
            solver.dt,
            steps,
            |event: &Event<Input, Output>| -> Option<Action> {
                if !reported && !event.is_finite() {
                    warn!(tick = event.step, "non-finite state, recording as is");
                    reported = true;
                }
                None
            },
        )?
    };

    let trajectory = trajectory_from(solver.dt, steps, &solution)?;
    info!(
        samples = trajectory.len(),
        energy_drift = trajectory.energy_drift(),
        "solve complete"
    );
    Ok(trajectory)
}

fn trajectory_from(
    dt: f64,
    steps: usize,
    solution: &Solution<Input, Output>,
) -> Result<Trajectory, Error> {
    debug_assert_eq!(solution.status, Status::Complete);
    Trajectory::from_history(dt, steps + 1, &solution.history)
}
