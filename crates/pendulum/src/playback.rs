use crate::trajectory::{Sample, Trajectory};

/// Most samples a rolling graph or export holds for one playback.
pub const GRAPH_CAPACITY: usize = 250;

/// Ticks between two recorded samples so a playback of `step_count` steps
/// records at most about [`GRAPH_CAPACITY`] of them.
#[must_use]
pub fn sample_stride(step_count: usize) -> usize {
    step_count.div_ceil(GRAPH_CAPACITY).max(1)
}

/// One playback frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub sample: Sample,
    /// Whether this tick was recorded for graphing and export.
    pub recorded: bool,
}

/// Playback cursor over a solved trajectory.
///
/// Each [`advance`](Playback::advance) reads exactly one sample. Every
/// `stride`-th tick is also copied into the recorded buffer that feeds the
/// graphs and the CSV export. The trajectory itself is only ever borrowed.
#[derive(Debug, Clone, PartialEq)]
pub struct Playback {
    tick: usize,
    stride: usize,
    recorded: Vec<Sample>,
}

impl Playback {
    /// Creates a cursor at tick 0 for a trajectory of `step_count` steps.
    #[must_use]
    pub fn new(step_count: usize) -> Self {
        let stride = sample_stride(step_count);
        Self {
            tick: 0,
            stride,
            recorded: Vec::with_capacity(step_count / stride + 1),
        }
    }

    /// The next tick to be read.
    #[must_use]
    pub fn tick(&self) -> usize {
        self.tick
    }

    #[must_use]
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Samples recorded since the last reset, in tick order.
    #[must_use]
    pub fn recorded(&self) -> &[Sample] {
        &self.recorded
    }

    #[must_use]
    pub fn is_finished(&self, trajectory: &Trajectory) -> bool {
        self.tick >= trajectory.len()
    }

    /// Reads the sample at the current tick and moves to the next one.
    ///
    /// Returns `None` once the end of the trajectory is reached.
    pub fn advance(&mut self, trajectory: &Trajectory) -> Option<Frame> {
        let sample = trajectory.sample(self.tick)?;
        let recorded = self.tick % self.stride == 0;
        if recorded {
            self.recorded.push(sample);
        }
        self.tick += 1;
        Some(Frame { sample, recorded })
    }

    /// Rewinds to tick 0 and clears the recorded samples.
    pub fn reset(&mut self) {
        self.tick = 0;
        self.recorded.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pendulum::State;

    fn trajectory(len: usize) -> Trajectory {
        let mut trajectory = Trajectory::with_capacity(0.01, len);
        for i in 0..len {
            #[allow(clippy::cast_precision_loss)]
            let theta1 = i as f64;
            trajectory
                .push(
                    &State {
                        theta1,
                        ..State::default()
                    },
                    -theta1,
                )
                .unwrap();
        }
        trajectory
    }

    #[test]
    fn stride_caps_recorded_samples() {
        assert_eq!(sample_stride(0), 1);
        assert_eq!(sample_stride(100), 1);
        assert_eq!(sample_stride(250), 1);
        assert_eq!(sample_stride(251), 2);
        assert_eq!(sample_stride(1000), 4);
        assert_eq!(sample_stride(1001), 5);
    }

    #[test]
    fn advances_one_tick_per_call() {
        let trajectory = trajectory(3);
        let mut playback = Playback::new(trajectory.step_count());

        let ticks: Vec<usize> = std::iter::from_fn(|| playback.advance(&trajectory))
            .map(|frame| frame.sample.tick)
            .collect();

        assert_eq!(ticks, [0, 1, 2]);
        assert!(playback.is_finished(&trajectory));
        assert!(playback.advance(&trajectory).is_none());
    }

    #[test]
    fn records_every_stride_th_tick() {
        let trajectory = trajectory(1001);
        let mut playback = Playback::new(trajectory.step_count());
        while playback.advance(&trajectory).is_some() {}

        assert_eq!(playback.stride(), 4);
        assert_eq!(playback.recorded().len(), 251);
        assert!(playback.recorded().iter().all(|s| s.tick % 4 == 0));
        assert_eq!(playback.recorded().last().unwrap().tick, 1000);
    }

    #[test]
    fn reset_rewinds_and_clears_recordings() {
        let trajectory = trajectory(10);
        let mut playback = Playback::new(trajectory.step_count());
        let first: Vec<Frame> = std::iter::from_fn(|| playback.advance(&trajectory)).collect();
        let recorded = playback.recorded().to_vec();

        playback.reset();
        assert_eq!(playback.tick(), 0);
        assert!(playback.recorded().is_empty());

        let second: Vec<Frame> = std::iter::from_fn(|| playback.advance(&trajectory)).collect();
        assert_eq!(first, second);
        assert_eq!(playback.recorded(), recorded.as_slice());
    }
}
