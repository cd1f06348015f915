//! Energy of a double pendulum under Euler and Runge-Kutta.
//!
//! Solves the same problem with both integrators and overlays their total
//! energy. The exact solution conserves energy, so any slope is integrator
//! error. Euler gains energy steadily; Runge-Kutta stays close to flat.
//!
//! # Usage
//!
//! ```text
//! cargo run -p swing-pendulum --example energy_drift --features plot
//! cargo run -p swing-pendulum --example energy_drift --features plot -- 0.005
//! ```
//!
//! The optional argument is the step size in seconds (default `0.01`).

use std::{error::Error, f64::consts::FRAC_PI_2};

use swing_observers::{PlotObserver, ShowConfig};
use swing_pendulum::{
    Config, DoublePendulum, Input, Integrator, Output, SegmentConfig, SolverConfig,
};
use swing_solvers::transient::{Action, Event};

const DURATION: f64 = 10.0;

fn main() -> Result<(), Box<dyn Error>> {
    let dt = std::env::args()
        .nth(1)
        .as_deref()
        .map(str::parse::<f64>)
        .transpose()?
        .unwrap_or(0.01);

    let segment = SegmentConfig {
        mass: 1.0,
        length: 1.0,
        theta: FRAC_PI_2,
        omega: 0.0,
    };
    let solver = SolverConfig::new(Integrator::RungeKutta, DURATION, dt)?;
    let config = Config::new(segment, segment, solver)?;

    let [first, second] = config.segments();
    let pendulum = DoublePendulum::new(first.arm()?, second.arm()?, config.gravity())?;
    let steps = solver.step_count();

    let mut obs = PlotObserver::<2>::new(["Euler", "Runge-Kutta"]);
    for (trace, integrator) in [Integrator::Euler, Integrator::RungeKutta]
        .into_iter()
        .enumerate()
    {
        integrator.integrate(
            &pendulum,
            config.initial_state(),
            dt,
            steps,
            |event: &Event<Input, Output>| -> Option<Action> {
                let mut energies = [None, None];
                energies[trace] = Some(event.snapshot.output.energy);
                obs.record(event.snapshot.input.time, energies);
                None
            },
        )?;
    }

    obs.show(
        ShowConfig::new()
            .title(format!("Double pendulum energy, dt = {dt}"))
            .legend()
            .axis_labels("t [s]", "E [J]"),
    )?;

    Ok(())
}
