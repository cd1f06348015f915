//! `swing`: solve a double pendulum problem, replay it, and export the
//! sampled playback as CSV.

use std::{
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::Parser;
use swing_pendulum::{Error, Session};
use tracing::{error, info, warn};

/// Double pendulum simulator.
#[derive(Parser)]
#[command(name = "swing", version, about, long_about = None)]
struct Cli {
    /// Problem file, JSON or TOML
    #[arg(default_value = "problem.json")]
    problem: PathBuf,

    /// Where to write the sampled playback
    #[arg(long, default_value = "results.csv")]
    out: PathBuf,

    /// Animate in a window instead of replaying headless
    #[arg(long)]
    gui: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt().with_target(false).init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), Error> {
    let session = Session::from_path(&cli.problem)?;
    info!(
        problem = %cli.problem.display(),
        integrator = %session.config().solver().integrator,
        "loaded problem"
    );

    if cli.gui {
        animate(session, &cli.out)
    } else {
        replay(session, &cli.out)
    }
}

/// Walks the whole trajectory without a window, then exports.
fn replay(mut session: Session, out: &Path) -> Result<(), Error> {
    while session.advance().is_some() {}

    let trajectory = session.trajectory();
    info!(
        samples = trajectory.len(),
        recorded = session.recorded().len(),
        stride = session.playback().stride(),
        energy_drift = trajectory.energy_drift(),
        relative_energy_drift = trajectory.relative_energy_drift(),
        "replay finished"
    );
    if let Some(tick) = trajectory.first_non_finite() {
        warn!(tick, "trajectory contains non-finite values");
    }

    session.export_csv(out)
}

#[cfg(feature = "gui")]
fn animate(session: Session, out: &Path) -> Result<(), Error> {
    swing_pendulum::gui::run(session, out.to_path_buf())
}

#[cfg(not(feature = "gui"))]
fn animate(session: Session, out: &Path) -> Result<(), Error> {
    warn!("built without the `gui` feature, replaying headless");
    replay(session, out)
}
