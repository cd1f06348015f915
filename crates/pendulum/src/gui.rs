//! Animated egui front-end.
//!
//! Plays a solved [`Session`] back at one tick per frame. The pendulum is
//! drawn in the central panel, rolling graphs of the recorded samples sit in
//! a side panel. A click anywhere in the window restarts playback. The CSV
//! is exported each time playback reaches the end.

use std::path::PathBuf;

use eframe::egui;
use egui_plot::{Legend, Line, Plot, PlotPoints};
use tracing::{error, info};

use crate::{Error, GRAPH_CAPACITY, Point, Sample, Session};

const GRAPH_HEIGHT: f32 = 180.0;

/// Share of the shorter side of the view covered by both arms at full reach.
const REACH: f32 = 0.45;

type Trace = (&'static str, fn(&Sample) -> f64);

/// Opens a window animating `session` and blocks until it is closed.
///
/// # Errors
///
/// Returns an error if the native window cannot be created.
pub fn run(session: Session, out: PathBuf) -> Result<(), Error> {
    let title = format!("Double pendulum ({})", session.config().solver().integrator);
    eframe::run_native(
        &title,
        eframe::NativeOptions::default(),
        Box::new(move |_cc| Ok(Box::new(Viewer::new(session, out)))),
    )?;
    Ok(())
}

struct Viewer {
    session: Session,
    out: PathBuf,
    current: Option<Sample>,
    exported: bool,
}

impl Viewer {
    fn new(session: Session, out: PathBuf) -> Self {
        Self {
            session,
            out,
            current: None,
            exported: false,
        }
    }

    /// Advances one frame, or restarts playback when `clicked`.
    fn step(&mut self, clicked: bool) {
        if clicked {
            self.restart();
        } else {
            self.tick();
        }
    }

    fn tick(&mut self) {
        if let Some(frame) = self.session.advance() {
            self.current = Some(frame.sample);
        } else if !self.exported {
            self.exported = true;
            if let Err(err) = self.session.export_csv(&self.out) {
                error!("{err}");
            }
        }
    }

    fn restart(&mut self) {
        info!("restarting playback");
        self.session.reset();
        self.current = None;
        self.exported = false;
    }

    fn ui_pendulum(&self, ui: &mut egui::Ui) {
        let (response, painter) = ui.allocate_painter(ui.available_size(), egui::Sense::hover());
        let Some(sample) = self.current else {
            return;
        };
        let rect = response.rect;
        let pendulum = self.session.pendulum();
        let reach = pendulum.first().length() + pendulum.second().length();
        #[allow(clippy::cast_possible_truncation)]
        let scale = rect.width().min(rect.height()) * REACH / reach as f32;

        let pose = self.session.pose(Point::default(), &sample);
        let anchor = to_screen(rect.center(), scale, pose.anchor);
        let elbow = to_screen(rect.center(), scale, pose.elbow);
        let tip = to_screen(rect.center(), scale, pose.tip);

        let stroke = egui::Stroke::new(2.0, egui::Color32::LIGHT_GRAY);
        painter.line_segment([anchor, elbow], stroke);
        painter.line_segment([elbow, tip], stroke);
        painter.circle_filled(anchor, 3.0, egui::Color32::GRAY);
        painter.circle_filled(elbow, 8.0, egui::Color32::LIGHT_BLUE);
        painter.circle_filled(tip, 8.0, egui::Color32::LIGHT_RED);
    }

    fn ui_graphs(&self, ui: &mut egui::Ui) {
        let recorded = self.session.recorded();
        let recent = &recorded[recorded.len().saturating_sub(GRAPH_CAPACITY)..];

        graph(ui, "angles", "θ [rad]", recent, &[
            ("θ1", |s: &Sample| s.theta1),
            ("θ2", |s: &Sample| s.theta2),
        ]);
        graph(ui, "velocities", "ω [rad/s]", recent, &[
            ("ω1", |s: &Sample| s.omega1),
            ("ω2", |s: &Sample| s.omega2),
        ]);
        graph(ui, "energy", "E [J]", recent, &[("E", |s: &Sample| s.energy)]);
    }
}

impl eframe::App for Viewer {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let clicked = ctx.input(|i| i.pointer.any_click());
        self.step(clicked);

        egui::SidePanel::right("graphs")
            .min_width(360.0)
            .show(ctx, |ui| self.ui_graphs(ui));
        egui::CentralPanel::default().show(ctx, |ui| self.ui_pendulum(ui));

        ctx.request_repaint();
    }
}

fn graph(ui: &mut egui::Ui, id: &str, label: &str, samples: &[Sample], traces: &[Trace]) {
    Plot::new(id)
        .height(GRAPH_HEIGHT)
        .legend(Legend::default())
        .x_axis_label("t [s]")
        .y_axis_label(label)
        .show(ui, |plot_ui| {
            for &(name, value) in traces {
                let points: PlotPoints = samples.iter().map(|s| [s.time, value(s)]).collect();
                plot_ui.line(Line::new(points).name(name));
            }
        });
}

/// Maps a model point, in metres with y pointing down, onto the screen.
#[allow(clippy::cast_possible_truncation)]
fn to_screen(center: egui::Pos2, scale: f32, point: Point) -> egui::Pos2 {
    egui::pos2(
        center.x + point.x as f32 * scale,
        center.y + point.y as f32 * scale,
    )
}

#[cfg(test)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use super::*;
    use crate::{Config, Integrator, SegmentConfig, SolverConfig};

    fn viewer() -> Viewer {
        let segment = SegmentConfig {
            mass: 1.0,
            length: 1.0,
            theta: FRAC_PI_2,
            omega: 0.0,
        };
        let solver = SolverConfig::new(Integrator::RungeKutta, 1.0, 0.01).unwrap();
        let session = Session::new(Config::new(segment, segment, solver).unwrap()).unwrap();
        Viewer::new(session, std::env::temp_dir().join("swing-gui-unused.csv"))
    }

    #[test]
    fn each_frame_without_a_click_advances_one_tick() {
        let mut viewer = viewer();
        for _ in 0..5 {
            viewer.step(false);
        }

        assert_eq!(viewer.session.playback().tick(), 5);
        assert_eq!(viewer.current.map(|s| s.tick), Some(4));
    }

    #[test]
    fn a_click_restarts_playback() {
        let mut viewer = viewer();
        for _ in 0..5 {
            viewer.step(false);
        }

        viewer.step(true);
        assert_eq!(viewer.session.playback().tick(), 0);
        assert!(viewer.session.recorded().is_empty());
        assert!(viewer.current.is_none());

        viewer.step(false);
        assert_eq!(viewer.current.map(|s| s.tick), Some(0));
    }

    #[test]
    fn screen_y_grows_downward_like_the_model() {
        let center = egui::pos2(100.0, 50.0);

        assert_eq!(to_screen(center, 10.0, Point::new(0.0, 0.0)), center);
        assert_eq!(to_screen(center, 10.0, Point::new(1.0, 2.0)), egui::pos2(110.0, 70.0));
        assert_eq!(to_screen(center, 10.0, Point::new(-1.0, 0.0)), egui::pos2(90.0, 50.0));
    }
}
