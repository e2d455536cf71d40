//! Export helpers for CSV frame traces and JSON summaries.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Create a writer for the target path, handling stdout (`-`) by convention.
pub fn writer_for_path(path: &Path) -> io::Result<Box<dyn Write>> {
    if path == Path::new("-") {
        return Ok(Box::new(BufWriter::new(io::stdout())));
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    Ok(Box::new(BufWriter::new(file)))
}

pub mod frames {
    use std::io::{self, Write};

    use kepler_sim::{Frame, FrameSink};
    use kepler_viewport::Viewport;
    use serde::Serialize;

    /// CSV row emitted for every frame. Hidden overlays leave their columns empty.
    #[derive(Debug, Clone, Serialize)]
    pub struct Record {
        pub frame: u64,
        pub orbit_index: usize,
        pub role: &'static str,
        pub leg_ticks: f64,
        pub total_ticks: f64,
        pub elapsed_hours: u64,
        pub mean_anomaly_rad: f64,
        pub true_anomaly_rad: f64,
        pub x_km: f64,
        pub y_km: f64,
        pub velocity_ratio_x: Option<f64>,
        pub velocity_ratio_y: Option<f64>,
        pub acceleration_ratio_x: Option<f64>,
        pub acceleration_ratio_y: Option<f64>,
        pub earth_rotation_rad: f64,
        pub canvas_x_px: Option<f64>,
        pub canvas_y_px: Option<f64>,
    }

    impl Record {
        pub fn from_frame(index: u64, frame: &Frame, viewport: Option<&Viewport>) -> Self {
            let canvas = viewport.map(|v| v.to_canvas(frame.position_km, frame.argument_of_periapsis));
            Record {
                frame: index,
                orbit_index: frame.orbit_index,
                role: frame.role.label(),
                leg_ticks: frame.leg_ticks,
                total_ticks: frame.total_ticks,
                elapsed_hours: frame.elapsed_hours,
                mean_anomaly_rad: frame.mean_anomaly,
                true_anomaly_rad: frame.true_anomaly,
                x_km: frame.position_km[0],
                y_km: frame.position_km[1],
                velocity_ratio_x: frame.velocity_ratio.map(|v| v[0]),
                velocity_ratio_y: frame.velocity_ratio.map(|v| v[1]),
                acceleration_ratio_x: frame.acceleration_ratio.map(|a| a[0]),
                acceleration_ratio_y: frame.acceleration_ratio.map(|a| a[1]),
                earth_rotation_rad: frame.earth_rotation,
                canvas_x_px: canvas.map(|p| p[0]),
                canvas_y_px: canvas.map(|p| p[1]),
            }
        }
    }

    /// Frame sink writing one CSV row per frame, header first.
    pub struct CsvFrameSink<W: Write> {
        writer: csv::Writer<W>,
        viewport: Option<Viewport>,
        rows: u64,
    }

    impl<W: Write> CsvFrameSink<W> {
        pub fn new(writer: W) -> Self {
            CsvFrameSink {
                writer: csv::Writer::from_writer(writer),
                viewport: None,
                rows: 0,
            }
        }

        /// Also emit canvas pixel coordinates through `viewport`.
        pub fn with_viewport(mut self, viewport: Viewport) -> Self {
            self.viewport = Some(viewport);
            self
        }

        pub fn rows(&self) -> u64 {
            self.rows
        }

        pub fn flush(&mut self) -> io::Result<()> {
            self.writer.flush()
        }
    }

    impl<W: Write> FrameSink for CsvFrameSink<W> {
        fn render(&mut self, frame: &Frame) -> io::Result<()> {
            let record = Record::from_frame(self.rows, frame, self.viewport.as_ref());
            self.writer.serialize(&record)?;
            self.rows += 1;
            Ok(())
        }
    }
}

pub mod summary {
    use std::io::{self, Write};
    use std::path::Path;

    use kepler_core::time::{format_hms, seconds_to_delta};
    use kepler_core::vector::Vector2;
    use kepler_orbits::{BurnVector, OrbitSummary, VectorScale};
    use kepler_sim::{ActiveSimulation, Simulation};
    use kepler_viewport::{Framing, Viewport};
    use serde::Serialize;
    use serde_json::to_writer_pretty;

    use crate::writer_for_path;

    /// JSON document describing a loaded simulation, independent of playback.
    #[derive(Debug, Clone, Serialize)]
    pub struct SimulationSummary {
        pub name: String,
        pub kind: &'static str,
        pub orbits: Vec<OrbitSummary>,
        pub burns_m_s: Vec<f64>,
        pub total_delta_v_m_s: f64,
        pub burn_vectors: Vec<BurnVector>,
        /// Start and tip of each burn arrow in canvas pixels.
        pub burn_arrows_px: Vec<[Vector2; 2]>,
        pub transfer_duration_s: Option<f64>,
        pub transfer_duration: Option<String>,
        pub vector_scale: VectorScale,
        pub framing: Framing,
        pub km_per_pixel: f64,
        pub scale_label: String,
    }

    impl SimulationSummary {
        pub fn new(name: &str, simulation: &ActiveSimulation, viewport: &Viewport) -> Self {
            let (burns_m_s, transfer_duration_s) = match simulation {
                ActiveSimulation::Orbit(_) => (Vec::new(), None),
                ActiveSimulation::Maneuver(sim) => {
                    (sim.burns_m_s().to_vec(), Some(sim.transfer_duration_s()))
                }
            };

            let orbits = simulation.orbits();
            let burn_arrows_px = simulation
                .burn_vectors()
                .iter()
                .map(|burn| {
                    let arg = orbits[burn.orbit_index].argument_of_periapsis();
                    viewport.burn_arrow(burn, arg)
                })
                .collect();

            SimulationSummary {
                name: name.to_string(),
                kind: simulation.kind(),
                orbits: orbits.iter().map(|o| o.summary()).collect(),
                total_delta_v_m_s: burns_m_s.iter().map(|b| b.abs()).sum(),
                burns_m_s,
                burn_vectors: simulation.burn_vectors().to_vec(),
                burn_arrows_px,
                transfer_duration: transfer_duration_s.map(|s| format_hms(seconds_to_delta(s))),
                transfer_duration_s,
                vector_scale: simulation.vector_scale(),
                framing: *viewport.framing(),
                km_per_pixel: viewport.km_per_pixel(),
                scale_label: viewport.scale_label(),
            }
        }
    }

    /// Write the summary as pretty JSON (`-` for stdout).
    pub fn write_summary(path: &Path, summary: &SimulationSummary) -> io::Result<()> {
        let mut writer = writer_for_path(path)?;
        to_writer_pretty(&mut writer, summary)?;
        writeln!(writer)?;
        writer.flush()
    }
}
