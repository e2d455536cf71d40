//! Headless and real-time playback shared by the command-line front-ends.

use std::io::Write;
use std::path::PathBuf;

use kepler_export::frames::CsvFrameSink;
use kepler_export::summary::{SimulationSummary, write_summary};
use kepler_export::writer_for_path;
use kepler_sim::{Command, Driver, DriverError, Pacing, RunReport};
use thiserror::Error;
use tracing::info;

use crate::scenario::{LoadedScenario, ScenarioError};

#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error(transparent)]
    Scenario(#[from] ScenarioError),
    #[error(transparent)]
    Driver(#[from] DriverError),
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

/// Where and how long to play a scenario.
#[derive(Debug, Clone)]
pub struct PlaybackOptions {
    /// Timer firings to run, the starting frame included.
    pub ticks: u64,
    /// Pace ticks at the 10 ms animation interval instead of running flat out.
    pub realtime: bool,
    /// CSV frame trace destination (`-` for stdout).
    pub output: PathBuf,
    /// Optional JSON summary destination (`-` for stdout).
    pub summary: Option<PathBuf>,
    /// Include canvas pixel coordinates in the trace.
    pub canvas: bool,
}

impl Default for PlaybackOptions {
    fn default() -> Self {
        PlaybackOptions {
            ticks: 1_000,
            realtime: false,
            output: PathBuf::from("artifacts/frames.csv"),
            summary: None,
            canvas: false,
        }
    }
}

/// Load the scenario into a fresh controller and run it, writing the trace and summary.
pub fn play(scenario: LoadedScenario, options: &PlaybackOptions) -> Result<RunReport, PlaybackError> {
    if let Some(path) = &options.summary {
        let summary = SimulationSummary::new(&scenario.name, &scenario.simulation, &scenario.viewport);
        write_summary(path, &summary)?;
        info!(path = %path.display(), "summary written");
    }

    let mut sink = CsvFrameSink::new(writer_for_path(&options.output)?);
    if options.canvas {
        sink = sink.with_viewport(scenario.viewport);
    }

    let pacing = if options.realtime {
        Pacing::default()
    } else {
        Pacing::Unpaced
    };

    let controller = scenario.controller()?;
    let mut driver = Driver::new(controller, sink)
        .with_pacing(pacing)
        .with_max_ticks(options.ticks.saturating_sub(1));

    // Loading starts playback and yields the first frame; the timer covers the rest.
    driver.send(Command::Replace(scenario.simulation))?;
    let mut report = driver.run()?;
    report.ticks += 1;

    let mut sink = driver.into_sink();
    sink.flush()?;
    report.frames = sink.rows();
    info!(
        ticks = report.ticks,
        rows = sink.rows(),
        path = %options.output.display(),
        "frame trace written"
    );
    std::io::stdout().flush()?;
    Ok(report)
}
