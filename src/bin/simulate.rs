use anyhow::Context;
use clap::Parser;
use kepler_viz::playback::{PlaybackOptions, play};
use kepler_viz::scenario::load_scenario;
use kepler_viz::sim::Simulation;
use kepler_viz::viewport::speed_label;
use std::path::PathBuf;

/// Play a scenario file (single orbit or maneuver) and export the frame trace.
#[derive(Parser, Debug)]
#[command(author, version, about = "Scenario playback for orbits and maneuvers")]
struct Cli {
    /// Scenario file (.yaml, .toml) or directory of .toml scenarios
    #[arg(long)]
    scenario: PathBuf,

    /// Scenario name when the file holds several (defaults to the first)
    #[arg(long)]
    name: Option<String>,

    /// Override the scenario's playback speed (h/s)
    #[arg(long)]
    speed: Option<f64>,

    /// Number of timer ticks to play
    #[arg(long, default_value_t = 1_000, value_parser = clap::value_parser!(u64).range(1..))]
    ticks: u64,

    /// Pace ticks at the 10 ms animation interval
    #[arg(long, default_value_t = false)]
    realtime: bool,

    /// Add canvas pixel coordinates to the trace
    #[arg(long, default_value_t = false)]
    canvas: bool,

    /// Output CSV file (use '-' for stdout)
    #[arg(long, default_value = "artifacts/frames.csv")]
    output: PathBuf,

    /// Optional JSON summary file (use '-' for stdout)
    #[arg(long)]
    summary: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    kepler_viz::init_tracing();
    let cli = Cli::parse();

    let mut scenario = load_scenario(&cli.scenario, cli.name.as_deref())
        .with_context(|| format!("loading scenario from {}", cli.scenario.display()))?;
    if let Some(speed) = cli.speed {
        scenario.speed_h_s = speed;
    }

    let to_stdout = cli.output.as_os_str() == "-";
    if !to_stdout {
        println!(
            "Scenario {} ({}, {} orbit(s), {}, scale {})",
            scenario.name,
            scenario.simulation.kind(),
            scenario.simulation.orbits().len(),
            speed_label(scenario.speed_h_s),
            scenario.viewport.scale_label()
        );
    }

    let options = PlaybackOptions {
        ticks: cli.ticks,
        realtime: cli.realtime,
        output: cli.output,
        summary: cli.summary,
        canvas: cli.canvas,
    };
    let report = play(scenario, &options)?;

    if !to_stdout {
        println!(
            "Wrote {} frames over {} ticks to {}",
            report.frames,
            report.ticks,
            options.output.display()
        );
    }
    Ok(())
}
