use clap::Parser;
use kepler_viz::config::{DisplayConfig, ElementsConfig, ScenarioConfig, SimulationConfig};
use kepler_viz::playback::{PlaybackOptions, play};
use kepler_viz::scenario::LoadedScenario;
use kepler_viz::sim::Simulation;
use std::path::PathBuf;

/// Animate a single Earth orbit from its elements and export the frame trace.
#[derive(Parser, Debug)]
#[command(author, version, about = "Single-orbit kinematics playback")]
struct Cli {
    /// Semi-major axis in km (6531 to 100000)
    #[arg(long, default_value_t = 10_000.0)]
    semi_major_axis: f64,

    /// Eccentricity (0 up to the value keeping periapsis 160 km above the surface)
    #[arg(long, default_value_t = 0.0)]
    eccentricity: f64,

    /// Argument of periapsis in degrees, counterclockwise (wrapped into [0, 360))
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    argument: f64,

    /// Playback speed in simulated hours per real second (0 < speed <= 24)
    #[arg(long, default_value_t = 1.0)]
    speed: f64,

    /// Number of timer ticks to play
    #[arg(long, default_value_t = 1_000, value_parser = clap::value_parser!(u64).range(1..))]
    ticks: u64,

    /// Pace ticks at the 10 ms animation interval
    #[arg(long, default_value_t = false)]
    realtime: bool,

    /// Hide the velocity vector
    #[arg(long, default_value_t = false)]
    no_velocity: bool,

    /// Hide the acceleration vector
    #[arg(long, default_value_t = false)]
    no_acceleration: bool,

    /// Add canvas pixel coordinates to the trace
    #[arg(long, default_value_t = false)]
    canvas: bool,

    /// Output CSV file (use '-' for stdout)
    #[arg(long, default_value = "artifacts/orbit_frames.csv")]
    output: PathBuf,

    /// Optional JSON summary file (use '-' for stdout)
    #[arg(long)]
    summary: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    kepler_viz::init_tracing();
    let cli = Cli::parse();

    let config = ScenarioConfig {
        name: "orbit".to_string(),
        display: DisplayConfig {
            speed_h_s: cli.speed,
            orbital_path: true,
            velocity: !cli.no_velocity,
            acceleration: !cli.no_acceleration,
        },
        simulation: SimulationConfig::Orbit {
            orbit: ElementsConfig {
                semi_major_axis_km: cli.semi_major_axis,
                eccentricity: cli.eccentricity,
                argument_of_periapsis_deg: cli.argument,
            },
        },
    };
    let scenario = LoadedScenario::try_from(config)?;

    let to_stdout = cli.output.as_os_str() == "-";
    if !to_stdout {
        for orbit in scenario.simulation.orbits() {
            println!("{}", orbit.summary());
        }
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
