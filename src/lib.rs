//! Orbital kinematics visualizer engine.
//!
//! The workspace crates hold the orbit model, simulations, framing, configuration, and export.
//! This crate ties them together: scenario files become ready-to-run simulations that the
//! command-line front-ends drive and export.

pub mod playback;
pub mod scenario;

pub use kepler_config as config;
pub use kepler_export as export;
pub use kepler_orbits as orbits;
pub use kepler_sim as sim;
pub use kepler_viewport as viewport;

/// Install the stderr `tracing` subscriber used by the binaries (`RUST_LOG`, default `info`).
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
