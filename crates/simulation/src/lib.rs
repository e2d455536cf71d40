//! Simulation crate: single-orbit and maneuver playback, session control, and tick driving.

pub mod clock;
pub mod controller;
pub mod driver;
pub mod maneuver;
pub mod session;
pub mod simulation;
pub mod single;

pub use facade::*;
pub use kepler_orbits as orbits;

mod facade;
