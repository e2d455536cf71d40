//! Common interface over single-orbit and maneuver simulations.

use kepler_orbits::kinematics::{KinematicState, VectorScale};
use kepler_orbits::{BurnVector, Orbit};

use crate::clock::SimulationClock;
use crate::maneuver::ManeuverSimulation;
use crate::single::OrbitSimulation;

/// Evaluated state of a simulation at its current clock value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot {
    pub orbit_index: usize,
    pub orbit: Orbit,
    pub mean_anomaly: f64,
    pub state: KinematicState,
}

/// Something that turns elapsed ticks into a satellite state.
///
/// `snapshot` must be pure with respect to the clock: calling it twice without `advance` in
/// between yields identical values.
pub trait Simulation {
    fn snapshot(&self) -> Snapshot;
    fn advance(&mut self, ticks: f64);
    fn clock(&self) -> &SimulationClock;
    fn orbits(&self) -> &[Orbit];
    fn current_index(&self) -> usize;
    fn vector_scale(&self) -> VectorScale;

    fn burn_vectors(&self) -> &[BurnVector] {
        &[]
    }
}

/// Either kind of simulation, as held by the controller.
#[derive(Debug, Clone)]
pub enum ActiveSimulation {
    Orbit(OrbitSimulation),
    Maneuver(ManeuverSimulation),
}

impl ActiveSimulation {
    pub fn kind(&self) -> &'static str {
        match self {
            ActiveSimulation::Orbit(_) => "orbit",
            ActiveSimulation::Maneuver(_) => "maneuver",
        }
    }

    fn inner(&self) -> &dyn Simulation {
        match self {
            ActiveSimulation::Orbit(sim) => sim,
            ActiveSimulation::Maneuver(sim) => sim,
        }
    }
}

impl From<OrbitSimulation> for ActiveSimulation {
    fn from(sim: OrbitSimulation) -> Self {
        ActiveSimulation::Orbit(sim)
    }
}

impl From<ManeuverSimulation> for ActiveSimulation {
    fn from(sim: ManeuverSimulation) -> Self {
        ActiveSimulation::Maneuver(sim)
    }
}

impl Simulation for ActiveSimulation {
    fn snapshot(&self) -> Snapshot {
        self.inner().snapshot()
    }

    fn advance(&mut self, ticks: f64) {
        match self {
            ActiveSimulation::Orbit(sim) => sim.advance(ticks),
            ActiveSimulation::Maneuver(sim) => sim.advance(ticks),
        }
    }

    fn clock(&self) -> &SimulationClock {
        self.inner().clock()
    }

    fn orbits(&self) -> &[Orbit] {
        self.inner().orbits()
    }

    fn current_index(&self) -> usize {
        self.inner().current_index()
    }

    fn vector_scale(&self) -> VectorScale {
        self.inner().vector_scale()
    }

    fn burn_vectors(&self) -> &[BurnVector] {
        self.inner().burn_vectors()
    }
}
