//! A satellite circling one fixed orbit forever.

use kepler_orbits::anomaly::{mean_anomaly, true_anomaly};
use kepler_orbits::kinematics::{VectorScale, evaluate};
use kepler_orbits::Orbit;

use crate::clock::SimulationClock;
use crate::simulation::{Simulation, Snapshot};

/// Single-orbit simulation; the mean anomaly starts at periapsis.
#[derive(Debug, Clone)]
pub struct OrbitSimulation {
    orbits: [Orbit; 1],
    scale: VectorScale,
    clock: SimulationClock,
}

impl OrbitSimulation {
    pub fn new(orbit: Orbit) -> Self {
        OrbitSimulation {
            orbits: [orbit],
            scale: VectorScale::for_orbit(&orbit),
            clock: SimulationClock::new(),
        }
    }

    pub fn orbit(&self) -> &Orbit {
        &self.orbits[0]
    }

    /// Mean anomaly reached after the ticks elapsed so far.
    pub fn mean_anomaly(&self) -> f64 {
        mean_anomaly(self.clock.leg_ticks(), self.orbit().orbital_period_s(), 0.0)
    }
}

impl Simulation for OrbitSimulation {
    fn snapshot(&self) -> Snapshot {
        let orbit = *self.orbit();
        let mean = self.mean_anomaly();
        let theta = true_anomaly(&orbit, mean);
        Snapshot {
            orbit_index: 0,
            orbit,
            mean_anomaly: mean,
            state: evaluate(&orbit, theta, &self.scale),
        }
    }

    fn advance(&mut self, ticks: f64) {
        self.clock.advance(ticks);
    }

    fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    fn orbits(&self) -> &[Orbit] {
        &self.orbits
    }

    fn current_index(&self) -> usize {
        0
    }

    fn vector_scale(&self) -> VectorScale {
        self.scale
    }
}
