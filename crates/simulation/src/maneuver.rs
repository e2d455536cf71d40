//! A satellite moving through a sequence of orbits joined by impulsive burns.

use std::f64::consts::{FRAC_PI_2, TAU};

use kepler_orbits::anomaly::{mean_anomaly, true_anomaly};
use kepler_orbits::kinematics::{VectorScale, evaluate};
use kepler_orbits::{BurnVector, Orbit, OrbitRole, burn_vectors};
use thiserror::Error;
use tracing::info;

use crate::clock::SimulationClock;
use crate::simulation::{Simulation, Snapshot};

/// Fewest orbits a maneuver can hold (start and end).
pub const MIN_ORBITS: usize = 2;
/// Most orbits a maneuver can hold (start, two transfers, end).
pub const MAX_ORBITS: usize = 4;

/// Mean anomaly the start leg must pass before its burn may fire.
pub const FIRST_BURN_MIN_MEAN_ANOMALY: f64 = FRAC_PI_2;

/// Errors surfaced when a maneuver sequence is malformed.
#[derive(Debug, Error, PartialEq)]
pub enum ManeuverError {
    #[error("a maneuver needs {min} to {max} orbits, got {0}", min = MIN_ORBITS, max = MAX_ORBITS)]
    OrbitCount(usize),
    #[error("orbit {index} should be a {expected} orbit, found {found}")]
    RoleOrder {
        index: usize,
        expected: &'static str,
        found: &'static str,
    },
    #[error("expected {expected} burns for the orbit sequence, got {found}")]
    BurnCount { expected: usize, found: usize },
    #[error("burn {index} is not a finite value")]
    NonFiniteBurn { index: usize },
    #[error("orbit {index} has invalid angular bounds")]
    InvalidBounds { index: usize },
}

/// Mean-anomaly bounds of one leg, taken as configured.
#[derive(Debug, Clone, Copy, PartialEq)]
struct LegBounds {
    phase_offset: f64,
    end_bound: Option<f64>,
}

impl LegBounds {
    fn for_orbit(orbit: &Orbit) -> Self {
        match orbit.role() {
            OrbitRole::Start { end_arg } => LegBounds {
                phase_offset: 0.0,
                // a burn at angle 0 means one full revolution on the start orbit
                end_bound: Some(if end_arg <= 0.0 { TAU } else { end_arg }),
            },
            OrbitRole::Transfer { start_arg, end_arg } => LegBounds {
                phase_offset: start_arg,
                end_bound: Some(end_arg),
            },
            OrbitRole::End { start_arg } => LegBounds {
                phase_offset: start_arg,
                end_bound: None,
            },
            OrbitRole::Constant => LegBounds {
                phase_offset: 0.0,
                end_bound: None,
            },
        }
    }
}

/// Maneuver simulation over `start, transfer*, end` orbits and the burns between them.
#[derive(Debug, Clone)]
pub struct ManeuverSimulation {
    orbits: Vec<Orbit>,
    burns_m_s: Vec<f64>,
    legs: Vec<LegBounds>,
    burn_vectors: Vec<BurnVector>,
    scale: VectorScale,
    clock: SimulationClock,
    current: usize,
}

impl ManeuverSimulation {
    /// Validate the sequence and precompute bounds, vector scale, and burn overlays.
    pub fn new(orbits: Vec<Orbit>, burns_m_s: Vec<f64>) -> Result<Self, ManeuverError> {
        validate(&orbits, &burns_m_s)?;

        let legs = orbits.iter().map(LegBounds::for_orbit).collect();
        let scale = VectorScale::for_orbits(&orbits);
        let burn_vectors = burn_vectors(&orbits, &burns_m_s);

        Ok(ManeuverSimulation {
            orbits,
            burns_m_s,
            legs,
            burn_vectors,
            scale,
            clock: SimulationClock::new(),
            current: 0,
        })
    }

    pub fn burns_m_s(&self) -> &[f64] {
        &self.burns_m_s
    }

    pub fn current_orbit(&self) -> &Orbit {
        &self.orbits[self.current]
    }

    pub fn is_last_leg(&self) -> bool {
        self.current + 1 == self.orbits.len()
    }

    /// Mean anomaly on the active leg, starting from the leg's own entry angle.
    pub fn mean_anomaly(&self) -> f64 {
        mean_anomaly(
            self.clock.leg_ticks(),
            self.current_orbit().orbital_period_s(),
            self.legs[self.current].phase_offset,
        )
    }

    /// Mean-anomaly bound past which the active leg hands over to the next one.
    pub fn end_bound(&self) -> Option<f64> {
        self.legs[self.current].end_bound
    }

    /// Time spent coasting on transfer orbits between the first and last burn (s).
    pub fn transfer_duration_s(&self) -> f64 {
        self.orbits
            .iter()
            .zip(&self.legs)
            .filter(|(orbit, _)| matches!(orbit.role(), OrbitRole::Transfer { .. }))
            .filter_map(|(orbit, leg)| {
                let swept = leg.end_bound? - leg.phase_offset;
                Some(swept / TAU * orbit.orbital_period_s())
            })
            .sum()
    }

    fn check_transition(&mut self) {
        if self.is_last_leg() {
            return;
        }
        let Some(bound) = self.end_bound() else {
            return;
        };
        let mean = self.mean_anomaly();
        // no burn before the start leg has swept a quarter turn
        let armed = self.current > 0 || mean > FIRST_BURN_MIN_MEAN_ANOMALY;
        if armed && mean > bound {
            let from = self.current;
            self.current += 1;
            self.clock.reset_leg();
            info!(
                from,
                to = self.current,
                orbit = self.current_orbit().role().label(),
                burn_m_s = self.burns_m_s[from],
                "burn executed, switching leg"
            );
        }
    }
}

impl Simulation for ManeuverSimulation {
    fn snapshot(&self) -> Snapshot {
        let orbit = *self.current_orbit();
        let mean = self.mean_anomaly();
        let theta = true_anomaly(&orbit, mean);
        Snapshot {
            orbit_index: self.current,
            orbit,
            mean_anomaly: mean,
            state: evaluate(&orbit, theta, &self.scale),
        }
    }

    fn advance(&mut self, ticks: f64) {
        self.clock.advance(ticks);
        self.check_transition();
    }

    fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    fn orbits(&self) -> &[Orbit] {
        &self.orbits
    }

    fn current_index(&self) -> usize {
        self.current
    }

    fn vector_scale(&self) -> VectorScale {
        self.scale
    }

    fn burn_vectors(&self) -> &[BurnVector] {
        &self.burn_vectors
    }
}

fn validate(orbits: &[Orbit], burns_m_s: &[f64]) -> Result<(), ManeuverError> {
    let count = orbits.len();
    if !(MIN_ORBITS..=MAX_ORBITS).contains(&count) {
        return Err(ManeuverError::OrbitCount(count));
    }

    for (index, orbit) in orbits.iter().enumerate() {
        let expected = if index == 0 {
            "start"
        } else if index + 1 == count {
            "end"
        } else {
            "transfer"
        };
        let found = orbit.role().label();
        if found != expected {
            return Err(ManeuverError::RoleOrder {
                index,
                expected,
                found,
            });
        }

        let bounds = [orbit.start_arg(), orbit.end_arg()];
        if bounds.iter().flatten().any(|arg| !arg.is_finite()) {
            return Err(ManeuverError::InvalidBounds { index });
        }
        if let (Some(start), Some(end)) = (orbit.start_arg(), orbit.end_arg()) {
            if end <= start {
                return Err(ManeuverError::InvalidBounds { index });
            }
        }
    }

    if burns_m_s.len() != count - 1 {
        return Err(ManeuverError::BurnCount {
            expected: count - 1,
            found: burns_m_s.len(),
        });
    }
    if let Some(index) = burns_m_s.iter().position(|b| !b.is_finite()) {
        return Err(ManeuverError::NonFiniteBurn { index });
    }

    Ok(())
}
