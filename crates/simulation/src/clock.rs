//! Weighted tick counters shared by every simulation.

use std::f64::consts::TAU;

use kepler_core::time::{HOURS_PER_DAY, TICKS_PER_SECOND, ticks_to_whole_hours};

/// Ticks, weighted by the speed multiplier, needed for the Earth to turn once.
pub const TICKS_PER_EARTH_ROTATION: f64 = TICKS_PER_SECOND * HOURS_PER_DAY;

/// Leg and total elapsed time, both counted in speed-weighted ticks.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SimulationClock {
    leg_ticks: f64,
    total_ticks: f64,
}

impl SimulationClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ticks since the active leg started; reset on every leg change.
    pub fn leg_ticks(&self) -> f64 {
        self.leg_ticks
    }

    /// Ticks since the simulation started; never reset.
    pub fn total_ticks(&self) -> f64 {
        self.total_ticks
    }

    pub fn advance(&mut self, ticks: f64) {
        self.leg_ticks += ticks;
        self.total_ticks += ticks;
    }

    pub fn reset_leg(&mut self) {
        self.leg_ticks = 0.0;
    }

    /// Whole simulated hours shown by the time readout.
    pub fn elapsed_hours(&self) -> u64 {
        ticks_to_whole_hours(self.total_ticks)
    }

    /// Earth's rotation angle (radians), one turn per simulated day.
    pub fn earth_rotation(&self) -> f64 {
        self.total_ticks * TAU / TICKS_PER_EARTH_ROTATION
    }
}
