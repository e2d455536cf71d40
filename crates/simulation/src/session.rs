//! Playback state machine wrapped around one simulation.

use kepler_core::time::HOURS_PER_DAY;
use kepler_core::vector::Vector2;
use kepler_orbits::OrbitRole;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::simulation::Simulation;

/// Default playback speed (simulated hours per real second).
pub const DEFAULT_SPEED_H_S: f64 = 1.0;

/// Errors raised by playback controls.
#[derive(Debug, Error, PartialEq)]
pub enum SessionError {
    #[error("speed multiplier must be in (0, {max}] h/s, got {0}", max = HOURS_PER_DAY)]
    InvalidSpeed(f64),
}

/// Check a speed multiplier against the playback range.
pub fn validate_speed(speed_h_s: f64) -> Result<f64, SessionError> {
    if speed_h_s.is_finite() && speed_h_s > 0.0 && speed_h_s <= HOURS_PER_DAY {
        Ok(speed_h_s)
    } else {
        Err(SessionError::InvalidSpeed(speed_h_s))
    }
}

/// Playback state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    Idle,
    Running,
    Paused,
}

/// Overlay switches applied to emitted frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayToggles {
    pub orbital_path: bool,
    pub velocity: bool,
    pub acceleration: bool,
}

impl Default for DisplayToggles {
    fn default() -> Self {
        DisplayToggles {
            orbital_path: true,
            velocity: true,
            acceleration: true,
        }
    }
}

/// One evaluated tick, ready for a renderer or an exporter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub orbit_index: usize,
    pub role: OrbitRole,
    pub argument_of_periapsis: f64,
    pub leg_ticks: f64,
    pub total_ticks: f64,
    pub mean_anomaly: f64,
    pub true_anomaly: f64,
    /// Orbit-local position (km, y down).
    pub position_km: Vector2,
    pub velocity_ratio: Option<Vector2>,
    pub acceleration_ratio: Option<Vector2>,
    pub show_orbital_path: bool,
    pub earth_rotation: f64,
    pub elapsed_hours: u64,
    pub speed_h_s: f64,
}

/// A simulation together with its playback state, speed, and overlay switches.
#[derive(Debug, Clone)]
pub struct Session<S: Simulation> {
    simulation: S,
    state: RunState,
    speed_h_s: f64,
    display: DisplayToggles,
}

impl<S: Simulation> Session<S> {
    pub fn new(simulation: S, speed_h_s: f64, display: DisplayToggles) -> Result<Self, SessionError> {
        Ok(Session {
            simulation,
            state: RunState::Idle,
            speed_h_s: validate_speed(speed_h_s)?,
            display,
        })
    }

    pub fn simulation(&self) -> &S {
        &self.simulation
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn speed_h_s(&self) -> f64 {
        self.speed_h_s
    }

    pub fn display(&self) -> DisplayToggles {
        self.display
    }

    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    /// Begin or resume playback.
    ///
    /// Leaving `Idle` runs one tick at once so a frame is available before the first timer
    /// interval elapses. Resuming from `Paused` only flips the state.
    pub fn start(&mut self) -> Option<Frame> {
        match self.state {
            RunState::Idle => {
                debug!("session started");
                self.state = RunState::Running;
                self.tick()
            }
            RunState::Paused => {
                debug!("session resumed");
                self.state = RunState::Running;
                None
            }
            RunState::Running => None,
        }
    }

    pub fn pause(&mut self) {
        if self.state == RunState::Running {
            debug!(total_ticks = self.simulation.clock().total_ticks(), "session paused");
            self.state = RunState::Paused;
        }
    }

    /// Play/pause button behaviour.
    pub fn toggle(&mut self) -> Option<Frame> {
        if self.is_running() {
            self.pause();
            None
        } else {
            self.start()
        }
    }

    /// Evaluate, then advance by the current speed. Does nothing unless running.
    pub fn tick(&mut self) -> Option<Frame> {
        if !self.is_running() {
            return None;
        }
        let frame = self.frame();
        self.simulation.advance(self.speed_h_s);
        Some(frame)
    }

    /// Change the speed; a paused session redraws once without advancing.
    pub fn set_speed(&mut self, speed_h_s: f64) -> Result<Option<Frame>, SessionError> {
        self.speed_h_s = validate_speed(speed_h_s)?;
        Ok(self.redraw_if_paused())
    }

    /// Change overlays; a paused session redraws once without advancing.
    pub fn set_display(&mut self, display: DisplayToggles) -> Option<Frame> {
        self.display = display;
        self.redraw_if_paused()
    }

    fn redraw_if_paused(&self) -> Option<Frame> {
        (self.state == RunState::Paused).then(|| self.frame())
    }

    /// Current state as a frame, without touching the clock.
    pub fn frame(&self) -> Frame {
        let snapshot = self.simulation.snapshot();
        let clock = self.simulation.clock();
        let state = snapshot.state;

        Frame {
            orbit_index: snapshot.orbit_index,
            role: snapshot.orbit.role(),
            argument_of_periapsis: snapshot.orbit.argument_of_periapsis(),
            leg_ticks: clock.leg_ticks(),
            total_ticks: clock.total_ticks(),
            mean_anomaly: snapshot.mean_anomaly,
            true_anomaly: state.true_anomaly,
            position_km: state.position_km,
            velocity_ratio: self.display.velocity.then_some(state.velocity_ratio),
            acceleration_ratio: self.display.acceleration.then_some(state.acceleration_ratio),
            show_orbital_path: self.display.orbital_path,
            earth_rotation: clock.earth_rotation(),
            elapsed_hours: clock.elapsed_hours(),
            speed_h_s: self.speed_h_s,
        }
    }
}
