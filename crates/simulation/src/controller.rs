//! Single owner of the active session; every control input arrives as a `Command`.

use thiserror::Error;
use tracing::{debug, info};

use crate::session::{
    DEFAULT_SPEED_H_S, DisplayToggles, Frame, Session, SessionError, validate_speed,
};
use crate::simulation::{ActiveSimulation, Simulation};

/// Control inputs accepted by the controller.
#[derive(Debug, Clone)]
pub enum Command {
    Start,
    Pause,
    TogglePlayback,
    SetSpeed(f64),
    SetDisplay(DisplayToggles),
    /// Drop the current session and start a new one around this simulation.
    Replace(ActiveSimulation),
    Stop,
}

/// Errors surfaced while handling a command.
#[derive(Debug, Error, PartialEq)]
pub enum ControllerError {
    #[error("no simulation loaded")]
    NoSession,
    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Holds at most one session. Speed and overlays outlive replacements.
#[derive(Debug)]
pub struct Controller {
    session: Option<Session<ActiveSimulation>>,
    speed_h_s: f64,
    display: DisplayToggles,
    stopped: bool,
}

impl Default for Controller {
    fn default() -> Self {
        Controller {
            session: None,
            speed_h_s: DEFAULT_SPEED_H_S,
            display: DisplayToggles::default(),
            stopped: false,
        }
    }
}

impl Controller {
    pub fn new(speed_h_s: f64, display: DisplayToggles) -> Result<Self, ControllerError> {
        Ok(Controller {
            session: None,
            speed_h_s: validate_speed(speed_h_s)?,
            display,
            stopped: false,
        })
    }

    pub fn session(&self) -> Option<&Session<ActiveSimulation>> {
        self.session.as_ref()
    }

    pub fn speed_h_s(&self) -> f64 {
        self.speed_h_s
    }

    pub fn display(&self) -> DisplayToggles {
        self.display
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Apply one command, returning the frame it produced, if any.
    pub fn handle(&mut self, command: Command) -> Result<Option<Frame>, ControllerError> {
        debug!(?command, "controller command");
        match command {
            Command::Start => Ok(self.session_mut()?.start()),
            Command::Pause => {
                self.session_mut()?.pause();
                Ok(None)
            }
            Command::TogglePlayback => Ok(self.session_mut()?.toggle()),
            Command::SetSpeed(speed_h_s) => {
                let speed_h_s = validate_speed(speed_h_s)?;
                self.speed_h_s = speed_h_s;
                match self.session.as_mut() {
                    Some(session) => Ok(session.set_speed(speed_h_s)?),
                    None => Ok(None),
                }
            }
            Command::SetDisplay(display) => {
                self.display = display;
                Ok(self.session.as_mut().and_then(|s| s.set_display(display)))
            }
            Command::Replace(simulation) => self.replace(simulation),
            Command::Stop => {
                if let Some(session) = self.session.as_mut() {
                    session.pause();
                }
                self.stopped = true;
                Ok(None)
            }
        }
    }

    /// Timer callback: advance the running session, if any.
    pub fn tick(&mut self) -> Option<Frame> {
        self.session.as_mut().and_then(Session::tick)
    }

    fn replace(&mut self, simulation: ActiveSimulation) -> Result<Option<Frame>, ControllerError> {
        if let Some(previous) = self.session.take() {
            debug!(
                kind = previous.simulation().kind(),
                total_ticks = previous.simulation().clock().total_ticks(),
                "dropping previous session"
            );
        }
        info!(
            kind = simulation.kind(),
            orbits = simulation.orbits().len(),
            "starting new simulation"
        );
        let session = Session::new(simulation, self.speed_h_s, self.display)?;
        Ok(self.session.insert(session).start())
    }

    fn session_mut(&mut self) -> Result<&mut Session<ActiveSimulation>, ControllerError> {
        self.session.as_mut().ok_or(ControllerError::NoSession)
    }
}
