//! Re-exported APIs for consumers of the simulation crate.

pub use crate::clock::SimulationClock;
pub use crate::controller::{Command, Controller, ControllerError};
pub use crate::driver::{Driver, DriverError, FrameSink, Pacing, RunReport};
pub use crate::maneuver::{FIRST_BURN_MIN_MEAN_ANOMALY, ManeuverError, ManeuverSimulation};
pub use crate::session::{DisplayToggles, Frame, RunState, Session, SessionError};
pub use crate::simulation::{ActiveSimulation, Simulation, Snapshot};
pub use crate::single::OrbitSimulation;
