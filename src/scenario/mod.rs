use std::path::Path;

use kepler_config::{
    ConfigError, DisplayConfig, ElementsError, LegRole, OrbitElements, ScenarioConfig,
    SimulationConfig, ValidatedLeg, load_scenarios, select_scenario,
};
use kepler_orbits::{Orbit, OrbitRole};
use kepler_sim::{
    ActiveSimulation, Controller, ControllerError, DisplayToggles, ManeuverError,
    ManeuverSimulation, OrbitSimulation, Simulation,
};
use kepler_viewport::{Framing, Viewport};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("invalid orbital input: {0}")]
    Elements(#[from] ElementsError),
    #[error("invalid maneuver: {0}")]
    Maneuver(#[from] ManeuverError),
    #[error(transparent)]
    Controller(#[from] ControllerError),
}

/// A validated scenario with its simulation built and framed.
#[derive(Debug, Clone)]
pub struct LoadedScenario {
    pub name: String,
    pub simulation: ActiveSimulation,
    pub viewport: Viewport,
    pub speed_h_s: f64,
    pub display: DisplayToggles,
}

impl LoadedScenario {
    /// Controller preset with this scenario's speed and overlays; the simulation is not loaded yet.
    pub fn controller(&self) -> Result<Controller, ScenarioError> {
        Ok(Controller::new(self.speed_h_s, self.display)?)
    }
}

/// Orbit built from user-entered elements.
pub fn orbit_from_elements(elements: &OrbitElements) -> Orbit {
    Orbit::new(
        elements.semi_major_axis_km,
        elements.eccentricity,
        elements.argument_of_periapsis_rad,
    )
}

/// Orbit built from a validated maneuver leg, carrying its bounds in the role.
pub fn orbit_from_leg(leg: &ValidatedLeg) -> Orbit {
    let role = match leg.role {
        LegRole::Start => OrbitRole::Start {
            end_arg: leg.end_arg_rad.unwrap_or_default(),
        },
        LegRole::Transfer => OrbitRole::Transfer {
            start_arg: leg.start_arg_rad.unwrap_or_default(),
            end_arg: leg.end_arg_rad.unwrap_or_default(),
        },
        LegRole::End => OrbitRole::End {
            start_arg: leg.start_arg_rad.unwrap_or_default(),
        },
    };
    let e = &leg.elements;
    Orbit::with_role(
        e.semi_major_axis_km,
        e.eccentricity,
        e.argument_of_periapsis_rad,
        role,
    )
}

fn display_toggles(display: &DisplayConfig) -> DisplayToggles {
    DisplayToggles {
        orbital_path: display.orbital_path,
        velocity: display.velocity,
        acceleration: display.acceleration,
    }
}

impl TryFrom<ScenarioConfig> for LoadedScenario {
    type Error = ScenarioError;

    fn try_from(config: ScenarioConfig) -> Result<Self, Self::Error> {
        config.display.validate()?;

        let simulation: ActiveSimulation = match &config.simulation {
            SimulationConfig::Orbit { orbit } => {
                let elements = orbit.validate()?;
                OrbitSimulation::new(orbit_from_elements(&elements)).into()
            }
            SimulationConfig::Maneuver { orbits, burns_m_s } => {
                let orbits = orbits
                    .iter()
                    .enumerate()
                    .map(|(index, leg)| leg.validate(index).map(|leg| orbit_from_leg(&leg)))
                    .collect::<Result<Vec<_>, _>>()?;
                ManeuverSimulation::new(orbits, burns_m_s.clone())?.into()
            }
        };

        let framing = Framing::for_orbits(simulation.orbits());
        info!(
            scenario = %config.name,
            kind = simulation.kind(),
            max_length_km = framing.max_length_km,
            "scenario loaded"
        );

        Ok(LoadedScenario {
            name: config.name,
            simulation,
            viewport: Viewport::new(framing),
            speed_h_s: config.display.speed_h_s,
            display: display_toggles(&config.display),
        })
    }
}

/// Load, select, and build a scenario from a YAML/TOML file or a directory of TOML files.
pub fn load_scenario<P: AsRef<Path>>(
    path: P,
    name: Option<&str>,
) -> Result<LoadedScenario, ScenarioError> {
    let scenarios = load_scenarios(path)?;
    let config = select_scenario(scenarios, name)?;
    LoadedScenario::try_from(config)
}
