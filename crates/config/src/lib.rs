//! Scenario models, loaders, and orbital element validation for the Kepler visualizer.

use std::fs::File;
use std::path::{Path, PathBuf};

use kepler_core::constants::{EARTH_RADIUS_KM, MIN_PERIAPSIS_KM};
use kepler_core::time::HOURS_PER_DAY;
use kepler_core::units::{deg_to_rad, normalize_degrees};
use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

/// Smallest semi-major axis accepted for a user-entered orbit (km).
pub const MIN_SEMI_MAJOR_AXIS_KM: f64 = MIN_PERIAPSIS_KM;
/// Largest semi-major axis accepted for a user-entered orbit (km).
pub const MAX_SEMI_MAJOR_AXIS_KM: f64 = 100_000.0;

/// Largest eccentricity keeping the periapsis above the minimum safe altitude.
pub fn max_eccentricity(semi_major_axis_km: f64) -> f64 {
    1.0 - MIN_PERIAPSIS_KM / semi_major_axis_km
}

/// A complete scenario: what to simulate and how to show it.
#[derive(Debug, Deserialize, Clone)]
pub struct ScenarioConfig {
    pub name: String,
    #[serde(default)]
    pub display: DisplayConfig,
    pub simulation: SimulationConfig,
}

/// Playback settings applied when the scenario starts.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct DisplayConfig {
    pub speed_h_s: f64,
    pub orbital_path: bool,
    pub velocity: bool,
    pub acceleration: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            speed_h_s: 1.0,
            orbital_path: true,
            velocity: true,
            acceleration: true,
        }
    }
}

/// Simulation section of a scenario.
#[derive(Debug, Deserialize, Clone)]
#[serde(tag = "type")]
pub enum SimulationConfig {
    #[serde(rename = "orbit")]
    Orbit { orbit: ElementsConfig },
    #[serde(rename = "maneuver")]
    Maneuver {
        orbits: Vec<LegConfig>,
        burns_m_s: Vec<f64>,
    },
}

/// Orbital elements as entered by a user.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ElementsConfig {
    pub semi_major_axis_km: f64,
    pub eccentricity: f64,
    #[serde(default)]
    pub argument_of_periapsis_deg: f64,
}

/// Role of an orbit inside a maneuver sequence.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LegRole {
    Start,
    Transfer,
    End,
}

impl LegRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            LegRole::Start => "start",
            LegRole::Transfer => "transfer",
            LegRole::End => "end",
        }
    }
}

/// One orbit of a precomputed maneuver, with its angular bounds (true anomaly, radians).
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct LegConfig {
    pub role: LegRole,
    pub semi_major_axis_km: f64,
    pub eccentricity: f64,
    #[serde(default)]
    pub argument_of_periapsis_deg: f64,
    #[serde(default)]
    pub start_arg_rad: Option<f64>,
    #[serde(default)]
    pub end_arg_rad: Option<f64>,
}

/// Elements that passed validation, with the orientation converted to radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitElements {
    pub semi_major_axis_km: f64,
    pub eccentricity: f64,
    pub argument_of_periapsis_rad: f64,
}

/// A validated maneuver leg.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidatedLeg {
    pub role: LegRole,
    pub elements: OrbitElements,
    pub start_arg_rad: Option<f64>,
    pub end_arg_rad: Option<f64>,
}

/// Reasons orbital inputs are rejected.
#[derive(Debug, Error, PartialEq)]
pub enum ElementsError {
    #[error("{0} must be a finite number")]
    NonFinite(&'static str),
    #[error(
        "semi-major axis {0} km outside [{min}, {max}] km",
        min = MIN_SEMI_MAJOR_AXIS_KM,
        max = MAX_SEMI_MAJOR_AXIS_KM
    )]
    SemiMajorAxisOutOfRange(f64),
    #[error("semi-major axis must be positive, got {0} km")]
    NonPositiveSemiMajorAxis(f64),
    #[error("eccentricity {eccentricity} outside [0, {max}]")]
    EccentricityOutOfRange { eccentricity: f64, max: f64 },
    #[error("periapsis {0} km lies inside the Earth")]
    PeriapsisBelowSurface(f64),
    #[error("speed multiplier {0} outside (0, {max}] h/s", max = HOURS_PER_DAY)]
    SpeedOutOfRange(f64),
    #[error("{role} orbit {index} is missing its {bound}")]
    MissingBound {
        index: usize,
        role: &'static str,
        bound: &'static str,
    },
    #[error("{role} orbit {index} must not define {bound}")]
    UnexpectedBound {
        index: usize,
        role: &'static str,
        bound: &'static str,
    },
}

/// Errors that can occur while loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid orbital input: {0}")]
    Elements(#[from] ElementsError),
    #[error("no scenarios found in {0}")]
    Empty(PathBuf),
    #[error("scenario '{0}' not found")]
    NotFound(String),
}

impl ElementsConfig {
    /// Check user-entered elements, normalising the argument of periapsis into `[0, 360)`.
    pub fn validate(&self) -> Result<OrbitElements, ElementsError> {
        let a = finite("semi_major_axis_km", self.semi_major_axis_km)?;
        let e = finite("eccentricity", self.eccentricity)?;
        let arg_deg = finite("argument_of_periapsis_deg", self.argument_of_periapsis_deg)?;

        if !(MIN_SEMI_MAJOR_AXIS_KM..=MAX_SEMI_MAJOR_AXIS_KM).contains(&a) {
            return Err(ElementsError::SemiMajorAxisOutOfRange(a));
        }
        let max = max_eccentricity(a);
        if !(0.0..=max).contains(&e) {
            return Err(ElementsError::EccentricityOutOfRange {
                eccentricity: e,
                max,
            });
        }

        Ok(OrbitElements {
            semi_major_axis_km: a,
            eccentricity: e,
            argument_of_periapsis_rad: deg_to_rad(normalized_argument(arg_deg)),
        })
    }
}

impl LegConfig {
    /// Check a planner-provided leg: physical elements plus the bounds its role requires.
    pub fn validate(&self, index: usize) -> Result<ValidatedLeg, ElementsError> {
        let a = finite("semi_major_axis_km", self.semi_major_axis_km)?;
        let e = finite("eccentricity", self.eccentricity)?;
        let arg_deg = finite("argument_of_periapsis_deg", self.argument_of_periapsis_deg)?;

        if a <= 0.0 {
            return Err(ElementsError::NonPositiveSemiMajorAxis(a));
        }
        if !(0.0..1.0).contains(&e) {
            return Err(ElementsError::EccentricityOutOfRange {
                eccentricity: e,
                max: 1.0,
            });
        }
        let periapsis_km = a * (1.0 - e);
        if periapsis_km <= EARTH_RADIUS_KM {
            return Err(ElementsError::PeriapsisBelowSurface(periapsis_km));
        }

        let role = self.role.as_str();
        let (needs_start, needs_end) = match self.role {
            LegRole::Start => (false, true),
            LegRole::Transfer => (true, true),
            LegRole::End => (true, false),
        };
        let start_arg_rad = check_bound(index, role, "start_arg_rad", self.start_arg_rad, needs_start)?;
        let end_arg_rad = check_bound(index, role, "end_arg_rad", self.end_arg_rad, needs_end)?;

        Ok(ValidatedLeg {
            role: self.role,
            elements: OrbitElements {
                semi_major_axis_km: a,
                eccentricity: e,
                argument_of_periapsis_rad: deg_to_rad(normalized_argument(arg_deg)),
            },
            start_arg_rad,
            end_arg_rad,
        })
    }
}

impl DisplayConfig {
    /// Reject speeds outside the playback range.
    pub fn validate(&self) -> Result<&Self, ElementsError> {
        let speed = self.speed_h_s;
        if speed.is_finite() && speed > 0.0 && speed <= HOURS_PER_DAY {
            Ok(self)
        } else {
            Err(ElementsError::SpeedOutOfRange(speed))
        }
    }
}

fn finite(name: &'static str, value: f64) -> Result<f64, ElementsError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ElementsError::NonFinite(name))
    }
}

fn normalized_argument(arg_deg: f64) -> f64 {
    let normalized = normalize_degrees(arg_deg);
    if normalized != arg_deg {
        warn!(input = arg_deg, normalized, "argument of periapsis wrapped into [0, 360)");
    }
    normalized
}

fn check_bound(
    index: usize,
    role: &'static str,
    bound: &'static str,
    value: Option<f64>,
    required: bool,
) -> Result<Option<f64>, ElementsError> {
    match (value, required) {
        (Some(v), true) => finite(bound, v).map(Some),
        (None, true) => Err(ElementsError::MissingBound { index, role, bound }),
        (Some(_), false) => Err(ElementsError::UnexpectedBound { index, role, bound }),
        (None, false) => Ok(None),
    }
}

/// Load every scenario found at `path` (YAML file, TOML file, or directory of TOML files).
pub fn load_scenarios<P: AsRef<Path>>(path: P) -> Result<Vec<ScenarioConfig>, ConfigError> {
    let path = path.as_ref();
    let scenarios: Vec<ScenarioConfig> = load_records(path)?;
    if scenarios.is_empty() {
        return Err(ConfigError::Empty(path.to_path_buf()));
    }
    for scenario in &scenarios {
        scenario.display.validate()?;
    }
    Ok(scenarios)
}

/// Pick a scenario by name (case-insensitive), or the first one when no name is given.
pub fn select_scenario(
    scenarios: Vec<ScenarioConfig>,
    requested: Option<&str>,
) -> Result<ScenarioConfig, ConfigError> {
    match requested {
        Some(name) => {
            let lower = name.to_lowercase();
            scenarios
                .into_iter()
                .find(|s| s.name.to_lowercase() == lower)
                .ok_or_else(|| ConfigError::NotFound(name.to_string()))
        }
        None => scenarios
            .into_iter()
            .next()
            .ok_or_else(|| ConfigError::NotFound("<first>".to_string())),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

fn load_records<T, P>(path: P) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if path.is_dir() {
        read_dir_records(path)
    } else if path.extension().map(|ext| ext == "toml").unwrap_or(false) {
        let contents = std::fs::read_to_string(path)?;
        let record: T = toml::from_str(&contents)?;
        Ok(vec![record])
    } else {
        let reader = File::open(path)?;
        Ok(match serde_yaml::from_reader(reader)? {
            OneOrMany::Many(records) => records,
            OneOrMany::One(record) => vec![record],
        })
    }
}

fn read_dir_records<T>(dir: &Path) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
{
    let mut records = Vec::new();
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().map(|ext| ext == "toml").unwrap_or(false))
        .collect();
    entries.sort();
    for path in entries {
        let contents = std::fs::read_to_string(&path)?;
        let record: T = toml::from_str(&contents)?;
        records.push(record);
    }
    Ok(records)
}
