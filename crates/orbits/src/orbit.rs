//! Closed Keplerian ellipse around the Earth and its derived properties.

use std::f64::consts::TAU;
use std::fmt;

use kepler_core::constants::MU_EARTH_M3_S2;
use kepler_core::time::{format_hms, seconds_to_delta};
use kepler_core::units::{km_to_m, rad_to_deg};
use serde::Serialize;

use crate::vis_viva_speed;

/// Position of an orbit inside a simulation, carrying its angular bounds (true anomaly, radians).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum OrbitRole {
    /// Stand-alone orbit animated forever.
    Constant,
    /// First orbit of a maneuver; the first burn happens at `end_arg`.
    Start { end_arg: f64 },
    /// Intermediate orbit entered at `start_arg` and left at `end_arg`.
    Transfer { start_arg: f64, end_arg: f64 },
    /// Final orbit of a maneuver, entered at `start_arg`.
    End { start_arg: f64 },
}

impl OrbitRole {
    /// Angle at which the satellite joins this orbit, when bounded.
    pub fn start_arg(&self) -> Option<f64> {
        match self {
            OrbitRole::Transfer { start_arg, .. } | OrbitRole::End { start_arg } => Some(*start_arg),
            OrbitRole::Start { .. } | OrbitRole::Constant => None,
        }
    }

    /// Angle at which the satellite leaves this orbit, when bounded.
    pub fn end_arg(&self) -> Option<f64> {
        match self {
            OrbitRole::Start { end_arg } | OrbitRole::Transfer { end_arg, .. } => Some(*end_arg),
            OrbitRole::End { .. } | OrbitRole::Constant => None,
        }
    }

    /// Short lowercase name used in exports and logs.
    pub fn label(&self) -> &'static str {
        match self {
            OrbitRole::Constant => "constant",
            OrbitRole::Start { .. } => "start",
            OrbitRole::Transfer { .. } => "transfer",
            OrbitRole::End { .. } => "end",
        }
    }

    /// Title shown above the canvas for the active leg.
    pub fn title(&self) -> &'static str {
        match self {
            OrbitRole::Constant => "Orbit",
            OrbitRole::Start { .. } => "Start Orbit",
            OrbitRole::Transfer { .. } => "Transfer Orbit",
            OrbitRole::End { .. } => "End Orbit",
        }
    }
}

/// Immutable Keplerian ellipse with the Earth at one focus.
///
/// Distances are kilometres, angles radians, speeds metres per second.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orbit {
    semi_major_axis_km: f64,
    eccentricity: f64,
    argument_of_periapsis: f64,
    semi_minor_axis_km: f64,
    periapsis_km: f64,
    apoapsis_km: f64,
    focal_distance_km: f64,
    orbital_period_s: f64,
    velocity_at_periapsis_m_s: f64,
    velocity_at_apoapsis_m_s: f64,
    role: OrbitRole,
}

impl Orbit {
    /// Build a constant orbit from its two free parameters and orientation.
    ///
    /// Inputs:
    /// - `semi_major_axis_km`: strictly positive
    /// - `eccentricity`: in `[0, 1)`; parabolic and hyperbolic paths are not modelled
    /// - `argument_of_periapsis`: counterclockwise from the reference axis (radians)
    pub fn new(semi_major_axis_km: f64, eccentricity: f64, argument_of_periapsis: f64) -> Self {
        Self::with_role(
            semi_major_axis_km,
            eccentricity,
            argument_of_periapsis,
            OrbitRole::Constant,
        )
    }

    /// Build an orbit that belongs to a maneuver sequence.
    pub fn with_role(
        semi_major_axis_km: f64,
        eccentricity: f64,
        argument_of_periapsis: f64,
        role: OrbitRole,
    ) -> Self {
        debug_assert!(semi_major_axis_km > 0.0);
        debug_assert!((0.0..1.0).contains(&eccentricity));

        let a = semi_major_axis_km;
        let e = eccentricity;
        let semi_minor_axis_km = a * (1.0 - e * e).sqrt();
        let periapsis_km = a * (1.0 - e);
        let apoapsis_km = a * (1.0 + e);
        let focal_distance_km = (a * a - semi_minor_axis_km * semi_minor_axis_km).sqrt();

        let a_m = km_to_m(a);
        let orbital_period_s = TAU * (a_m.powi(3) / MU_EARTH_M3_S2).sqrt();
        let velocity_at_periapsis_m_s = vis_viva_speed(MU_EARTH_M3_S2, km_to_m(periapsis_km), a_m);
        let velocity_at_apoapsis_m_s = if e == 0.0 {
            velocity_at_periapsis_m_s
        } else {
            vis_viva_speed(MU_EARTH_M3_S2, km_to_m(apoapsis_km), a_m)
        };

        Orbit {
            semi_major_axis_km: a,
            eccentricity: e,
            argument_of_periapsis,
            semi_minor_axis_km,
            periapsis_km,
            apoapsis_km,
            focal_distance_km,
            orbital_period_s,
            velocity_at_periapsis_m_s,
            velocity_at_apoapsis_m_s,
            role,
        }
    }

    pub fn semi_major_axis_km(&self) -> f64 {
        self.semi_major_axis_km
    }

    pub fn eccentricity(&self) -> f64 {
        self.eccentricity
    }

    pub fn argument_of_periapsis(&self) -> f64 {
        self.argument_of_periapsis
    }

    pub fn semi_minor_axis_km(&self) -> f64 {
        self.semi_minor_axis_km
    }

    pub fn periapsis_km(&self) -> f64 {
        self.periapsis_km
    }

    pub fn apoapsis_km(&self) -> f64 {
        self.apoapsis_km
    }

    /// Distance between the ellipse centre and the Earth.
    pub fn focal_distance_km(&self) -> f64 {
        self.focal_distance_km
    }

    pub fn orbital_period_s(&self) -> f64 {
        self.orbital_period_s
    }

    pub fn velocity_at_periapsis_m_s(&self) -> f64 {
        self.velocity_at_periapsis_m_s
    }

    pub fn velocity_at_apoapsis_m_s(&self) -> f64 {
        self.velocity_at_apoapsis_m_s
    }

    pub fn role(&self) -> OrbitRole {
        self.role
    }

    /// True when the eccentricity is exactly zero; true and mean anomaly then coincide.
    pub fn is_circular(&self) -> bool {
        self.eccentricity == 0.0
    }

    pub fn start_arg(&self) -> Option<f64> {
        self.role.start_arg()
    }

    pub fn end_arg(&self) -> Option<f64> {
        self.role.end_arg()
    }

    /// Angle bounding the drawn arc: `end_arg` when set, one revolution after `start_arg` for end legs.
    pub fn end_bound(&self) -> Option<f64> {
        match self.role {
            OrbitRole::End { start_arg } => Some(start_arg + TAU),
            other => other.end_arg(),
        }
    }

    /// Distance from the Earth at true anomaly `theta` (polar equation, focus at origin).
    pub fn radius_at(&self, theta: f64) -> f64 {
        let e = self.eccentricity;
        self.semi_major_axis_km * (1.0 - e * e) / (1.0 + e * theta.cos())
    }

    /// Rounded view of the orbit for information panels.
    pub fn summary(&self) -> OrbitSummary {
        OrbitSummary {
            role: self.role.label(),
            semi_major_axis_km: self.semi_major_axis_km,
            semi_minor_axis_km: self.semi_minor_axis_km.round(),
            eccentricity: self.eccentricity,
            periapsis_km: self.periapsis_km.round(),
            apoapsis_km: self.apoapsis_km.round(),
            focal_distance_km: self.focal_distance_km.round(),
            argument_of_periapsis_deg: rad_to_deg(self.argument_of_periapsis).round(),
            orbital_period_s: self.orbital_period_s,
            orbital_period: format_hms(seconds_to_delta(self.orbital_period_s)),
            velocity_at_periapsis_m_s: self.velocity_at_periapsis_m_s.round(),
            velocity_at_apoapsis_m_s: self.velocity_at_apoapsis_m_s.round(),
        }
    }
}

/// Display-ready orbit properties (kilometres rounded, angles in degrees).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrbitSummary {
    pub role: &'static str,
    pub semi_major_axis_km: f64,
    pub semi_minor_axis_km: f64,
    pub eccentricity: f64,
    pub periapsis_km: f64,
    pub apoapsis_km: f64,
    pub focal_distance_km: f64,
    pub argument_of_periapsis_deg: f64,
    pub orbital_period_s: f64,
    pub orbital_period: String,
    pub velocity_at_periapsis_m_s: f64,
    pub velocity_at_apoapsis_m_s: f64,
}

impl fmt::Display for OrbitSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Semi-major axis       : {} km", self.semi_major_axis_km)?;
        writeln!(f, "Semi-minor axis       : {} km", self.semi_minor_axis_km)?;
        writeln!(f, "Eccentricity          : {}", self.eccentricity)?;
        writeln!(f, "Periapsis             : {} km", self.periapsis_km)?;
        writeln!(f, "Apoapsis              : {} km", self.apoapsis_km)?;
        writeln!(f, "Focal distance        : {} km", self.focal_distance_km)?;
        writeln!(f, "Argument of periapsis : {}°", self.argument_of_periapsis_deg)?;
        writeln!(f, "Orbital period        : {}", self.orbital_period)?;
        write!(
            f,
            "Speed (peri / apo)    : {} / {} m/s",
            self.velocity_at_periapsis_m_s, self.velocity_at_apoapsis_m_s
        )
    }
}
