//! Position, velocity ratio, and acceleration ratio of a satellite on its orbit.
//!
//! Everything is expressed in the orbit-local frame: Earth at the origin, periapsis along +x,
//! and y pointing *down* (screen convention), so a prograde satellite climbs through negative y
//! right after periapsis. The same convention applies to every vector produced here.

use std::f64::consts::{PI, TAU};

use kepler_core::vector::{self, Vector2};
use serde::Serialize;

use crate::orbit::Orbit;

/// Largest velocity and acceleration factors used to normalise displayed vectors.
///
/// Both maxima occur at periapsis. A maneuver takes the maxima across all of its orbits so
/// vector lengths stay comparable across a burn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VectorScale {
    pub max_velocity_factor: f64,
    pub max_acceleration_factor: f64,
}

impl VectorScale {
    pub fn for_orbit(orbit: &Orbit) -> Self {
        VectorScale {
            max_velocity_factor: velocity_factor_at_radius(orbit, orbit.periapsis_km()),
            max_acceleration_factor: acceleration_factor_at_radius(orbit.periapsis_km()),
        }
    }

    pub fn for_orbits<'a>(orbits: impl IntoIterator<Item = &'a Orbit>) -> Self {
        orbits
            .into_iter()
            .map(Self::for_orbit)
            .fold(
                VectorScale {
                    max_velocity_factor: 0.0,
                    max_acceleration_factor: 0.0,
                },
                |acc, s| VectorScale {
                    max_velocity_factor: acc.max_velocity_factor.max(s.max_velocity_factor),
                    max_acceleration_factor: acc
                        .max_acceleration_factor
                        .max(s.max_acceleration_factor),
                },
            )
    }
}

/// Evaluated satellite state at one true anomaly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct KinematicState {
    pub true_anomaly: f64,
    pub radius_km: f64,
    pub position_km: Vector2,
    pub velocity_ratio: Vector2,
    pub acceleration_ratio: Vector2,
}

/// Orbit-local position at true anomaly `theta` (km).
pub fn position_at(orbit: &Orbit, theta: f64) -> Vector2 {
    let r = orbit.radius_at(theta);
    [theta.cos() * r, -theta.sin() * r]
}

/// Unnormalised vis-viva factor `sqrt(2/r - 1/a)` at true anomaly `theta`.
pub fn velocity_factor(orbit: &Orbit, theta: f64) -> f64 {
    velocity_factor_at_radius(orbit, orbit.radius_at(theta))
}

fn velocity_factor_at_radius(orbit: &Orbit, radius_km: f64) -> f64 {
    (2.0 / radius_km - 1.0 / orbit.semi_major_axis_km()).sqrt()
}

/// Unnormalised gravitational factor `1/r²` at true anomaly `theta`.
pub fn acceleration_factor(orbit: &Orbit, theta: f64) -> f64 {
    acceleration_factor_at_radius(orbit.radius_at(theta))
}

fn acceleration_factor_at_radius(radius_km: f64) -> f64 {
    1.0 / (radius_km * radius_km)
}

/// Prograde tangent of length `magnitude` at true anomaly `theta`.
///
/// The slope comes from the ellipse equation centred on the ellipse itself, hence the focal
/// shift applied to x. At the apsides the tangent is vertical and handled separately.
pub fn tangent(orbit: &Orbit, theta: f64, magnitude: f64) -> Vector2 {
    let wrapped = theta.rem_euclid(TAU);
    let [x, y] = position_at(orbit, theta);

    if wrapped == 0.0 || wrapped == PI || y == 0.0 {
        let at_periapsis = wrapped.cos() > 0.0;
        return [0.0, if at_periapsis { -magnitude } else { magnitude }];
    }

    let a = orbit.semi_major_axis_km();
    let b = orbit.semi_minor_axis_km();
    let slope = -(b * b * (x + orbit.focal_distance_km())) / (a * a * y);

    let mut vx = magnitude / (1.0 + slope * slope).sqrt();
    if wrapped < PI {
        vx = -vx;
    }
    [vx, slope * vx]
}

/// Unit vector pointing from the satellite back to the Earth.
pub fn acceleration_direction(theta: f64) -> Vector2 {
    [-theta.cos(), theta.sin()]
}

/// Velocity vector whose length is the vis-viva factor divided by the scale maximum.
pub fn velocity_ratio(orbit: &Orbit, theta: f64, scale: &VectorScale) -> Vector2 {
    tangent(
        orbit,
        theta,
        velocity_factor(orbit, theta) / scale.max_velocity_factor,
    )
}

/// Acceleration vector whose length is `1/r²` divided by the scale maximum.
pub fn acceleration_ratio(orbit: &Orbit, theta: f64, scale: &VectorScale) -> Vector2 {
    let ratio = acceleration_factor(orbit, theta) / scale.max_acceleration_factor;
    vector::scale(&acceleration_direction(theta), ratio)
}

/// Full evaluation at one true anomaly. Pure: identical inputs give identical bits.
pub fn evaluate(orbit: &Orbit, theta: f64, scale: &VectorScale) -> KinematicState {
    KinematicState {
        true_anomaly: theta,
        radius_km: orbit.radius_at(theta),
        position_km: position_at(orbit, theta),
        velocity_ratio: velocity_ratio(orbit, theta, scale),
        acceleration_ratio: acceleration_ratio(orbit, theta, scale),
    }
}
