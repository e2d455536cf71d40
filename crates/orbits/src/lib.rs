//! Keplerian orbit model, anomaly solver, and kinematics for an Earth-centred satellite.

pub mod anomaly;
pub mod burn;
pub mod kinematics;
pub mod orbit;

pub use burn::{BurnVector, burn_vectors};
pub use kinematics::{KinematicState, VectorScale};
pub use orbit::{Orbit, OrbitRole, OrbitSummary};

/// Vis-viva speed for a body at `radius_m` on an orbit with semi-major axis `semi_major_axis_m`.
pub fn vis_viva_speed(mu_m3_s2: f64, radius_m: f64, semi_major_axis_m: f64) -> f64 {
    (mu_m3_s2 * (2.0 / radius_m - 1.0 / semi_major_axis_m)).sqrt()
}
