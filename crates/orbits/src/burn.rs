//! Static burn overlays drawn at the points where a maneuver changes orbit.

use std::f64::consts::TAU;

use kepler_core::vector::{self, Vector2};
use serde::Serialize;

use crate::kinematics::{position_at, tangent};
use crate::orbit::Orbit;

/// Direction and relative size of one impulsive burn, in the frame of the orbit it leaves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BurnVector {
    /// Index of the orbit the burn leaves.
    pub orbit_index: usize,
    /// True anomaly of the burn, wrapped into `[0, 2π)`.
    pub true_anomaly: f64,
    /// Orbit-local anchor of the arrow (km).
    pub anchor_km: Vector2,
    /// Arrow direction scaled by `|burn| / max |burn|`.
    pub ratio: Vector2,
    /// Signed burn magnitude (m/s); negative burns point retrograde.
    pub burn_m_s: f64,
}

/// Largest absolute burn of the sequence.
pub fn max_burn_m_s(burns: &[f64]) -> f64 {
    burns.iter().fold(0.0_f64, |acc, b| acc.max(b.abs()))
}

/// One overlay per burn, anchored on the non-terminal orbit at its `end_arg`.
///
/// Orbits without an `end_arg` or burns without a matching orbit are skipped. An all-zero burn
/// list yields zero-length arrows.
pub fn burn_vectors(orbits: &[Orbit], burns_m_s: &[f64]) -> Vec<BurnVector> {
    let max_burn = max_burn_m_s(burns_m_s);

    burns_m_s
        .iter()
        .zip(orbits)
        .enumerate()
        .filter_map(|(orbit_index, (&burn_m_s, orbit))| {
            let theta = orbit.end_arg()? % TAU;
            let magnitude = if max_burn > 0.0 {
                burn_m_s.abs() / max_burn
            } else {
                0.0
            };

            let mut ratio = tangent(orbit, theta, magnitude);
            if burn_m_s < 0.0 {
                ratio = vector::scale(&ratio, -1.0);
            }

            Some(BurnVector {
                orbit_index,
                true_anomaly: theta,
                anchor_km: position_at(orbit, theta),
                ratio,
                burn_m_s,
            })
        })
        .collect()
}
