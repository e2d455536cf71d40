//! Elapsed time to true anomaly: mean anomaly, Kepler's equation, and back.

use std::f64::consts::TAU;

use kepler_core::time::SIM_SECONDS_PER_TICK;

use crate::orbit::Orbit;

/// Newton iterations applied to Kepler's equation.
///
/// Eight iterations already bring the residual under 1e-15 for the most eccentric orbit the
/// input forms allow (e ≈ 0.869); the count is fixed so every evaluation is reproducible.
pub const KEPLER_ITERATIONS: usize = 10;

/// Mean anomaly after `elapsed_ticks` weighted ticks, offset by the leg's starting phase.
pub fn mean_anomaly(elapsed_ticks: f64, orbital_period_s: f64, phase_offset: f64) -> f64 {
    elapsed_ticks * SIM_SECONDS_PER_TICK * TAU / orbital_period_s + phase_offset
}

/// Solve `M = E - e·sin(E)` for the eccentric anomaly with a fixed Newton–Raphson sweep.
pub fn eccentric_anomaly(mean_anomaly: f64, eccentricity: f64) -> f64 {
    if mean_anomaly == 0.0 {
        return 0.0;
    }

    let mut e_anomaly = mean_anomaly;
    for _ in 0..KEPLER_ITERATIONS {
        let residual = e_anomaly - eccentricity * e_anomaly.sin() - mean_anomaly;
        e_anomaly -= residual / (1.0 - eccentricity * e_anomaly.cos());
    }
    e_anomaly
}

/// True anomaly in `[0, 2π)` for a non-circular orbit.
pub fn eccentric_to_true(eccentric_anomaly: f64, eccentricity: f64) -> f64 {
    let theta = 2.0
        * f64::atan2(
            (1.0 + eccentricity).sqrt() * (0.5 * eccentric_anomaly).tan(),
            (1.0 - eccentricity).sqrt(),
        );
    if theta < 0.0 { theta + TAU } else { theta }
}

/// True anomaly reached at `mean_anomaly` on `orbit`.
///
/// Circular orbits return the mean anomaly unchanged (and unwrapped).
pub fn true_anomaly(orbit: &Orbit, mean_anomaly: f64) -> f64 {
    if orbit.is_circular() {
        return mean_anomaly;
    }
    let e = orbit.eccentricity();
    eccentric_to_true(eccentric_anomaly(mean_anomaly, e), e)
}

/// Residual of Kepler's equation, useful to check a solved eccentric anomaly.
pub fn kepler_residual(eccentric_anomaly: f64, eccentricity: f64, mean_anomaly: f64) -> f64 {
    eccentric_anomaly - eccentricity * eccentric_anomaly.sin() - mean_anomaly
}
