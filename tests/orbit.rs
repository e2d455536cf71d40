use kepler_viz::orbits::{Orbit, OrbitRole};
use std::f64::consts::{PI, TAU};

fn assert_close(actual: f64, expected: f64, tol: f64, what: &str) {
    assert!(
        (actual - expected).abs() <= tol,
        "{what}: expected {expected}, got {actual} (tol {tol})"
    );
}

#[test]
fn apsides_sum_to_major_axis() {
    for a in [6_531.0, 7_000.0, 10_000.0, 26_600.0, 42_164.0, 100_000.0] {
        for e in [0.0, 0.001, 0.1, 0.5, 0.742, 0.869] {
            let orbit = Orbit::new(a, e, 0.0);
            assert_close(
                orbit.periapsis_km() + orbit.apoapsis_km(),
                2.0 * a,
                1e-9 * a,
                "periapsis + apoapsis",
            );
            assert_close(
                orbit.focal_distance_km(),
                a * e,
                1e-6 * a,
                "focal distance",
            );
            assert!(orbit.semi_minor_axis_km() <= a);
        }
    }
}

#[test]
fn geostationary_transfer_like_orbit_matches_formulas() {
    let orbit = Orbit::new(26_600.0, 0.742, 0.0);
    assert_close(orbit.periapsis_km(), 26_600.0 * (1.0 - 0.742), 1e-9, "periapsis");
    assert_close(orbit.apoapsis_km(), 26_600.0 * (1.0 + 0.742), 1e-9, "apoapsis");
    assert!((orbit.periapsis_km() - 6_861.0).abs() < 5.0);
    assert_close(
        orbit.semi_minor_axis_km(),
        26_600.0 * (1.0_f64 - 0.742 * 0.742).sqrt(),
        1e-9,
        "semi-minor axis",
    );
    assert_close(orbit.orbital_period_s(), 43_175.717, 0.01, "period");
    assert!(orbit.velocity_at_periapsis_m_s() > orbit.velocity_at_apoapsis_m_s());
    assert!(!orbit.is_circular());
}

#[test]
fn circular_orbit_has_equal_apsis_speeds() {
    let orbit = Orbit::new(10_000.0, 0.0, 0.0);
    assert!(orbit.is_circular());
    assert_eq!(orbit.periapsis_km(), orbit.apoapsis_km());
    assert_eq!(orbit.focal_distance_km(), 0.0);
    assert_eq!(
        orbit.velocity_at_periapsis_m_s(),
        orbit.velocity_at_apoapsis_m_s()
    );
    // sqrt(mu / r) for r = 10 000 km
    assert_close(orbit.velocity_at_periapsis_m_s(), 6_313.4, 1.0, "circular speed");
}

#[test]
fn radius_matches_polar_equation_at_apsides() {
    let orbit = Orbit::new(20_000.0, 0.3, 1.0);
    assert_close(orbit.radius_at(0.0), orbit.periapsis_km(), 1e-9, "r(0)");
    assert_close(orbit.radius_at(PI), orbit.apoapsis_km(), 1e-9, "r(pi)");
    assert_close(orbit.radius_at(TAU), orbit.periapsis_km(), 1e-9, "r(2pi)");
}

#[test]
fn roles_expose_their_bounds() {
    let start = Orbit::with_role(7_000.0, 0.0, 0.0, OrbitRole::Start { end_arg: PI });
    assert_eq!(start.start_arg(), None);
    assert_eq!(start.end_arg(), Some(PI));
    assert_eq!(start.end_bound(), Some(PI));

    let transfer = Orbit::with_role(
        20_000.0,
        0.5,
        0.0,
        OrbitRole::Transfer {
            start_arg: 0.0,
            end_arg: PI,
        },
    );
    assert_eq!(transfer.start_arg(), Some(0.0));
    assert_eq!(transfer.end_arg(), Some(PI));

    let end = Orbit::with_role(40_000.0, 0.0, PI, OrbitRole::End { start_arg: PI });
    assert_eq!(end.end_arg(), None);
    assert_eq!(end.end_bound(), Some(PI + TAU));

    let constant = Orbit::new(10_000.0, 0.0, 0.0);
    assert_eq!(constant.role(), OrbitRole::Constant);
    assert_eq!(constant.end_bound(), None);
    assert_eq!(constant.role().title(), "Orbit");
    assert_eq!(transfer.role().title(), "Transfer Orbit");
}

#[test]
fn summary_rounds_values_and_formats_period() {
    let orbit = Orbit::new(10_000.0, 0.0, 0.5);
    let summary = orbit.summary();
    assert_eq!(summary.role, "constant");
    assert_eq!(summary.semi_major_axis_km, 10_000.0);
    assert_eq!(summary.periapsis_km, 10_000.0);
    assert_eq!(summary.argument_of_periapsis_deg, 29.0);
    assert_eq!(summary.orbital_period, "2h 45m 52s");

    let text = summary.to_string();
    assert!(text.contains("Orbital period        : 2h 45m 52s"));
    assert!(text.contains("Semi-major axis       : 10000 km"));

    let gto = Orbit::new(26_600.0, 0.742, 0.0).summary();
    assert_eq!(gto.periapsis_km, 6_863.0);
    assert_eq!(gto.apoapsis_km, 46_337.0);
    assert_eq!(gto.orbital_period, "11h 59m 35s");
}
