use kepler_viz::orbits::kinematics::position_at;
use kepler_viz::orbits::{Orbit, OrbitRole};
use kepler_viz::sim::{DisplayToggles, OrbitSimulation, Session};
use kepler_viz::viewport::canvas::{CANVAS_SIZE_PX, DRAWING_SIZE_PX, MAX_VECTOR_PX};
use kepler_viz::viewport::{Framing, Viewport, ellipse_bounding_box, speed_label};
use std::f64::consts::{FRAC_PI_2, PI, TAU};

fn assert_px(actual: [f64; 2], expected: [f64; 2]) {
    assert!(
        (actual[0] - expected[0]).abs() < 1e-9 && (actual[1] - expected[1]).abs() < 1e-9,
        "expected {expected:?}, got {actual:?}"
    );
}

/// Every sampled point of every orbit lands inside the 500 px drawing area.
fn assert_contained(orbits: &[Orbit]) {
    let viewport = Viewport::new(Framing::for_orbits(orbits));
    let margin = (CANVAS_SIZE_PX - DRAWING_SIZE_PX) / 2.0;
    let (low, high) = (margin - 1e-6, CANVAS_SIZE_PX - margin + 1e-6);
    for orbit in orbits {
        for j in 0..720 {
            let theta = j as f64 * TAU / 720.0;
            let [x, y] = viewport.to_canvas(position_at(orbit, theta), orbit.argument_of_periapsis());
            assert!((low..=high).contains(&x), "x {x} out of frame");
            assert!((low..=high).contains(&y), "y {y} out of frame");
        }
    }
}

#[test]
fn bounding_box_of_rotated_ellipse() {
    assert_eq!(ellipse_bounding_box(3.0, 2.0, 0.0), [6.0, 4.0]);
    let [w, h] = ellipse_bounding_box(3.0, 2.0, FRAC_PI_2);
    assert!((w - 4.0).abs() < 1e-12);
    assert!((h - 6.0).abs() < 1e-12);
}

#[test]
fn circular_orbit_is_centred_on_the_earth() {
    let framing = Framing::for_orbit(&Orbit::new(10_000.0, 0.0, 1.0));
    assert_eq!(framing.max_length_km, 20_000.0);
    assert_eq!(framing.earth_offset_km, [0.0, 0.0]);

    let viewport = Viewport::new(framing);
    assert_eq!(viewport.km_per_pixel(), 40.0);
    assert_eq!(viewport.earth_px(), [300.0, 300.0]);
    assert_eq!(viewport.scale_label(), "4000 km");
    assert!((viewport.earth_diameter_px() - 318.55).abs() < 1e-9);
}

#[test]
fn periapsis_rotates_counterclockwise_on_screen() {
    let viewport = Viewport::new(Framing::for_orbit(&Orbit::new(10_000.0, 0.0, 0.0)));
    assert_px(viewport.to_canvas([10_000.0, 0.0], 0.0), [550.0, 300.0]);
    // a quarter turn puts periapsis straight up
    assert_px(viewport.to_canvas([10_000.0, 0.0], FRAC_PI_2), [300.0, 50.0]);
    assert_px(viewport.to_canvas([10_000.0, 0.0], PI), [50.0, 300.0]);
}

#[test]
fn ellipse_shifts_the_earth_towards_periapsis() {
    let orbit = Orbit::new(20_000.0, 0.5, 0.0);
    let framing = Framing::for_orbit(&orbit);
    assert!((framing.max_length_km - 40_000.0).abs() < 1e-9);
    assert!((framing.earth_offset_km[0] - 10_000.0).abs() < 1e-9);
    assert!(framing.earth_offset_km[1].abs() < 1e-9);

    let viewport = Viewport::new(framing);
    assert_px(viewport.earth_px(), [425.0, 300.0]);
    assert_px(viewport.to_canvas(position_at(&orbit, 0.0), 0.0), [550.0, 300.0]);
    assert_px(viewport.to_canvas(position_at(&orbit, PI), 0.0), [50.0, 300.0]);
}

#[test]
fn framing_contains_single_orbits_at_any_orientation() {
    for arg in [0.0, 0.5, FRAC_PI_2, 2.0, PI, 4.0, 5.5] {
        assert_contained(&[Orbit::new(26_600.0, 0.742, arg)]);
        assert_contained(&[Orbit::new(12_000.0, 0.2, arg)]);
    }
}

#[test]
fn framing_contains_every_leg_of_a_maneuver() {
    let hohmann = [
        Orbit::with_role(6_700.0, 0.0, 0.0, OrbitRole::Start { end_arg: 0.0 }),
        Orbit::with_role(
            24_432.0,
            0.725_769_482_645_710_5,
            0.0,
            OrbitRole::Transfer {
                start_arg: 0.0,
                end_arg: PI,
            },
        ),
        Orbit::with_role(42_164.0, 0.0, PI, OrbitRole::End { start_arg: 0.0 }),
    ];
    assert_contained(&hohmann);
    // the outermost circle sets the box
    assert!((Framing::for_orbits(&hohmann).max_length_km - 84_328.0).abs() < 1e-6);

    let bi_elliptic = [
        Orbit::with_role(7_000.0, 0.0, 0.0, OrbitRole::Start { end_arg: 0.0 }),
        Orbit::with_role(
            48_500.0,
            0.855_670_103_092_783_5,
            0.0,
            OrbitRole::Transfer {
                start_arg: 0.0,
                end_arg: PI,
            },
        ),
        Orbit::with_role(
            75_000.0,
            0.2,
            0.0,
            OrbitRole::Transfer {
                start_arg: PI,
                end_arg: TAU,
            },
        ),
        Orbit::with_role(60_000.0, 0.0, 0.0, OrbitRole::End { start_arg: 0.0 }),
    ];
    assert_contained(&bi_elliptic);
}

#[test]
fn labels_follow_speed_and_scale() {
    assert_eq!(speed_label(1.0), "1 h/s");
    assert_eq!(speed_label(12.0), "12 h/s");
    assert_eq!(speed_label(0.5), "0.5 h/s");
    assert_eq!(speed_label(24.0), "1 day/s");

    let viewport = Viewport::new(Framing::for_orbit(&Orbit::new(26_600.0, 0.742, 0.0)));
    assert_eq!(viewport.scale_label(), "10640 km");
}

#[test]
fn projected_frame_places_satellite_and_arrows() {
    let orbit = Orbit::new(10_000.0, 0.0, 0.0);
    let viewport = Viewport::new(Framing::for_orbit(&orbit));
    let mut session = Session::new(OrbitSimulation::new(orbit), 24.0, DisplayToggles::default())
        .expect("valid speed");
    let frame = session.start().expect("first frame");

    let canvas = viewport.project(&frame);
    assert_eq!(canvas.title, "Orbit");
    assert_px(canvas.satellite_px, [550.0, 300.0]);
    // prograde velocity at periapsis points up the screen; gravity points back to the Earth
    assert_px(canvas.velocity_end_px.unwrap(), [550.0, 300.0 - MAX_VECTOR_PX]);
    assert_px(canvas.acceleration_end_px.unwrap(), [550.0 - MAX_VECTOR_PX, 300.0]);
    assert_eq!(canvas.time_label, "Time: 0 h");
    assert_eq!(canvas.speed_label, "1 day/s");
    assert_eq!(canvas.scale_label, "4000 km");

    session.set_display(DisplayToggles {
        orbital_path: true,
        velocity: false,
        acceleration: false,
    });
    let hidden = viewport.project(&session.frame());
    assert_eq!(hidden.velocity_end_px, None);
    assert_eq!(hidden.acceleration_end_px, None);
}
