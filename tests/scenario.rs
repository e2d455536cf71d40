use kepler_viz::config::{
    ConfigError, DisplayConfig, ElementsConfig, ElementsError, LegConfig, LegRole,
    MIN_SEMI_MAJOR_AXIS_KM, load_scenarios, max_eccentricity,
};
use kepler_viz::scenario::{ScenarioError, load_scenario};
use kepler_viz::sim::{ActiveSimulation, Command, Simulation};
use std::f64::consts::PI;
use std::io::Write;
use tempfile::NamedTempFile;

fn yaml_file(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".yaml")
        .tempfile()
        .expect("temp file");
    file.write_all(contents.as_bytes()).expect("write scenario");
    file
}

fn orbit_yaml(a: f64, e: f64, speed: f64) -> String {
    format!(
        "name: custom\ndisplay:\n  speed_h_s: {speed}\nsimulation:\n  type: orbit\n  orbit:\n    semi_major_axis_km: {a}\n    eccentricity: {e}\n"
    )
}

#[test]
fn hohmann_scenario_builds_a_three_leg_maneuver() {
    let scenario = load_scenario("data/scenarios/gto.yaml", None).expect("gto scenario");
    assert_eq!(scenario.name, "leo-to-geo");
    assert_eq!(scenario.speed_h_s, 2.0);
    assert!(scenario.display.velocity);

    let ActiveSimulation::Maneuver(maneuver) = &scenario.simulation else {
        panic!("expected a maneuver");
    };
    assert_eq!(maneuver.orbits().len(), 3);
    assert_eq!(maneuver.burns_m_s(), &[2_419.47, 1_464.53]);
    assert!((maneuver.orbits()[2].argument_of_periapsis() - PI).abs() < 1e-12);
    assert!((maneuver.orbits()[1].apoapsis_km() - 42_164.0).abs() < 1e-6);
}

#[test]
fn catalog_holds_orbits_and_maneuvers() {
    let all = load_scenarios("data/scenarios/catalog.yaml").expect("catalog");
    let names: Vec<_> = all.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["circular-10000", "gto-like", "bi-elliptic"]);

    let first = load_scenario("data/scenarios/catalog.yaml", None).unwrap();
    assert_eq!(first.name, "circular-10000");
    assert_eq!(first.simulation.kind(), "orbit");
    assert_eq!(first.speed_h_s, 1.0);

    let gto = load_scenario("data/scenarios/catalog.yaml", Some("GTO-Like")).unwrap();
    assert_eq!(gto.speed_h_s, 24.0);
    assert!(!gto.display.acceleration);
    assert!(gto.display.orbital_path);
    let orbit = gto.simulation.orbits()[0];
    assert!((orbit.argument_of_periapsis() - PI / 6.0).abs() < 1e-12);

    let bi = load_scenario("data/scenarios/catalog.yaml", Some("bi-elliptic")).unwrap();
    assert_eq!(bi.simulation.orbits().len(), 4);
    assert_eq!(bi.simulation.burn_vectors().len(), 3);
    assert!((bi.viewport.framing().max_length_km - 150_000.0).abs() < 1e-6);
}

#[test]
fn toml_directory_loads_in_file_order() {
    let all = load_scenarios("data/scenarios/orbits").expect("toml directory");
    let names: Vec<_> = all.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["leo", "molniya"]);

    let molniya = load_scenario("data/scenarios/orbits/molniya.toml", None).unwrap();
    assert_eq!(molniya.speed_h_s, 6.0);
    assert!((molniya.simulation.orbits()[0].eccentricity() - 0.74).abs() < 1e-12);
}

#[test]
fn loaded_scenario_feeds_a_controller() {
    let scenario = load_scenario("data/scenarios/gto.yaml", None).unwrap();
    let mut controller = scenario.controller().expect("valid speed");
    let frame = controller
        .handle(Command::Replace(scenario.simulation))
        .unwrap()
        .expect("first frame");
    assert_eq!(frame.speed_h_s, 2.0);
    assert_eq!(frame.orbit_index, 0);
}

#[test]
fn unknown_scenario_name_is_reported() {
    let err = load_scenario("data/scenarios/catalog.yaml", Some("lunar")).unwrap_err();
    assert!(matches!(
        err,
        ScenarioError::Config(ConfigError::NotFound(ref name)) if name == "lunar"
    ));
}

#[test]
fn out_of_range_elements_are_rejected() {
    let low = yaml_file(&orbit_yaml(6_000.0, 0.0, 1.0));
    let err = load_scenario(low.path(), None).unwrap_err();
    assert!(matches!(
        err,
        ScenarioError::Elements(ElementsError::SemiMajorAxisOutOfRange(a)) if a == 6_000.0
    ));

    let high = yaml_file(&orbit_yaml(150_000.0, 0.0, 1.0));
    assert!(load_scenario(high.path(), None).is_err());

    let eccentric = yaml_file(&orbit_yaml(10_000.0, 0.5, 1.0));
    let err = load_scenario(eccentric.path(), None).unwrap_err();
    assert!(matches!(
        err,
        ScenarioError::Elements(ElementsError::EccentricityOutOfRange { .. })
    ));
}

#[test]
fn out_of_range_speed_is_rejected() {
    for speed in [0.0, -2.0, 30.0] {
        let file = yaml_file(&orbit_yaml(10_000.0, 0.0, speed));
        let err = load_scenario(file.path(), None).unwrap_err();
        assert!(
            matches!(
                err,
                ScenarioError::Config(ConfigError::Elements(ElementsError::SpeedOutOfRange(_)))
            ),
            "speed {speed}: {err}"
        );
    }
}

#[test]
fn malformed_yaml_is_a_parse_error() {
    let file = yaml_file("name: broken\nsimulation: [1, 2\n");
    let err = load_scenario(file.path(), None).unwrap_err();
    assert!(matches!(err, ScenarioError::Config(ConfigError::Parse(_))));
}

#[test]
fn eccentricity_limit_keeps_periapsis_above_safe_altitude() {
    assert_eq!(max_eccentricity(MIN_SEMI_MAJOR_AXIS_KM), 0.0);
    let a = 26_600.0;
    let max = max_eccentricity(a);
    assert!((a * (1.0 - max) - MIN_SEMI_MAJOR_AXIS_KM).abs() < 1e-9);

    let at_limit = ElementsConfig {
        semi_major_axis_km: a,
        eccentricity: max,
        argument_of_periapsis_deg: 0.0,
    };
    assert!(at_limit.validate().is_ok());

    let non_finite = ElementsConfig {
        semi_major_axis_km: f64::NAN,
        ..at_limit
    };
    assert_eq!(
        non_finite.validate(),
        Err(ElementsError::NonFinite("semi_major_axis_km"))
    );
}

#[test]
fn argument_of_periapsis_is_wrapped() {
    let elements = ElementsConfig {
        semi_major_axis_km: 10_000.0,
        eccentricity: 0.1,
        argument_of_periapsis_deg: -90.0,
    }
    .validate()
    .unwrap();
    assert!((elements.argument_of_periapsis_rad - 1.5 * PI).abs() < 1e-12);

    let elements = ElementsConfig {
        semi_major_axis_km: 10_000.0,
        eccentricity: 0.1,
        argument_of_periapsis_deg: 450.0,
    }
    .validate()
    .unwrap();
    assert!((elements.argument_of_periapsis_rad - PI / 2.0).abs() < 1e-12);
}

#[test]
fn maneuver_legs_need_the_bounds_their_role_implies() {
    let transfer = LegConfig {
        role: LegRole::Transfer,
        semi_major_axis_km: 24_432.0,
        eccentricity: 0.7,
        argument_of_periapsis_deg: 0.0,
        start_arg_rad: Some(0.0),
        end_arg_rad: None,
    };
    assert_eq!(
        transfer.validate(1),
        Err(ElementsError::MissingBound {
            index: 1,
            role: "transfer",
            bound: "end_arg_rad",
        })
    );

    let start = LegConfig {
        role: LegRole::Start,
        start_arg_rad: Some(0.0),
        end_arg_rad: Some(PI),
        ..transfer.clone()
    };
    assert!(matches!(
        start.validate(0),
        Err(ElementsError::UnexpectedBound { index: 0, .. })
    ));

    // planner legs may dip below the user range, but never into the Earth
    let grazing = LegConfig {
        role: LegRole::End,
        semi_major_axis_km: 20_000.0,
        eccentricity: 0.7,
        start_arg_rad: Some(0.0),
        end_arg_rad: None,
        ..transfer
    };
    assert!(matches!(
        grazing.validate(2),
        Err(ElementsError::PeriapsisBelowSurface(_))
    ));
}

#[test]
fn display_defaults_show_everything() {
    let display = DisplayConfig::default();
    assert_eq!(display.speed_h_s, 1.0);
    assert!(display.orbital_path && display.velocity && display.acceleration);
    assert!(display.validate().is_ok());
}
