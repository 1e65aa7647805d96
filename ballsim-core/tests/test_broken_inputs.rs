//! Tests for invalid configurations and unplaceable populations

use ballsim_core::tests::test_helpers::seeded_config;
use ballsim_core::{run_simulation, Particle, SimConfig, SimError, World};
use glam::DVec2;

#[test]
fn test_zero_radius_rejected_before_running() {
    let config = SimConfig {
        radius: 0.0,
        ..seeded_config(600.0, 600.0, 1)
    };
    let err = run_simulation(&config, 10).unwrap_err();
    assert!(matches!(err, SimError::InvalidParam(_)));
    assert!(err.to_string().contains("radius"));
}

#[test]
fn test_negative_elasticity_rejected() {
    let config = SimConfig {
        elasticity: -0.5,
        ..SimConfig::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn test_too_many_balls_fails_placement() {
    let config = SimConfig {
        num_balls: 200,
        max_placement_attempts: 500,
        ..seeded_config(100.0, 100.0, 2)
    };
    let err = World::from_config(&config).unwrap_err();
    match err {
        SimError::PlacementFailed { index, attempts } => {
            assert!(index < 200);
            assert_eq!(attempts, 500);
        }
        other => panic!("expected placement failure, got {other}"),
    }
}

#[test]
fn test_from_particles_validates_container() {
    let p = Particle::new(DVec2::new(5.0, 5.0), DVec2::ZERO, 1.0, 1.0).expect("valid particle");
    let config = SimConfig::with_container(-10.0, 10.0);
    assert!(World::from_particles(&config, vec![p]).is_err());
}

#[test]
fn test_unknown_model_in_json_rejected() {
    let err = SimConfig::from_json_str(r#"{ "model": "magic" }"#).unwrap_err();
    assert!(matches!(err, SimError::Config(_)));
}

#[test]
fn test_missing_config_file_is_io_error() {
    let err = SimConfig::load("/definitely/not/here/ballsim.json").unwrap_err();
    assert!(matches!(err, SimError::Io(_)));
}
