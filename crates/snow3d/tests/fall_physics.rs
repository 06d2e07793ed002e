//! Physics tests for the snowflake integrator and force model.

use glam::Vec3;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use snow3d::constants::{DRAG_COEFF, GRAVITY};
use snow3d::{integrator, ForceParams, Snowflake};

fn calm() -> ForceParams {
    ForceParams {
        wind: Vec3::ZERO,
        turbulence_scale: 0.0,
        ..Default::default()
    }
}

#[test]
fn terminal_velocity_matches_drag_balance() {
    // At terminal velocity, g*size = k_drag*size*v, so v = g/k regardless of
    // size.
    let forces = calm();
    let terminal = GRAVITY / DRAG_COEFF;
    let mut rng = ChaCha8Rng::seed_from_u64(0);

    let mut flake = Snowflake::at(Vec3::new(0.0, 50.0, 0.0));
    let dt = 1.0 / 60.0;
    for _ in 0..180 {
        integrator::step(&mut flake, dt, &forces, &mut rng);
    }

    assert!(
        (flake.velocity.y + terminal).abs() < 1e-3,
        "expected terminal velocity {:.4}, got {:.4}",
        -terminal,
        flake.velocity.y
    );
    // Roughly 1.3 m/s for the reference constants.
    assert!((terminal - 1.308).abs() < 1e-3);
}

#[test]
fn deterministic_trajectory_with_turbulence_disabled() {
    let forces = calm();
    let dt = 1.0 / 60.0;

    let run = || {
        let mut flake = Snowflake::at(Vec3::new(-3.0, 12.0, 4.0));
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut trajectory = Vec::new();
        for _ in 0..200 {
            integrator::step(&mut flake, dt, &forces, &mut rng);
            trajectory.push(flake.position);
        }
        trajectory
    };

    assert_eq!(run(), run(), "repeat runs must be bit-identical");
}

#[test]
fn wind_drift_settles_at_wind_over_drag() {
    // Steady state: k*v = wind acceleration, so lateral drift approaches
    // wind/k.
    let forces = ForceParams {
        wind: Vec3::new(15.0, 0.0, -7.5),
        turbulence_scale: 0.0,
        ..Default::default()
    };
    let mut rng = ChaCha8Rng::seed_from_u64(0);

    let mut flake = Snowflake::at(Vec3::new(0.0, 100.0, 0.0));
    for _ in 0..240 {
        integrator::step(&mut flake, 1.0 / 60.0, &forces, &mut rng);
    }

    assert!((flake.velocity.x - 15.0 / DRAG_COEFF).abs() < 1e-3);
    assert!((flake.velocity.z + 7.5 / DRAG_COEFF).abs() < 1e-3);
}

#[test]
fn turbulence_never_affects_vertical_motion() {
    // The turbulence offset lives in the ground plane, so two flakes with and
    // without turbulence share the same fall curve.
    let dt = 1.0 / 60.0;
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    let mut calm_flake = Snowflake::at(Vec3::new(0.0, 12.0, 0.0));
    let mut turbulent = Snowflake::at(Vec3::new(0.0, 12.0, 0.0));
    let calm_forces = calm();
    let windy_forces = ForceParams::default();

    for _ in 0..120 {
        integrator::step(&mut calm_flake, dt, &calm_forces, &mut rng);
        integrator::step(&mut turbulent, dt, &windy_forces, &mut rng);
    }

    assert!(
        (calm_flake.position.y - turbulent.position.y).abs() < 1e-4,
        "vertical motion must match: {} vs {}",
        calm_flake.position.y,
        turbulent.position.y
    );
    let lateral = turbulent.position.x.hypot(turbulent.position.z);
    assert!(lateral > 0.0, "turbulent flake should wander laterally");
}
