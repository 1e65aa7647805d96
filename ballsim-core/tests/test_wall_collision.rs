//! Wall contact: clamping, reflection and containment over long runs

use ballsim_core::collision::resolve_wall;
use ballsim_core::tests::test_helpers::{all_contained, ball, world_with};

#[test]
fn test_left_wall_scenario() {
    let mut p = ball(5.0, 50.0, -3.0, 0.0);
    assert!(resolve_wall(&mut p, 600.0, 600.0, 1.0));
    assert_eq!(p.pos.x, 10.0);
    assert_eq!(p.vel.x, 3.0);
}

#[test]
fn test_elastic_bounce_preserves_component_magnitude() {
    let cases = [
        (5.0, 300.0, -2.75, 1.25),
        (595.0, 300.0, 4.5, -0.5),
        (300.0, 3.0, 0.3, -3.3),
        (300.0, 599.0, -1.0, 2.0),
        (2.0, 598.0, -1.5, 1.5),
    ];
    for (x, y, vx, vy) in cases {
        let mut p = ball(x, y, vx, vy);
        assert!(resolve_wall(&mut p, 600.0, 600.0, 1.0));
        assert_eq!(p.vel.x.abs(), vx.abs());
        assert_eq!(p.vel.y.abs(), vy.abs());
        assert!(p.vel.x == vx || p.vel.x == -vx);
        assert!(p.vel.y == vy || p.vel.y == -vy);
    }
}

#[test]
fn test_inelastic_walls_lose_speed() {
    let mut p = ball(5.0, 300.0, -4.0, 0.0);
    resolve_wall(&mut p, 600.0, 600.0, 0.25);
    assert_eq!(p.vel.x, 1.0);
}

#[test]
fn test_wall_pass_contains_out_of_bounds_balls() {
    // Far apart, so the pair pass leaves the wall-pass state untouched.
    let mut world = world_with(
        600.0,
        400.0,
        vec![
            ball(-5.0, 200.0, -1.0, 0.5),
            ball(650.0, 100.0, 2.0, 0.0),
            ball(300.0, 430.0, 0.0, 3.0),
            ball(-20.0, -20.0, -1.0, -1.0),
            ball(300.0, 200.0, 0.0, 0.0),
        ],
    );
    world.step_with_dt(0.0);
    assert!(all_contained(&world));
    assert_eq!(world.wall_collisions, 4);
    assert_eq!(world.ball_collisions, 0);
}

#[test]
fn test_single_ball_stays_contained_every_tick() {
    let mut world = world_with(300.0, 200.0, vec![ball(150.0, 100.0, 7.3, -4.9)]);
    for _ in 0..2_000 {
        world.step();
        assert!(all_contained(&world), "ball escaped at tick {}", world.tick);
    }
    assert!(world.wall_collisions > 0);
}
