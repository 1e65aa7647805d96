use crate::collision::{resolve_pair, resolve_wall, PairOutcome};
use crate::config::SimConfig;
use crate::engine::{Particle, World};
use crate::error::{Result, SimError};
use crate::integrator;
use crate::stats::{speed_bucket, SimulationStats, HISTOGRAM_INTERVAL};
use glam::DVec2;
use log::debug;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Containers of the container-shape experiment: square, wide, narrow.
pub const CONTAINER_SHAPES: [(f64, f64); 3] = [(600.0, 600.0), (900.0, 400.0), (1200.0, 300.0)];

/// Main entry point: build a world from `config`, run it for `ticks` ticks
/// and return the final statistics.
pub fn run_simulation(config: &SimConfig, ticks: u64) -> Result<SimulationStats> {
    let mut world = build_world(config)?;
    world.run(ticks);
    Ok(world.stats())
}

/// Run the same configuration in each of [`CONTAINER_SHAPES`].
pub fn run_container_experiment(
    base: &SimConfig,
    ticks: u64,
) -> Result<Vec<((f64, f64), SimulationStats)>> {
    CONTAINER_SHAPES
        .iter()
        .map(|&(width, height)| {
            let config = SimConfig {
                width,
                height,
                ..base.clone()
            };
            run_simulation(&config, ticks).map(|stats| ((width, height), stats))
        })
        .collect()
}

/// Build a populated World from a configuration.
///
/// Without a configured seed one is drawn from the thread RNG and recorded
/// on the world so the run can be replayed.
pub fn build_world(config: &SimConfig) -> Result<World> {
    config.validate()?;
    let seed = config.seed.unwrap_or_else(|| rand::rng().random());
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let particles = create_particles_with(config, &mut rng)?;
    let mut world = World::from_particles(config, particles)?;
    world.seed = Some(seed);

    debug!(
        "built world {}x{} with {} balls (seed {seed})",
        world.width,
        world.height,
        world.particles.len()
    );
    Ok(world)
}

/// Place `count` default-sized balls in a `width` x `height` container.
///
/// Each axis gets a speed drawn uniformly from `velocity_range` with an
/// independent random sign.
pub fn create_particles<R: Rng + ?Sized>(
    count: usize,
    width: f64,
    height: f64,
    velocity_range: (f64, f64),
    rng: &mut R,
) -> Result<Vec<Particle>> {
    let config = SimConfig {
        num_balls: count,
        width,
        height,
        velocity_range,
        ..SimConfig::default()
    };
    create_particles_with(&config, rng)
}

/// Rejection-sample `config.num_balls` non-overlapping balls.
///
/// Centers are drawn on the integer grid `[ceil(r), floor(extent - r)]`; a
/// candidate closer than `2r` to any placed ball is redrawn, up to
/// `max_placement_attempts` times per ball.
pub fn create_particles_with<R: Rng + ?Sized>(
    config: &SimConfig,
    rng: &mut R,
) -> Result<Vec<Particle>> {
    config.validate()?;

    let radius = config.radius;
    let (x_lo, x_hi) = grid_bounds(radius, config.width);
    let (y_lo, y_hi) = grid_bounds(radius, config.height);
    let (vmin, vmax) = config.velocity_range;

    let mut particles: Vec<Particle> = Vec::with_capacity(config.num_balls);
    let mut total_attempts: u64 = 0;

    for index in 0..config.num_balls {
        let mut placed = None;
        for _ in 0..config.max_placement_attempts {
            total_attempts += 1;
            let candidate = DVec2::new(
                rng.random_range(x_lo..=x_hi) as f64,
                rng.random_range(y_lo..=y_hi) as f64,
            );
            let overlaps = particles
                .iter()
                .any(|other| candidate.distance(other.pos) < 2.0 * radius);
            if !overlaps {
                placed = Some(candidate);
                break;
            }
        }

        let pos = placed.ok_or(SimError::PlacementFailed {
            index,
            attempts: config.max_placement_attempts,
        })?;

        let vx = rng.random_range(vmin..=vmax) * random_sign(rng);
        let vy = rng.random_range(vmin..=vmax) * random_sign(rng);

        particles.push(
            Particle::new(pos, DVec2::new(vx, vy), radius, config.mass)?.with_color(config.color),
        );
    }

    debug!(
        "placed {} balls in {total_attempts} attempts",
        particles.len()
    );
    Ok(particles)
}

fn grid_bounds(radius: f64, extent: f64) -> (i64, i64) {
    (radius.ceil() as i64, (extent - radius).floor() as i64)
}

fn random_sign<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    if rng.random_bool(0.5) {
        1.0
    } else {
        -1.0
    }
}

/// One tick: advance, walls, every unordered pair in stored order, then the
/// periodic speed sample.
///
/// Pairs are resolved in place, so later pairs see positions already
/// corrected by earlier ones.
pub fn step_world(world: &mut World, dt: f64) {
    integrator::advance(&mut world.particles, dt);

    let (width, height, elasticity) = (world.width, world.height, world.elasticity);
    for particle in world.particles.iter_mut() {
        if resolve_wall(particle, width, height, elasticity) {
            world.wall_collisions += 1;
        }
    }

    let (model, policy) = (world.model, world.impact_angle);
    for i in 0..world.particles.len() {
        let (head, tail) = world.particles.split_at_mut(i + 1);
        let a = &mut head[i];
        for b in tail.iter_mut() {
            match resolve_pair(a, b, model, policy) {
                PairOutcome::Separate => {}
                PairOutcome::Collided => world.ball_collisions += 1,
                PairOutcome::ImpulseSkipped => {
                    world.ball_collisions += 1;
                    world.skipped_impulses += 1;
                }
            }
        }
    }

    if world.tick % HISTOGRAM_INTERVAL == 0 {
        sample_speeds(world);
    }
    world.tick += 1;
}

fn sample_speeds(world: &mut World) {
    for particle in &world.particles {
        *world
            .velocity_histogram
            .entry(speed_bucket(particle.speed()))
            .or_insert(0) += 1;
    }
}
