use crate::collision::{CollisionModel, ImpactAnglePolicy};
use crate::config::{SimConfig, BALL_COLOR};
use crate::error::{Result, SimError};
use crate::runtime;
use crate::stats::SimulationStats;
use glam::DVec2;
use std::collections::BTreeMap;

/// A ball in the simulation
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: DVec2,
    pub vel: DVec2,
    pub radius: f64,
    pub mass: f64,
    /// Drawing color; not part of the physics state.
    pub color: [u8; 3],
}

impl Particle {
    /// Create a particle, rejecting non-positive radius/mass and non-finite state.
    pub fn new(pos: DVec2, vel: DVec2, radius: f64, mass: f64) -> Result<Self> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(SimError::invalid("radius must be finite and > 0"));
        }
        if !mass.is_finite() || mass <= 0.0 {
            return Err(SimError::invalid("mass must be finite and > 0"));
        }
        if !pos.is_finite() {
            return Err(SimError::invalid("position must be finite"));
        }
        if !vel.is_finite() {
            return Err(SimError::invalid("velocity must be finite"));
        }
        Ok(Self {
            pos,
            vel,
            radius,
            mass,
            color: BALL_COLOR,
        })
    }

    pub fn with_color(mut self, color: [u8; 3]) -> Self {
        self.color = color;
        self
    }

    /// Move along the current velocity: `pos += vel * dt`.
    #[inline]
    pub fn advance(&mut self, dt: f64) {
        self.pos.x += self.vel.x * dt;
        self.pos.y += self.vel.y * dt;
    }

    pub fn position(&self) -> DVec2 {
        self.pos
    }

    pub fn velocity(&self) -> DVec2 {
        self.vel
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn color(&self) -> [u8; 3] {
        self.color
    }

    /// `sqrt(vx² + vy²)`
    #[inline]
    pub fn speed(&self) -> f64 {
        (self.vel.x * self.vel.x + self.vel.y * self.vel.y).sqrt()
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.vel.length_squared()
    }
}

/// The container, its balls and the running statistics.
///
/// Particle order is the resolution order of every tick.
#[derive(Debug, Clone)]
pub struct World {
    pub width: f64,
    pub height: f64,
    pub particles: Vec<Particle>,
    pub elasticity: f64,
    pub dt: f64,
    pub model: CollisionModel,
    pub impact_angle: ImpactAnglePolicy,
    pub wall_collisions: u64,
    pub ball_collisions: u64,
    pub skipped_impulses: u64,
    pub velocity_histogram: BTreeMap<u64, u64>,
    pub tick: u64,
    /// Seed the particles were drawn with, if they were generated.
    pub seed: Option<u64>,
}

impl World {
    /// Empty container with default physics (elastic walls, reference collisions, dt = 1).
    pub fn new(width: f64, height: f64) -> Self {
        Self::with_params(width, height, &SimConfig::default())
    }

    pub(crate) fn with_params(width: f64, height: f64, config: &SimConfig) -> Self {
        Self {
            width,
            height,
            particles: Vec::new(),
            elasticity: config.elasticity,
            dt: config.dt,
            model: config.model,
            impact_angle: config.impact_angle,
            wall_collisions: 0,
            ball_collisions: 0,
            skipped_impulses: 0,
            velocity_histogram: BTreeMap::new(),
            tick: 0,
            seed: config.seed,
        }
    }

    /// Build a populated world from a validated configuration.
    pub fn from_config(config: &SimConfig) -> Result<Self> {
        runtime::build_world(config)
    }

    /// Wrap an explicit set of particles, taking physics parameters from `config`.
    pub fn from_particles(config: &SimConfig, particles: Vec<Particle>) -> Result<Self> {
        config.validate()?;
        let mut world = Self::with_params(config.width, config.height, config);
        world.particles = particles;
        Ok(world)
    }

    /// Advance one tick with the configured `dt`.
    pub fn step(&mut self) {
        let dt = self.dt;
        runtime::step_world(self, dt);
    }

    /// Advance one tick with an explicit `dt`.
    pub fn step_with_dt(&mut self, dt: f64) {
        runtime::step_world(self, dt);
    }

    pub fn run(&mut self, ticks: u64) {
        for _ in 0..ticks {
            self.step();
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn total_collisions(&self) -> u64 {
        self.wall_collisions + self.ball_collisions
    }

    pub fn stats(&self) -> SimulationStats {
        SimulationStats {
            wall_collisions: self.wall_collisions,
            ball_collisions: self.ball_collisions,
            total_collisions: self.total_collisions(),
            velocity_histogram: self.velocity_histogram.clone(),
            ticks: self.tick,
            skipped_impulses: self.skipped_impulses,
            seed: self.seed,
        }
    }

    /// Zero counters, histogram and tick index; particles are left as they are.
    pub fn reset_stats(&mut self) {
        self.wall_collisions = 0;
        self.ball_collisions = 0;
        self.skipped_impulses = 0;
        self.velocity_histogram.clear();
        self.tick = 0;
    }

    pub fn kinetic_energy(&self) -> f64 {
        self.particles.iter().map(Particle::kinetic_energy).sum()
    }
}
