//! Wall and ball-ball collision response.
//!
//! Both resolvers mutate particles in place and report whether contact
//! happened, so the caller can keep its own counters.

use crate::engine::Particle;
use glam::DVec2;
use log::trace;
use serde::{Deserialize, Serialize};

/// Substituted for an impulse denominator that is exactly zero.
pub const DENOMINATOR_EPSILON: f64 = 1e-4;

/// Velocity update applied to a colliding pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionModel {
    /// Angle-based impulse from relative-velocity and relative-position angles.
    /// Asymmetric in the masses and not energy conserving.
    #[default]
    Reference,
    /// Textbook elastic impulse along the line of centers (alternative mode).
    Elastic,
}

/// What the reference model does when `asin` of the impact parameter is undefined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImpactAnglePolicy {
    /// Leave velocities untouched; positional correction still runs.
    #[default]
    SkipImpulse,
    /// Clamp the impact parameter into `[-1, 1]`.
    Clamp,
}

/// Result of [`resolve_pair`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairOutcome {
    /// Centers are at least `r_a + r_b` apart.
    Separate,
    /// Overlap resolved, velocities updated.
    Collided,
    /// Overlap resolved, but the impact angle was not computable and
    /// velocities were left as they were.
    ImpulseSkipped,
}

impl PairOutcome {
    pub fn collided(self) -> bool {
        !matches!(self, PairOutcome::Separate)
    }
}

/// Reflect a particle off the container walls.
///
/// Each axis is checked on its own (X first), so a corner contact corrects
/// both axes in one call.
pub fn resolve_wall(p: &mut Particle, width: f64, height: f64, elasticity: f64) -> bool {
    let mut hit = false;

    if p.pos.x - p.radius <= 0.0 {
        p.pos.x = p.radius;
        p.vel.x = -p.vel.x * elasticity;
        hit = true;
    } else if p.pos.x + p.radius >= width {
        p.pos.x = width - p.radius;
        p.vel.x = -p.vel.x * elasticity;
        hit = true;
    }

    if p.pos.y - p.radius <= 0.0 {
        p.pos.y = p.radius;
        p.vel.y = -p.vel.y * elasticity;
        hit = true;
    } else if p.pos.y + p.radius >= height {
        p.pos.y = height - p.radius;
        p.vel.y = -p.vel.y * elasticity;
        hit = true;
    }

    hit
}

/// Detect and resolve a collision between `a` and `b`.
///
/// Contact requires `d < r_a + r_b`; exact tangency is not a collision.
/// On contact the velocities are updated per `model` and both balls are
/// pushed apart by half the overlap each, leaving them exactly tangent.
pub fn resolve_pair(
    a: &mut Particle,
    b: &mut Particle,
    model: CollisionModel,
    policy: ImpactAnglePolicy,
) -> PairOutcome {
    let dx = b.pos.x - a.pos.x;
    let dy = b.pos.y - a.pos.y;
    let distance = (dx * dx + dy * dy).sqrt();

    if distance >= a.radius + b.radius {
        return PairOutcome::Separate;
    }

    let applied = match model {
        CollisionModel::Reference => reference_impulse(a, b, dx, dy, distance, policy),
        CollisionModel::Elastic => {
            elastic_impulse(a, b, dx, dy, distance);
            true
        }
    };

    separate(a, b, dx, dy, distance);

    if applied {
        PairOutcome::Collided
    } else {
        PairOutcome::ImpulseSkipped
    }
}

/// [`resolve_pair`] with the default model and policy.
pub fn resolve_pair_reference(a: &mut Particle, b: &mut Particle) -> bool {
    resolve_pair(
        a,
        b,
        CollisionModel::Reference,
        ImpactAnglePolicy::SkipImpulse,
    )
    .collided()
}

/// Angle-based impulse. Returns false if the velocities were left unchanged
/// because the impact angle is undefined.
fn reference_impulse(
    a: &mut Particle,
    b: &mut Particle,
    dx: f64,
    dy: f64,
    distance: f64,
    policy: ImpactAnglePolicy,
) -> bool {
    let rva = (a.vel.y - b.vel.y).atan2(a.vel.x - b.vel.x);
    let rpa = dy.atan2(dx);

    let ia = if a.radius == b.radius {
        rpa
    } else {
        let ip = distance * (rpa - rva).sin() / (b.radius - a.radius).abs();
        match policy {
            ImpactAnglePolicy::Clamp => ip.clamp(-1.0, 1.0).asin(),
            ImpactAnglePolicy::SkipImpulse => {
                if !(-1.0..=1.0).contains(&ip) {
                    trace!("impact parameter {ip} outside asin domain, impulse skipped");
                    return false;
                }
                ip.asin()
            }
        }
    };

    let t = (rva + ia).tan();
    if !t.is_finite() {
        trace!("non-finite impact slope, impulse skipped");
        return false;
    }

    let mut denominator = (1.0 + t * t) * (1.0 + b.mass - a.mass);
    if denominator == 0.0 {
        denominator = DENOMINATOR_EPSILON;
    }

    let dv = -2.0 * ((b.vel.x - a.vel.x) + (b.vel.y - a.vel.y) * t) / denominator;
    let mass_diff = b.mass - a.mass;

    a.vel.x -= mass_diff * dv;
    a.vel.y -= t * mass_diff * dv;
    b.vel.x += dv;
    b.vel.y += t * dv;

    true
}

fn elastic_impulse(a: &mut Particle, b: &mut Particle, dx: f64, dy: f64, distance: f64) {
    let normal = if distance > 0.0 {
        DVec2::new(dx / distance, dy / distance)
    } else {
        DVec2::X
    };

    // Only approaching pairs exchange momentum.
    let approach = (a.vel - b.vel).dot(normal);
    if approach <= 0.0 {
        return;
    }

    let j = 2.0 * approach / (1.0 / a.mass + 1.0 / b.mass);
    a.vel -= normal * (j / a.mass);
    b.vel += normal * (j / b.mass);
}

fn separate(a: &mut Particle, b: &mut Particle, dx: f64, dy: f64, distance: f64) {
    let overlap = (a.radius + b.radius) - distance;
    let angle = dy.atan2(dx);
    let (sin, cos) = angle.sin_cos();

    a.pos.x -= overlap * cos / 2.0;
    a.pos.y -= overlap * sin / 2.0;
    b.pos.x += overlap * cos / 2.0;
    b.pos.y += overlap * sin / 2.0;
}
