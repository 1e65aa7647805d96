use crate::engine::Particle;

/// Move every particle along its velocity for `dt`.
///
/// Plain constant-velocity kinematics; balls only change velocity on contact.
pub fn advance(particles: &mut [Particle], dt: f64) {
    for particle in particles.iter_mut() {
        particle.advance(dt);
    }
}
