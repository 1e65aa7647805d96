pub mod collision;
pub mod config;
pub mod diagnostics;
pub mod engine;
pub mod error;
pub mod integrator;
pub mod runtime;
pub mod stats;

pub use collision::{
    resolve_pair, resolve_pair_reference, resolve_wall, CollisionModel, ImpactAnglePolicy,
    PairOutcome,
};
pub use config::SimConfig;
pub use engine::{Particle, World};
pub use error::{Result, SimError};
pub use runtime::{
    build_world, create_particles, create_particles_with, run_container_experiment,
    run_simulation, step_world, CONTAINER_SHAPES,
};
pub use stats::SimulationStats;
