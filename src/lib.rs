pub mod simulation;
pub mod configuration;
pub mod benchmark;

pub use simulation::states::{Particle, ParticleHandle, ParticleSet, NVec3, Real, IMMOVABLE_MASS};
pub use simulation::forces::{
    Buoyancy, ForceGenerator, ForceHandle, ForceRegistry, Gravity, Spring, PURE_WATER_DENSITY,
};
pub use simulation::contact::{Contact, ContactResolver};
pub use simulation::links::{Cable, ContactGenerator, Link, Rod, LENGTH_TOLERANCE};
pub use simulation::world::World;
pub use simulation::scenario::Scenario;

pub use configuration::config::{
    ForceConfig, LinkConfig, ParticleConfig, ScenarioConfig, WorldConfig,
};

pub use benchmark::benchmark::{bench_resolve, bench_step};
