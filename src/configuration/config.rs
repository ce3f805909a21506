//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! simulation scenario. A scenario consists of:
//!
//! - [`WorldConfig`]    – world settings (contact budget, step size, duration)
//! - [`ParticleConfig`] – initial state for each particle
//! - [`ForceConfig`]    – force generators and the particles they act upon
//! - [`LinkConfig`]     – cable/rod constraints between particle pairs
//! - [`ScenarioConfig`] – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//! An example scenario YAML matching these types:
//!
//! ```yaml
//! world:
//!   max_contacts: 16        # per-step contact buffer capacity
//!   iterations: null        # resolver budget; null -> 2x contacts per frame
//!   dt: 0.01                # fixed step size
//!   t_end: 5.0              # total simulated time
//!
//! particles:
//!   - position: [0.0, 5.0, 0.0]
//!     velocity: [0.0, 0.0, 0.0]
//!     mass: null            # null -> immovable (infinite mass)
//!   - position: [0.0, 3.0, 0.0]
//!     velocity: [0.0, 0.0, 0.0]
//!     mass: 2.0
//!     damping: 0.995
//!
//! forces:
//!   - type: gravity
//!     acceleration: [0.0, -9.81, 0.0]
//!     particles: [1]
//!
//! links:
//!   - type: cable
//!     particles: [0, 1]
//!     max_length: 2.5
//!     restitution: 0.3
//! ```
//!
//! Particle indices in `forces` and `links` refer to positions in the
//! `particles` list. The engine maps this configuration into its runtime
//! representation in `simulation::scenario`.

use serde::Deserialize;

use crate::simulation::forces::PURE_WATER_DENSITY;
use crate::simulation::states::Real;

/// World-level settings for a scenario.
#[derive(Deserialize, Debug)]
pub struct WorldConfig {
    pub max_contacts: usize, // per-step contact buffer capacity
    pub iterations: Option<usize>, // fixed resolver budget; absent -> 2x contacts each frame
    pub dt: Real, // fixed step size
    pub t_end: Real, // total simulated time
}

/// Initial state for a single particle.
#[derive(Deserialize, Debug)]
pub struct ParticleConfig {
    pub position: [Real; 3],
    #[serde(default)]
    pub velocity: [Real; 3],
    #[serde(default)]
    pub acceleration: [Real; 3], // constant acceleration, e.g. gravity applied directly
    pub mass: Option<Real>, // absent -> immovable (infinite mass)
    #[serde(default = "default_damping")]
    pub damping: Real,
}

fn default_damping() -> Real {
    1.0
}

/// A force generator plus the indices of the particles it acts upon.
#[derive(Deserialize, Debug)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ForceConfig {
    Gravity {
        acceleration: [Real; 3],
        particles: Vec<usize>,
    },
    Spring {
        anchor: usize, // particle at the fixed end of the spring
        spring_constant: Real,
        rest_length: Real,
        particles: Vec<usize>,
    },
    Buoyancy {
        max_depth: Real,
        object_volume: Real,
        liquid_height: Real,
        #[serde(default = "default_liquid_density")]
        liquid_density: Real,
        particles: Vec<usize>,
    },
}

fn default_liquid_density() -> Real {
    PURE_WATER_DENSITY
}

/// A two-particle constraint generating contacts when violated.
#[derive(Deserialize, Debug)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LinkConfig {
    Cable {
        particles: [usize; 2],
        max_length: Real,
        restitution: Real,
    },
    Rod {
        particles: [usize; 2],
        length: Real,
    },
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug)]
pub struct ScenarioConfig {
    pub world: WorldConfig,
    pub particles: Vec<ParticleConfig>,
    #[serde(default)]
    pub forces: Vec<ForceConfig>,
    #[serde(default)]
    pub links: Vec<LinkConfig>,
}
