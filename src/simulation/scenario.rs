//! Build fully-initialized simulation scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces a runtime
//! [`Scenario`] containing:
//! - a populated [`World`] (particles, force pairs, link constraints)
//! - the fixed step size and total simulated time
//!
//! The scenario is consumed by the headless driver in `main`, which
//! ticks `World::run_physics` at the configured cadence.

use crate::configuration::config::{ForceConfig, LinkConfig, ParticleConfig, ScenarioConfig};
use crate::simulation::forces::{Buoyancy, Gravity, Spring};
use crate::simulation::links::{Cable, Link, Rod};
use crate::simulation::states::{NVec3, Particle, ParticleHandle, Real};
use crate::simulation::world::World;

/// A fully-initialized runtime simulation bundle.
pub struct Scenario {
    pub world: World,
    pub dt: Real,
    pub t_end: Real,
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> Self {
        let mut world = World::new(cfg.world.max_contacts, cfg.world.iterations);

        // Particles: map each `ParticleConfig` into the arena, keeping
        // the handles so forces and links can refer to them by index.
        let handles: Vec<ParticleHandle> = cfg
            .particles
            .iter()
            .map(|pc| world.particles_mut().add(build_particle(pc)))
            .collect();

        // Forces: register each generator once, then pair it with every
        // particle it acts upon.
        for force in cfg.forces {
            match force {
                ForceConfig::Gravity {
                    acceleration,
                    particles,
                } => {
                    let generator = world.force_registry_mut().register(Gravity {
                        acceleration: NVec3::from(acceleration),
                    });
                    for index in particles {
                        world.force_registry_mut().add(handles[index], generator);
                    }
                }
                ForceConfig::Spring {
                    anchor,
                    spring_constant,
                    rest_length,
                    particles,
                } => {
                    let generator = world.force_registry_mut().register(Spring {
                        anchor: handles[anchor],
                        spring_constant,
                        rest_length,
                    });
                    for index in particles {
                        world.force_registry_mut().add(handles[index], generator);
                    }
                }
                ForceConfig::Buoyancy {
                    max_depth,
                    object_volume,
                    liquid_height,
                    liquid_density,
                    particles,
                } => {
                    let generator = world.force_registry_mut().register(Buoyancy {
                        max_depth,
                        object_volume,
                        liquid_height,
                        liquid_density,
                    });
                    for index in particles {
                        world.force_registry_mut().add(handles[index], generator);
                    }
                }
            }
        }

        // Links: one contact generator per configured constraint.
        for link in cfg.links {
            match link {
                LinkConfig::Cable {
                    particles,
                    max_length,
                    restitution,
                } => {
                    world.add_contact_generator(Cable {
                        link: Link::new(handles[particles[0]], handles[particles[1]]),
                        max_length,
                        restitution,
                    });
                }
                LinkConfig::Rod { particles, length } => {
                    world.add_contact_generator(Rod {
                        link: Link::new(handles[particles[0]], handles[particles[1]]),
                        length,
                    });
                }
            }
        }

        Self {
            world,
            dt: cfg.world.dt,
            t_end: cfg.world.t_end,
        }
    }
}

fn build_particle(cfg: &ParticleConfig) -> Particle {
    let mut particle = Particle::new();
    particle.set_position(NVec3::from(cfg.position));
    particle.set_velocity(NVec3::from(cfg.velocity));
    particle.set_acceleration(NVec3::from(cfg.acceleration));
    particle.set_damping(cfg.damping);
    match cfg.mass {
        Some(mass) => particle.set_mass(mass),
        None => particle.set_inverse_mass(0.0), // immovable
    }
    particle
}
