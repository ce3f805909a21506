//! World orchestration: one simulation step from forces to contacts
//!
//! The [`World`] owns the particle arena, the force-pair registry, the
//! contact resolver, the registered contact generators, and a contact
//! buffer allocated once at construction and reused (cleared, never
//! reallocated) every step.

use crate::simulation::contact::{Contact, ContactResolver};
use crate::simulation::forces::ForceRegistry;
use crate::simulation::links::ContactGenerator;
use crate::simulation::states::{ParticleSet, Real};

/// A particle simulator: steps every particle it manages through force
/// application, integration, contact generation, and contact resolution.
///
/// Single-threaded and non-reentrant; one [`World::run_physics`] call is
/// atomic from the caller's perspective.
pub struct World {
    particles: ParticleSet,
    registry: ForceRegistry,
    resolver: ContactResolver,
    /// Whether the resolver budget is recomputed each frame (twice the
    /// number of generated contacts) instead of being fixed.
    calculate_iterations: bool,
    contact_generators: Vec<Box<dyn ContactGenerator + Send + Sync>>,
    /// Per-step contact buffer, capacity fixed at construction.
    contacts: Vec<Contact>,
    max_contacts: usize,
}

impl World {
    /// Create a world that can handle at most `max_contacts` contacts
    /// per frame. When `iterations` is `None` the resolver budget is set
    /// each frame to twice the number of contacts generated.
    pub fn new(max_contacts: usize, iterations: Option<usize>) -> Self {
        Self {
            particles: ParticleSet::new(),
            registry: ForceRegistry::new(),
            resolver: ContactResolver::new(iterations.unwrap_or(0)),
            calculate_iterations: iterations.is_none(),
            contact_generators: Vec::new(),
            contacts: Vec::with_capacity(max_contacts),
            max_contacts,
        }
    }

    pub fn particles(&self) -> &ParticleSet {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut ParticleSet {
        &mut self.particles
    }

    pub fn force_registry(&self) -> &ForceRegistry {
        &self.registry
    }

    pub fn force_registry_mut(&mut self) -> &mut ForceRegistry {
        &mut self.registry
    }

    pub fn resolver(&self) -> &ContactResolver {
        &self.resolver
    }

    /// Register a contact generator. Generators run in registration
    /// order each step.
    pub fn add_contact_generator(
        &mut self,
        generator: impl ContactGenerator + Send + Sync + 'static,
    ) {
        self.contact_generators.push(Box::new(generator));
    }

    /// Prepare the world for a simulation frame by clearing the force
    /// accumulator of every particle. Forces for the frame can be
    /// applied once this has been called.
    pub fn start_frame(&mut self) {
        for particle in self.particles.iter_mut() {
            particle.clear_accumulated_forces();
        }
    }

    /// Run every registered contact generator, in registration order,
    /// into the shared buffer. Returns the number of contacts generated.
    ///
    /// Running out of buffer room is non-fatal: remaining generators are
    /// skipped for the rest of the step and their contacts silently
    /// dropped, leaving a physically incomplete but stable result.
    pub fn generate_contacts(&mut self) -> usize {
        self.contacts.clear();

        for generator in &self.contact_generators {
            if self.contacts.len() >= self.max_contacts {
                log::debug!(
                    "contact buffer full ({} contacts); contacts from remaining generators are dropped this step",
                    self.max_contacts
                );
                break;
            }
            generator.add_contacts(&self.particles, &mut self.contacts);
        }

        self.contacts.len()
    }

    /// Advance every particle forward in time by `dt`.
    pub fn integrate(&mut self, dt: Real) {
        for particle in self.particles.iter_mut() {
            particle.integrate(dt);
        }
    }

    /// Execute one full physics step: apply forces, integrate, generate
    /// contacts, and resolve them if any were generated.
    pub fn run_physics(&mut self, dt: Real) {
        self.registry.update_forces(&mut self.particles, dt);
        self.integrate(dt);

        let generated = self.generate_contacts();
        if generated > 0 {
            if self.calculate_iterations {
                self.resolver.set_max_iterations(generated * 2);
            }
            self.resolver
                .resolve_contacts(&mut self.contacts, &mut self.particles, dt);
        }
    }
}
