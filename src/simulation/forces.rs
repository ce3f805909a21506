//! Force contributors for the particle engine
//!
//! Defines the [`ForceGenerator`] trait, its concrete variants
//! (gravity, spring, buoyancy), and the [`ForceRegistry`] that pairs
//! generators with the particles they act upon and drives force
//! application once per step.

use crate::simulation::states::{NVec3, ParticleHandle, ParticleSet, Real};

/// Pure water has a density of 1000 kg per cubic meter.
pub const PURE_WATER_DENSITY: Real = 1000.0;

/// A source of force acting on a single particle.
///
/// Called once per registered (particle, generator) pair per step;
/// implementations must add to the particle's force accumulator, never
/// replace it. Generators hold their own parameters and do not own the
/// particles they act on.
pub trait ForceGenerator {
    fn update_force(&self, particles: &mut ParticleSet, target: ParticleHandle, dt: Real);
}

/// Constant gravitational acceleration applied as a force.
pub struct Gravity {
    pub acceleration: NVec3,
}

impl ForceGenerator for Gravity {
    fn update_force(&self, particles: &mut ParticleSet, target: ParticleHandle, _dt: Real) {
        let particle = particles.get_mut(target);

        // Immovable particles take no gravity.
        if !particle.has_finite_mass() {
            return;
        }

        let force = self.acceleration * particle.mass();
        particle.add_force(force);
    }
}

/// Hooke's-law spring anchored to another particle.
///
/// The spring pulls the target toward the anchor when stretched and
/// pushes it away when compressed. There is no self-damping, so this is
/// not suitable for stiff springs; large constants can blow up the
/// integration.
pub struct Spring {
    /// Particle at the opposite end of the spring.
    pub anchor: ParticleHandle,
    pub spring_constant: Real,
    pub rest_length: Real,
}

impl ForceGenerator for Spring {
    fn update_force(&self, particles: &mut ParticleSet, target: ParticleHandle, _dt: Real) {
        let anchor_position = particles.get(self.anchor).position();
        let particle = particles.get_mut(target);

        // Spring vector from the anchor to the target.
        let span = particle.position() - anchor_position;
        let length = span.norm();
        if length <= 0.0 {
            // Coincident endpoints leave no direction to act along.
            return;
        }

        // Signed Hooke's law: extension pulls toward the anchor,
        // compression pushes away from it.
        let magnitude = self.spring_constant * (length - self.rest_length);
        let force = span * (-magnitude / length);
        particle.add_force(force);
    }
}

/// Buoyancy for a plane of liquid parallel to the XZ plane.
///
/// Three regions by the particle's height against the liquid plane:
/// fully above produces no force, fully submerged produces the maximum
/// upward force `density * volume`, and the band in between blends the
/// two linearly.
pub struct Buoyancy {
    /// Submersion depth at which the object produces its maximum force.
    pub max_depth: Real,
    /// Volume of the object the force applies to.
    pub object_volume: Real,
    /// Height of the liquid plane above y = 0.
    pub liquid_height: Real,
    /// Density of the liquid, e.g. [`PURE_WATER_DENSITY`].
    pub liquid_density: Real,
}

impl ForceGenerator for Buoyancy {
    fn update_force(&self, particles: &mut ParticleSet, target: ParticleHandle, _dt: Real) {
        let particle = particles.get_mut(target);
        let depth = particle.position().y;

        // Fully out of the liquid?
        if depth >= self.liquid_height + self.max_depth {
            return;
        }

        let mut force = NVec3::zeros();

        // Fully submerged?
        if depth <= self.liquid_height - self.max_depth {
            force.y = self.liquid_density * self.object_volume;
            particle.add_force(force);
            return;
        }

        // Partly submerged: fraction runs from 0 at the surface boundary
        // to 1 at the fully-submerged boundary.
        let fraction = (self.liquid_height + self.max_depth - depth) / (2.0 * self.max_depth);
        force.y = self.liquid_density * self.object_volume * fraction;
        particle.add_force(force);
    }
}

// =========================================================================================
// Force-pair registry
// =========================================================================================

/// Identity of a generator registered in a [`ForceRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForceHandle(usize);

/// One (particle, generator) association.
struct ForcePair {
    particle: ParticleHandle,
    generator: ForceHandle,
}

/// Stores force generators and the particles they act upon.
///
/// Generators are registered once and addressed by [`ForceHandle`]; one
/// generator may serve any number of particles. Removing or clearing
/// pairs drops only the association, never a particle or a generator.
#[derive(Default)]
pub struct ForceRegistry {
    generators: Vec<Box<dyn ForceGenerator + Send + Sync>>,
    pairs: Vec<ForcePair>,
}

impl ForceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of a generator and return its handle.
    pub fn register(
        &mut self,
        generator: impl ForceGenerator + Send + Sync + 'static,
    ) -> ForceHandle {
        let handle = ForceHandle(self.generators.len());
        self.generators.push(Box::new(generator));
        handle
    }

    /// Register a (particle, generator) pair.
    pub fn add(&mut self, particle: ParticleHandle, generator: ForceHandle) {
        assert!(generator.0 < self.generators.len(), "unknown force generator");
        self.pairs.push(ForcePair { particle, generator });
    }

    /// Unregister a pair by exact identity match. No effect if the pair
    /// is not registered.
    pub fn remove(&mut self, particle: ParticleHandle, generator: ForceHandle) {
        self.pairs
            .retain(|pair| !(pair.particle == particle && pair.generator == generator));
    }

    /// Drop every pair at once, keeping the registered generators.
    pub fn clear(&mut self) {
        self.pairs.clear();
    }

    pub fn pair_count(&self) -> usize {
        self.pairs.len()
    }

    /// Ask every pair's generator to update the force on its particle.
    /// Each pair is visited exactly once; independent pairs must not
    /// rely on any ordering between them.
    pub fn update_forces(&self, particles: &mut ParticleSet, dt: Real) {
        for pair in &self.pairs {
            self.generators[pair.generator.0].update_force(particles, pair.particle, dt);
        }
    }
}
