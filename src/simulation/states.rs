//! Core state types for the particle simulation
//!
//! Defines the scalar/vector aliases, the `Particle` point mass with its
//! semi-implicit Euler integrator, and the `ParticleSet` arena that owns
//! every particle in a world. All cross-references between components
//! (force pairs, links, contacts) are `ParticleHandle` indices into the
//! arena rather than borrowed references.

use nalgebra::Vector3;

pub type Real = f64;
pub type NVec3 = Vector3<Real>;

/// Mass reported for immovable particles (inverse mass of zero).
pub const IMMOVABLE_MASS: Real = Real::MAX;

/// A point mass, the simplest object the engine can simulate.
///
/// Mass is stored inverted: an inverse mass of zero makes a particle
/// immovable (infinite mass), while zero mass itself is unrepresentable
/// and rejected by [`Particle::set_mass`].
#[derive(Debug, Clone)]
pub struct Particle {
    position: NVec3, // linear position in world space
    velocity: NVec3, // linear velocity in world space
    acceleration: NVec3, // constant acceleration, typically gravity
    accumulated_force: NVec3, // force accumulator, zeroed once per step
    damping: Real, // drag factor in [0, 1], applied as damping^dt
    inverse_mass: Real, // 1/mass; 0 means immovable
}

impl Default for Particle {
    fn default() -> Self {
        Self {
            position: NVec3::zeros(),
            velocity: NVec3::zeros(),
            acceleration: NVec3::zeros(),
            accumulated_force: NVec3::zeros(),
            damping: 1.0,
            inverse_mass: 1.0,
        }
    }
}

impl Particle {
    /// Unit-mass particle at rest at the origin with no drag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the particle forward in time by `dt` using semi-implicit
    /// Euler: the position update uses the pre-update velocity, then the
    /// velocity absorbs constant acceleration plus the accumulated force,
    /// then exponential drag is applied.
    ///
    /// No-op for immovable particles. `dt` must be positive; a
    /// non-positive step is a caller bug and panics.
    pub fn integrate(&mut self, dt: Real) {
        if self.inverse_mass <= 0.0 {
            return;
        }

        assert!(dt > 0.0, "integration step must be positive, got {dt}");

        // Position first, from the current velocity.
        self.position += self.velocity * dt;

        // Velocity from constant acceleration plus accumulated force.
        let mut final_acceleration = self.acceleration;
        final_acceleration += self.accumulated_force * self.inverse_mass;
        self.velocity += final_acceleration * dt;

        // Frame-rate-independent drag: damping^dt.
        self.velocity *= self.damping.powf(dt);
    }

    pub fn position(&self) -> NVec3 {
        self.position
    }

    pub fn set_position(&mut self, position: NVec3) {
        self.position = position;
    }

    /// Shift the position, used by interpenetration resolution.
    pub fn add_displacement(&mut self, displacement: NVec3) {
        self.position += displacement;
    }

    pub fn velocity(&self) -> NVec3 {
        self.velocity
    }

    pub fn set_velocity(&mut self, velocity: NVec3) {
        self.velocity = velocity;
    }

    /// Add to the velocity, used by impulse resolution.
    pub fn add_velocity(&mut self, velocity: NVec3) {
        self.velocity += velocity;
    }

    pub fn acceleration(&self) -> NVec3 {
        self.acceleration
    }

    pub fn set_acceleration(&mut self, acceleration: NVec3) {
        self.acceleration = acceleration;
    }

    /// Whether the particle can be moved by forces and impulses.
    pub fn has_finite_mass(&self) -> bool {
        self.inverse_mass > 0.0
    }

    /// Set the mass of a finite-mass particle. Zero mass is
    /// unrepresentable and panics; use [`Particle::set_inverse_mass`]
    /// with zero for an immovable particle instead.
    pub fn set_mass(&mut self, mass: Real) {
        assert!(mass != 0.0, "zero mass is unrepresentable");
        self.inverse_mass = 1.0 / mass;
    }

    /// The particle's mass, or [`IMMOVABLE_MASS`] when immovable.
    pub fn mass(&self) -> Real {
        if self.inverse_mass == 0.0 {
            IMMOVABLE_MASS
        } else {
            1.0 / self.inverse_mass
        }
    }

    pub fn set_inverse_mass(&mut self, inverse_mass: Real) {
        self.inverse_mass = inverse_mass;
    }

    pub fn inverse_mass(&self) -> Real {
        self.inverse_mass
    }

    /// Damping should be in [0, 1]: 1 leaves velocity untouched, smaller
    /// values bleed off energy introduced by integration error.
    pub fn set_damping(&mut self, damping: Real) {
        self.damping = damping;
    }

    pub fn damping(&self) -> Real {
        self.damping
    }

    pub fn accumulated_force(&self) -> NVec3 {
        self.accumulated_force
    }

    /// Add a force for the next integration step. Forces accumulate
    /// across a step; they never overwrite each other.
    pub fn add_force(&mut self, force: NVec3) {
        self.accumulated_force += force;
    }

    /// Zero the force accumulator. Must run exactly once per step,
    /// before any forces for that step are applied.
    pub fn clear_accumulated_forces(&mut self) {
        self.accumulated_force = NVec3::zeros();
    }
}

/// Index of a particle inside a [`ParticleSet`].
///
/// Handles stay valid because the arena only grows; using a handle from
/// a different set is a caller bug and panics on access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParticleHandle(usize);

impl ParticleHandle {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Arena owning every particle of a world.
#[derive(Debug, Default)]
pub struct ParticleSet {
    particles: Vec<Particle>,
}

impl ParticleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a particle and return its handle.
    pub fn add(&mut self, particle: Particle) -> ParticleHandle {
        let handle = ParticleHandle(self.particles.len());
        self.particles.push(particle);
        handle
    }

    pub fn get(&self, handle: ParticleHandle) -> &Particle {
        &self.particles[handle.0]
    }

    pub fn get_mut(&mut self, handle: ParticleHandle) -> &mut Particle {
        &mut self.particles[handle.0]
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Particle> {
        self.particles.iter_mut()
    }

    pub fn handles(&self) -> impl Iterator<Item = ParticleHandle> {
        (0..self.particles.len()).map(ParticleHandle)
    }

    /// Mutable access to one or two distinct particles at once, used by
    /// contact resolution. Panics if both handles name the same slot.
    pub fn get_pair_mut(
        &mut self,
        first: ParticleHandle,
        second: Option<ParticleHandle>,
    ) -> (&mut Particle, Option<&mut Particle>) {
        match second {
            None => (&mut self.particles[first.0], None),
            Some(second) => {
                assert_ne!(first.0, second.0, "pair references the same particle twice");
                if first.0 < second.0 {
                    let (low, high) = self.particles.split_at_mut(second.0);
                    (&mut low[first.0], Some(&mut high[0]))
                } else {
                    let (low, high) = self.particles.split_at_mut(first.0);
                    (&mut high[0], Some(&mut low[second.0]))
                }
            }
        }
    }
}
