//! Particle contacts and the iterative contact resolver
//!
//! A [`Contact`] is a resolvable penetration between one or two
//! particles: solving it applies an impulse along the contact normal and
//! displaces the particles out of interpenetration. The
//! [`ContactResolver`] repeatedly resolves the single worst contact
//! (lowest separating velocity) until none qualifies or its iteration
//! budget runs out.

use crate::simulation::states::{NVec3, ParticleHandle, ParticleSet, Real};

/// Two particles touching each other, or one particle touching
/// immovable scenery (second handle absent).
///
/// Contacts are transient: generated fresh each step into the world's
/// fixed-capacity buffer and consumed by the resolver.
#[derive(Debug, Clone)]
pub struct Contact {
    /// Particles in contact. The second is `None` for a contact against
    /// immovable scenery.
    pub particles: (ParticleHandle, Option<ParticleHandle>),
    /// Normal restitution coefficient at the point of contact,
    /// 0 (inelastic) to 1 (elastic).
    pub restitution: Real,
    /// Contact direction in world coordinates, unit length, pointing in
    /// the direction the first particle separates.
    pub normal: NVec3,
    /// Overlap depth; positive means the particles are interpenetrating.
    pub penetration: Real,
    /// Displacement applied to each particle during interpenetration
    /// resolution, recorded for inspection.
    pub displacements: [NVec3; 2],
}

impl Contact {
    pub fn new(
        first: ParticleHandle,
        second: Option<ParticleHandle>,
        normal: NVec3,
        penetration: Real,
        restitution: Real,
    ) -> Self {
        Self {
            particles: (first, second),
            restitution,
            normal,
            penetration,
            displacements: [NVec3::zeros(); 2],
        }
    }

    /// Relative velocity along the contact normal. Negative means the
    /// particles are approaching each other.
    pub fn separating_velocity(&self, particles: &ParticleSet) -> Real {
        let mut relative = particles.get(self.particles.0).velocity();
        if let Some(second) = self.particles.1 {
            relative -= particles.get(second).velocity();
        }
        relative.dot(&self.normal)
    }

    /// Relative constant acceleration along the contact normal.
    fn separating_acceleration(&self, particles: &ParticleSet) -> Real {
        let mut relative = particles.get(self.particles.0).acceleration();
        if let Some(second) = self.particles.1 {
            relative -= particles.get(second).acceleration();
        }
        relative.dot(&self.normal)
    }

    fn total_inverse_mass(&self, particles: &ParticleSet) -> Real {
        let mut total = particles.get(self.particles.0).inverse_mass();
        if let Some(second) = self.particles.1 {
            total += particles.get(second).inverse_mass();
        }
        total
    }

    /// Solve the contact: impulse first, then interpenetration.
    pub fn resolve(&mut self, particles: &mut ParticleSet, dt: Real) {
        self.resolve_velocity(particles, dt);
        self.resolve_interpenetration(particles, dt);
    }

    fn resolve_velocity(&mut self, particles: &mut ParticleSet, dt: Real) {
        let separating_velocity = self.separating_velocity(particles);

        // Already separating or at rest: no impulse required.
        if separating_velocity > 0.0 {
            return;
        }

        let target_velocity = -separating_velocity * self.restitution;

        // Resting-contact correction: take out the closing velocity that
        // was built purely by this step's constant acceleration, so
        // restitution cannot re-inject it as bounce and jitter a contact
        // held closed by gravity.
        let mut adjusted_velocity = separating_velocity;
        let separating_acceleration = self.separating_acceleration(particles);
        if separating_acceleration < 0.0 {
            adjusted_velocity += separating_acceleration * dt * self.restitution;

            // Do not remove more than was there to remove.
            if adjusted_velocity < 0.0 {
                adjusted_velocity = 0.0;
            }
        }

        let delta_velocity = target_velocity - adjusted_velocity;

        let total_inverse_mass = self.total_inverse_mass(particles);

        // Both particles immovable: nothing to do.
        if total_inverse_mass <= 0.0 {
            return;
        }

        // Impulse split between the particles in proportion to their
        // inverse masses, in opposite directions along the normal.
        let impulse = delta_velocity / total_inverse_mass;
        let impulse_per_inverse_mass = self.normal * impulse;

        let (first, second) = particles.get_pair_mut(self.particles.0, self.particles.1);
        let first_change = impulse_per_inverse_mass * first.inverse_mass();
        first.add_velocity(first_change);
        if let Some(second) = second {
            let second_change = impulse_per_inverse_mass * -second.inverse_mass();
            second.add_velocity(second_change);
        }
    }

    fn resolve_interpenetration(&mut self, particles: &mut ParticleSet, _dt: Real) {
        // No penetration: nothing to solve for.
        if self.penetration <= 0.0 {
            return;
        }

        let total_inverse_mass = self.total_inverse_mass(particles);

        // Both particles immovable: nothing to do.
        if total_inverse_mass <= 0.0 {
            return;
        }

        // Displacement split between the particles in proportion to
        // their inverse masses, in opposite directions along the normal.
        let move_per_inverse_mass = self.normal * (self.penetration / total_inverse_mass);

        let (first, second) = particles.get_pair_mut(self.particles.0, self.particles.1);
        self.displacements[0] = move_per_inverse_mass * first.inverse_mass();
        first.add_displacement(self.displacements[0]);
        match second {
            Some(second) => {
                self.displacements[1] = move_per_inverse_mass * -second.inverse_mass();
                second.add_displacement(self.displacements[1]);
            }
            None => {
                self.displacements[1] = NVec3::zeros();
            }
        }

        // The overlap has been moved out in full; without this the same
        // contact would keep qualifying and be displaced again on the
        // next resolver pass.
        self.penetration = 0.0;
    }
}

// =========================================================================================
// Contact resolver
// =========================================================================================

/// Iterative, worst-first contact resolver.
///
/// Gauss-Seidel-style relaxation rather than a simultaneous solve:
/// resolving one contact changes particle state shared by others, so
/// every iteration rescans the whole contact list before picking the
/// next contact to resolve.
#[derive(Debug)]
pub struct ContactResolver {
    max_iterations: usize,
    used_iterations: usize,
}

impl ContactResolver {
    pub fn new(max_iterations: usize) -> Self {
        Self {
            max_iterations,
            used_iterations: 0,
        }
    }

    pub fn set_max_iterations(&mut self, max_iterations: usize) {
        self.max_iterations = max_iterations;
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// Iterations consumed by the most recent [`resolve_contacts`] call.
    ///
    /// [`resolve_contacts`]: ContactResolver::resolve_contacts
    pub fn used_iterations(&self) -> usize {
        self.used_iterations
    }

    /// Resolve `contacts` in worst-first order until no contact is
    /// closing or penetrating, or the iteration budget is exhausted.
    pub fn resolve_contacts(
        &mut self,
        contacts: &mut [Contact],
        particles: &mut ParticleSet,
        dt: Real,
    ) {
        self.used_iterations = 0;

        while self.used_iterations < self.max_iterations {
            // Find the contact with the lowest (most negative)
            // separating velocity among those still closing or still
            // penetrating.
            let mut min_velocity = Real::MAX;
            let mut worst = contacts.len();
            for (index, contact) in contacts.iter().enumerate() {
                let separating_velocity = contact.separating_velocity(particles);
                if separating_velocity < min_velocity
                    && (separating_velocity < 0.0 || contact.penetration > 0.0)
                {
                    min_velocity = separating_velocity;
                    worst = index;
                }
            }

            // No qualifying contact left?
            if worst == contacts.len() {
                break;
            }

            contacts[worst].resolve(particles, dt);
            self.used_iterations += 1;
        }
    }
}
