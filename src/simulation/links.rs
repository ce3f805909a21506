//! Contact generators: cables and rods linking particle pairs
//!
//! A [`ContactGenerator`] inspects particle state and emits contacts
//! into the world's shared buffer when its constraint is violated. The
//! two concrete variants both constrain the distance between a pair of
//! particles: a [`Cable`] caps it (inequality) and a [`Rod`] pins it
//! (equality).

use crate::simulation::contact::Contact;
use crate::simulation::states::{NVec3, ParticleHandle, ParticleSet, Real};

/// Distance slack inside which a rod does not emit a contact.
pub const LENGTH_TOLERANCE: Real = 1.0e-4;

/// A source of zero or more contacts per step.
pub trait ContactGenerator {
    /// Generate new contacts into `contacts` and return how many were
    /// written. The buffer must have spare room for at least one entry;
    /// calling with a full buffer is a caller bug and panics.
    fn add_contacts(&self, particles: &ParticleSet, contacts: &mut Vec<Contact>) -> usize {
        assert!(
            contacts.capacity() > contacts.len(),
            "contact buffer must have room for at least one entry"
        );
        self.fill_contacts(particles, contacts)
    }

    /// See [`ContactGenerator::add_contacts`].
    fn fill_contacts(&self, particles: &ParticleSet, contacts: &mut Vec<Contact>) -> usize;
}

/// A pair of particles constrained together; the common part of cables
/// and rods.
#[derive(Debug, Clone, Copy)]
pub struct Link {
    pub first: ParticleHandle,
    pub second: ParticleHandle,
}

impl Link {
    pub fn new(first: ParticleHandle, second: ParticleHandle) -> Self {
        Self { first, second }
    }

    /// Current Euclidean distance between the two endpoints.
    pub fn current_length(&self, particles: &ParticleSet) -> Real {
        let delta = particles.get(self.first).position() - particles.get(self.second).position();
        delta.norm()
    }

    /// Unit vector from the first endpoint toward the second. This is
    /// the direction along which resolution shortens the link, so it is
    /// the contact normal for the taut/stretched case. The endpoints
    /// must not be coincident.
    fn axis(&self, particles: &ParticleSet) -> NVec3 {
        let delta = particles.get(self.second).position() - particles.get(self.first).position();
        delta.normalize()
    }
}

/// Inequality constraint: the particles may come as close as they like
/// but the cable stops them from straying further apart than
/// `max_length`.
pub struct Cable {
    pub link: Link,
    pub max_length: Real,
    /// Bounciness of the cable when it snaps taut.
    pub restitution: Real,
}

impl ContactGenerator for Cable {
    fn fill_contacts(&self, particles: &ParticleSet, contacts: &mut Vec<Contact>) -> usize {
        let length = self.link.current_length(particles);

        // Not overextended?
        if length <= self.max_length {
            return 0;
        }

        contacts.push(Contact::new(
            self.link.first,
            Some(self.link.second),
            self.link.axis(particles),
            length - self.max_length,
            self.restitution,
        ));
        1
    }
}

/// Equality constraint: the particles are held at an exact separation,
/// with no bounce in either direction.
pub struct Rod {
    pub link: Link,
    pub length: Real,
}

impl ContactGenerator for Rod {
    fn fill_contacts(&self, particles: &ParticleSet, contacts: &mut Vec<Contact>) -> usize {
        let current_length = self.link.current_length(particles);

        // Close enough to the target length?
        if (current_length - self.length).abs() < LENGTH_TOLERANCE {
            return 0;
        }

        // The normal flips between the stretched and compressed cases so
        // resolution always moves the endpoints back to the exact length.
        let axis = self.link.axis(particles);
        let (normal, penetration) = if current_length > self.length {
            (axis, current_length - self.length)
        } else {
            (-axis, self.length - current_length)
        };

        contacts.push(Contact::new(
            self.link.first,
            Some(self.link.second),
            normal,
            penetration,
            0.0, // no bounciness
        ));
        1
    }
}
